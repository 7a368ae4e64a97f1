pub mod builtin;
mod loader;
mod parser;

pub use loader::{
    load_bank, load_bank_or_builtin, prepare_questions, LoadError, DEFAULT_BANK_PATH,
};
pub use parser::{parse_json_array, parse_questions};
