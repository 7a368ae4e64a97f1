//! Access to the generative language model.

mod gemini;
pub mod prompts;
#[cfg(test)]
pub(crate) mod stub;

pub use gemini::{
    GeminiClient, GeminiConfig, LlmError, DEFAULT_BASE_URL, DEFAULT_MAX_OUTPUT_TOKENS,
    DEFAULT_MODEL, DEFAULT_TEMPERATURE, DEFAULT_TIMEOUT,
};
