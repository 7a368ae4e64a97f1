mod config;
mod question;

pub use config::{
    QuestionCount, QuestionFormat, QuestionOrder, QuizConfig, QuizSource, DEFAULT_PER_SECTION,
};
pub use question::{Question, FALSE_ANSWER, NUM_OPTIONS, TRUE_ANSWER};
