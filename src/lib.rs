//! # quiz-ia
//!
//! Sectioned true/false and multiple-choice quizzes, drawn reproducibly from a
//! question bank or generated with the Gemini API, served over WebSocket.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use quiz_ia::{load_bank, prepare_questions, QuizConfig, QuizError};
//!
//! fn main() -> Result<(), QuizError> {
//!     // Load questions from a plain text bank
//!     let bank = load_bank("preguntas.txt")?;
//!
//!     // Same seed, same questions in the same order
//!     let questions = prepare_questions(&bank, &QuizConfig::default(), 42);
//!     println!("{} questions", questions.len());
//!
//!     Ok(())
//! }
//! ```

pub mod app;
pub mod config;
pub mod data;
pub mod feedback;
pub mod format;
pub mod generator;
pub mod llm;
mod models;
pub mod protocol;
pub mod random;
pub mod selection;
pub mod server;

use std::io;

pub use app::{QuizRun, RunError, RunState, SectionOutcome};
pub use config::ServerConfig;
pub use data::{load_bank, load_bank_or_builtin, parse_questions, prepare_questions, LoadError};
pub use feedback::Score;
pub use generator::generate_questions;
pub use llm::{GeminiClient, GeminiConfig, LlmError};
pub use models::{
    Question, QuestionCount, QuestionFormat, QuestionOrder, QuizConfig, QuizSource,
};
pub use random::{RandomSource, SeededRandom};
pub use selection::select;

/// Error type for quiz operations.
#[derive(Debug)]
pub enum QuizError {
    /// Error loading questions from file.
    Load(LoadError),
    /// IO error while serving or printing.
    Io(io::Error),
    /// Error talking to the language model.
    Llm(LlmError),
    /// Error encoding output.
    Json(serde_json::Error),
}

impl std::fmt::Display for QuizError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuizError::Load(e) => write!(f, "Failed to load questions: {}", e),
            QuizError::Io(e) => write!(f, "IO error: {}", e),
            QuizError::Llm(e) => write!(f, "Language model error: {}", e),
            QuizError::Json(e) => write!(f, "JSON error: {}", e),
        }
    }
}

impl std::error::Error for QuizError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            QuizError::Load(e) => Some(e),
            QuizError::Io(e) => Some(e),
            QuizError::Llm(e) => Some(e),
            QuizError::Json(e) => Some(e),
        }
    }
}

impl From<LoadError> for QuizError {
    fn from(err: LoadError) -> Self {
        QuizError::Load(err)
    }
}

impl From<io::Error> for QuizError {
    fn from(err: io::Error) -> Self {
        QuizError::Io(err)
    }
}

impl From<LlmError> for QuizError {
    fn from(err: LlmError) -> Self {
        QuizError::Llm(err)
    }
}

impl From<serde_json::Error> for QuizError {
    fn from(err: serde_json::Error) -> Self {
        QuizError::Json(err)
    }
}
