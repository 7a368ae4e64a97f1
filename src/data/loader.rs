use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::format::conform;
use crate::models::{Question, QuizConfig};
use crate::random::SeededRandom;
use crate::selection::select;

use super::builtin;
use super::parser::parse_questions;

pub const DEFAULT_BANK_PATH: &str = "preguntas.txt";

/// Error reading a question bank from disk.
#[derive(Debug)]
pub enum LoadError {
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io { path, source } => {
                write!(f, "failed to read {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io { source, .. } => Some(source),
        }
    }
}

/// Read and parse a bank file. An unparseable file yields an empty bank.
pub fn load_bank<P: AsRef<Path>>(path: P) -> Result<Vec<Question>, LoadError> {
    let path = path.as_ref();

    let raw = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!("Loaded bank {} ({} bytes)", path.display(), raw.len());

    Ok(parse_questions(&raw))
}

/// Like [`load_bank`], substituting the built-in bank when the file cannot be
/// read or holds no questions.
pub fn load_bank_or_builtin<P: AsRef<Path>>(path: P) -> Vec<Question> {
    let path = path.as_ref();

    match load_bank(path) {
        Ok(questions) if !questions.is_empty() => {
            info!("Bank {} has {} questions", path.display(), questions.len());
            questions
        }
        Ok(_) => {
            warn!("Bank {} has no questions, using the built-in bank", path.display());
            builtin::bank()
        }
        Err(e) => {
            warn!("{}, using the built-in bank", e);
            builtin::bank()
        }
    }
}

/// Pick the questions for one run from `bank`.
///
/// Selection follows `config.count`/`config.order`; every picked question is
/// then coerced to `config.format` and renumbered from 1 in presentation order.
pub fn prepare_questions(bank: &[Question], config: &QuizConfig, seed: u64) -> Vec<Question> {
    let mut rng = SeededRandom::new(seed);

    select(bank, config.count, config.order, seed)
        .into_iter()
        .zip(1..)
        .map(|(question, id)| conform(question, config.format, &mut rng).with_id(id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{QuestionCount, QuestionFormat, QuestionOrder};

    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("quiz-ia-{}-{}", std::process::id(), name));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_load_text_bank() {
        let path = temp_file("bank.txt", "1. Uno\nRespuesta: V\n2. Dos\nRespuesta: F\n");
        let bank = load_bank(&path).unwrap();
        assert_eq!(bank.len(), 2);
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = load_bank("/definitely/not/here.txt").unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.txt"));
    }

    #[test]
    fn test_fallback_to_builtin() {
        assert_eq!(load_bank_or_builtin("/definitely/not/here.txt").len(), 30);

        let path = temp_file("empty.txt", "   \n");
        assert_eq!(load_bank_or_builtin(&path).len(), 30);
        fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_prepare_renumbers_and_coerces() {
        let bank = builtin::bank();
        let config = QuizConfig {
            format: QuestionFormat::MultipleChoice,
            count: QuestionCount::Limit(4),
            order: QuestionOrder::Random,
            ..QuizConfig::default()
        };

        let questions = prepare_questions(&bank, &config, 42);
        assert_eq!(questions.len(), 4);
        assert!(questions.iter().all(Question::is_multiple_choice));
        let ids: Vec<_> = questions.iter().map(|q| q.id).collect();
        assert_eq!(ids, vec![Some(1), Some(2), Some(3), Some(4)]);

        assert_eq!(questions, prepare_questions(&bank, &config, 42));
    }

    #[test]
    fn test_prepare_sequential_true_false() {
        let bank = builtin::bank();
        let config = QuizConfig {
            count: QuestionCount::All,
            order: QuestionOrder::Sequential,
            ..QuizConfig::default()
        };

        let questions = prepare_questions(&bank, &config, 7);
        assert_eq!(questions, bank);
    }
}
