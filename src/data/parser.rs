//! Question bank parsing.
//!
//! A bank is either a JSON array of question records or loosely structured
//! text:
//!
//! ```text
//! 1. ¿La IA es un campo de la informática?
//! Respuesta: V
//! Explicación: Así es.
//! ```
//!
//! Parsing never fails. Input that matches neither form yields no questions.

use std::sync::LazyLock;

use log::{debug, warn};
use regex::Regex;
use serde_json::Value;

use crate::models::{FALSE_ANSWER, Question, TRUE_ANSWER};

static QUESTION_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:\d+[.):]|[Pp]regunta\s+\d+)").expect("Invalid regex"));

static QUESTION_TEXT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:\d+[.):]|[Pp]regunta\s+\d+[:.)])\s*(.+)").expect("Invalid regex")
});

static ANSWER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^respuesta:?\s*(verdadero|falso|v|f)").expect("Invalid regex")
});

static EXPLANATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^explicaci[oó]n:?\s*(.+)").expect("Invalid regex"));

/// Parse a raw bank, preferring JSON and falling back to the line grammar.
pub fn parse_questions(raw: &str) -> Vec<Question> {
    if let Some(questions) = parse_json_array(raw) {
        debug!("Parsed {} questions from JSON", questions.len());
        return questions;
    }

    let questions = parse_structured_text(raw);
    debug!("Parsed {} questions from structured text", questions.len());
    questions
}

/// Read `raw` as a JSON array of question records.
///
/// Returns `None` when `raw` is not JSON or not an array. Elements that are
/// not question records are skipped; the rest are returned untouched.
pub fn parse_json_array(raw: &str) -> Option<Vec<Question>> {
    let Value::Array(items) = serde_json::from_str::<Value>(raw).ok()? else {
        return None;
    };

    let questions = items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value::<Question>(item) {
            Ok(question) => Some(question),
            Err(e) => {
                warn!("Skipping bank entry {}: {}", index, e);
                None
            }
        })
        .collect();

    Some(questions)
}

/// Question being assembled from consecutive lines.
#[derive(Default)]
struct Draft {
    text: Option<String>,
    correct_answer: Option<String>,
    explanation: Option<String>,
}

impl Draft {
    fn finish_into(self, questions: &mut Vec<Question>) {
        let Some(text) = self.text else {
            if self.correct_answer.is_some() || self.explanation.is_some() {
                debug!("Discarding answer/explanation lines with no question text");
            }
            return;
        };

        questions.push(Question {
            id: Some(questions.len() as u32 + 1),
            text,
            correct_answer: self.correct_answer,
            options: None,
            explanation: self.explanation,
        });
    }
}

/// Greedy line classifier; the first rule that matches a line wins.
fn parse_structured_text(raw: &str) -> Vec<Question> {
    let mut questions = Vec::new();
    let mut draft = Draft::default();

    for line in raw.lines().map(str::trim).filter(|line| !line.is_empty()) {
        if QUESTION_START.is_match(line) {
            std::mem::take(&mut draft).finish_into(&mut questions);
            if let Some(caps) = QUESTION_TEXT.captures(line) {
                draft.text = Some(caps[1].trim().to_string());
            }
        } else if let Some(caps) = ANSWER.captures(line) {
            let token = caps[1].to_uppercase();
            let answer = if token.starts_with('V') {
                TRUE_ANSWER
            } else {
                FALSE_ANSWER
            };
            draft.correct_answer = Some(answer.to_string());
        } else if let Some(caps) = EXPLANATION.captures(line) {
            draft.explanation = Some(caps[1].trim().to_string());
        } else if draft.text.is_none() {
            draft.text = Some(line.to_string());
        } else if draft.explanation.is_none() {
            draft.explanation = Some(line.to_string());
        } else {
            debug!("Dropping unclassified line: {}", line);
        }
    }

    draft.finish_into(&mut questions);
    questions
}
