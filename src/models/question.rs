use serde::{Deserialize, Serialize};

/// Answer token for a true statement.
pub const TRUE_ANSWER: &str = "V";
/// Answer token for a false statement.
pub const FALSE_ANSWER: &str = "F";
/// Number of options a multiple-choice question carries.
pub const NUM_OPTIONS: usize = 4;

/// A single quiz item, either true/false or multiple choice.
///
/// Field names follow the bank file format (`correctAnswer`), and absent
/// optionals are left out when serializing so a parsed bank round-trips.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correct_answer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

impl Question {
    /// Build a true/false question.
    pub fn true_false(text: impl Into<String>, is_true: bool) -> Self {
        let answer = if is_true { TRUE_ANSWER } else { FALSE_ANSWER };
        Self {
            id: None,
            text: text.into(),
            correct_answer: Some(answer.to_string()),
            options: None,
            explanation: None,
        }
    }

    pub fn with_explanation(mut self, explanation: impl Into<String>) -> Self {
        self.explanation = Some(explanation.into());
        self
    }

    pub fn with_id(mut self, id: u32) -> Self {
        self.id = Some(id);
        self
    }

    /// True when the question has no options and a "V"/"F" answer.
    pub fn is_true_false(&self) -> bool {
        self.options.is_none()
            && matches!(self.correct_answer.as_deref(), Some(TRUE_ANSWER | FALSE_ANSWER))
    }

    /// True when the question has exactly four options and its answer is one of them.
    pub fn is_multiple_choice(&self) -> bool {
        match (&self.options, &self.correct_answer) {
            (Some(options), Some(answer)) => {
                options.len() == NUM_OPTIONS && options.iter().any(|o| o == answer)
            }
            _ => false,
        }
    }
}
