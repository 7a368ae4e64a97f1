//! Protocol messages for client-server communication.
//!
//! All messages are serialized as JSON over WebSocket.

use serde::{Deserialize, Serialize};

use crate::feedback::Score;
use crate::models::{Question, QuizConfig};

/// Messages sent from client to server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ClientMessage {
    /// Start (or replace) the quiz for this connection.
    StartQuiz {
        #[serde(default)]
        config: QuizConfig,
        /// Seed for selection; the server picks one from the clock if absent.
        #[serde(default)]
        seed: Option<u64>,
    },

    /// Answer one question of the current section.
    Answer {
        question_index: usize,
        answer: String,
    },

    /// Hand in the current section.
    SubmitSection,

    /// Move on after reading a section's feedback.
    NextSection,

    /// Start the same questions over.
    Restart,
}

/// Messages sent from server to client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ServerMessage {
    /// Connection accepted, waiting for StartQuiz.
    ConnectionAck,

    /// Quiz is starting.
    QuizStart {
        total_questions: usize,
        total_sections: usize,
        per_section: usize,
    },

    /// Questions of the section to answer now.
    Section {
        index: usize,
        questions: Vec<QuestionPrompt>,
    },

    /// Feedback on a finished (non-final) section.
    SectionFeedback {
        index: usize,
        score: Score,
        feedback: String,
    },

    /// Quiz complete with results.
    QuizResults {
        score: Score,
        answers: Vec<AnswerResult>,
    },

    /// The last request could not be honoured.
    Error { reason: String },

    /// Server is shutting down.
    ServerClosing,
}

/// A question as shown to the player, without its answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionPrompt {
    /// Position in the whole quiz, used when answering.
    pub index: usize,
    pub id: Option<u32>,
    pub text: String,
    pub options: Option<Vec<String>>,
}

impl QuestionPrompt {
    pub fn new(index: usize, question: &Question) -> Self {
        Self {
            index,
            id: question.id,
            text: question.text.clone(),
            options: question.options.clone(),
        }
    }
}

/// Result for a single question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerResult {
    pub question_index: usize,
    pub question_text: String,
    pub your_answer: Option<String>,
    pub correct_answer: Option<String>,
    pub is_correct: bool,
    pub options: Option<Vec<String>>,
    pub explanation: Option<String>,
}

/// Default server port.
pub const DEFAULT_PORT: u16 = 8712;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{QuestionFormat, QuizSource};

    #[test]
    fn test_message_serialization() {
        let msg = ClientMessage::SubmitSection;
        let json = serde_json::to_string(&msg).unwrap();
        assert_eq!(json, r#"{"type":"SubmitSection"}"#);

        let msg = ServerMessage::QuizStart {
            total_questions: 25,
            total_sections: 5,
            per_section: 5,
        };
        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains("\"type\":\"QuizStart\""));
    }

    #[test]
    fn test_start_quiz_defaults() {
        let msg: ClientMessage = serde_json::from_str(r#"{"type":"StartQuiz"}"#).unwrap();
        let ClientMessage::StartQuiz { config, seed } = msg else {
            panic!("expected StartQuiz");
        };
        assert_eq!(config, QuizConfig::default());
        assert_eq!(seed, None);

        let msg: ClientMessage = serde_json::from_str(
            r#"{"type":"StartQuiz","config":{"source":"ai","format":"multiplechoice","count":"all"},"seed":7}"#,
        )
        .unwrap();
        let ClientMessage::StartQuiz { config, seed } = msg else {
            panic!("expected StartQuiz");
        };
        assert_eq!(config.source, QuizSource::Ai);
        assert_eq!(config.format, QuestionFormat::MultipleChoice);
        assert_eq!(seed, Some(7));
    }

    #[test]
    fn test_prompt_hides_answer() {
        let question = Question::true_false("Secreto", true).with_explanation("Porque sí");
        let json = serde_json::to_string(&QuestionPrompt::new(0, &question)).unwrap();
        assert!(json.contains("Secreto"));
        assert!(!json.contains("correct"));
        assert!(!json.contains("Porque"));
    }
}
