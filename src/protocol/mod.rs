mod messages;

pub use messages::{
    AnswerResult, ClientMessage, QuestionPrompt, ServerMessage, DEFAULT_PORT,
};
