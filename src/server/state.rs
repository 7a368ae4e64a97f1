//! Server state management.
//!
//! The context shared by all connections is read-only; each connection owns
//! its quiz run, so no locking is involved.

use std::fmt;
use std::net::IpAddr;

use tokio::sync::mpsc;
use uuid::Uuid;

use crate::app::{QuizRun, RunError};
use crate::llm::GeminiClient;
use crate::models::Question;
use crate::protocol::{QuestionPrompt, ServerMessage};

/// Everything connections share.
pub struct ServerContext {
    /// Loaded question bank.
    pub bank: Vec<Question>,
    /// LLM client, when an API key was configured.
    pub llm: Option<GeminiClient>,
}

impl ServerContext {
    pub fn new(bank: Vec<Question>, llm: Option<GeminiClient>) -> Self {
        Self { bank, llm }
    }
}

/// A request a connection could not honour.
#[derive(Debug)]
pub enum RequestError {
    /// No quiz has been started on this connection.
    NoQuiz,
    /// The source produced no questions.
    NoQuestions,
    /// The quiz run rejected the request.
    Run(RunError),
}

impl fmt::Display for RequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestError::NoQuiz => write!(f, "no quiz in progress, send StartQuiz first"),
            RequestError::NoQuestions => write!(f, "no questions were found or generated"),
            RequestError::Run(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for RequestError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RequestError::Run(e) => Some(e),
            _ => None,
        }
    }
}

impl From<RunError> for RequestError {
    fn from(err: RunError) -> Self {
        RequestError::Run(err)
    }
}

/// A single connected player.
pub struct ConnectionSession {
    /// Unique session ID.
    pub id: Uuid,
    /// Client IP address.
    pub ip_addr: IpAddr,
    /// Quiz in progress, if any.
    pub run: Option<QuizRun>,
    /// Channel to send messages to this client.
    sender: mpsc::UnboundedSender<ServerMessage>,
}

impl ConnectionSession {
    pub fn new(ip_addr: IpAddr, sender: mpsc::UnboundedSender<ServerMessage>) -> Self {
        Self {
            id: Uuid::new_v4(),
            ip_addr,
            run: None,
            sender,
        }
    }

    /// Send a message to this client.
    pub fn send(&self, msg: ServerMessage) -> bool {
        self.sender.send(msg).is_ok()
    }

    pub fn run(&self) -> Result<&QuizRun, RequestError> {
        self.run.as_ref().ok_or(RequestError::NoQuiz)
    }

    pub fn run_mut(&mut self) -> Result<&mut QuizRun, RequestError> {
        self.run.as_mut().ok_or(RequestError::NoQuiz)
    }

    /// Announce a freshly started run and send its first section.
    pub fn send_start(&self) -> Result<(), RequestError> {
        let run = self.run()?;
        self.send(ServerMessage::QuizStart {
            total_questions: run.total_questions(),
            total_sections: run.total_sections(),
            per_section: run.per_section(),
        });
        self.send_section()
    }

    /// Send the questions of the current section.
    pub fn send_section(&self) -> Result<(), RequestError> {
        let run = self.run()?;
        let questions = run
            .section_range()
            .map(|index| QuestionPrompt::new(index, &run.questions()[index]))
            .collect();

        self.send(ServerMessage::Section {
            index: run.current_section(),
            questions,
        });
        Ok(())
    }
}
