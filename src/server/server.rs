//! WebSocket server implementation.

use std::net::SocketAddr;
use std::sync::Arc;

use futures_util::{SinkExt, StreamExt};
use log::{debug, error, info, warn};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinSet;
use tokio_tungstenite::tungstenite::Message;

use crate::app::{QuizRun, SectionOutcome};
use crate::config::{clock_seed, gemini_client, ServerConfig};
use crate::data::{load_bank_or_builtin, prepare_questions};
use crate::feedback::{self, section_feedback};
use crate::generator::generate_questions;
use crate::models::{QuizConfig, QuizSource};
use crate::protocol::{ClientMessage, ServerMessage};
use crate::QuizError;

use super::state::{ConnectionSession, RequestError, ServerContext};

/// Shared server context.
type SharedContext = Arc<ServerContext>;

/// Run the quiz server until Ctrl-C.
pub async fn run(config: ServerConfig) -> Result<(), QuizError> {
    let bank = load_bank_or_builtin(&config.bank_path);
    info!("Loaded {} questions", bank.len());

    let llm = gemini_client(config.gemini)?;
    match &llm {
        Some(client) => info!("Using Gemini model {}", client.config().model),
        None => info!("No Gemini API key configured, using local questions and feedback"),
    }

    let context = Arc::new(ServerContext::new(bank, llm));

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let server = tokio::spawn(serve(listener, context, shutdown_rx));

    tokio::signal::ctrl_c().await?;
    info!("Shutting down");
    let _ = shutdown_tx.send(true);

    if let Err(e) = server.await {
        error!("Server task failed: {}", e);
    }

    Ok(())
}

/// Accept connections until `shutdown` flips, then wait for them to close.
pub async fn serve(
    listener: TcpListener,
    context: SharedContext,
    mut shutdown: watch::Receiver<bool>,
) {
    let mut connections = JoinSet::new();

    loop {
        tokio::select! {
            accepted = listener.accept() => match accepted {
                Ok((stream, addr)) => {
                    connections.spawn(handle_connection(
                        stream,
                        addr,
                        Arc::clone(&context),
                        shutdown.clone(),
                    ));
                }
                Err(e) => {
                    warn!("Failed to accept connection: {}", e);
                }
            },
            Some(_) = connections.join_next(), if !connections.is_empty() => {}
            _ = shutdown.changed() => break,
        }
    }

    while connections.join_next().await.is_some() {}
}

/// Handle a single WebSocket connection.
async fn handle_connection(
    stream: TcpStream,
    addr: SocketAddr,
    context: SharedContext,
    mut shutdown: watch::Receiver<bool>,
) {
    // Upgrade to WebSocket
    let ws_stream = match tokio_tungstenite::accept_async(stream).await {
        Ok(ws) => ws,
        Err(e) => {
            warn!("WebSocket handshake with {} failed: {}", addr, e);
            return;
        }
    };

    let (mut ws_sender, mut ws_receiver) = ws_stream.split();

    // Create channel for sending messages to this client
    let (tx, mut rx) = mpsc::unbounded_channel::<ServerMessage>();

    // Forward messages from the channel to the socket until every sender is gone
    let send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            let json = match serde_json::to_string(&msg) {
                Ok(json) => json,
                Err(e) => {
                    error!("Failed to encode {:?}: {}", msg, e);
                    continue;
                }
            };
            if ws_sender.send(Message::Text(json.into())).await.is_err() {
                break;
            }
        }
        let _ = ws_sender.close().await;
    });

    let mut session = ConnectionSession::new(addr.ip(), tx);
    info!("Session {} connected from {}", session.id, session.ip_addr);
    session.send(ServerMessage::ConnectionAck);

    // Process incoming messages
    loop {
        let msg = tokio::select! {
            msg = ws_receiver.next() => msg,
            _ = shutdown.changed() => {
                session.send(ServerMessage::ServerClosing);
                break;
            }
        };

        let text = match msg {
            Some(Ok(Message::Text(text))) => text.to_string(),
            Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
            Some(Ok(_)) => continue,
        };

        let client_msg: ClientMessage = match serde_json::from_str(&text) {
            Ok(m) => m,
            Err(e) => {
                debug!("Session {} sent an unreadable message: {}", session.id, e);
                session.send(ServerMessage::Error {
                    reason: format!("invalid message: {}", e),
                });
                continue;
            }
        };

        if let Err(e) = handle_client_message(&mut session, client_msg, &context).await {
            session.send(ServerMessage::Error {
                reason: e.to_string(),
            });
        }
    }

    info!("Session {} disconnected", session.id);

    // Dropping the session closes the channel, letting the forwarder flush and exit
    drop(session);
    let _ = send_task.await;
}

/// Handle a single client message.
async fn handle_client_message(
    session: &mut ConnectionSession,
    msg: ClientMessage,
    context: &ServerContext,
) -> Result<(), RequestError> {
    match msg {
        ClientMessage::StartQuiz { config, seed } => {
            handle_start(session, config, seed, context).await
        }
        ClientMessage::Answer {
            question_index,
            answer,
        } => session.run_mut()?.record_answer(question_index, answer).map_err(Into::into),
        ClientMessage::SubmitSection => handle_submit(session, context).await,
        ClientMessage::NextSection => {
            session.run_mut()?.next_section()?;
            session.send_section()
        }
        ClientMessage::Restart => {
            session.run_mut()?.restart();
            session.send_start()
        }
    }
}

/// Handle a StartQuiz message.
async fn handle_start(
    session: &mut ConnectionSession,
    config: QuizConfig,
    seed: Option<u64>,
    context: &ServerContext,
) -> Result<(), RequestError> {
    let seed = seed.unwrap_or_else(clock_seed);

    let questions = match config.source {
        QuizSource::Predefined => prepare_questions(&context.bank, &config, seed),
        QuizSource::Ai => {
            generate_questions(context.llm.as_ref(), config.count, config.format, seed).await
        }
    };

    if questions.is_empty() {
        return Err(RequestError::NoQuestions);
    }

    info!(
        "Session {} started a {:?} quiz: {} questions, format {}, seed {}",
        session.id,
        config.source,
        questions.len(),
        config.format,
        seed
    );

    session.run = Some(QuizRun::new(questions, config.per_section));
    session.send_start()
}

/// Handle a SubmitSection message.
async fn handle_submit(
    session: &mut ConnectionSession,
    context: &ServerContext,
) -> Result<(), RequestError> {
    let outcome = session.run_mut()?.submit_section()?;

    match outcome {
        SectionOutcome::Feedback {
            section,
            questions,
            answers,
        } => {
            let score = feedback::score(&questions, &answers);
            let feedback = section_feedback(context.llm.as_ref(), &questions, &answers).await;
            session.send(ServerMessage::SectionFeedback {
                index: section,
                score,
                feedback,
            });
        }
        SectionOutcome::Finished => {
            let run = session.run()?;
            info!(
                "Session {} finished with {}/{}",
                session.id,
                run.score().correct,
                run.total_questions()
            );
            session.send(ServerMessage::QuizResults {
                score: run.score(),
                answers: run.results(),
            });
        }
    }
    Ok(())
}
