//! Quiz server module.
//!
//! Serves sectioned quizzes over WebSocket, one independent run per connection.

mod server;
mod state;

pub use server::{run, serve};
pub use state::ServerContext;
