//! Single-page chat over a locally hosted language model.
//!
//! A [`TurnController`] takes the user's text together with the current
//! [`ConversationHistory`], asks a [`CompletionProvider`] for a reply and
//! hands back the updated history and its rendered transcript.
//! [`ChatServer`] puts an HTTP page in front of it.

pub mod args;
pub mod config;
mod controller;
mod conversation;
mod history;
pub mod logger;
mod ollama_provider;
mod provider;
pub mod server;
mod shutdown;
pub mod turn;

pub use controller::{Submission, TurnController, TurnError, normalize_reply};
pub use conversation::Conversation;
pub use history::{ConversationHistory, HISTORY_CAPACITY};
pub use ollama_provider::{OllamaProvider, StreamInterrupted};
pub use provider::{CompletionProvider, EchoProvider};
pub use server::ChatServer;
pub use shutdown::shutdown_signal;
