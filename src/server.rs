use axum::{
    Json, Router,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;

use crate::controller::{Submission, TurnController};
use crate::history::ConversationHistory;

const INDEX: &str = include_str!("index.html");

/// Body of `POST /chat`.
#[derive(Debug, Default, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub store: ConversationHistory,
}

/// Successful reply to `POST /chat`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub display: String,
    pub store: ConversationHistory,
}

/// HTTP front end for a [`TurnController`].
///
/// The router serves two routes:
/// - `/` the chat page.
/// - `/chat` accepting the message and the page's stored history, returning
///   the updated history and transcript.
///
/// History lives with the client; the server only holds the controller.
pub struct ChatServer {
    controller: TurnController,
}

impl ChatServer {
    pub fn new(controller: TurnController) -> Self {
        Self { controller }
    }

    /// Build an [`axum::Router`] exposing the page and the chat endpoint.
    pub fn router(self: Arc<Self>) -> Router {
        Router::new().route("/", get(Self::index)).route(
            "/chat",
            post(move |Json(req): Json<ChatRequest>| {
                let server = self.clone();
                async move { server.chat(req).await }
            }),
        )
    }

    async fn index() -> impl IntoResponse {
        Html(INDEX)
    }

    async fn chat(&self, req: ChatRequest) -> Response {
        match self.controller.submit(req.message.as_deref(), req.store).await {
            Ok(Submission::Updated { display, history }) => Json(ChatResponse {
                display,
                store: history,
            })
            .into_response(),
            Ok(Submission::NoUpdate) => StatusCode::NO_CONTENT.into_response(),
            Err(e) => {
                tracing::warn!(error = %e, "chat turn failed");
                (
                    StatusCode::BAD_GATEWAY,
                    Json(serde_json::json!({ "error": e.to_string() })),
                )
                    .into_response()
            }
        }
    }
}

/// Bind `addr` and serve until a shutdown signal arrives.
pub async fn serve(server: Arc<ChatServer>, addr: SocketAddr) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(addr = %listener.local_addr()?, "serving chat");
    axum::serve(listener, server.router())
        .with_graceful_shutdown(crate::shutdown_signal())
        .await?;
    Ok(())
}
