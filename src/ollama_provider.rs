use crate::config::LlmOptions;
use crate::conversation::Conversation;
use crate::provider::CompletionProvider;
use anyhow::Context;
use async_trait::async_trait;
use futures::stream::BoxStream;
use futures::{StreamExt, TryStreamExt};
use ollama_rs::{
    Ollama,
    generation::chat::{ChatMessage, ChatMessageResponseStream, request::ChatMessageRequest},
    models::ModelOptions,
};
use reqwest::Client;
use tokio::sync::Mutex;
use url::Url;

/// Build a chat request carrying the configured generation options.
fn build_request(
    model: &str,
    messages: Vec<ChatMessage>,
    opts: &LlmOptions,
) -> ChatMessageRequest {
    let options = ModelOptions::default()
        .temperature(opts.temperature)
        .num_ctx(opts.num_ctx)
        .num_predict(opts.max_tokens)
        .stop(opts.stop.clone());
    ChatMessageRequest::new(model.to_string(), messages).options(options)
}

/// Raised when the response stream breaks off before the model is done.
#[derive(Debug, thiserror::Error)]
#[error("ollama response stream interrupted")]
pub struct StreamInterrupted;

/// Map an Ollama response stream into text fragments.
fn map_stream(
    stream: ChatMessageResponseStream,
) -> BoxStream<'static, Result<String, StreamInterrupted>> {
    let mapped = stream.map(|res| match res {
        Ok(resp) => {
            let tok = resp.message.content;
            tracing::trace!(%tok, "llm token");
            Ok(tok)
        }
        Err(e) => {
            tracing::error!(?e, "ollama stream error");
            Err(StreamInterrupted)
        }
    });
    Box::pin(mapped)
}

/// [`CompletionProvider`] backed by a local Ollama server.
///
/// The provider remembers every completed exchange and replays the most
/// recent ones with each request, so callers only pass the newest input.
pub struct OllamaProvider {
    client: Ollama,
    model: String,
    options: LlmOptions,
    memory: Mutex<Conversation>,
}

impl OllamaProvider {
    pub fn new(client: Ollama, model: impl Into<String>, options: LlmOptions) -> Self {
        let memory = Conversation::new(options.system_prompt.clone(), options.memory_window);
        Self {
            client,
            model: model.into(),
            options,
            memory: Mutex::new(memory),
        }
    }

    /// Connect to the server at `base_url`, e.g. `http://localhost:11434`.
    pub fn connect(
        base_url: &str,
        model: impl Into<String>,
        options: LlmOptions,
    ) -> anyhow::Result<Self> {
        let url = Url::parse(base_url).with_context(|| format!("invalid llm url {base_url}"))?;
        let host = url
            .host_str()
            .with_context(|| format!("no host in llm url {base_url}"))?;
        let port = url
            .port_or_known_default()
            .with_context(|| format!("no port in llm url {base_url}"))?;
        let http = Client::builder().pool_max_idle_per_host(10).build()?;
        let client = Ollama::new_with_client(format!("{}://{}", url.scheme(), host), port, http);
        Ok(Self::new(client, model, options))
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Number of messages currently remembered.
    pub async fn remembered(&self) -> usize {
        self.memory.lock().await.len()
    }
}

#[async_trait]
impl CompletionProvider for OllamaProvider {
    async fn predict(
        &self,
        input: &str,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        let mut memory = self.memory.lock().await;
        let req = build_request(&self.model, memory.prompt(input), &self.options);
        let stream = self.client.send_chat_messages_stream(req).await?;
        let fragments: Vec<String> = map_stream(stream).try_collect().await?;
        let reply = fragments.concat().trim().to_string();
        tracing::debug!(%reply, "llm full response");
        memory.push_exchange(input, reply.clone());
        Ok(reply)
    }
}
