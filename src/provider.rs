use async_trait::async_trait;

/// Something that produces a reply for a line of user text.
///
/// Implementations own whatever memory of earlier turns they need; callers
/// only ever pass the newest input.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn predict(&self, input: &str)
    -> Result<String, Box<dyn std::error::Error + Send + Sync>>;
}

/// Offline provider that repeats the input back.
#[derive(Debug, Clone, Default)]
pub struct EchoProvider;

#[async_trait]
impl CompletionProvider for EchoProvider {
    async fn predict(
        &self,
        input: &str,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        let reply = format!("Echo: {input}");
        tracing::debug!(%reply, "echo reply");
        Ok(reply)
    }
}
