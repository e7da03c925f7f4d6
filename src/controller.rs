use crate::history::ConversationHistory;
use crate::provider::CompletionProvider;
use crate::turn::{Turn, record};
use std::sync::Arc;

/// Errors returned by [`TurnController::submit`].
#[derive(Debug, thiserror::Error)]
pub enum TurnError {
    #[error("completion provider failed: {0}")]
    Provider(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Outcome of a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// The input was empty; the caller should keep what it displays.
    NoUpdate,
    /// A turn was recorded.
    Updated {
        display: String,
        history: ConversationHistory,
    },
}

/// Terminate a non-empty reply with a period unless it already ends a sentence.
///
/// # Examples
///
/// ```
/// use tinychat::normalize_reply;
///
/// assert_eq!(normalize_reply("Hello".into()), "Hello.");
/// assert_eq!(normalize_reply("Hello!".into()), "Hello!");
/// assert_eq!(normalize_reply(String::new()), "");
/// ```
pub fn normalize_reply(mut reply: String) -> String {
    if let Some(last) = reply.chars().last() {
        if !matches!(last, '.' | '!' | '?') {
            reply.push('.');
        }
    }
    reply
}

/// Turns user input into a recorded exchange.
///
/// The controller holds no history of its own: the caller passes the current
/// [`ConversationHistory`] in and gets the updated one back.
#[derive(Clone)]
pub struct TurnController {
    provider: Arc<dyn CompletionProvider>,
}

impl TurnController {
    pub fn new(provider: Arc<dyn CompletionProvider>) -> Self {
        Self { provider }
    }

    /// Ask the provider for a reply to `user_text` and record the turn.
    ///
    /// Absent or empty input returns [`Submission::NoUpdate`] without
    /// calling the provider.
    pub async fn submit(
        &self,
        user_text: Option<&str>,
        mut history: ConversationHistory,
    ) -> Result<Submission, TurnError> {
        let Some(text) = user_text.filter(|t| !t.is_empty()) else {
            tracing::debug!("empty input ignored");
            return Ok(Submission::NoUpdate);
        };
        let reply = self
            .provider
            .predict(text)
            .await
            .map_err(TurnError::Provider)?;
        let reply = normalize_reply(reply);
        history.append(record(&Turn::user(text), &Turn::assistant(reply)));
        tracing::debug!(turns = history.len(), "turn recorded");
        Ok(Submission::Updated {
            display: history.render(),
            history,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Fixed {
        reply: &'static str,
        calls: AtomicUsize,
    }

    impl Fixed {
        fn new(reply: &'static str) -> Arc<Self> {
            Arc::new(Self {
                reply,
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl CompletionProvider for Fixed {
        async fn predict(
            &self,
            _input: &str,
        ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.reply.to_string())
        }
    }

    struct Broken;

    #[async_trait]
    impl CompletionProvider for Broken {
        async fn predict(
            &self,
            _input: &str,
        ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
            Err("model offline".into())
        }
    }

    #[tokio::test]
    async fn empty_input_skips_provider() {
        let llm = Fixed::new("unused");
        let ctl = TurnController::new(llm.clone());
        let mut history = ConversationHistory::new();
        history.append("User: a\nAssistant: b.");
        for input in [None, Some("")] {
            let out = ctl.submit(input, history.clone()).await.unwrap();
            assert_eq!(out, Submission::NoUpdate);
        }
        assert_eq!(llm.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn records_turn_and_renders() {
        let ctl = TurnController::new(Fixed::new("there"));
        let out = ctl
            .submit(Some("Hi"), ConversationHistory::new())
            .await
            .unwrap();
        let Submission::Updated { display, history } = out else {
            panic!("expected update");
        };
        assert_eq!(history.entries().collect::<Vec<_>>(), ["User: Hi\nAssistant: there."]);
        assert_eq!(display, "User: Hi\nAssistant: there.");
    }

    #[tokio::test]
    async fn keeps_existing_terminal_punctuation() {
        let ctl = TurnController::new(Fixed::new("Hello!"));
        let out = ctl.submit(Some("yo"), ConversationHistory::new()).await.unwrap();
        let Submission::Updated { history, .. } = out else {
            panic!("expected update");
        };
        assert!(history.render().ends_with("Assistant: Hello!"));
    }

    #[tokio::test]
    async fn whitespace_input_is_forwarded() {
        let llm = Fixed::new("ok");
        let ctl = TurnController::new(llm.clone());
        let out = ctl.submit(Some(" "), ConversationHistory::new()).await.unwrap();
        assert!(matches!(out, Submission::Updated { .. }));
        assert_eq!(llm.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn provider_failure_is_reported() {
        let ctl = TurnController::new(Arc::new(Broken));
        let err = ctl
            .submit(Some("hi"), ConversationHistory::new())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "completion provider failed: model offline");
    }

    #[test]
    fn normalization_cases() {
        assert_eq!(normalize_reply("Hello".into()), "Hello.");
        assert_eq!(normalize_reply("Really?".into()), "Really?");
        assert_eq!(normalize_reply("Done.".into()), "Done.");
        assert_eq!(normalize_reply("Hi :)".into()), "Hi :).");
        assert_eq!(normalize_reply(String::new()), "");
    }
}
