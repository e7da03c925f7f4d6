use ollama_rs::generation::chat::ChatMessage;

/// Messages a provider has exchanged with its model.
///
/// Only the most recent `window` messages are kept; [`Conversation::prompt`]
/// sends them after the optional system prompt.
#[derive(Debug, Default)]
pub struct Conversation {
    system: Option<String>,
    messages: Vec<ChatMessage>,
    window: usize,
}

impl Conversation {
    pub fn new(system: Option<String>, window: usize) -> Self {
        Self {
            system,
            messages: Vec::new(),
            window,
        }
    }

    /// Remember one completed exchange.
    pub fn push_exchange(&mut self, user: impl Into<String>, reply: impl Into<String>) {
        self.messages.push(ChatMessage::user(user.into()));
        self.messages.push(ChatMessage::assistant(reply.into()));
        let excess = self.messages.len().saturating_sub(self.window);
        self.messages.drain(..excess);
    }

    /// Build the message list for a request carrying `input`.
    pub fn prompt(&self, input: &str) -> Vec<ChatMessage> {
        let mut out = Vec::with_capacity(self.messages.len() + 2);
        if let Some(system) = &self.system {
            out.push(ChatMessage::system(system.clone()));
        }
        out.extend(self.messages.iter().cloned());
        out.push(ChatMessage::user(input.to_string()));
        out
    }

    /// Number of remembered messages.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
