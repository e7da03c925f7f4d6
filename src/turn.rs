use std::fmt;

/// Who produced a [`Turn`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    User,
    Assistant,
}

impl Speaker {
    /// Label used when rendering the transcript.
    pub fn label(self) -> &'static str {
        match self {
            Speaker::User => "User",
            Speaker::Assistant => "Assistant",
        }
    }
}

/// A single utterance in the chat.
///
/// Turns are immutable once created; the fields are only readable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    speaker: Speaker,
    text: String,
}

impl Turn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::User,
            text: text.into(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::Assistant,
            text: text.into(),
        }
    }

    pub fn speaker(&self) -> Speaker {
        self.speaker
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for Turn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.speaker.label(), self.text)
    }
}

/// Render a user turn and the assistant's answer as a two-line record.
///
/// # Examples
///
/// ```
/// use tinychat::turn::{Turn, record};
///
/// let rec = record(&Turn::user("Hi"), &Turn::assistant("there."));
/// assert_eq!(rec, "User: Hi\nAssistant: there.");
/// ```
pub fn record(user: &Turn, reply: &Turn) -> String {
    format!("{user}\n{reply}")
}
