use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Maximum number of records kept in a [`ConversationHistory`].
pub const HISTORY_CAPACITY: usize = 5;

/// Bounded log of rendered chat records.
///
/// Appending beyond [`HISTORY_CAPACITY`] evicts the oldest records first.
/// The serde form is the chat store payload `{ "history": [...] }`; loading a
/// payload with too many entries keeps only the most recent ones.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StoredHistory")]
pub struct ConversationHistory {
    history: VecDeque<String>,
}

#[derive(Deserialize)]
struct StoredHistory {
    #[serde(default)]
    history: Vec<String>,
}

impl From<StoredHistory> for ConversationHistory {
    fn from(stored: StoredHistory) -> Self {
        let mut out = Self::new();
        for entry in stored.history {
            out.append(entry);
        }
        out
    }
}

impl ConversationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `entry`, dropping records from the front past capacity.
    pub fn append(&mut self, entry: impl Into<String>) {
        self.history.push_back(entry.into());
        while self.history.len() > HISTORY_CAPACITY {
            self.history.pop_front();
        }
    }

    /// Join all records in order, separated by a blank line.
    ///
    /// # Examples
    ///
    /// ```
    /// use tinychat::ConversationHistory;
    ///
    /// let mut h = ConversationHistory::new();
    /// h.append("User: a\nAssistant: b.");
    /// h.append("User: c\nAssistant: d.");
    /// assert_eq!(h.render(), "User: a\nAssistant: b.\n\nUser: c\nAssistant: d.");
    /// ```
    pub fn render(&self) -> String {
        self.history
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Records from oldest to newest.
    pub fn entries(&self) -> impl Iterator<Item = &str> {
        self.history.iter().map(String::as_str)
    }
}
