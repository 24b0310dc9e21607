use tracing::warn;

use crate::catalog::Catalog;
use crate::conversation::{Message, Role};
use crate::storage::KeyValueStore;

const KEY_PREFIX: &str = "chat_history_";

/// Per-chapter summary of a non-empty transcript, newest activity first.
#[derive(Debug, Clone)]
pub struct TopicSummary {
    pub topic_id: String,
    pub title: String,
    pub message_count: usize,
    /// Timestamp of the last message, epoch milliseconds.
    pub last_updated: i64,
    /// The most recent question the user asked, if any.
    pub last_question: Option<String>,
}

/// Durable per-topic message log.
///
/// This is a best-effort convenience cache, not a system of record: decode
/// failures read as empty history and write failures are logged and
/// swallowed, so a corrupt or read-only disk never breaks the chat itself.
pub struct TranscriptStore<S> {
    storage: S,
}

impl<S: KeyValueStore> TranscriptStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    fn key(topic_id: &str) -> String {
        format!("{}{}", KEY_PREFIX, topic_id)
    }

    /// Load the transcript for a topic. Absent and malformed records both
    /// read as an empty transcript; malformed ones additionally log a
    /// warning. Corruption in one topic never affects another.
    pub fn load(&self, topic_id: &str) -> Vec<Message> {
        let raw = match self.storage.get(&Self::key(topic_id)) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!(topic_id, error = %e, "failed to read chat history");
                return Vec::new();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(messages) => messages,
            Err(e) => {
                warn!(topic_id, error = %e, "discarding malformed chat history");
                Vec::new()
            }
        }
    }

    /// Append one message and persist the full updated transcript before
    /// returning. Persistence failure is tolerated silently.
    pub fn append(&self, topic_id: &str, message: Message) -> Vec<Message> {
        let mut messages = self.load(topic_id);
        messages.push(message);
        self.persist(topic_id, &messages);
        messages
    }

    fn persist(&self, topic_id: &str, messages: &[Message]) {
        let raw = match serde_json::to_string(messages) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(topic_id, error = %e, "failed to serialize chat history");
                return;
            }
        };
        if let Err(e) = self.storage.set(&Self::key(topic_id), &raw) {
            warn!(topic_id, error = %e, "failed to persist chat history");
        }
    }

    /// Delete all persisted state for a topic. Irreversible; the caller is
    /// expected to have confirmed with the user.
    pub fn clear(&self, topic_id: &str) {
        if let Err(e) = self.storage.remove(&Self::key(topic_id)) {
            warn!(topic_id, error = %e, "failed to clear chat history");
        }
    }

    /// Summaries of every catalog topic with a non-empty transcript, sorted
    /// by last-message timestamp descending.
    pub fn summarize(&self, catalog: &Catalog) -> Vec<TopicSummary> {
        let mut summaries: Vec<TopicSummary> = catalog
            .chapters()
            .iter()
            .filter_map(|chapter| {
                let messages = self.load(chapter.id);
                let last = messages.last()?;
                Some(TopicSummary {
                    topic_id: chapter.id.to_string(),
                    title: chapter.title.to_string(),
                    message_count: messages.len(),
                    last_updated: last.timestamp,
                    last_question: messages
                        .iter()
                        .rev()
                        .find(|m| m.role == Role::User)
                        .map(|m| m.content.clone()),
                })
            })
            .collect();

        summaries.sort_by(|a, b| b.last_updated.cmp(&a.last_updated));
        summaries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn malformed_record_reads_as_empty() {
        let storage = MemoryStore::new();
        storage.set("chat_history_errors", "not json at all").unwrap();

        let store = TranscriptStore::new(storage);
        assert!(store.load("errors").is_empty());
    }

    #[test]
    fn corruption_is_isolated_per_topic() {
        let storage = MemoryStore::new();
        storage.set("chat_history_errors", "{broken").unwrap();
        storage
            .set(
                "chat_history_ode",
                &serde_json::to_string(&[Message::new(Role::User, "hi", 1)]).unwrap(),
            )
            .unwrap();

        let store = TranscriptStore::new(storage);
        assert!(store.load("errors").is_empty());
        assert_eq!(store.load("ode").len(), 1);
    }
}
