use std::sync::atomic::{AtomicBool, Ordering};

use crate::conversation::{Message, TranscriptStore};
use crate::storage::KeyValueStore;
use crate::tutor::Tutor;

/// Outcome of submitting a question to a chapter session.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// The tutor answered; the message has already been appended and
    /// persisted.
    Answer(Message),
    /// The request failed or the tutor is not configured. Nothing was
    /// appended beyond the user's own message; retrying is safe.
    Failed,
    /// A previous question is still in flight for this topic.
    Busy,
    /// Empty question; nothing was sent or stored.
    Ignored,
}

/// One chapter's chat: binds a topic to the transcript store and the tutor
/// and enforces at most one in-flight request per topic.
pub struct ChatSession<'a, S> {
    store: &'a TranscriptStore<S>,
    tutor: &'a Tutor,
    topic_id: String,
    context: String,
    in_flight: AtomicBool,
}

impl<'a, S: KeyValueStore> ChatSession<'a, S> {
    pub fn new(
        store: &'a TranscriptStore<S>,
        tutor: &'a Tutor,
        topic_id: impl Into<String>,
        context: impl Into<String>,
    ) -> Self {
        Self {
            store,
            tutor,
            topic_id: topic_id.into(),
            context: context.into(),
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn topic_id(&self) -> &str {
        &self.topic_id
    }

    pub fn messages(&self) -> Vec<Message> {
        self.store.load(&self.topic_id)
    }

    pub fn clear(&self) {
        self.store.clear(&self.topic_id);
    }

    /// Submit one question. The user turn is appended and persisted before
    /// the remote call goes out, so the stored log stays consistent even if
    /// the process dies mid-call: the pending answer is simply never
    /// written.
    pub async fn ask(&self, question: &str) -> Reply {
        let question = question.trim();
        if question.is_empty() {
            return Reply::Ignored;
        }

        if self.in_flight.swap(true, Ordering::SeqCst) {
            return Reply::Busy;
        }

        let history = self.store.append(&self.topic_id, Message::user(question));
        // The new question goes into the prompt explicitly, not as history.
        let prior = &history[..history.len() - 1];

        let reply = match self.tutor.ask(question, prior, &self.context).await {
            Some(answer) => {
                let message = Message::model(answer);
                self.store.append(&self.topic_id, message.clone());
                Reply::Answer(message)
            }
            None => Reply::Failed,
        };

        self.in_flight.store(false, Ordering::SeqCst);
        reply
    }
}
