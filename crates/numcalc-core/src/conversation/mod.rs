pub mod message;
pub mod store;

pub use message::{Message, Role};
pub use store::{TopicSummary, TranscriptStore};
