pub mod catalog;
pub mod config;
pub mod conversation;
pub mod error;
pub mod export;
pub mod llm;
pub mod session;
pub mod storage;
pub mod tutor;

// Re-export key types
pub use catalog::{Catalog, Chapter};
pub use config::Settings;
pub use conversation::{Message, Role, TopicSummary, TranscriptStore};
pub use error::TutorError;
pub use llm::{CompletionClient, GeminiClient};
pub use session::{ChatSession, Reply};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use tutor::Tutor;
