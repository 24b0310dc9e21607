pub mod gemini;
pub mod traits;

pub use gemini::GeminiClient;
pub use traits::CompletionClient;
