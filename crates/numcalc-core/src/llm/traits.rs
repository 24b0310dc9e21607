use crate::error::TutorError;

/// A remote text-completion service: send one prompt, get the generated
/// text back. `Ok(None)` means the service answered with an empty payload.
#[async_trait::async_trait]
pub trait CompletionClient: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<Option<String>, TutorError>;
}
