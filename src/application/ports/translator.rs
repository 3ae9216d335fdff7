//! Message translation port

use async_trait::async_trait;
use thiserror::Error;

/// Translation errors
#[derive(Debug, Clone, Error)]
pub enum TranslationError {
    #[error("No authentication token available")]
    MissingToken,

    #[error("Translation failed")]
    Failed,
}

/// Port for translating message text between languages
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate `text` from language `from` to language `to`
    async fn translate(&self, text: &str, from: &str, to: &str)
        -> Result<String, TranslationError>;
}
