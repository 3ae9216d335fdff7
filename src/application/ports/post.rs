//! Post creation port

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::voice::PostDraft;

/// Post creation errors
#[derive(Debug, Clone, Error)]
pub enum PostError {
    #[error("Post request failed: {0}")]
    RequestFailed(String),

    #[error("Server rejected post (HTTP {status}): {message}")]
    Rejected { status: u16, message: String },
}

/// Port for creating chat posts
#[async_trait]
pub trait PostCreator: Send + Sync {
    /// Create a post from `draft`, attaching the given already-uploaded files
    async fn create_post(&self, draft: &PostDraft, file_ids: &[String]) -> Result<(), PostError>;
}
