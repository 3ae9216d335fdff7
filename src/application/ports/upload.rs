//! File upload port

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::voice::{CapturedAudioAsset, UploadResponse};

/// Transport-level upload errors
#[derive(Debug, Clone, Error)]
pub enum UploadError {
    #[error("Failed to read recording: {0}")]
    ReadFailed(String),

    #[error("Upload request failed: {0}")]
    RequestFailed(String),

    #[error("Failed to parse upload response: {0}")]
    ParseError(String),
}

/// Port for uploading a recorded file to the chat server
#[async_trait]
pub trait FileUploader: Send + Sync {
    /// Upload `asset` into `channel_id`.
    ///
    /// A returned response is not necessarily a success: callers inspect
    /// the status code and the descriptor list.
    async fn upload_file(
        &self,
        asset: &CapturedAudioAsset,
        channel_id: &str,
    ) -> Result<UploadResponse, UploadError>;
}
