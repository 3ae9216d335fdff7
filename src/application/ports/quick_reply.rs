//! Quick reply (forward message) port

use async_trait::async_trait;
use thiserror::Error;

/// Quick reply errors
#[derive(Debug, Clone, Error)]
pub enum QuickReplyError {
    #[error("Quick reply request failed: {0}")]
    RequestFailed(String),

    #[error("Server rejected quick reply (HTTP {status}): {message}")]
    Rejected { status: u16, message: String },
}

/// Port for forwarding a post into another channel as a quick reply
#[async_trait]
pub trait QuickReply: Send + Sync {
    /// Forward `post_id` into `channel_id`; returns the server's status string
    async fn quick_reply(&self, post_id: &str, channel_id: &str)
        -> Result<String, QuickReplyError>;
}
