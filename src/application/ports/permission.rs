//! Microphone permission port

use async_trait::async_trait;

/// Port for querying microphone access.
///
/// May prompt the platform permission dialog on first use. A `false`
/// answer is final for that attempt; callers must not retry.
#[async_trait]
pub trait MicrophonePermission: Send + Sync {
    /// Returns whether recording from the microphone is allowed
    async fn check_microphone_access(&self) -> bool;
}

#[async_trait]
impl MicrophonePermission for Box<dyn MicrophonePermission> {
    async fn check_microphone_access(&self) -> bool {
        self.as_ref().check_microphone_access().await
    }
}
