//! Platform recorder port

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::recording::RecorderConfig;

/// Recorder errors
#[derive(Debug, Clone, Error)]
pub enum RecorderError {
    #[error("ffmpeg not found. Please install ffmpeg.")]
    FfmpegNotFound,

    #[error("Failed to start recorder: {0}")]
    StartFailed(String),

    #[error("Failed to stop recorder: {0}")]
    StopFailed(String),

    #[error("Recorder is not running")]
    NotRecording,

    #[error("Failed to discard recording: {0}")]
    DiscardFailed(String),
}

/// Listener receiving the recorder's current position in milliseconds
pub type RecordBackListener = Arc<dyn Fn(u64) + Send + Sync>;

/// Port for the platform audio recorder
#[async_trait]
pub trait PlatformRecorder: Send + Sync {
    /// Begin capturing audio with the given settings
    async fn start_recorder(&self, config: &RecorderConfig) -> Result<(), RecorderError>;

    /// Finish capturing and return the URI of the recorded file
    async fn stop_recorder(&self) -> Result<String, RecorderError>;

    /// Register a listener for recording position updates
    fn set_record_back_listener(&self, listener: RecordBackListener);

    /// Detach the position listener, if any
    fn remove_record_back_listener(&self);

    /// Delete a finished recording's file
    async fn discard(&self, uri: &str) -> Result<(), RecorderError>;
}
