//! Domain layer - Core business logic
//!
//! Contains value objects, entities, and domain errors.
//! This layer performs no I/O.

pub mod config;
pub mod error;
pub mod recording;
pub mod voice;

// Re-export common types
pub use config::AppConfig;
pub use error::*;
pub use recording::{
    ElapsedTime, InvalidStateTransition, RecorderConfig, RecordingSession, SessionStatus,
};
pub use voice::{
    AudioMimeType, CapturedAudioAsset, ChannelTarget, UploadResponse, UploadResult, VoiceMessageFile,
    VoicePost,
};
