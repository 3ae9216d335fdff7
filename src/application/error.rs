//! Voice message errors and the alerts they surface

use thiserror::Error;

use crate::domain::recording::InvalidStateTransition;

use super::ports::{AlertLevel, PostError, RecorderError, UserAlert};

/// Failures of the voice message flow. All are recoverable: the session
/// is back in a usable state when one of these is returned.
#[derive(Debug, Error)]
pub enum VoiceMessageError {
    #[error("Microphone permission denied")]
    PermissionDenied,

    #[error("Failed to start recording: {0}")]
    RecorderStartFailure(RecorderError),

    #[error("Failed to stop recording: {0}")]
    RecorderStopFailure(RecorderError),

    #[error("Failed to upload file: {0}")]
    UploadFailure(String),

    /// The uploaded file stays on the server unattached; no compensating delete is made.
    #[error("Failed to create voice post for uploaded file {file_id}: {source}")]
    PostCreationFailure { file_id: String, source: PostError },

    #[error("Invalid state transition: {0}")]
    InvalidState(#[from] InvalidStateTransition),
}

impl VoiceMessageError {
    /// The alert shown to the user for this failure
    pub fn alert(&self) -> UserAlert {
        match self {
            Self::PermissionDenied => UserAlert::new(
                AlertLevel::Warning,
                "Microphone Permission Required",
                "Please grant microphone permission to record voice messages.",
            ),
            Self::RecorderStartFailure(_) | Self::InvalidState(_) => UserAlert::new(
                AlertLevel::Error,
                "Recording Error",
                "Failed to start recording. Please try again.",
            ),
            Self::RecorderStopFailure(_)
            | Self::UploadFailure(_)
            | Self::PostCreationFailure { .. } => UserAlert::new(
                AlertLevel::Error,
                "Send Error",
                "Failed to send voice message. Please try again.",
            ),
        }
    }
}
