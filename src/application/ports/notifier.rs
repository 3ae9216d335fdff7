//! User-facing alert port

use async_trait::async_trait;
use thiserror::Error;

/// Notification errors
#[derive(Debug, Clone, Error)]
pub enum NotificationError {
    #[error("Failed to show alert: {0}")]
    SendFailed(String),
}

/// Severity of an alert
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertLevel {
    Info,
    Warning,
    Error,
}

impl AlertLevel {
    /// Get the freedesktop icon name
    pub const fn icon_name(&self) -> &'static str {
        match self {
            Self::Info => "audio-input-microphone",
            Self::Warning => "dialog-warning",
            Self::Error => "dialog-error",
        }
    }
}

/// An alert shown to the user: a title and an explanation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAlert {
    pub level: AlertLevel,
    pub title: String,
    pub message: String,
}

impl UserAlert {
    pub fn new(level: AlertLevel, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level,
            title: title.into(),
            message: message.into(),
        }
    }
}

/// Port for surfacing alerts to the user
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn alert(&self, alert: &UserAlert) -> Result<(), NotificationError>;
}

/// Blanket implementation for boxed notifier types
#[async_trait]
impl Notifier for Box<dyn Notifier> {
    async fn alert(&self, alert: &UserAlert) -> Result<(), NotificationError> {
        self.as_ref().alert(alert).await
    }
}
