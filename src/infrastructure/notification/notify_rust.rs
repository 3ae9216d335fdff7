//! Desktop alert adapter using notify-rust

use async_trait::async_trait;
use notify_rust::{Notification, Timeout};

use crate::application::ports::{AlertLevel, NotificationError, Notifier, UserAlert};

const APP_NAME: &str = "Voicepost";

/// Errors stay on screen until dismissed; everything else expires.
const TRANSIENT_TIMEOUT_MS: u32 = 5_000;

/// Shows alerts as desktop notifications
pub struct NotifyRustNotifier {
    app_name: String,
}

impl NotifyRustNotifier {
    pub fn new() -> Self {
        Self {
            app_name: APP_NAME.to_string(),
        }
    }

    fn build(&self, alert: &UserAlert) -> Notification {
        let timeout = match alert.level {
            AlertLevel::Error => Timeout::Never,
            AlertLevel::Info | AlertLevel::Warning => Timeout::Milliseconds(TRANSIENT_TIMEOUT_MS),
        };

        let mut notification = Notification::new();
        notification
            .appname(&self.app_name)
            .summary(&alert.title)
            .body(&alert.message)
            .icon(alert.level.icon_name())
            .timeout(timeout);
        notification
    }
}

impl Default for NotifyRustNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Notifier for NotifyRustNotifier {
    async fn alert(&self, alert: &UserAlert) -> Result<(), NotificationError> {
        let notification = self.build(alert);

        // show() talks to the session bus and blocks
        tokio::task::spawn_blocking(move || {
            notification
                .show()
                .map(|_| ())
                .map_err(|e| NotificationError::SendFailed(e.to_string()))
        })
        .await
        .map_err(|e| NotificationError::SendFailed(e.to_string()))?
    }
}
