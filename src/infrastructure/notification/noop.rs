//! Notifier that drops every alert

use async_trait::async_trait;

use crate::application::ports::{NotificationError, Notifier, UserAlert};

/// Used when desktop alerts are disabled
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpNotifier;

#[async_trait]
impl Notifier for NoOpNotifier {
    async fn alert(&self, _alert: &UserAlert) -> Result<(), NotificationError> {
        Ok(())
    }
}
