//! Fixed-answer permission gate

use async_trait::async_trait;

use crate::application::ports::MicrophonePermission;

/// Always answers the same way
#[derive(Debug, Clone, Copy)]
pub struct StaticPermissionGate {
    granted: bool,
}

impl StaticPermissionGate {
    pub fn granted() -> Self {
        Self { granted: true }
    }

    pub fn denied() -> Self {
        Self { granted: false }
    }
}

#[async_trait]
impl MicrophonePermission for StaticPermissionGate {
    async fn check_microphone_access(&self) -> bool {
        self.granted
    }
}
