//! Microphone permission adapters

mod pactl;
mod fixed;

pub use fixed::StaticPermissionGate;
pub use pactl::PactlPermissionGate;

use crate::application::ports::MicrophonePermission;
use crate::domain::config::MicrophoneCheck;

/// Create the permission gate selected in the configuration
pub fn create_permission_gate(check: MicrophoneCheck) -> Box<dyn MicrophonePermission> {
    match check {
        MicrophoneCheck::Pactl => Box::new(PactlPermissionGate::new()),
        MicrophoneCheck::Always => Box::new(StaticPermissionGate::granted()),
    }
}
