//! PulseAudio / PipeWire capture source check

use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::application::ports::MicrophonePermission;

/// Grants access when the sound server reports a default capture source
pub struct PactlPermissionGate {
    program: String,
}

impl PactlPermissionGate {
    pub fn new() -> Self {
        Self {
            program: "pactl".to_string(),
        }
    }

    /// Use a different `pactl` binary
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// A usable source name: non-empty and not a monitor of an output
    fn is_capture_source(stdout: &str) -> bool {
        let name = stdout.trim();
        !name.is_empty() && !name.ends_with(".monitor")
    }
}

impl Default for PactlPermissionGate {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MicrophonePermission for PactlPermissionGate {
    async fn check_microphone_access(&self) -> bool {
        let output = Command::new(&self.program)
            .arg("get-default-source")
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output()
            .await;

        match output {
            Ok(out) if out.status.success() => {
                let stdout = String::from_utf8_lossy(&out.stdout);
                debug!(source = stdout.trim(), "default capture source");
                Self::is_capture_source(&stdout)
            }
            Ok(out) => {
                warn!(status = %out.status, "pactl could not report a capture source");
                false
            }
            Err(e) => {
                warn!(program = %self.program, error = %e, "capture source check unavailable");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_capture_sources() {
        assert!(PactlPermissionGate::is_capture_source(
            "alsa_input.pci-0000_00_1f.3.analog-stereo\n"
        ));
        assert!(!PactlPermissionGate::is_capture_source(""));
        assert!(!PactlPermissionGate::is_capture_source(
            "alsa_output.pci-0000_00_1f.3.analog-stereo.monitor"
        ));
    }

    #[tokio::test]
    async fn missing_program_denies() {
        let gate = PactlPermissionGate::with_program("voicepost-test-no-such-pactl");
        assert!(!gate.check_microphone_access().await);
    }
}
