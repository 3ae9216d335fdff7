//! Application configuration value object

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::recording::{RecorderConfig, DEFAULT_TICK_INTERVAL_MS};

/// How microphone access is checked before recording
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MicrophoneCheck {
    /// Ask the sound server for a default capture source
    #[default]
    Pactl,
    /// Assume access is granted
    Always,
}

impl MicrophoneCheck {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pactl => "pactl",
            Self::Always => "always",
        }
    }
}

impl fmt::Display for MicrophoneCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MicrophoneCheck {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pactl" => Ok(Self::Pactl),
            "always" => Ok(Self::Always),
            other => Err(format!(
                "Invalid microphone check: \"{}\". Valid values are: pactl, always",
                other
            )),
        }
    }
}

/// Recorder section of the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecorderSection {
    pub input_format: Option<String>,
    pub input_device: Option<String>,
    pub sample_rate: Option<u32>,
    pub channels: Option<u16>,
    pub bitrate: Option<String>,
}

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    pub server_url: Option<String>,
    pub token: Option<String>,
    pub channel_id: Option<String>,
    pub tick_interval_ms: Option<u64>,
    pub notify: Option<bool>,
    pub microphone_check: Option<String>,
    pub recorder: Option<RecorderSection>,
}

impl AppConfig {
    /// Create config with default values
    pub fn defaults() -> Self {
        let recorder = RecorderConfig::default();
        Self {
            server_url: None,
            token: None,
            channel_id: None,
            tick_interval_ms: Some(DEFAULT_TICK_INTERVAL_MS),
            notify: Some(false),
            microphone_check: Some(MicrophoneCheck::default().to_string()),
            recorder: Some(RecorderSection {
                input_format: Some(recorder.input_format),
                input_device: Some(recorder.input_device),
                sample_rate: Some(recorder.sample_rate),
                channels: Some(recorder.channels),
                bitrate: Some(recorder.bitrate),
            }),
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            server_url: other.server_url.or(self.server_url),
            token: other.token.or(self.token),
            channel_id: other.channel_id.or(self.channel_id),
            tick_interval_ms: other.tick_interval_ms.or(self.tick_interval_ms),
            notify: other.notify.or(self.notify),
            microphone_check: other.microphone_check.or(self.microphone_check),
            recorder: Self::merge_recorder(self.recorder, other.recorder),
        }
    }

    fn merge_recorder(
        base: Option<RecorderSection>,
        other: Option<RecorderSection>,
    ) -> Option<RecorderSection> {
        match (base, other) {
            (None, None) => None,
            (Some(b), None) => Some(b),
            (None, Some(o)) => Some(o),
            (Some(b), Some(o)) => Some(RecorderSection {
                input_format: o.input_format.or(b.input_format),
                input_device: o.input_device.or(b.input_device),
                sample_rate: o.sample_rate.or(b.sample_rate),
                channels: o.channels.or(b.channels),
                bitrate: o.bitrate.or(b.bitrate),
            }),
        }
    }

    /// Tick interval in milliseconds; zero or unset falls back to the default
    pub fn tick_interval_or_default(&self) -> u64 {
        self.tick_interval_ms
            .filter(|ms| *ms > 0)
            .unwrap_or(DEFAULT_TICK_INTERVAL_MS)
    }

    /// Get notify setting, or false if not set
    pub fn notify_or_default(&self) -> bool {
        self.notify.unwrap_or(false)
    }

    /// Get the microphone check, or the default if not set/invalid
    pub fn microphone_check_or_default(&self) -> MicrophoneCheck {
        self.microphone_check
            .as_ref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }

    /// Build recorder settings, filling gaps with defaults
    pub fn recorder_config(&self) -> RecorderConfig {
        let defaults = RecorderConfig::default();
        let Some(section) = self.recorder.as_ref() else {
            return defaults;
        };
        RecorderConfig {
            input_format: section
                .input_format
                .clone()
                .unwrap_or(defaults.input_format),
            input_device: section
                .input_device
                .clone()
                .unwrap_or(defaults.input_device),
            sample_rate: section.sample_rate.unwrap_or(defaults.sample_rate),
            channels: section.channels.unwrap_or(defaults.channels),
            bitrate: section.bitrate.clone().unwrap_or(defaults.bitrate),
        }
    }
}
