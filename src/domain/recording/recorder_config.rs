//! Platform recorder settings

/// Audio capture settings handed to the platform recorder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecorderConfig {
    /// Capture backend (ffmpeg input format, e.g. `pulse`, `alsa`, `avfoundation`)
    pub input_format: String,
    /// Capture device name within the backend
    pub input_device: String,
    pub sample_rate: u32,
    pub channels: u16,
    /// Encoder bitrate, e.g. `64k`
    pub bitrate: String,
}

impl Default for RecorderConfig {
    fn default() -> Self {
        Self {
            input_format: "pulse".to_string(),
            input_device: "default".to_string(),
            sample_rate: 44_100,
            channels: 2,
            bitrate: "64k".to_string(),
        }
    }
}
