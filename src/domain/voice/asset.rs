//! Captured audio asset value object

use std::fmt;
use std::path::PathBuf;

/// Scheme of local recording URIs
pub const FILE_URI_SCHEME: &str = "file://";

/// Audio MIME types a recorder may produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AudioMimeType {
    #[default]
    Mpeg,
    Mp4,
    Aac,
    Ogg,
    Wav,
}

impl AudioMimeType {
    /// Get the MIME type string
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Mpeg => "audio/mpeg",
            Self::Mp4 => "audio/mp4",
            Self::Aac => "audio/aac",
            Self::Ogg => "audio/ogg",
            Self::Wav => "audio/wav",
        }
    }

    /// Get the file extension
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Mpeg => "mp3",
            Self::Mp4 => "m4a",
            Self::Aac => "aac",
            Self::Ogg => "ogg",
            Self::Wav => "wav",
        }
    }

    /// Guess the MIME type from a file name or URI; unknown extensions map to MPEG
    pub fn from_uri(uri: &str) -> Self {
        let extension = uri
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "m4a" | "mp4" => Self::Mp4,
            "aac" => Self::Aac,
            "ogg" | "opus" => Self::Ogg,
            "wav" => Self::Wav,
            _ => Self::Mpeg,
        }
    }
}

impl fmt::Display for AudioMimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Display name given to every uploaded voice recording
pub const VOICE_FILE_NAME: &str = "Voice Message";

/// A finished recording ready for upload.
///
/// Created when a recording stops with intent to send and consumed
/// exactly once by the upload pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedAudioAsset {
    local_uri: String,
    mime_type: AudioMimeType,
    client_id: String,
}

impl CapturedAudioAsset {
    /// Create an asset for the recorder's result URI
    pub fn new(local_uri: impl Into<String>, client_id: impl Into<String>) -> Self {
        let local_uri = local_uri.into();
        let mime_type = AudioMimeType::from_uri(&local_uri);
        Self {
            local_uri,
            mime_type,
            client_id: client_id.into(),
        }
    }

    pub fn local_uri(&self) -> &str {
        &self.local_uri
    }

    /// Filesystem path behind the URI (the `file://` scheme is stripped)
    pub fn local_path(&self) -> PathBuf {
        PathBuf::from(
            self.local_uri
                .strip_prefix(FILE_URI_SCHEME)
                .unwrap_or(&self.local_uri),
        )
    }

    pub fn mime_type(&self) -> AudioMimeType {
        self.mime_type
    }

    pub fn extension(&self) -> &'static str {
        self.mime_type.extension()
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// File name sent with the upload
    pub fn file_name(&self) -> String {
        format!("{}.{}", VOICE_FILE_NAME, self.extension())
    }
}
