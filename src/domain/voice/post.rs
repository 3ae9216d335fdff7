//! Voice post entity and its wire shape

use serde::{Deserialize, Serialize};

use crate::domain::error::InvalidIdError;
use crate::domain::recording::ElapsedTime;

/// Post type the server and clients use to recognise voice messages
pub const VOICE_POST_TYPE: &str = "custom_voice";

/// Fixed text carried by every voice post
pub const VOICE_POST_MESSAGE: &str = "Voice Message";

/// Channel (and optional thread) a recording is sent to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelTarget {
    channel_id: String,
    root_id: Option<String>,
}

impl ChannelTarget {
    /// Create a target. An empty `root_id` means a top-level post.
    pub fn new(
        channel_id: impl Into<String>,
        root_id: Option<String>,
    ) -> Result<Self, InvalidIdError> {
        let channel_id = validate_id("channel id", channel_id.into())?;
        let root_id = match root_id.filter(|r| !r.is_empty()) {
            Some(root) => Some(validate_id("root id", root)?),
            None => None,
        };
        Ok(Self {
            channel_id,
            root_id,
        })
    }

    pub fn channel_id(&self) -> &str {
        &self.channel_id
    }

    pub fn root_id(&self) -> Option<&str> {
        self.root_id.as_deref()
    }
}

fn validate_id(kind: &'static str, input: String) -> Result<String, InvalidIdError> {
    if input.is_empty() || input.chars().any(char::is_whitespace) {
        return Err(InvalidIdError { kind, input });
    }
    Ok(input)
}

/// A chat post referencing an uploaded voice recording
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoicePost {
    pub target: ChannelTarget,
    pub file_id: String,
    pub duration: ElapsedTime,
}

impl VoicePost {
    pub fn new(target: ChannelTarget, file_id: impl Into<String>, duration: ElapsedTime) -> Self {
        Self {
            target,
            file_id: file_id.into(),
            duration,
        }
    }

    /// Build the body handed to the post-creation capability
    pub fn to_draft(&self) -> PostDraft {
        PostDraft {
            channel_id: self.target.channel_id().to_string(),
            root_id: self.target.root_id().unwrap_or_default().to_string(),
            message: VOICE_POST_MESSAGE.to_string(),
            post_type: VOICE_POST_TYPE.to_string(),
            props: VoiceProps {
                file_id: self.file_id.clone(),
                duration: self.duration.as_millis(),
            },
        }
    }
}

/// Wire shape of a post draft
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostDraft {
    pub channel_id: String,
    pub root_id: String,
    pub message: String,
    #[serde(rename = "type")]
    pub post_type: String,
    pub props: VoiceProps,
}

/// Voice-specific post properties; `duration` is in milliseconds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceProps {
    pub file_id: String,
    pub duration: u64,
}
