//! Audio file descriptor used to play back a voice post

use serde::Serialize;

use super::asset::VOICE_FILE_NAME;

/// Plugin route serving recorded voice messages
pub const VOICE_RECORDINGS_ROUTE: &str = "/plugins/com.mattermost.voice/recordings";

/// File descriptor a player needs to stream a voice post
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VoiceMessageFile {
    pub id: String,
    pub uri: String,
    pub name: String,
    pub size: u64,
    pub extension: String,
    pub mime_type: String,
    pub has_preview_image: bool,
    pub user_id: String,
}

impl VoiceMessageFile {
    /// Describe the recording attached to `post_id` on `server_url`
    pub fn for_post(server_url: &str, post_id: &str, user_id: &str) -> Self {
        Self {
            id: post_id.to_string(),
            uri: format!(
                "{}{}/{}",
                server_url.trim_end_matches('/'),
                VOICE_RECORDINGS_ROUTE,
                post_id
            ),
            name: VOICE_FILE_NAME.to_string(),
            size: 0,
            extension: "mp3".to_string(),
            mime_type: "audio/mpeg".to_string(),
            has_preview_image: false,
            user_id: user_id.to_string(),
        }
    }
}
