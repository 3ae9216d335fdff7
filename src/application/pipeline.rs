//! Upload-then-post pipeline for a finished recording

use tracing::{debug, info};

use crate::domain::recording::ElapsedTime;
use crate::domain::voice::{CapturedAudioAsset, ChannelTarget, VoicePost};

use super::error::VoiceMessageError;
use super::ports::{FileUploader, PostCreator};

/// Sends a recording: uploads the audio file, then creates a voice post
/// referencing the uploaded file. Never retries.
pub struct UploadPostPipeline<U, C>
where
    U: FileUploader,
    C: PostCreator,
{
    uploader: U,
    posts: C,
}

impl<U, C> UploadPostPipeline<U, C>
where
    U: FileUploader,
    C: PostCreator,
{
    pub fn new(uploader: U, posts: C) -> Self {
        Self { uploader, posts }
    }

    /// Run both steps for `asset`.
    ///
    /// Post creation starts only after the upload response carries the
    /// created status and a non-empty file list. If post creation fails the
    /// uploaded file is left on the server.
    pub async fn run(
        &self,
        asset: CapturedAudioAsset,
        target: &ChannelTarget,
        duration: ElapsedTime,
    ) -> Result<VoicePost, VoiceMessageError> {
        debug!(
            client_id = asset.client_id(),
            uri = asset.local_uri(),
            "uploading voice recording"
        );

        let response = self
            .uploader
            .upload_file(&asset, target.channel_id())
            .await
            .map_err(|e| VoiceMessageError::UploadFailure(e.to_string()))?;

        let code = response.code;
        let upload = response.into_result().ok_or_else(|| {
            VoiceMessageError::UploadFailure(format!(
                "server answered HTTP {} without a stored file",
                code
            ))
        })?;

        debug!(file_id = %upload.remote_file_id, size_bytes = ?upload.size_bytes, "upload stored");
        let post = VoicePost::new(target.clone(), upload.remote_file_id, duration);
        self.posts
            .create_post(&post.to_draft(), &[])
            .await
            .map_err(|source| VoiceMessageError::PostCreationFailure {
                file_id: post.file_id.clone(),
                source,
            })?;

        info!(
            channel_id = target.channel_id(),
            file_id = %post.file_id,
            duration_ms = duration.as_millis(),
            "voice message posted"
        );
        Ok(post)
    }
}
