//! Voice message domain module

mod asset;
mod playback;
mod post;
mod upload;

pub use asset::{AudioMimeType, CapturedAudioAsset, FILE_URI_SCHEME, VOICE_FILE_NAME};
pub use playback::{VoiceMessageFile, VOICE_RECORDINGS_ROUTE};
pub use post::{ChannelTarget, PostDraft, VoicePost, VoiceProps, VOICE_POST_MESSAGE, VOICE_POST_TYPE};
pub use upload::{FileInfo, UploadData, UploadResponse, UploadResult, UPLOAD_CREATED};
