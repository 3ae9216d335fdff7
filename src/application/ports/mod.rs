//! Port interfaces (traits) for external systems
//!
//! These traits define the boundaries between the application
//! and infrastructure layers.

pub mod config;
pub mod id;
pub mod notifier;
pub mod permission;
pub mod post;
pub mod quick_reply;
pub mod recorder;
pub mod translator;
pub mod upload;

// Re-export common types
pub use config::ConfigStore;
pub use id::IdGenerator;
pub use notifier::{AlertLevel, NotificationError, Notifier, UserAlert};
pub use permission::MicrophonePermission;
pub use post::{PostCreator, PostError};
pub use quick_reply::{QuickReply, QuickReplyError};
pub use recorder::{PlatformRecorder, RecordBackListener, RecorderError};
pub use translator::{TranslationError, Translator};
pub use upload::{FileUploader, UploadError};
