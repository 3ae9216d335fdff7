//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete implementations of the port interfaces,
//! integrating with FFmpeg, the sound server, the chat server, etc.

pub mod config;
pub mod http;
pub mod id;
pub mod notification;
pub mod permission;
pub mod recording;

// Re-export adapters
pub use config::XdgConfigStore;
pub use http::MattermostClient;
pub use id::UuidIdGenerator;
pub use notification::{create_notifier, NoOpNotifier, NotifyRustNotifier};
pub use permission::{create_permission_gate, PactlPermissionGate, StaticPermissionGate};
pub use recording::FfmpegRecorder;
