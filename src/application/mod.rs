//! Application layer - Use cases and port interfaces
//!
//! Contains the recording controller, the send pipeline and the trait
//! definitions for external system interactions.

pub mod controller;
pub mod error;
pub mod pipeline;
pub mod ports;
pub mod ticker;

pub use controller::{
    ControllerConfig, RecordingController, SessionSnapshot, StartOutcome, StopOutcome,
};
pub use error::VoiceMessageError;
pub use pipeline::UploadPostPipeline;
pub use ticker::{DurationTicker, TickCallback};
