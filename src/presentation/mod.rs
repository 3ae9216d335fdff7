//! Presentation layer - UI-agnostic view state
//!
//! Views never hold recording state themselves; they derive everything
//! from the controller's published snapshots.

pub mod gesture;
pub mod view;

pub use gesture::{Decision, DecisionLatch};
pub use view::{ViewFeed, ViewMode, VoiceActionView};
