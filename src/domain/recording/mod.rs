//! Recording domain module

mod elapsed;
mod recorder_config;
mod session;

pub use elapsed::{ElapsedTime, DEFAULT_TICK_INTERVAL_MS};
pub use recorder_config::RecorderConfig;
pub use session::{InvalidStateTransition, RecordingSession, SessionStatus};
