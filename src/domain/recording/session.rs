//! Recording session state machine

use std::fmt;

use thiserror::Error;
use tokio::time::Instant;

use super::ElapsedTime;

/// Recording session states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SessionStatus {
    #[default]
    Idle,
    Recording,
    Stopping,
}

impl SessionStatus {
    /// Get the string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Recording => "recording",
            Self::Stopping => "stopping",
        }
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error when an invalid state transition is attempted
#[derive(Debug, Clone, Error)]
#[error("Invalid state transition: cannot {action} while {current_state}")]
pub struct InvalidStateTransition {
    pub current_state: SessionStatus,
    pub action: &'static str,
}

/// Recording session entity.
///
/// State machine:
///   IDLE -> RECORDING (start)
///   RECORDING -> STOPPING (begin_stop)
///   STOPPING -> IDLE (finish)
///   any -> IDLE (reset)
#[derive(Debug, Default)]
pub struct RecordingSession {
    status: SessionStatus,
    started_at: Option<Instant>,
    elapsed: ElapsedTime,
}

impl RecordingSession {
    /// Create a new session in idle state
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current status
    pub fn status(&self) -> SessionStatus {
        self.status
    }

    /// Last captured elapsed time
    pub fn elapsed(&self) -> ElapsedTime {
        self.elapsed
    }

    pub fn is_idle(&self) -> bool {
        self.status == SessionStatus::Idle
    }

    pub fn is_recording(&self) -> bool {
        self.status == SessionStatus::Recording
    }

    /// Transition from IDLE to RECORDING, starting the clock at `now`
    pub fn start(&mut self, now: Instant) -> Result<(), InvalidStateTransition> {
        if self.status != SessionStatus::Idle {
            return Err(InvalidStateTransition {
                current_state: self.status,
                action: "start recording",
            });
        }
        self.status = SessionStatus::Recording;
        self.started_at = Some(now);
        self.elapsed = ElapsedTime::ZERO;
        Ok(())
    }

    /// Elapsed time at `now` while recording; the last captured value otherwise
    pub fn elapsed_at(&self, now: Instant) -> ElapsedTime {
        match (self.status, self.started_at) {
            (SessionStatus::Recording, Some(started)) => {
                ElapsedTime::from_std(now.saturating_duration_since(started))
            }
            _ => self.elapsed,
        }
    }

    /// Transition from RECORDING to STOPPING, capturing the final elapsed time
    pub fn begin_stop(&mut self, now: Instant) -> Result<ElapsedTime, InvalidStateTransition> {
        if self.status != SessionStatus::Recording {
            return Err(InvalidStateTransition {
                current_state: self.status,
                action: "stop recording",
            });
        }
        self.elapsed = self.elapsed_at(now);
        self.status = SessionStatus::Stopping;
        Ok(self.elapsed)
    }

    /// Transition from STOPPING to IDLE
    pub fn finish(&mut self) -> Result<(), InvalidStateTransition> {
        if self.status != SessionStatus::Stopping {
            return Err(InvalidStateTransition {
                current_state: self.status,
                action: "finish stopping",
            });
        }
        self.reset();
        Ok(())
    }

    /// Force the session back to IDLE from any state
    pub fn reset(&mut self) {
        self.status = SessionStatus::Idle;
        self.started_at = None;
        self.elapsed = ElapsedTime::ZERO;
    }
}
