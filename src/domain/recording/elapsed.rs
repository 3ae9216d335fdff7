//! Elapsed recording time value object

use std::fmt;
use std::time::Duration as StdDuration;

/// Default interval between elapsed-time updates while recording
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 100;

/// Time elapsed since a recording started.
/// Immutable; displayed as `m:ss` the way the recording indicator shows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ElapsedTime {
    milliseconds: u64,
}

impl ElapsedTime {
    /// Zero elapsed time
    pub const ZERO: Self = Self { milliseconds: 0 };

    /// Create from milliseconds
    pub const fn from_millis(ms: u64) -> Self {
        Self { milliseconds: ms }
    }

    /// Create from a std duration, saturating at `u64::MAX` milliseconds
    pub fn from_std(duration: StdDuration) -> Self {
        Self {
            milliseconds: u64::try_from(duration.as_millis()).unwrap_or(u64::MAX),
        }
    }

    /// Whole seconds
    pub const fn as_secs(&self) -> u64 {
        self.milliseconds / 1000
    }

    /// Milliseconds
    pub const fn as_millis(&self) -> u64 {
        self.milliseconds
    }

    /// Absolute difference in milliseconds between two readings
    pub const fn abs_diff_ms(&self, other: Self) -> u64 {
        self.milliseconds.abs_diff(other.milliseconds)
    }
}

impl fmt::Display for ElapsedTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total_secs = self.as_secs();
        write!(f, "{}:{:02}", total_secs / 60, total_secs % 60)
    }
}

impl From<StdDuration> for ElapsedTime {
    fn from(duration: StdDuration) -> Self {
        Self::from_std(duration)
    }
}
