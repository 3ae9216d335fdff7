//! Single-decision latch for the cancel and send controls

/// The user's decision on a recording
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Cancel,
    Send,
}

/// Accepts at most one decision per recording session.
///
/// Re-armed when a new session starts. A second press, whether on the same
/// control or the other one, is rejected until then.
#[derive(Debug, Default)]
pub struct DecisionLatch {
    armed: bool,
    taken: Option<Decision>,
}

impl DecisionLatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open the latch for a new recording session
    pub fn arm(&mut self) {
        self.armed = true;
        self.taken = None;
    }

    /// Close the latch without a decision (session ended elsewhere)
    pub fn disarm(&mut self) {
        self.armed = false;
    }

    /// Try to record `decision`; true if it is the session's first
    pub fn try_take(&mut self, decision: Decision) -> bool {
        if !self.armed || self.taken.is_some() {
            return false;
        }
        self.taken = Some(decision);
        true
    }

    pub fn taken(&self) -> Option<Decision> {
        self.taken
    }
}
