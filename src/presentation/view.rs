//! Voice action view model

use tokio::sync::watch;

use crate::application::SessionSnapshot;
use crate::domain::recording::{ElapsedTime, SessionStatus};

/// What the voice action area shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    /// Microphone affordance only
    Idle,
    /// Recording indicator with cancel and send controls
    Recording {
        elapsed: ElapsedTime,
        /// False once a decision was made and the recorder is stopping
        controls_enabled: bool,
    },
}

/// Rendered state of the voice action area
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoiceActionView {
    pub mode: ViewMode,
    /// The record trigger follows the input surface, not the session
    pub trigger_enabled: bool,
    /// A finished recording is still being uploaded or posted
    pub sending: bool,
}

impl VoiceActionView {
    pub fn from_snapshot(snapshot: &SessionSnapshot, input_disabled: bool) -> Self {
        let mode = match snapshot.status {
            SessionStatus::Idle => ViewMode::Idle,
            SessionStatus::Recording => ViewMode::Recording {
                elapsed: snapshot.elapsed,
                controls_enabled: true,
            },
            SessionStatus::Stopping => ViewMode::Recording {
                elapsed: snapshot.elapsed,
                controls_enabled: false,
            },
        };

        Self {
            mode,
            trigger_enabled: !input_disabled,
            sending: snapshot.pending_sends > 0,
        }
    }

    pub fn is_recording(&self) -> bool {
        matches!(self.mode, ViewMode::Recording { .. })
    }

    /// Whether cancel and send may be pressed
    pub fn controls_enabled(&self) -> bool {
        matches!(
            self.mode,
            ViewMode::Recording {
                controls_enabled: true,
                ..
            }
        )
    }

    /// Elapsed time as `m:ss`, only while the indicator is shown
    pub fn elapsed_label(&self) -> Option<String> {
        match self.mode {
            ViewMode::Recording { elapsed, .. } => Some(elapsed.to_string()),
            ViewMode::Idle => None,
        }
    }
}

/// Stream of views following a controller subscription
pub struct ViewFeed {
    rx: watch::Receiver<SessionSnapshot>,
    input_disabled: bool,
}

impl ViewFeed {
    pub fn new(rx: watch::Receiver<SessionSnapshot>) -> Self {
        Self {
            rx,
            input_disabled: false,
        }
    }

    /// Lock or unlock the input surface
    pub fn set_input_disabled(&mut self, disabled: bool) {
        self.input_disabled = disabled;
    }

    /// View for the latest snapshot
    pub fn current(&mut self) -> VoiceActionView {
        let snapshot = *self.rx.borrow_and_update();
        VoiceActionView::from_snapshot(&snapshot, self.input_disabled)
    }

    /// Wait for the next state change. Returns `None` once the controller is gone.
    pub async fn next(&mut self) -> Option<VoiceActionView> {
        self.rx.changed().await.ok()?;
        Some(self.current())
    }
}
