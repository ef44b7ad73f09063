use std::time::{Duration, Instant};

use switex_core::Layout;

use crate::platform::WindowRef;

/// Protocol step a capture session has reached.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Step {
    Captured,
    Snapshot,
    Extracted,
    Converted,
    Replaced,
    Restored,
}

impl Step {
    pub fn as_str(self) -> &'static str {
        match self {
            Step::Captured => "captured",
            Step::Snapshot => "snapshot",
            Step::Extracted => "extracted",
            Step::Converted => "converted",
            Step::Replaced => "replaced",
            Step::Restored => "restored",
        }
    }
}

/// State of one hotkey invocation, from the key press to the end of Restore.
///
/// The clipboard snapshot itself lives in the controller's restore guard so
/// that it is written back on every exit path.
#[derive(Clone, Debug)]
pub struct CaptureSession {
    /// Foreground window at press time, if the platform can tell.
    pub window: Option<WindowRef>,
    /// Layout active in that window at press time.
    pub layout: Option<Layout>,
    /// Layout active before the most recent switch.
    pub previous: Option<Layout>,
    pub started_at: Instant,
    step: Step,
}

impl CaptureSession {
    pub fn new(window: Option<WindowRef>, layout: Option<Layout>, previous: Option<Layout>) -> Self {
        Self {
            window,
            layout,
            previous,
            started_at: Instant::now(),
            step: Step::Captured,
        }
    }

    /// Session for a run that was not started by a hotkey.
    pub fn detached() -> Self {
        Self::new(None, None, None)
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn advance(&mut self, step: Step) {
        debug_assert!(step >= self.step, "session steps only move forward");
        self.step = step;
    }

    pub fn elapsed(&self) -> Duration {
        self.started_at.elapsed()
    }
}
