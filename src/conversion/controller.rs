use std::{thread, time::Duration};

use switex_core::{Layout, convert_request};

use super::clipboard::{ClipboardRestore, wait_for_change};
use crate::{
    config::Timings,
    domain::{
        outcome::{ActionOutcome, Applied, SkipReason, preview},
        session::{CaptureSession, Step},
    },
    error::RoundTripError,
    input::hotkeys::HotkeyChord,
    platform::Platform,
};

/// Characters of converted text shown in the success log line.
const PREVIEW_CHARS: usize = 60;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Mode {
    /// Copy the foreground selection, convert it and paste it back.
    Selection,
    /// Convert the clipboard content in place. No keys are simulated and the
    /// result stays on the clipboard.
    ClipboardOnly,
}

/// Explicit or captured conversion direction; `None` sides are detected.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Direction {
    pub source: Option<Layout>,
    pub target: Option<Layout>,
}

fn pause(d: Duration) {
    if !d.is_zero() {
        thread::sleep(d);
    }
}

/// Runs the snapshot, extract, convert, replace and restore protocol
/// against a [`Platform`].
pub struct RoundTripController<'a, P: Platform + ?Sized> {
    platform: &'a P,
    timings: Timings,
    default_target: Layout,
}

impl<'a, P: Platform + ?Sized> RoundTripController<'a, P> {
    pub fn new(platform: &'a P, timings: Timings, default_target: Layout) -> Self {
        Self {
            platform,
            timings,
            default_target,
        }
    }

    #[tracing::instrument(level = "debug", skip_all, fields(mode = ?mode))]
    pub fn run(
        &self,
        session: &mut CaptureSession,
        direction: Direction,
        mode: Mode,
    ) -> ActionOutcome {
        let outcome = match mode {
            Mode::Selection => self.run_selection(session, direction),
            Mode::ClipboardOnly => self.run_clipboard(session, direction),
        };
        log_outcome(&outcome, session);
        outcome
    }

    /// `false` when focus is known to have moved away from the window the
    /// hotkey was pressed in.
    fn still_focused(&self, session: &CaptureSession) -> bool {
        match (session.window, self.platform.foreground_window()) {
            (Some(captured), Some(now)) => captured == now,
            _ => true,
        }
    }

    fn run_selection(&self, session: &mut CaptureSession, direction: Direction) -> ActionOutcome {
        let t = self.timings;

        // Snapshot
        let snapshot = match self.platform.snapshot_clipboard() {
            Ok(s) => s,
            Err(e) => {
                return ActionOutcome::Failed(RoundTripError::ClipboardUnavailable(e.to_string()));
            }
        };
        tracing::debug!(?snapshot, "clipboard saved");
        let before_seq = self.platform.clipboard_sequence();
        let guard = ClipboardRestore::new(self.platform, snapshot, before_seq);
        session.advance(Step::Snapshot);

        // Extract
        if let Err(e) = self.platform.release_modifiers() {
            return ActionOutcome::Failed(RoundTripError::KeySimulation(e.to_string()));
        }
        pause(t.settle_after_release);

        if !self.still_focused(session) {
            return ActionOutcome::Skipped(SkipReason::ForegroundChanged);
        }
        if let Err(e) = self.platform.simulate_key_chord(&HotkeyChord::copy()) {
            return ActionOutcome::Failed(RoundTripError::KeySimulation(e.to_string()));
        }

        let Some(selected) = wait_for_change(
            self.platform,
            guard.snapshot_text(),
            before_seq,
            t.capture_timeout,
            t.poll_interval,
        ) else {
            return ActionOutcome::Failed(RoundTripError::SelectionCaptureTimeout(
                t.capture_timeout,
            ));
        };
        session.advance(Step::Extracted);

        if selected.trim().is_empty() {
            return ActionOutcome::Skipped(SkipReason::NoSelection);
        }

        // Convert
        let result = convert_request(
            &selected,
            direction.source,
            direction.target,
            self.default_target,
        );
        let Some(route) = result.route else {
            return ActionOutcome::Skipped(SkipReason::UnknownScript);
        };
        if !result.changed_from(&selected) {
            tracing::debug!(%route, "conversion left the text unchanged");
            return ActionOutcome::Skipped(SkipReason::NoChangeAfterConvert);
        }
        session.advance(Step::Converted);

        // Replace
        if let Err(e) = self.platform.write_clipboard(&result.text) {
            return ActionOutcome::Failed(RoundTripError::ClipboardWrite(e.to_string()));
        }
        pause(t.delay_before_paste);

        match self.platform.read_clipboard() {
            Ok(Some(now)) if now == result.text => {}
            Ok(_) => return ActionOutcome::Failed(RoundTripError::ClipboardRaced),
            Err(e) => {
                return ActionOutcome::Failed(RoundTripError::ClipboardUnavailable(e.to_string()));
            }
        }
        if !self.still_focused(session) {
            return ActionOutcome::Skipped(SkipReason::ForegroundChanged);
        }
        if let Err(e) = self.platform.simulate_key_chord(&HotkeyChord::paste()) {
            return ActionOutcome::Failed(RoundTripError::KeySimulation(e.to_string()));
        }
        session.advance(Step::Replaced);

        // Restore
        pause(t.restore_delay);
        if let Err(e) = guard.restore() {
            tracing::warn!(error = %e, "clipboard restore failed");
        }
        session.advance(Step::Restored);

        ActionOutcome::Applied(Applied {
            route,
            text: result.text,
        })
    }

    fn run_clipboard(&self, session: &mut CaptureSession, direction: Direction) -> ActionOutcome {
        let text = match self.platform.read_clipboard() {
            Ok(Some(text)) if !text.trim().is_empty() => text,
            Ok(_) => return ActionOutcome::Skipped(SkipReason::ClipboardEmpty),
            Err(e) => {
                return ActionOutcome::Failed(RoundTripError::ClipboardUnavailable(e.to_string()));
            }
        };
        session.advance(Step::Extracted);

        let result = convert_request(&text, direction.source, direction.target, self.default_target);
        let Some(route) = result.route else {
            return ActionOutcome::Skipped(SkipReason::UnknownScript);
        };
        if !result.changed_from(&text) {
            return ActionOutcome::Skipped(SkipReason::NoChangeAfterConvert);
        }
        session.advance(Step::Converted);

        if let Err(e) = self.platform.write_clipboard(&result.text) {
            return ActionOutcome::Failed(RoundTripError::ClipboardWrite(e.to_string()));
        }
        session.advance(Step::Replaced);

        ActionOutcome::Applied(Applied {
            route,
            text: result.text,
        })
    }
}

fn log_outcome(outcome: &ActionOutcome, session: &CaptureSession) {
    let elapsed_ms = u64::try_from(session.elapsed().as_millis()).unwrap_or(u64::MAX);
    let step = session.step().as_str();
    match outcome {
        ActionOutcome::Applied(applied) => {
            tracing::info!(
                elapsed_ms,
                "✓ {} \"{}\"",
                applied.route,
                preview(&applied.text, PREVIEW_CHARS)
            );
        }
        ActionOutcome::Skipped(reason) => {
            tracing::info!(reason = reason.as_str(), step, elapsed_ms, "~ skipped");
        }
        ActionOutcome::Failed(err) => {
            tracing::warn!(kind = err.as_str(), step, elapsed_ms, "✗ {err}");
        }
    }
}
