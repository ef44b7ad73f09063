//! Hotkey daemon: `Idle -> Triggered -> Running -> Idle`.
//!
//! The listener thread receives hotkey events, captures the foreground window
//! and its layout before anything else happens, and hands the capture to a
//! single worker thread that runs the round trip. Triggers arriving while the
//! worker is busy are dropped, not queued.

pub mod direction;
pub mod monitor;

use std::{
    panic::{AssertUnwindSafe, catch_unwind},
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
        mpsc::{self, Receiver},
    },
    thread,
    time::Instant,
};

use switex_core::Layout;

use self::{direction::resolve, monitor::LayoutMonitor};
use crate::{
    config::Timings,
    conversion::{Direction, Mode, RoundTripController},
    domain::{outcome::SkipReason, session::CaptureSession},
    error::{AppError, PlatformError},
    input::hotkeys::HotkeyChord,
    platform::{HotkeyEvent, Platform},
};

#[derive(Debug, Clone)]
pub struct DaemonOptions {
    pub hotkey: HotkeyChord,
    /// Sides fixed by `-f` / `-t`.
    pub direction: Direction,
    pub default_target: Layout,
    pub timings: Timings,
    /// Poll the active layout in the background to learn the previous one.
    pub monitor_layouts: bool,
}

pub struct Daemon<P: Platform + ?Sized + 'static> {
    platform: Arc<P>,
    opts: DaemonOptions,
    busy: Arc<AtomicBool>,
    last_accepted: Option<Instant>,
}

impl<P: Platform + ?Sized + 'static> Daemon<P> {
    pub fn new(platform: Arc<P>, opts: DaemonOptions) -> Self {
        Self {
            platform,
            opts,
            busy: Arc::new(AtomicBool::new(false)),
            last_accepted: None,
        }
    }

    /// Runs until the hotkey event stream ends.
    pub fn run(mut self) -> Result<(), AppError> {
        if let Err(e) = self.platform.check_capabilities() {
            tracing::error!(platform = self.platform.name(), error = %e, "daemon cannot start");
            return Err(e.into());
        }

        let monitor = self.start_monitor();
        let events = self.platform.register_hotkey(&self.opts.hotkey)?;

        tracing::info!(
            hotkey = %self.opts.hotkey,
            platform = self.platform.name(),
            from = ?self.opts.direction.source,
            to = ?self.opts.direction.target,
            default_target = %self.opts.default_target,
            layout_monitor = monitor.is_some(),
            "daemon started; select text and press the hotkey"
        );

        let (jobs_tx, jobs_rx) = mpsc::channel::<CaptureSession>();
        let worker = {
            let platform = Arc::clone(&self.platform);
            let opts = self.opts.clone();
            let busy = Arc::clone(&self.busy);
            thread::Builder::new()
                .name("switex-worker".into())
                .spawn(move || worker_loop(&*platform, &opts, &busy, jobs_rx))
                .map_err(|e| PlatformError::Hotkey(format!("failed to spawn worker: {e}")))?
        };

        for event in events.iter() {
            match self.on_trigger(event, monitor.as_ref()) {
                Ok(session) => {
                    if jobs_tx.send(session).is_err() {
                        tracing::error!("worker is gone; stopping");
                        break;
                    }
                }
                Err(reason) => tracing::info!(reason = reason.as_str(), "trigger dropped"),
            }
        }

        drop(jobs_tx);
        if worker.join().is_err() {
            tracing::error!("worker thread panicked");
        }
        tracing::info!("daemon stopped");
        Ok(())
    }

    fn start_monitor(&self) -> Option<LayoutMonitor> {
        if !self.opts.monitor_layouts {
            return None;
        }
        match LayoutMonitor::start(Arc::clone(&self.platform), self.opts.timings.layout_poll) {
            Ok(m) => Some(m),
            Err(e) => {
                tracing::warn!(error = %e, "layout monitor unavailable; detecting direction from text");
                None
            }
        }
    }

    /// Debounces, claims the worker, and captures the foreground state.
    pub(crate) fn on_trigger(
        &mut self,
        event: HotkeyEvent,
        monitor: Option<&LayoutMonitor>,
    ) -> Result<CaptureSession, SkipReason> {
        if let Some(last) = self.last_accepted
            && event.at.saturating_duration_since(last) < self.opts.timings.debounce
        {
            return Err(SkipReason::RateLimited);
        }

        if self
            .busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(SkipReason::Reentry);
        }
        self.last_accepted = Some(event.at);

        // Focus and layout can change as soon as the modifiers go up.
        let window = self.platform.foreground_window();
        let layout = match self.platform.read_foreground_layout(window) {
            Ok(layout) => layout,
            Err(e) => {
                tracing::debug!(error = %e, "layout at press time unknown");
                None
            }
        };
        let previous = monitor.and_then(|m| {
            let pair = m.pair();
            match layout {
                Some(fired) => pair.previous_for(fired),
                None => pair.previous,
            }
        });

        tracing::debug!(?window, ?layout, ?previous, "hotkey captured");
        Ok(CaptureSession::new(window, layout, previous))
    }
}

/// Clears the busy flag when a run ends, including by panic.
struct BusyGuard<'a>(&'a AtomicBool);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

fn worker_loop<P: Platform + ?Sized>(
    platform: &P,
    opts: &DaemonOptions,
    busy: &AtomicBool,
    jobs: Receiver<CaptureSession>,
) {
    let controller = RoundTripController::new(platform, opts.timings, opts.default_target);

    for mut session in jobs {
        let _busy = BusyGuard(busy);
        let (direction, policy) = resolve(opts.direction, session.layout, session.previous);
        tracing::debug!(
            policy = policy.as_str(),
            from = ?direction.source,
            to = ?direction.target,
            "direction resolved"
        );

        let run = catch_unwind(AssertUnwindSafe(|| {
            controller.run(&mut session, direction, Mode::Selection)
        }));
        if run.is_err() {
            tracing::error!("round trip panicked; daemon keeps running");
        }
    }
}
