use std::{
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, Ordering},
    },
    thread::{self, JoinHandle},
    time::Duration,
};

use switex_core::Layout;

use crate::{error::PlatformError, platform::Platform};

/// The two most recent distinct layouts seen.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct LayoutPair {
    pub previous: Option<Layout>,
    pub current: Option<Layout>,
}

impl LayoutPair {
    pub fn observe(&mut self, layout: Layout) {
        if self.current != Some(layout) {
            self.previous = self.current;
            self.current = Some(layout);
        }
    }

    /// Layout in use before `fired` became active.
    ///
    /// When the poller has not caught up with a switch yet, its `current` is
    /// the layout the user switched away from.
    pub fn previous_for(&self, fired: Layout) -> Option<Layout> {
        if self.current == Some(fired) {
            self.previous
        } else {
            self.current
        }
    }
}

/// Background poller of the active layout.
pub struct LayoutMonitor {
    state: Arc<Mutex<LayoutPair>>,
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl LayoutMonitor {
    /// Reads the layout once and, if that works, keeps polling every `interval`.
    pub fn start<P>(platform: Arc<P>, interval: Duration) -> Result<Self, PlatformError>
    where
        P: Platform + ?Sized + 'static,
    {
        let mut initial = LayoutPair::default();
        if let Some(layout) = platform.read_foreground_layout(None)? {
            initial.observe(layout);
        }

        let state = Arc::new(Mutex::new(initial));
        let stop = Arc::new(AtomicBool::new(false));

        let handle = {
            let state = Arc::clone(&state);
            let stop = Arc::clone(&stop);
            thread::Builder::new()
                .name("switex-layout".into())
                .spawn(move || poll_loop(&*platform, &state, &stop, interval))
                .map_err(|e| PlatformError::Layout(format!("failed to spawn monitor: {e}")))?
        };

        tracing::debug!(?initial, interval_ms = interval.as_millis() as u64, "layout monitor started");
        Ok(Self {
            state,
            stop,
            handle: Some(handle),
        })
    }

    pub fn pair(&self) -> LayoutPair {
        self.state.lock().map(|p| *p).unwrap_or_default()
    }
}

fn poll_loop<P: Platform + ?Sized>(
    platform: &P,
    state: &Mutex<LayoutPair>,
    stop: &AtomicBool,
    interval: Duration,
) {
    while !stop.load(Ordering::Acquire) {
        thread::sleep(interval);
        match platform.read_foreground_layout(None) {
            Ok(Some(layout)) => {
                if let Ok(mut pair) = state.lock() {
                    let before = *pair;
                    pair.observe(layout);
                    if *pair != before {
                        tracing::debug!(previous = ?pair.previous, current = ?pair.current, "layout switched");
                    }
                }
            }
            Ok(None) => {}
            Err(e) => tracing::trace!(error = %e, "layout poll failed"),
        }
    }
}

impl Drop for LayoutMonitor {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Release);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pair_keeps_two_distinct_layouts() {
        let mut pair = LayoutPair::default();
        pair.observe(Layout::En);
        pair.observe(Layout::En);
        assert_eq!(pair.previous, None);
        assert_eq!(pair.current, Some(Layout::En));

        pair.observe(Layout::Fa);
        assert_eq!(pair.previous, Some(Layout::En));
        assert_eq!(pair.current, Some(Layout::Fa));

        pair.observe(Layout::Fa);
        assert_eq!(pair.previous, Some(Layout::En));
    }

    #[test]
    fn previous_for_handles_a_lagging_poller() {
        let mut pair = LayoutPair::default();
        pair.observe(Layout::En);
        // the switch to Ru happened after the last poll
        assert_eq!(pair.previous_for(Layout::Ru), Some(Layout::En));

        pair.observe(Layout::Ru);
        assert_eq!(pair.previous_for(Layout::Ru), Some(Layout::En));
    }
}
