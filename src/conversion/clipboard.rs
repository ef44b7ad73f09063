use std::time::{Duration, Instant};

use crate::{
    error::PlatformError,
    platform::{ClipboardSnapshot, Platform},
};

/// Puts the snapshot back when dropped, so every exit path of a run restores
/// the user's clipboard.
///
/// The clipboard is only written if it changed after the snapshot was taken:
/// a run that never got a copy through leaves the user's content alone, even
/// when that content is something the backend could not fully read.
pub struct ClipboardRestore<'a, P: Platform + ?Sized> {
    platform: &'a P,
    snapshot: Option<ClipboardSnapshot>,
    /// Change counter right after the snapshot, when the OS keeps one.
    sequence: Option<u64>,
}

impl<'a, P: Platform + ?Sized> ClipboardRestore<'a, P> {
    pub fn new(platform: &'a P, snapshot: ClipboardSnapshot, sequence: Option<u64>) -> Self {
        Self {
            platform,
            snapshot: Some(snapshot),
            sequence,
        }
    }

    /// Text of the snapshot; `None` for empty or non-text content.
    pub fn snapshot_text(&self) -> Option<&str> {
        self.snapshot.as_ref().and_then(ClipboardSnapshot::text)
    }

    /// Restores now and disarms the guard.
    pub fn restore(mut self) -> Result<(), PlatformError> {
        self.restore_inner()
    }

    fn changed(&self, snapshot: &ClipboardSnapshot) -> bool {
        match (self.sequence, self.platform.clipboard_sequence()) {
            (Some(before), Some(now)) => before != now,
            _ => match self.platform.read_clipboard() {
                Ok(now) => now.as_deref() != snapshot.text(),
                Err(_) => true,
            },
        }
    }

    fn restore_inner(&mut self) -> Result<(), PlatformError> {
        let Some(snapshot) = self.snapshot.take() else {
            return Ok(());
        };
        if !self.changed(&snapshot) {
            tracing::debug!("clipboard untouched since snapshot");
            return Ok(());
        }
        match snapshot {
            ClipboardSnapshot::Empty => self.platform.clear_clipboard(),
            other => self.platform.restore_clipboard(other),
        }
    }
}

impl<P: Platform + ?Sized> Drop for ClipboardRestore<'_, P> {
    fn drop(&mut self) {
        if let Err(e) = self.restore_inner() {
            tracing::warn!(error = %e, "clipboard restore failed");
        }
    }
}

/// Polls until the clipboard changes away from `before`.
///
/// Uses the OS change counter when `before_seq` is known, otherwise compares
/// content. Returns the new text (empty for non-text content), or `None`
/// when `timeout` elapses.
pub fn wait_for_change<P: Platform + ?Sized>(
    platform: &P,
    before: Option<&str>,
    before_seq: Option<u64>,
    timeout: Duration,
    poll: Duration,
) -> Option<String> {
    let deadline = Instant::now() + timeout;

    loop {
        std::thread::sleep(poll);

        let changed = match (before_seq, platform.clipboard_sequence()) {
            (Some(a), Some(b)) => a != b,
            _ => true,
        };

        if changed {
            match platform.read_clipboard() {
                Ok(now) if before_seq.is_some() => return Some(now.unwrap_or_default()),
                Ok(now) if now.as_deref() != before => return Some(now.unwrap_or_default()),
                Ok(_) => {}
                Err(e) => tracing::trace!(error = %e, "clipboard read while polling failed"),
            }
        }

        if Instant::now() >= deadline {
            return None;
        }
    }
}
