//! OS capabilities used by the round-trip controller and the daemon.
//!
//! Conversion code depends only on [`Platform`]; each target OS provides one
//! implementation and [`native`] picks it.

use std::{any::Any, fmt, sync::mpsc::Receiver, time::Instant};

use switex_core::Layout;

use crate::{error::PlatformError, input::hotkeys::HotkeyChord};

#[cfg(not(windows))]
pub mod desktop;
#[cfg(windows)]
pub mod win;

/// Opaque identity of a foreground window.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct WindowRef(pub u64);

/// One press of the registered hotkey.
#[derive(Copy, Clone, Debug)]
pub struct HotkeyEvent {
    pub at: Instant,
}

impl HotkeyEvent {
    pub fn now() -> Self {
        Self { at: Instant::now() }
    }
}

/// Clipboard content taken before a round trip, in every format the backend
/// can read back.
pub enum ClipboardSnapshot {
    /// Nothing the backend can read.
    Empty,
    Text(String),
    /// Backend-specific data (all Win32 formats, an image). Only the backend
    /// that produced it can restore it.
    Native(Box<dyn Any>),
}

impl ClipboardSnapshot {
    pub fn text(&self) -> Option<&str> {
        match self {
            ClipboardSnapshot::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl fmt::Debug for ClipboardSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClipboardSnapshot::Empty => f.write_str("Empty"),
            ClipboardSnapshot::Text(text) => write!(f, "Text({} chars)", text.chars().count()),
            ClipboardSnapshot::Native(_) => f.write_str("Native"),
        }
    }
}

pub trait Platform: Send + Sync {
    fn name(&self) -> &'static str;

    /// Checks that key simulation and the clipboard are usable.
    fn check_capabilities(&self) -> Result<(), PlatformError> {
        Ok(())
    }

    fn foreground_window(&self) -> Option<WindowRef>;

    /// Active layout of `window` (or of the focused window when `None`).
    ///
    /// `Ok(None)` means the OS layout is outside the supported set.
    fn read_foreground_layout(&self, window: Option<WindowRef>)
    -> Result<Option<Layout>, PlatformError>;

    fn simulate_key_chord(&self, chord: &HotkeyChord) -> Result<(), PlatformError>;

    /// Sends key-up for every modifier so a simulated chord is not combined
    /// with keys the user still holds.
    fn release_modifiers(&self) -> Result<(), PlatformError>;

    /// `Ok(None)` when the clipboard holds no text.
    fn read_clipboard(&self) -> Result<Option<String>, PlatformError>;

    fn write_clipboard(&self, text: &str) -> Result<(), PlatformError>;

    fn clear_clipboard(&self) -> Result<(), PlatformError>;

    /// Copies the whole clipboard, not just its text.
    fn snapshot_clipboard(&self) -> Result<ClipboardSnapshot, PlatformError>;

    /// Puts back a snapshot taken by [`Platform::snapshot_clipboard`].
    fn restore_clipboard(&self, snapshot: ClipboardSnapshot) -> Result<(), PlatformError>;

    /// Clipboard change counter, when the OS keeps one.
    fn clipboard_sequence(&self) -> Option<u64> {
        None
    }

    /// Starts listening for `chord`. The stream ends when the listener stops.
    fn register_hotkey(&self, chord: &HotkeyChord) -> Result<Receiver<HotkeyEvent>, PlatformError>;
}

/// The platform implementation for the running OS.
pub fn native() -> Box<dyn Platform> {
    #[cfg(windows)]
    {
        Box::new(win::WinPlatform::new())
    }
    #[cfg(not(windows))]
    {
        Box::new(desktop::DesktopPlatform::new())
    }
}
