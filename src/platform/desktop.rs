//! Backend for Linux (X11) and macOS: `arboard` clipboard, `enigo` key
//! simulation, `rdev` hotkey listener and subprocess layout queries.

mod clipboard;
mod keyboard;
mod layout;
mod listener;

use std::sync::mpsc::Receiver;

use switex_core::Layout;

use super::{ClipboardSnapshot, HotkeyEvent, Platform, WindowRef};
use crate::{error::PlatformError, input::hotkeys::HotkeyChord};

#[derive(Default)]
pub struct DesktopPlatform {
    clipboard: clipboard::SharedClipboard,
}

impl DesktopPlatform {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Platform for DesktopPlatform {
    fn name(&self) -> &'static str {
        if cfg!(target_os = "macos") {
            "macos"
        } else {
            "x11"
        }
    }

    fn check_capabilities(&self) -> Result<(), PlatformError> {
        keyboard::check()?;
        self.clipboard.check()
    }

    /// Window identity is not exposed by these backends.
    fn foreground_window(&self) -> Option<WindowRef> {
        None
    }

    /// The layout is global to the session, so `window` is ignored.
    fn read_foreground_layout(
        &self,
        _window: Option<WindowRef>,
    ) -> Result<Option<Layout>, PlatformError> {
        layout::read_active()
    }

    fn simulate_key_chord(&self, chord: &HotkeyChord) -> Result<(), PlatformError> {
        keyboard::send_chord(chord)
    }

    fn release_modifiers(&self) -> Result<(), PlatformError> {
        keyboard::release_modifiers()
    }

    fn read_clipboard(&self) -> Result<Option<String>, PlatformError> {
        self.clipboard.read_text()
    }

    fn write_clipboard(&self, text: &str) -> Result<(), PlatformError> {
        self.clipboard.write_text(text)
    }

    fn clear_clipboard(&self) -> Result<(), PlatformError> {
        self.clipboard.clear()
    }

    fn snapshot_clipboard(&self) -> Result<ClipboardSnapshot, PlatformError> {
        self.clipboard.snapshot()
    }

    fn restore_clipboard(&self, snapshot: ClipboardSnapshot) -> Result<(), PlatformError> {
        self.clipboard.restore(snapshot)
    }

    fn register_hotkey(&self, chord: &HotkeyChord) -> Result<Receiver<HotkeyEvent>, PlatformError> {
        listener::listen(*chord)
    }
}
