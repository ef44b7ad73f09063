//! Win32 backend.

mod clipboard;
mod hotkeys;
mod keyboard;
mod layout;

use std::sync::mpsc::Receiver;

use switex_core::Layout;

use super::{ClipboardSnapshot, HotkeyEvent, Platform, WindowRef};
use crate::{error::PlatformError, input::hotkeys::HotkeyChord};

#[derive(Debug, Default)]
pub struct WinPlatform;

impl WinPlatform {
    pub fn new() -> Self {
        Self
    }
}

impl Platform for WinPlatform {
    fn name(&self) -> &'static str {
        "windows"
    }

    fn foreground_window(&self) -> Option<WindowRef> {
        layout::foreground_window().map(layout::window_ref)
    }

    fn read_foreground_layout(
        &self,
        window: Option<WindowRef>,
    ) -> Result<Option<Layout>, PlatformError> {
        let lang_id = layout::language_id(window)
            .ok_or_else(|| PlatformError::Layout("no foreground window".into()))?;
        let found = layout::layout_for_lang_id(lang_id);
        if found.is_none() {
            tracing::trace!(lang_id = format_args!("0x{lang_id:04X}"), "unsupported layout");
        }
        Ok(found)
    }

    fn simulate_key_chord(&self, chord: &HotkeyChord) -> Result<(), PlatformError> {
        keyboard::send_chord(chord)
    }

    fn release_modifiers(&self) -> Result<(), PlatformError> {
        keyboard::release_held_modifiers()
    }

    fn read_clipboard(&self) -> Result<Option<String>, PlatformError> {
        clipboard::read_text()
    }

    fn write_clipboard(&self, text: &str) -> Result<(), PlatformError> {
        clipboard::write_text(text)
    }

    fn clear_clipboard(&self) -> Result<(), PlatformError> {
        clipboard::clear()
    }

    fn snapshot_clipboard(&self) -> Result<ClipboardSnapshot, PlatformError> {
        let formats = clipboard::snapshot_formats()?;
        if formats.is_empty() {
            return Ok(ClipboardSnapshot::Empty);
        }
        Ok(ClipboardSnapshot::Native(Box::new(formats)))
    }

    fn restore_clipboard(&self, snapshot: ClipboardSnapshot) -> Result<(), PlatformError> {
        match snapshot {
            ClipboardSnapshot::Empty => clipboard::clear(),
            ClipboardSnapshot::Text(text) => clipboard::write_text(&text),
            ClipboardSnapshot::Native(data) => {
                let formats = data
                    .downcast::<Vec<clipboard::FormatData>>()
                    .map_err(|_| PlatformError::Clipboard("snapshot from another backend".into()))?;
                clipboard::restore_formats(&formats)
            }
        }
    }

    fn clipboard_sequence(&self) -> Option<u64> {
        Some(clipboard::sequence())
    }

    fn register_hotkey(&self, chord: &HotkeyChord) -> Result<Receiver<HotkeyEvent>, PlatformError> {
        hotkeys::listen(*chord)
    }
}
