use std::sync::{Mutex, MutexGuard};

use crate::{error::PlatformError, platform::ClipboardSnapshot};

/// Clipboard handle kept for the process lifetime.
///
/// On X11 the owner of the clipboard selection has to stay alive to keep
/// serving it, so the `arboard::Clipboard` is created once and reused.
#[derive(Default)]
pub struct SharedClipboard {
    inner: Mutex<Option<arboard::Clipboard>>,
}

impl SharedClipboard {
    fn with<T>(
        &self,
        f: impl FnOnce(&mut arboard::Clipboard) -> Result<T, arboard::Error>,
    ) -> Result<T, PlatformError> {
        let mut guard: MutexGuard<'_, Option<arboard::Clipboard>> = self
            .inner
            .lock()
            .map_err(|_| PlatformError::Clipboard("clipboard lock poisoned".into()))?;

        if guard.is_none() {
            let created = arboard::Clipboard::new()
                .map_err(|e| PlatformError::missing("clipboard", e.to_string()))?;
            *guard = Some(created);
        }

        let clipboard = guard
            .as_mut()
            .ok_or_else(|| PlatformError::Clipboard("clipboard not initialized".into()))?;
        f(clipboard).map_err(|e| PlatformError::Clipboard(e.to_string()))
    }

    pub fn check(&self) -> Result<(), PlatformError> {
        self.with(|_| Ok(()))
    }

    pub fn read_text(&self) -> Result<Option<String>, PlatformError> {
        self.with(|cb| match cb.get_text() {
            Ok(text) => Ok(Some(text)),
            Err(arboard::Error::ContentNotAvailable) => Ok(None),
            Err(e) => Err(e),
        })
    }

    pub fn write_text(&self, text: &str) -> Result<(), PlatformError> {
        self.with(|cb| cb.set_text(text))
    }

    pub fn clear(&self) -> Result<(), PlatformError> {
        self.with(|cb| cb.clear())
    }

    /// Text if there is any, otherwise an image, otherwise [`ClipboardSnapshot::Empty`].
    pub fn snapshot(&self) -> Result<ClipboardSnapshot, PlatformError> {
        self.with(|cb| {
            match cb.get_text() {
                Ok(text) => return Ok(ClipboardSnapshot::Text(text)),
                Err(arboard::Error::ContentNotAvailable) => {}
                Err(e) => return Err(e),
            }
            match cb.get_image() {
                Ok(image) => Ok(ClipboardSnapshot::Native(Box::new(image.to_owned_img()))),
                Err(arboard::Error::ContentNotAvailable) => Ok(ClipboardSnapshot::Empty),
                Err(e) => Err(e),
            }
        })
    }

    pub fn restore(&self, snapshot: ClipboardSnapshot) -> Result<(), PlatformError> {
        match snapshot {
            ClipboardSnapshot::Empty => self.clear(),
            ClipboardSnapshot::Text(text) => self.write_text(&text),
            ClipboardSnapshot::Native(data) => {
                let image = data
                    .downcast::<arboard::ImageData<'static>>()
                    .map_err(|_| PlatformError::Clipboard("snapshot is not an image".into()))?;
                self.with(|cb| cb.set_image(*image))
            }
        }
    }
}
