use std::time::Duration;

use windows::Win32::{
    Foundation::{HANDLE, HGLOBAL},
    System::{
        DataExchange::{
            CloseClipboard, EmptyClipboard, EnumClipboardFormats, GetClipboardData,
            GetClipboardSequenceNumber, OpenClipboard, SetClipboardData,
        },
        Memory::{GMEM_MOVEABLE, GlobalAlloc, GlobalFree, GlobalLock, GlobalSize, GlobalUnlock},
    },
};

use crate::error::PlatformError;

/// Win32 clipboard format id for UTF 16 text (`CF_UNICODETEXT`).
const CF_UNICODETEXT_ID: u32 = 13;

/// Formats whose handle is a GDI object rather than global memory.
const GDI_FORMATS: [u32; 8] = [2, 3, 9, 14, 0x80, 0x82, 0x83, 0x8E];

const OPEN_ATTEMPTS: usize = 10;
const OPEN_RETRY_DELAY: Duration = Duration::from_millis(10);

/// Upper bound on the UTF-16 units scanned for the terminating NUL.
const MAX_TEXT_UNITS: usize = 16 * 1024 * 1024;

/// Keeps the clipboard open for the current thread; closes it on drop.
struct ClipboardGuard;

impl ClipboardGuard {
    /// Opens the clipboard, retrying while another process holds it.
    fn open() -> Result<Self, PlatformError> {
        let mut last = None;
        for _ in 0..OPEN_ATTEMPTS {
            match unsafe { OpenClipboard(None) } {
                Ok(()) => return Ok(Self),
                Err(e) => last = Some(e),
            }
            std::thread::sleep(OPEN_RETRY_DELAY);
        }
        Err(PlatformError::Clipboard(format!(
            "OpenClipboard failed: {}",
            last.map(|e| e.to_string()).unwrap_or_default()
        )))
    }
}

impl Drop for ClipboardGuard {
    fn drop(&mut self) {
        unsafe {
            let _ = CloseClipboard();
        }
    }
}

/// A global memory block that is freed unless ownership moved to the clipboard.
struct GlobalMem {
    handle: HGLOBAL,
    owned: bool,
}

impl GlobalMem {
    fn alloc(bytes: usize) -> Result<Self, PlatformError> {
        let handle = unsafe { GlobalAlloc(GMEM_MOVEABLE, bytes) }
            .map_err(|e| PlatformError::Clipboard(format!("GlobalAlloc failed: {}", e)))?;
        Ok(Self {
            handle,
            owned: true,
        })
    }

    fn disarm(&mut self) {
        self.owned = false;
    }
}

impl Drop for GlobalMem {
    fn drop(&mut self) {
        if self.owned && !self.handle.0.is_null() {
            unsafe {
                let _ = GlobalFree(self.handle);
            }
        }
    }
}

/// Formats currently on the clipboard, in the order the owner offered them.
/// The clipboard must be open.
unsafe fn formats() -> Vec<u32> {
    let mut out = Vec::new();
    let mut format = 0u32;
    loop {
        format = unsafe { EnumClipboardFormats(format) };
        if format == 0 {
            return out;
        }
        out.push(format);
    }
}

/// Reads `CF_UNICODETEXT`. `Ok(None)` when the clipboard has no text format.
pub fn read_text() -> Result<Option<String>, PlatformError> {
    let _clip = ClipboardGuard::open()?;

    unsafe {
        if !formats().contains(&CF_UNICODETEXT_ID) {
            return Ok(None);
        }
        let handle = GetClipboardData(CF_UNICODETEXT_ID)
            .map_err(|e| PlatformError::Clipboard(format!("GetClipboardData failed: {}", e)))?;
        if handle.0.is_null() {
            return Err(PlatformError::Clipboard("GetClipboardData returned null".into()));
        }

        // The handle is owned by the clipboard; it must not be freed here.
        let hglobal = HGLOBAL(handle.0);
        let max_units = (GlobalSize(hglobal) / std::mem::size_of::<u16>()).min(MAX_TEXT_UNITS);
        if max_units == 0 {
            return Ok(Some(String::new()));
        }

        let ptr = GlobalLock(hglobal) as *const u16;
        if ptr.is_null() {
            return Err(PlatformError::Clipboard("GlobalLock returned null".into()));
        }

        let mut len = 0usize;
        while len < max_units && *ptr.add(len) != 0 {
            len += 1;
        }

        let text = String::from_utf16_lossy(std::slice::from_raw_parts(ptr, len));
        let _ = GlobalUnlock(hglobal);
        Ok(Some(text))
    }
}

/// One clipboard format copied out of its global memory block.
pub struct FormatData {
    format: u32,
    data: Vec<u8>,
}

/// Copies every global-memory format on the clipboard.
///
/// GDI handle formats are skipped; Windows synthesizes most of them again
/// from the formats that are kept.
pub fn snapshot_formats() -> Result<Vec<FormatData>, PlatformError> {
    let _clip = ClipboardGuard::open()?;

    let mut out = Vec::new();
    for format in unsafe { formats() } {
        if GDI_FORMATS.contains(&format) {
            continue;
        }
        let handle = match unsafe { GetClipboardData(format) } {
            Ok(h) if !h.0.is_null() => h,
            _ => continue,
        };

        let hglobal = HGLOBAL(handle.0);
        let size = unsafe { GlobalSize(hglobal) };
        if size == 0 {
            continue;
        }
        let ptr = unsafe { GlobalLock(hglobal) };
        if ptr.is_null() {
            continue;
        }
        let data = unsafe { std::slice::from_raw_parts(ptr as *const u8, size) }.to_vec();
        let _ = unsafe { GlobalUnlock(hglobal) };

        out.push(FormatData { format, data });
    }
    Ok(out)
}

/// Replaces the clipboard content with previously captured formats.
pub fn restore_formats(formats: &[FormatData]) -> Result<(), PlatformError> {
    let _clip = ClipboardGuard::open()?;

    unsafe {
        EmptyClipboard()
            .map_err(|e| PlatformError::Clipboard(format!("EmptyClipboard failed: {}", e)))?;
    }

    for entry in formats {
        let mut mem = GlobalMem::alloc(entry.data.len())?;
        unsafe {
            let ptr = GlobalLock(mem.handle);
            if ptr.is_null() {
                return Err(PlatformError::Clipboard("GlobalLock returned null".into()));
            }
            std::ptr::copy_nonoverlapping(entry.data.as_ptr(), ptr.cast::<u8>(), entry.data.len());
            let _ = GlobalUnlock(mem.handle);

            SetClipboardData(entry.format, Some(HANDLE(mem.handle.0))).map_err(|e| {
                PlatformError::Clipboard(format!(
                    "SetClipboardData({}) failed: {}",
                    entry.format, e
                ))
            })?;
        }
        mem.disarm();
    }
    Ok(())
}

/// Replaces the clipboard content with `text` as `CF_UNICODETEXT`.
pub fn write_text(text: &str) -> Result<(), PlatformError> {
    let mut units: Vec<u16> = text.encode_utf16().collect();
    units.push(0);

    let _clip = ClipboardGuard::open()?;

    unsafe {
        EmptyClipboard()
            .map_err(|e| PlatformError::Clipboard(format!("EmptyClipboard failed: {}", e)))?;

        let mut mem = GlobalMem::alloc(units.len() * std::mem::size_of::<u16>())?;

        let ptr = GlobalLock(mem.handle).cast::<u16>();
        if ptr.is_null() {
            return Err(PlatformError::Clipboard("GlobalLock returned null".into()));
        }
        std::ptr::copy_nonoverlapping(units.as_ptr(), ptr, units.len());
        let _ = GlobalUnlock(mem.handle);

        SetClipboardData(CF_UNICODETEXT_ID, Some(HANDLE(mem.handle.0))).map_err(|e| {
            PlatformError::Clipboard(format!("SetClipboardData failed: {}", e))
        })?;
        mem.disarm();
    }

    Ok(())
}

pub fn clear() -> Result<(), PlatformError> {
    let _clip = ClipboardGuard::open()?;
    unsafe { EmptyClipboard() }
        .map_err(|e| PlatformError::Clipboard(format!("EmptyClipboard failed: {}", e)))
}

/// `GetClipboardSequenceNumber` does not need the clipboard to be open.
pub fn sequence() -> u64 {
    u64::from(unsafe { GetClipboardSequenceNumber() })
}
