use switex_core::Layout;
use windows::Win32::{
    Foundation::HWND,
    UI::{
        Input::KeyboardAndMouse::GetKeyboardLayout,
        WindowsAndMessaging::{GetForegroundWindow, GetWindowThreadProcessId},
    },
};

use crate::platform::WindowRef;

/// Returns the current foreground window, or `None` if it is null.
pub fn foreground_window() -> Option<HWND> {
    let fg = unsafe { GetForegroundWindow() };
    (!fg.0.is_null()).then_some(fg)
}

pub fn window_ref(hwnd: HWND) -> WindowRef {
    WindowRef(hwnd.0 as usize as u64)
}

fn hwnd_of(window: WindowRef) -> HWND {
    HWND(window.0 as usize as *mut core::ffi::c_void)
}

/// Language id (low word of the HKL) active for the thread owning `window`.
pub fn language_id(window: Option<WindowRef>) -> Option<u16> {
    let hwnd = match window {
        Some(w) => hwnd_of(w),
        None => foreground_window()?,
    };
    let hkl = unsafe {
        let tid = GetWindowThreadProcessId(hwnd, None);
        GetKeyboardLayout(tid)
    };
    Some((hkl.0 as usize & 0xFFFF) as u16)
}

/// Maps a Windows language id to a supported layout.
pub fn layout_for_lang_id(lang_id: u16) -> Option<Layout> {
    let layout = match lang_id {
        0x0409 | 0x0809 | 0x0C09 | 0x1009 => Layout::En,
        0x0429 => Layout::Fa,
        0x0401 | 0x0801 | 0x0C01 | 0x1001 | 0x2801 | 0x3401 | 0x3801 | 0x3C01 => Layout::Ar,
        0x0419 => Layout::Ru,
        0x041F => Layout::Tr,
        0x040D => Layout::He,
        _ => return None,
    };
    Some(layout)
}
