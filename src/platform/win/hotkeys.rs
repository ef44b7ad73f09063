use std::{
    sync::mpsc::{self, Receiver},
    thread,
};

use windows::Win32::UI::{
    Input::KeyboardAndMouse::{HOT_KEY_MODIFIERS, MOD_NOREPEAT, RegisterHotKey, UnregisterHotKey},
    WindowsAndMessaging::{GetMessageW, MSG, WM_HOTKEY},
};

use super::keyboard::vk_for;
use crate::{
    error::PlatformError,
    input::hotkeys::HotkeyChord,
    platform::HotkeyEvent,
};

// Range 20000+ so ids never clash with control ids
const HK_TRIGGER_ID: i32 = 20001;

/// Registers `chord` on a dedicated thread and forwards each `WM_HOTKEY`.
///
/// The hotkey is bound to the listener thread's message queue, so the thread
/// owns the registration for its whole life. It unregisters and exits once the
/// receiver is dropped and the next press arrives.
pub fn listen(chord: HotkeyChord) -> Result<Receiver<HotkeyEvent>, PlatformError> {
    let (events_tx, events_rx) = mpsc::channel();
    let (ready_tx, ready_rx) = mpsc::sync_channel::<Result<(), PlatformError>>(1);

    thread::Builder::new()
        .name("switex-hotkey".into())
        .spawn(move || {
            let mods = HOT_KEY_MODIFIERS(chord.mods.bits()) | MOD_NOREPEAT;
            let vk = u32::from(vk_for(chord.key).0);

            if let Err(e) = unsafe { RegisterHotKey(None, HK_TRIGGER_ID, mods, vk) } {
                let _ = ready_tx.send(Err(PlatformError::Hotkey(format!(
                    "RegisterHotKey {chord} failed: {e}"
                ))));
                return;
            }
            tracing::debug!(%chord, mods = mods.0, vk, "RegisterHotKey ok");
            let _ = ready_tx.send(Ok(()));

            let mut msg = MSG::default();
            loop {
                let r = unsafe { GetMessageW(&raw mut msg, None, 0, 0) };
                if r.0 <= 0 {
                    tracing::warn!(code = r.0, "hotkey message loop ended");
                    break;
                }
                if msg.message == WM_HOTKEY
                    && msg.wParam.0 == HK_TRIGGER_ID as usize
                    && events_tx.send(HotkeyEvent::now()).is_err()
                {
                    break;
                }
            }

            let _ = unsafe { UnregisterHotKey(None, HK_TRIGGER_ID) };
        })
        .map_err(|e| PlatformError::Hotkey(format!("failed to spawn listener: {e}")))?;

    ready_rx
        .recv()
        .map_err(|_| PlatformError::Hotkey("listener exited before registering".into()))??;

    Ok(events_rx)
}
