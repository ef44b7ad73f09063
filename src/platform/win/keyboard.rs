use windows::Win32::UI::Input::KeyboardAndMouse::{
    GetAsyncKeyState, INPUT, INPUT_0, INPUT_KEYBOARD, KEYBD_EVENT_FLAGS, KEYBDINPUT,
    KEYEVENTF_KEYUP, SendInput, VIRTUAL_KEY, VK_CONTROL, VK_DELETE, VK_DOWN, VK_END, VK_ESCAPE,
    VK_F1, VK_HOME, VK_INSERT, VK_LCONTROL, VK_LEFT, VK_LMENU, VK_LSHIFT, VK_LWIN, VK_MENU,
    VK_NEXT, VK_PRIOR, VK_RCONTROL, VK_RETURN, VK_RIGHT, VK_RMENU, VK_RSHIFT, VK_RWIN, VK_SHIFT,
    VK_SPACE, VK_TAB, VK_UP,
};

use crate::{
    error::PlatformError,
    input::hotkeys::{HotkeyChord, Key, Modifiers},
};

/// Press order of chord modifiers.
const MODIFIER_VKS: [(Modifiers, VIRTUAL_KEY); 4] = [
    (Modifiers::CTRL, VK_CONTROL),
    (Modifiers::ALT, VK_MENU),
    (Modifiers::SHIFT, VK_SHIFT),
    (Modifiers::META, VK_LWIN),
];

/// Physical modifier keys that may still be held after the user's hotkey.
const HELD_MODIFIERS: [VIRTUAL_KEY; 8] = [
    VK_LCONTROL,
    VK_RCONTROL,
    VK_LMENU,
    VK_RMENU,
    VK_LSHIFT,
    VK_RSHIFT,
    VK_LWIN,
    VK_RWIN,
];

pub fn vk_for(key: Key) -> VIRTUAL_KEY {
    match key {
        Key::Char(c) => VIRTUAL_KEY(u16::from(c.to_ascii_uppercase() as u8)),
        Key::Space => VK_SPACE,
        Key::Enter => VK_RETURN,
        Key::Tab => VK_TAB,
        Key::Escape => VK_ESCAPE,
        Key::Insert => VK_INSERT,
        Key::Delete => VK_DELETE,
        Key::Home => VK_HOME,
        Key::End => VK_END,
        Key::PageUp => VK_PRIOR,
        Key::PageDown => VK_NEXT,
        Key::Up => VK_UP,
        Key::Down => VK_DOWN,
        Key::Left => VK_LEFT,
        Key::Right => VK_RIGHT,
        Key::F(n) => VIRTUAL_KEY(VK_F1.0 + u16::from(n.saturating_sub(1))),
    }
}

/// Tracks pressed keys and releases them in reverse order on drop, so a
/// failed chord never leaves a modifier stuck down.
pub struct KeySequence {
    pressed: Vec<VIRTUAL_KEY>,
}

impl KeySequence {
    pub fn new() -> Self {
        Self {
            pressed: Vec::new(),
        }
    }

    /// Sends key down and records the key for automatic release.
    pub fn down(&mut self, vk: VIRTUAL_KEY) -> Result<(), PlatformError> {
        send_key(vk, false)?;
        self.pressed.push(vk);
        Ok(())
    }

    /// Taps a key (down then up).
    pub fn tap(vk: VIRTUAL_KEY) -> Result<(), PlatformError> {
        send_key(vk, false)?;
        send_key(vk, true)
    }
}

impl Default for KeySequence {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for KeySequence {
    fn drop(&mut self) {
        for vk in self.pressed.drain(..).rev() {
            let _ = send_key(vk, true);
        }
    }
}

/// Presses the chord's modifiers, taps its key, then releases the modifiers.
pub fn send_chord(chord: &HotkeyChord) -> Result<(), PlatformError> {
    let mut seq = KeySequence::new();
    for (flag, vk) in MODIFIER_VKS {
        if chord.mods.contains(flag) {
            seq.down(vk)?;
        }
    }
    KeySequence::tap(vk_for(chord.key))
}

/// Sends key-up for every modifier the OS reports as held.
pub fn release_held_modifiers() -> Result<(), PlatformError> {
    for vk in HELD_MODIFIERS {
        let state = unsafe { GetAsyncKeyState(i32::from(vk.0)) };
        if state < 0 {
            send_key(vk, true)?;
        }
    }
    Ok(())
}

fn input_struct_size_i32() -> Option<i32> {
    i32::try_from(std::mem::size_of::<INPUT>()).ok()
}

/// Sends a single virtual key event via `SendInput`.
fn send_key(vk: VIRTUAL_KEY, key_up: bool) -> Result<(), PlatformError> {
    let input = INPUT {
        r#type: INPUT_KEYBOARD,
        Anonymous: INPUT_0 {
            ki: KEYBDINPUT {
                wVk: vk,
                wScan: 0,
                dwFlags: if key_up {
                    KEYEVENTF_KEYUP
                } else {
                    KEYBD_EVENT_FLAGS::default()
                },
                time: 0,
                dwExtraInfo: 0,
            },
        },
    };

    let input_size = input_struct_size_i32()
        .ok_or_else(|| PlatformError::Input("INPUT size does not fit i32".into()))?;

    // SendInput returns 0 when the input was blocked, e.g. by UIPI.
    let sent = unsafe { SendInput(&[input], input_size) };
    if sent == 0 {
        return Err(PlatformError::Input(format!(
            "SendInput rejected vk=0x{:02X}",
            vk.0
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letters_map_to_upper_case_virtual_keys() {
        assert_eq!(vk_for(Key::Char('c')), VIRTUAL_KEY(0x43));
        assert_eq!(vk_for(Key::Char('7')), VIRTUAL_KEY(0x37));
        assert_eq!(vk_for(Key::F(9)), VIRTUAL_KEY(0x78));
        assert_eq!(vk_for(Key::Space), VK_SPACE);
    }
}
