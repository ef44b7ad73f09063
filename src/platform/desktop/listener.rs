//! Global hotkey listener backed by `rdev`.
//!
//! `rdev::listen()` blocks its thread for the rest of the process and has no
//! graceful shutdown, so the listener thread is detached. Once the receiver is
//! dropped, further presses are ignored.

use std::{
    collections::HashSet,
    sync::mpsc::{self, Receiver, RecvTimeoutError},
    thread,
    time::Duration,
};

use rdev::{EventType, Key as RKey};

use crate::{
    error::PlatformError,
    input::hotkeys::{HotkeyChord, Key, Modifiers},
    platform::HotkeyEvent,
};

/// How long to wait for `rdev::listen` to fail before assuming it runs.
const STARTUP_GRACE: Duration = Duration::from_millis(250);

const LETTERS: [RKey; 26] = [
    RKey::KeyA,
    RKey::KeyB,
    RKey::KeyC,
    RKey::KeyD,
    RKey::KeyE,
    RKey::KeyF,
    RKey::KeyG,
    RKey::KeyH,
    RKey::KeyI,
    RKey::KeyJ,
    RKey::KeyK,
    RKey::KeyL,
    RKey::KeyM,
    RKey::KeyN,
    RKey::KeyO,
    RKey::KeyP,
    RKey::KeyQ,
    RKey::KeyR,
    RKey::KeyS,
    RKey::KeyT,
    RKey::KeyU,
    RKey::KeyV,
    RKey::KeyW,
    RKey::KeyX,
    RKey::KeyY,
    RKey::KeyZ,
];

const DIGITS: [RKey; 10] = [
    RKey::Num0,
    RKey::Num1,
    RKey::Num2,
    RKey::Num3,
    RKey::Num4,
    RKey::Num5,
    RKey::Num6,
    RKey::Num7,
    RKey::Num8,
    RKey::Num9,
];

const FUNCTION_KEYS: [RKey; 12] = [
    RKey::F1,
    RKey::F2,
    RKey::F3,
    RKey::F4,
    RKey::F5,
    RKey::F6,
    RKey::F7,
    RKey::F8,
    RKey::F9,
    RKey::F10,
    RKey::F11,
    RKey::F12,
];

pub fn rdev_key(key: Key) -> Option<RKey> {
    let k = match key {
        Key::Char(c @ 'a'..='z') => LETTERS[usize::from(c as u8 - b'a')],
        Key::Char(c @ '0'..='9') => DIGITS[usize::from(c as u8 - b'0')],
        Key::Char(_) => return None,
        Key::Space => RKey::Space,
        Key::Enter => RKey::Return,
        Key::Tab => RKey::Tab,
        Key::Escape => RKey::Escape,
        Key::Insert => RKey::Insert,
        Key::Delete => RKey::Delete,
        Key::Home => RKey::Home,
        Key::End => RKey::End,
        Key::PageUp => RKey::PageUp,
        Key::PageDown => RKey::PageDown,
        Key::Up => RKey::UpArrow,
        Key::Down => RKey::DownArrow,
        Key::Left => RKey::LeftArrow,
        Key::Right => RKey::RightArrow,
        Key::F(n) => *FUNCTION_KEYS.get(usize::from(n).checked_sub(1)?)?,
    };
    Some(k)
}

fn modifier_of(key: RKey) -> Option<Modifiers> {
    match key {
        RKey::ControlLeft | RKey::ControlRight => Some(Modifiers::CTRL),
        RKey::Alt | RKey::AltGr => Some(Modifiers::ALT),
        RKey::ShiftLeft | RKey::ShiftRight => Some(Modifiers::SHIFT),
        RKey::MetaLeft | RKey::MetaRight => Some(Modifiers::META),
        _ => None,
    }
}

/// Tracks held keys and reports when the chord's key goes down with exactly
/// the chord's modifiers held. Auto-repeat of the key does not fire again.
pub struct ChordMatcher {
    mods: Modifiers,
    key: RKey,
    held: HashSet<RKey>,
}

impl ChordMatcher {
    pub fn new(chord: &HotkeyChord) -> Option<Self> {
        Some(Self {
            mods: chord.mods,
            key: rdev_key(chord.key)?,
            held: HashSet::new(),
        })
    }

    fn held_mods(&self) -> Modifiers {
        self.held
            .iter()
            .filter_map(|&k| modifier_of(k))
            .fold(Modifiers::NONE, |acc, m| acc | m)
    }

    pub fn on_event(&mut self, event: &EventType) -> bool {
        match *event {
            EventType::KeyPress(k) => {
                let repeat = !self.held.insert(k);
                k == self.key && !repeat && self.held_mods() == self.mods
            }
            EventType::KeyRelease(k) => {
                self.held.remove(&k);
                false
            }
            _ => false,
        }
    }
}

pub fn listen(chord: HotkeyChord) -> Result<Receiver<HotkeyEvent>, PlatformError> {
    let mut matcher = ChordMatcher::new(&chord)
        .ok_or_else(|| PlatformError::Hotkey(format!("{chord} cannot be listened for")))?;

    let (events_tx, events_rx) = mpsc::channel();
    let (err_tx, err_rx) = mpsc::channel::<String>();

    thread::Builder::new()
        .name("switex-hotkey".into())
        .spawn(move || {
            let result = rdev::listen(move |event| {
                if matcher.on_event(&event.event_type) {
                    // Receiver gone: the daemon stopped, nothing to do.
                    let _ = events_tx.send(HotkeyEvent::now());
                }
            });
            if let Err(e) = result {
                let _ = err_tx.send(format!("{e:?}"));
            }
        })
        .map_err(|e| PlatformError::Hotkey(format!("failed to spawn listener: {e}")))?;

    match err_rx.recv_timeout(STARTUP_GRACE) {
        Ok(reason) => Err(PlatformError::missing("global hotkey listener", reason)),
        Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => Ok(events_rx),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher(spec: &str) -> ChordMatcher {
        ChordMatcher::new(&spec.parse().unwrap()).unwrap()
    }

    #[test]
    fn fires_with_exact_modifiers() {
        let mut m = matcher("<ctrl>+<alt>+<space>");
        assert!(!m.on_event(&EventType::KeyPress(RKey::ControlLeft)));
        assert!(!m.on_event(&EventType::KeyPress(RKey::Alt)));
        assert!(m.on_event(&EventType::KeyPress(RKey::Space)));
    }

    #[test]
    fn extra_modifier_does_not_fire() {
        let mut m = matcher("ctrl+space");
        m.on_event(&EventType::KeyPress(RKey::ControlLeft));
        m.on_event(&EventType::KeyPress(RKey::ShiftLeft));
        assert!(!m.on_event(&EventType::KeyPress(RKey::Space)));
    }

    #[test]
    fn auto_repeat_fires_once() {
        let mut m = matcher("ctrl+k");
        m.on_event(&EventType::KeyPress(RKey::ControlRight));
        assert!(m.on_event(&EventType::KeyPress(RKey::KeyK)));
        assert!(!m.on_event(&EventType::KeyPress(RKey::KeyK)));
        m.on_event(&EventType::KeyRelease(RKey::KeyK));
        assert!(m.on_event(&EventType::KeyPress(RKey::KeyK)));
    }

    #[test]
    fn maps_function_and_digit_keys() {
        assert_eq!(rdev_key(Key::F(9)), Some(RKey::F9));
        assert_eq!(rdev_key(Key::Char('3')), Some(RKey::Num3));
        assert_eq!(rdev_key(Key::F(13)), None);
    }
}
