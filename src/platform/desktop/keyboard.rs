use enigo::{Direction, Enigo, Keyboard, Settings};

use crate::{
    error::PlatformError,
    input::hotkeys::{HotkeyChord, Key, Modifiers},
};

const MODIFIER_KEYS: [(Modifiers, enigo::Key); 4] = [
    (Modifiers::CTRL, enigo::Key::Control),
    (Modifiers::ALT, enigo::Key::Alt),
    (Modifiers::SHIFT, enigo::Key::Shift),
    (Modifiers::META, enigo::Key::Meta),
];

fn connect() -> Result<Enigo, PlatformError> {
    Enigo::new(&Settings::default())
        .map_err(|e| PlatformError::missing("key simulation", e.to_string()))
}

fn input_err(e: enigo::InputError) -> PlatformError {
    PlatformError::Input(e.to_string())
}

fn enigo_key(key: Key) -> Result<enigo::Key, PlatformError> {
    let k = match key {
        Key::Char(c) => enigo::Key::Unicode(c),
        Key::Space => enigo::Key::Space,
        Key::Enter => enigo::Key::Return,
        Key::Tab => enigo::Key::Tab,
        Key::Escape => enigo::Key::Escape,
        #[cfg(not(target_os = "macos"))]
        Key::Insert => enigo::Key::Insert,
        #[cfg(target_os = "macos")]
        Key::Insert => return Err(PlatformError::Input("no Insert key on macOS".into())),
        Key::Delete => enigo::Key::Delete,
        Key::Home => enigo::Key::Home,
        Key::End => enigo::Key::End,
        Key::PageUp => enigo::Key::PageUp,
        Key::PageDown => enigo::Key::PageDown,
        Key::Up => enigo::Key::UpArrow,
        Key::Down => enigo::Key::DownArrow,
        Key::Left => enigo::Key::LeftArrow,
        Key::Right => enigo::Key::RightArrow,
        Key::F(n) => match n {
            1 => enigo::Key::F1,
            2 => enigo::Key::F2,
            3 => enigo::Key::F3,
            4 => enigo::Key::F4,
            5 => enigo::Key::F5,
            6 => enigo::Key::F6,
            7 => enigo::Key::F7,
            8 => enigo::Key::F8,
            9 => enigo::Key::F9,
            10 => enigo::Key::F10,
            11 => enigo::Key::F11,
            _ => enigo::Key::F12,
        },
    };
    Ok(k)
}

pub fn check() -> Result<(), PlatformError> {
    connect().map(drop)
}

/// Presses the chord's modifiers, clicks its key, releases the modifiers.
///
/// Modifiers are released even when the click fails.
pub fn send_chord(chord: &HotkeyChord) -> Result<(), PlatformError> {
    let mut enigo = connect()?;
    let key = enigo_key(chord.key)?;

    let mut pressed = Vec::with_capacity(MODIFIER_KEYS.len());
    let mut result = Ok(());
    for (flag, m) in MODIFIER_KEYS {
        if chord.mods.contains(flag) {
            if let Err(e) = enigo.key(m, Direction::Press) {
                result = Err(input_err(e));
                break;
            }
            pressed.push(m);
        }
    }

    if result.is_ok() {
        result = enigo.key(key, Direction::Click).map_err(input_err);
    }

    for m in pressed.into_iter().rev() {
        let _ = enigo.key(m, Direction::Release);
    }
    result
}

pub fn release_modifiers() -> Result<(), PlatformError> {
    let mut enigo = connect()?;
    for (_, m) in MODIFIER_KEYS {
        enigo.key(m, Direction::Release).map_err(input_err)?;
    }
    Ok(())
}
