use std::{fmt, ops::BitOr, str::FromStr};

use thiserror::Error;

/// Modifier mask. Bit values follow the Win32 `MOD_*` constants so the
/// Windows backend can pass them to `RegisterHotKey` unchanged.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Modifiers(u32);

impl Modifiers {
    pub const NONE: Self = Self(0);
    pub const ALT: Self = Self(0x0001);
    pub const CTRL: Self = Self(0x0002);
    pub const SHIFT: Self = Self(0x0004);
    /// Win on Windows, Cmd on macOS, Super elsewhere.
    pub const META: Self = Self(0x0008);

    /// The modifier used by the platform's copy/paste shortcuts.
    pub const fn primary() -> Self {
        if cfg!(target_os = "macos") {
            Self::META
        } else {
            Self::CTRL
        }
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    fn label(flag: Self) -> &'static str {
        match flag {
            Self::CTRL => "Ctrl",
            Self::ALT => "Alt",
            Self::SHIFT => "Shift",
            _ if cfg!(target_os = "macos") => "Cmd",
            _ => "Win",
        }
    }
}

impl BitOr for Modifiers {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Display order of modifiers.
const MODS_ORDER: [Modifiers; 4] = [
    Modifiers::CTRL,
    Modifiers::ALT,
    Modifiers::SHIFT,
    Modifiers::META,
];

/// The non-modifier key of a chord.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// `a`-`z` or `0`-`9`, stored lower case.
    Char(char),
    Space,
    Enter,
    Tab,
    Escape,
    Insert,
    Delete,
    Home,
    End,
    PageUp,
    PageDown,
    Up,
    Down,
    Left,
    Right,
    /// Function key `F1`..=`F12`.
    F(u8),
}

impl Key {
    fn parse(name: &str) -> Option<Self> {
        let key = match name {
            "space" => Key::Space,
            "enter" | "return" => Key::Enter,
            "tab" => Key::Tab,
            "esc" | "escape" => Key::Escape,
            "insert" | "ins" => Key::Insert,
            "delete" | "del" => Key::Delete,
            "home" => Key::Home,
            "end" => Key::End,
            "pageup" | "page_up" | "pgup" => Key::PageUp,
            "pagedown" | "page_down" | "pgdn" => Key::PageDown,
            "up" => Key::Up,
            "down" => Key::Down,
            "left" => Key::Left,
            "right" => Key::Right,
            _ => {
                let mut chars = name.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if c.is_ascii_lowercase() || c.is_ascii_digit() => {
                        Key::Char(c)
                    }
                    (Some('f'), Some(_)) => {
                        let n: u8 = name[1..].parse().ok()?;
                        if !(1..=12).contains(&n) {
                            return None;
                        }
                        Key::F(n)
                    }
                    _ => return None,
                }
            }
        };
        Some(key)
    }

    /// Config spelling, inverse of parsing.
    fn config_name(self) -> String {
        match self {
            Key::Char(c) => c.to_string(),
            Key::F(n) => format!("<f{n}>"),
            named => format!("<{}>", named.to_string().to_ascii_lowercase()),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Char(c) => write!(f, "{}", c.to_ascii_uppercase()),
            Key::F(n) => write!(f, "F{n}"),
            Key::Space => f.write_str("Space"),
            Key::Enter => f.write_str("Enter"),
            Key::Tab => f.write_str("Tab"),
            Key::Escape => f.write_str("Esc"),
            Key::Insert => f.write_str("Insert"),
            Key::Delete => f.write_str("Delete"),
            Key::Home => f.write_str("Home"),
            Key::End => f.write_str("End"),
            Key::PageUp => f.write_str("PageUp"),
            Key::PageDown => f.write_str("PageDown"),
            Key::Up => f.write_str("Up"),
            Key::Down => f.write_str("Down"),
            Key::Left => f.write_str("Left"),
            Key::Right => f.write_str("Right"),
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HotkeyParseError {
    #[error("hotkey is empty")]
    Empty,
    #[error("unknown key '{0}'")]
    UnknownKey(String),
    #[error("hotkey needs a non-modifier key")]
    NoKey,
    #[error("hotkey has more than one non-modifier key")]
    MultipleKeys,
}

/// A modifier set plus one key, e.g. `Ctrl + Alt + Space`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct HotkeyChord {
    pub mods: Modifiers,
    pub key: Key,
}

impl HotkeyChord {
    pub const fn new(mods: Modifiers, key: Key) -> Self {
        Self { mods, key }
    }

    pub const fn copy() -> Self {
        Self::new(Modifiers::primary(), Key::Char('c'))
    }

    pub const fn paste() -> Self {
        Self::new(Modifiers::primary(), Key::Char('v'))
    }

    /// Default daemon trigger, `<ctrl>+<alt>+<space>`.
    pub fn default_trigger() -> Self {
        Self::new(Modifiers::CTRL | Modifiers::ALT, Key::Space)
    }

    /// The chord in the `<ctrl>+<alt>+<space>` form accepted by [`FromStr`].
    pub fn to_config_string(&self) -> String {
        MODS_ORDER
            .iter()
            .filter(|&&m| self.mods.contains(m))
            .map(|&m| match m {
                Modifiers::CTRL => "<ctrl>".to_string(),
                Modifiers::ALT => "<alt>".to_string(),
                Modifiers::SHIFT => "<shift>".to_string(),
                _ => "<cmd>".to_string(),
            })
            .chain(std::iter::once(self.key.config_name()))
            .collect::<Vec<_>>()
            .join("+")
    }
}

fn parse_modifier(name: &str) -> Option<Modifiers> {
    let m = match name {
        "ctrl" | "ctrl_l" | "ctrl_r" | "control" => Modifiers::CTRL,
        "alt" | "alt_l" | "alt_r" | "alt_gr" | "option" => Modifiers::ALT,
        "shift" | "shift_l" | "shift_r" => Modifiers::SHIFT,
        "cmd" | "cmd_l" | "cmd_r" | "win" | "super" | "meta" => Modifiers::META,
        _ => return None,
    };
    Some(m)
}

impl FromStr for HotkeyChord {
    type Err = HotkeyParseError;

    /// Accepts `<ctrl>+<alt>+<space>`, `ctrl+shift+k`, `<cmd>+<f9>`; case and
    /// whitespace insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Err(HotkeyParseError::Empty);
        }

        let mut mods = Modifiers::NONE;
        let mut key = None;

        for part in s.split('+') {
            let name = part
                .trim()
                .trim_start_matches('<')
                .trim_end_matches('>')
                .to_ascii_lowercase();
            if name.is_empty() {
                return Err(HotkeyParseError::UnknownKey(part.to_string()));
            }

            if let Some(m) = parse_modifier(&name) {
                mods = mods | m;
                continue;
            }

            let parsed = Key::parse(&name).ok_or_else(|| HotkeyParseError::UnknownKey(name))?;
            if key.replace(parsed).is_some() {
                return Err(HotkeyParseError::MultipleKeys);
            }
        }

        let key = key.ok_or(HotkeyParseError::NoKey)?;
        Ok(Self { mods, key })
    }
}

impl fmt::Display for HotkeyChord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = MODS_ORDER
            .iter()
            .filter(|&&m| self.mods.contains(m))
            .map(|&m| Modifiers::label(m).to_string())
            .collect();
        parts.push(self.key.to_string());
        f.write_str(&parts.join(" + "))
    }
}
