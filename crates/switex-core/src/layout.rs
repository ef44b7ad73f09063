use std::{fmt, str::FromStr};

use crate::error::UnknownLayout;

/// Keyboard layouts with a character table.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub enum Layout {
    En,
    /// Persian, ISIRI 9147 standard.
    Fa,
    /// Persian, pre-standard Windows layout.
    FaLegacy,
    Ar,
    Ru,
    Tr,
    He,
}

/// Script groups used by auto-detection. Both Persian layouts form one family.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Family {
    English,
    Persian,
    Arabic,
    Russian,
    Turkish,
    Hebrew,
}

impl Family {
    /// Non-English families in tie-break order.
    pub const DETECTABLE: [Family; 5] = [
        Family::Persian,
        Family::Arabic,
        Family::Russian,
        Family::Turkish,
        Family::Hebrew,
    ];

    pub fn layouts(self) -> &'static [Layout] {
        match self {
            Family::English => &[Layout::En],
            Family::Persian => &[Layout::Fa, Layout::FaLegacy],
            Family::Arabic => &[Layout::Ar],
            Family::Russian => &[Layout::Ru],
            Family::Turkish => &[Layout::Tr],
            Family::Hebrew => &[Layout::He],
        }
    }
}

/// Pairs printed by `--list`. Every layout converts to and from English.
pub const SUPPORTED_PAIRS: [(Layout, Layout); 6] = [
    (Layout::En, Layout::Fa),
    (Layout::En, Layout::FaLegacy),
    (Layout::En, Layout::Ar),
    (Layout::En, Layout::Ru),
    (Layout::En, Layout::Tr),
    (Layout::En, Layout::He),
];

impl Layout {
    pub const ALL: [Layout; 7] = [
        Layout::En,
        Layout::Fa,
        Layout::FaLegacy,
        Layout::Ar,
        Layout::Ru,
        Layout::Tr,
        Layout::He,
    ];

    pub const fn id(self) -> &'static str {
        match self {
            Layout::En => "en",
            Layout::Fa => "fa",
            Layout::FaLegacy => "fa-legacy",
            Layout::Ar => "ar",
            Layout::Ru => "ru",
            Layout::Tr => "tr",
            Layout::He => "he",
        }
    }

    pub const fn display_name(self) -> &'static str {
        match self {
            Layout::En => "English",
            Layout::Fa => "Persian/Farsi",
            Layout::FaLegacy => "Persian/Farsi (legacy)",
            Layout::Ar => "Arabic",
            Layout::Ru => "Russian",
            Layout::Tr => "Turkish",
            Layout::He => "Hebrew",
        }
    }

    pub const fn family(self) -> Family {
        match self {
            Layout::En => Family::English,
            Layout::Fa | Layout::FaLegacy => Family::Persian,
            Layout::Ar => Family::Arabic,
            Layout::Ru => Family::Russian,
            Layout::Tr => Family::Turkish,
            Layout::He => Family::Hebrew,
        }
    }

    /// Two-letter language code used by operating systems (`fa-legacy` reports as `fa`).
    pub const fn language(self) -> &'static str {
        match self {
            Layout::FaLegacy => "fa",
            other => other.id(),
        }
    }

    /// Maps an ISO 639-1 language code reported by the OS to a layout.
    pub fn from_language(code: &str) -> Option<Layout> {
        match code.to_ascii_lowercase().as_str() {
            "en" => Some(Layout::En),
            "fa" => Some(Layout::Fa),
            "ar" => Some(Layout::Ar),
            "ru" => Some(Layout::Ru),
            "tr" => Some(Layout::Tr),
            "he" | "iw" => Some(Layout::He),
            _ => None,
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Layout {
    type Err = UnknownLayout;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = s.trim().to_ascii_lowercase();
        match id.as_str() {
            "en" => Ok(Layout::En),
            "fa" | "fa-std" | "fa_std" => Ok(Layout::Fa),
            "fa-legacy" | "fa_legacy" | "fa_leg" => Ok(Layout::FaLegacy),
            "ar" => Ok(Layout::Ar),
            "ru" => Ok(Layout::Ru),
            "tr" => Ok(Layout::Tr),
            "he" => Ok(Layout::He),
            _ => Err(UnknownLayout(s.trim().to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_ids_and_aliases_case_insensitively() {
        assert_eq!("EN".parse::<Layout>(), Ok(Layout::En));
        assert_eq!("fa_leg".parse::<Layout>(), Ok(Layout::FaLegacy));
        assert_eq!("Fa-Std".parse::<Layout>(), Ok(Layout::Fa));
        assert_eq!(" he ".parse::<Layout>(), Ok(Layout::He));
    }

    #[test]
    fn rejects_unknown_ids() {
        let err = "de".parse::<Layout>().unwrap_err();
        assert_eq!(err, UnknownLayout("de".to_string()));
        assert!(err.to_string().contains("--list"));
    }

    #[test]
    fn ids_roundtrip_through_display() {
        for layout in Layout::ALL {
            assert_eq!(layout.to_string().parse::<Layout>(), Ok(layout));
        }
    }

    #[test]
    fn os_language_codes_map_to_layouts() {
        assert_eq!(Layout::from_language("FA"), Some(Layout::Fa));
        assert_eq!(Layout::from_language("iw"), Some(Layout::He));
        assert_eq!(Layout::from_language("fr"), None);
        assert_eq!(Layout::FaLegacy.language(), "fa");
    }
}
