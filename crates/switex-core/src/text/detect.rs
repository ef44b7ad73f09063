//! Source layout detection from the character set of a text.
//!
//! Pure functions over the static tables; no OS state is consulted here.

use std::{collections::HashSet, sync::LazyLock};

use super::{
    mapping::lookup,
    tables::{LEGACY_ONLY, STANDARD_ONLY},
};
use crate::{
    error::AmbiguousLayout,
    layout::{Family, Layout},
};

/// Which of the two Persian tables a text was typed with.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum PersianVariant {
    Standard,
    Legacy,
}

impl PersianVariant {
    pub fn layout(self) -> Layout {
        match self {
            PersianVariant::Standard => Layout::Fa,
            PersianVariant::Legacy => Layout::FaLegacy,
        }
    }
}

/// Characters that only one non-English family can produce, per family.
static EXCLUSIVE: LazyLock<Vec<(Family, HashSet<char>)>> = LazyLock::new(|| {
    let family_chars = |family: Family| -> HashSet<char> {
        family
            .layouts()
            .iter()
            .flat_map(|&l| lookup(l).chars())
            .collect()
    };

    let en = family_chars(Family::English);
    let all: Vec<(Family, HashSet<char>)> = Family::DETECTABLE
        .iter()
        .map(|&f| (f, family_chars(f)))
        .collect();

    all.iter()
        .map(|(family, chars)| {
            let exclusive = chars
                .iter()
                .copied()
                .filter(|ch| !en.contains(ch))
                .filter(|ch| {
                    all.iter()
                        .filter(|(other, _)| other != family)
                        .all(|(_, other_chars)| !other_chars.contains(ch))
                })
                .collect();
            (*family, exclusive)
        })
        .collect()
});

/// Picks the Persian table for `text`.
///
/// Any standard-only character decides `Standard`, otherwise any legacy-only
/// character decides `Legacy`; with neither present the standard table is used.
pub fn classify_persian(text: &str) -> PersianVariant {
    if text.chars().any(|c| STANDARD_ONLY.contains(&c)) {
        PersianVariant::Standard
    } else if text.chars().any(|c| LEGACY_ONLY.contains(&c)) {
        PersianVariant::Legacy
    } else {
        PersianVariant::Standard
    }
}

fn family_in_table(family: Family, ch: char) -> bool {
    family.layouts().iter().any(|&l| lookup(l).contains(ch))
}

/// Detects the layout `text` was typed in.
///
/// A non-English family wins when the text holds characters that English cannot
/// produce: most family-exclusive characters first, then most characters from
/// the family's tables, ties broken in [`Family::DETECTABLE`] order. Text made
/// only of English-table characters (or of whitespace) is English.
///
/// Fails with [`AmbiguousLayout`] when no character belongs to any table.
pub fn detect_source(text: &str) -> Result<Layout, AmbiguousLayout> {
    let en = lookup(Layout::En);
    let foreign: Vec<char> = text.chars().filter(|&c| !en.contains(c)).collect();

    let mut best: Option<(Family, usize, usize)> = None;
    for (family, exclusive) in EXCLUSIVE.iter() {
        let exclusive_hits = foreign.iter().filter(|c| exclusive.contains(c)).count();
        let table_hits = foreign
            .iter()
            .filter(|&&c| family_in_table(*family, c))
            .count();
        if table_hits == 0 {
            continue;
        }
        let better = match best {
            None => true,
            Some((_, ex, tab)) => (exclusive_hits, table_hits) > (ex, tab),
        };
        if better {
            best = Some((*family, exclusive_hits, table_hits));
        }
    }

    if let Some((family, _, _)) = best {
        return Ok(match family {
            Family::Persian => classify_persian(text).layout(),
            other => other.layouts()[0],
        });
    }

    if text.chars().any(|c| en.contains(c)) || text.trim().is_empty() {
        return Ok(Layout::En);
    }

    Err(AmbiguousLayout)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_text_is_english() {
        assert_eq!(detect_source("sghl"), Ok(Layout::En));
        assert_eq!(detect_source("ghbdtn, [jkjlyj!"), Ok(Layout::En));
    }

    #[test]
    fn blank_text_is_english() {
        assert_eq!(detect_source(""), Ok(Layout::En));
        assert_eq!(detect_source(" \n\t"), Ok(Layout::En));
    }

    #[test]
    fn script_specific_text_is_detected() {
        assert_eq!(detect_source("привет"), Ok(Layout::Ru));
        assert_eq!(detect_source("שלום"), Ok(Layout::He));
        assert_eq!(detect_source("gÜzel şehir"), Ok(Layout::Tr));
        assert_eq!(detect_source("سلام"), Ok(Layout::Fa));
    }

    #[test]
    fn arabic_exclusive_letters_select_arabic() {
        // alef maqsura and Arabic-Indic digits exist only on the Arabic layout
        assert_eq!(detect_source("على ١٢"), Ok(Layout::Ar));
    }

    #[test]
    fn persian_exclusive_letters_beat_shared_arabic_letters() {
        assert_eq!(detect_source("پدر"), Ok(Layout::Fa));
    }

    #[test]
    fn unknown_script_is_ambiguous() {
        assert_eq!(detect_source("🙂🙃"), Err(AmbiguousLayout));
        assert_eq!(detect_source("日本"), Err(AmbiguousLayout));
    }

    #[test]
    fn emoji_next_to_latin_is_english() {
        assert_eq!(detect_source("ok 🙂"), Ok(Layout::En));
    }

    #[test]
    fn persian_variant_defaults_to_standard() {
        assert_eq!(classify_persian("سلام"), PersianVariant::Standard);
        assert_eq!(classify_persian(""), PersianVariant::Standard);
    }

    #[test]
    fn persian_discriminators_decide_variant() {
        assert_eq!(classify_persian("بیا"), PersianVariant::Standard);
        assert_eq!(classify_persian("بيا"), PersianVariant::Legacy);
        assert_eq!(classify_persian("كتاب"), PersianVariant::Legacy);
        // standard-only wins when both appear
        assert_eq!(classify_persian("کي"), PersianVariant::Standard);
    }
}
