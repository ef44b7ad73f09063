use std::{collections::HashMap, sync::LazyLock};

use super::tables::{
    AR_SHIFT, AR_UNSHIFT, EN_SHIFT, EN_UNSHIFT, FA_LEGACY_SHIFT, FA_LEGACY_UNSHIFT, FA_SHIFT,
    FA_UNSHIFT, HE_SHIFT, HE_UNSHIFT, KEYS_PER_ROW, RU_SHIFT, RU_UNSHIFT, TR_SHIFT, TR_UNSHIFT,
};
use crate::{error::UnknownLayout, layout::Layout};

/// Physical key identity shared by all layouts.
///
/// `0..47` are the unshifted keys in US QWERTY order, `47..94` the same keys with Shift.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct KeyPosition(u8);

impl KeyPosition {
    pub const COUNT: usize = KEYS_PER_ROW * 2;

    pub fn index(self) -> usize {
        usize::from(self.0)
    }

    pub fn is_shifted(self) -> bool {
        self.index() >= KEYS_PER_ROW
    }

    /// The character English QWERTY prints on this key.
    pub fn en_char(self) -> char {
        lookup(Layout::En).char_at(self)
    }
}

/// Character table of one layout: key position <-> printed character.
#[derive(Debug)]
pub struct CharacterMap {
    layout: Layout,
    by_position: Vec<char>,
    positions: HashMap<char, KeyPosition>,
}

impl CharacterMap {
    fn build(layout: Layout, unshifted: &str, shifted: &str) -> Self {
        let by_position: Vec<char> = unshifted.chars().chain(shifted.chars()).collect();
        debug_assert_eq!(by_position.len(), KeyPosition::COUNT, "{layout} table size");

        let mut positions = HashMap::with_capacity(by_position.len());
        for (i, &ch) in by_position.iter().enumerate() {
            // Tables are injective; on a duplicate the first key wins.
            let pos = KeyPosition(u8::try_from(i).unwrap_or(u8::MAX));
            positions.entry(ch).or_insert(pos);
        }

        Self {
            layout,
            by_position,
            positions,
        }
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn char_at(&self, pos: KeyPosition) -> char {
        self.by_position[pos.index()]
    }

    pub fn position_of(&self, ch: char) -> Option<KeyPosition> {
        self.positions.get(&ch).copied()
    }

    pub fn contains(&self, ch: char) -> bool {
        self.positions.contains_key(&ch)
    }

    /// Characters in key order (unshifted row first).
    pub fn chars(&self) -> impl Iterator<Item = char> + '_ {
        self.by_position.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.by_position.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_position.is_empty()
    }
}

static TABLES: LazyLock<Vec<CharacterMap>> = LazyLock::new(|| {
    Layout::ALL
        .iter()
        .map(|&layout| {
            let (unshifted, shifted) = rows(layout);
            CharacterMap::build(layout, unshifted, shifted)
        })
        .collect()
});

/// Direct character-to-character maps for every ordered layout pair.
static PAIRS: LazyLock<HashMap<(Layout, Layout), HashMap<char, char>>> = LazyLock::new(|| {
    let mut pairs = HashMap::with_capacity(Layout::ALL.len() * Layout::ALL.len());
    for source in Layout::ALL {
        for target in Layout::ALL {
            let from = lookup(source);
            let to = lookup(target);
            let map = from
                .chars()
                .filter_map(|ch| from.position_of(ch).map(|pos| (ch, to.char_at(pos))))
                .collect();
            pairs.insert((source, target), map);
        }
    }
    pairs
});

const fn rows(layout: Layout) -> (&'static str, &'static str) {
    match layout {
        Layout::En => (EN_UNSHIFT, EN_SHIFT),
        Layout::Fa => (FA_UNSHIFT, FA_SHIFT),
        Layout::FaLegacy => (FA_LEGACY_UNSHIFT, FA_LEGACY_SHIFT),
        Layout::Ar => (AR_UNSHIFT, AR_SHIFT),
        Layout::Ru => (RU_UNSHIFT, RU_SHIFT),
        Layout::Tr => (TR_UNSHIFT, TR_SHIFT),
        Layout::He => (HE_UNSHIFT, HE_SHIFT),
    }
}

/// Returns the character table of `layout`. Tables are built on first use and never change.
pub fn lookup(layout: Layout) -> &'static CharacterMap {
    let idx = Layout::ALL
        .iter()
        .position(|&l| l == layout)
        .unwrap_or_default();
    &TABLES[idx]
}

/// Looks up a table by its textual id (`en`, `fa`, `fa-legacy`, ...).
pub fn lookup_id(id: &str) -> Result<&'static CharacterMap, UnknownLayout> {
    id.parse::<Layout>().map(lookup)
}

/// Maps one character typed in `source` to what the same key prints in `target`.
///
/// Characters outside `source`'s table are returned unchanged.
pub fn map_char(ch: char, source: Layout, target: Layout) -> char {
    PAIRS
        .get(&(source, target))
        .and_then(|m| m.get(&ch))
        .copied()
        .unwrap_or(ch)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_table_covers_all_key_positions() {
        for layout in Layout::ALL {
            assert_eq!(lookup(layout).len(), KeyPosition::COUNT, "{layout}");
            assert_eq!(lookup(layout).layout(), layout);
        }
    }

    #[test]
    fn english_table_is_the_key_order() {
        let en = lookup(Layout::En);
        let pos = en.position_of('q').unwrap();
        assert_eq!(pos.en_char(), 'q');
        assert!(!pos.is_shifted());
        assert!(en.position_of('Q').unwrap().is_shifted());
    }

    #[test]
    fn lookup_by_id_rejects_unknown() {
        assert_eq!(lookup_id("ru").unwrap().layout(), Layout::Ru);
        assert!(lookup_id("xx").is_err());
    }

    #[test]
    fn map_char_passes_through_unmapped() {
        assert_eq!(map_char('g', Layout::En, Layout::Ru), 'п');
        assert_eq!(map_char(' ', Layout::En, Layout::Ru), ' ');
        assert_eq!(map_char('п', Layout::En, Layout::Ru), 'п');
    }
}
