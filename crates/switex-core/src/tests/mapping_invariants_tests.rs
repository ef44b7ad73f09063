use std::collections::HashSet;

use crate::{Layout, SUPPORTED_PAIRS, convert, convert_auto, lookup};

fn en_ru(s: &str) -> String {
    convert(s, Layout::En, Layout::Ru).text
}

fn ru_en(s: &str) -> String {
    convert(s, Layout::Ru, Layout::En).text
}

#[test]
fn tables_are_injective() {
    for layout in Layout::ALL {
        let table = lookup(layout);
        let unique: HashSet<char> = table.chars().collect();
        assert_eq!(unique.len(), table.len(), "{layout} repeats a character");
    }
}

#[test]
fn roundtrip_identity_for_every_pair() {
    for a in Layout::ALL {
        for b in Layout::ALL {
            for ch in lookup(a).chars() {
                let c = ch.to_string();
                let there = convert(&c, a, b).text;
                let back = convert(&there, b, a).text;
                assert_eq!(back, c, "{a}->{b}->{a} broke {ch:?} (via {there:?})");
            }
        }
    }
}

#[test]
fn linux_roundtrip_all_cases() {
    assert_eq!(en_ru("Linux"), "Дштгч");
    assert_eq!(ru_en("Дштгч"), "Linux");

    assert_eq!(en_ru("LiNuX"), "ДшТгЧ");
    assert_eq!(ru_en("ДшТгЧ"), "LiNuX");
}

#[test]
fn punctuation_bottom_row_physical_mapping() {
    assert_eq!(en_ru(".,/"), "юб.");
    assert_eq!(en_ru("<>?"), "БЮ,");
    assert_eq!(en_ru(";:'\""), "жЖэЭ");

    assert_eq!(ru_en("юб."), ".,/");
    assert_eq!(ru_en("БЮ,"), "<>?");
    assert_eq!(ru_en("жЖэЭ"), ";:'\"");
}

#[test]
fn digit_row_shift_symbols_mapping() {
    assert_eq!(en_ru("@#$%^&"), "\"№;%:?");
    assert_eq!(ru_en("\"№;%:?"), "@#$%^&");
}

#[test]
fn persian_digits_and_mirrored_brackets() {
    assert_eq!(convert("123", Layout::En, Layout::Fa).text, "۱۲۳");
    assert_eq!(convert("()", Layout::En, Layout::Fa).text, ")(");
    assert_eq!(convert("?", Layout::En, Layout::Fa).text, "؟");
}

#[test]
fn documented_examples() {
    assert_eq!(convert("sghl", Layout::En, Layout::Fa).text, "سلام");
    assert_eq!(convert("ghbdtn", Layout::En, Layout::Ru).text, "привет");
    assert_eq!(convert("akuo", Layout::En, Layout::He).text, "שלום");
    assert_eq!(convert("lvpfh", Layout::En, Layout::Ar).text, "مرحبا");
}

#[test]
fn turkish_letters_sit_on_punctuation_keys() {
    assert_eq!(convert("[;", Layout::En, Layout::Tr).text, "ğş");
    assert_eq!(convert("ğş", Layout::Tr, Layout::En).text, "[;");
    assert_eq!(convert("i", Layout::En, Layout::Tr).text, "ı");
}

#[test]
fn pass_through_for_unknown_scripts() {
    for text in ["🙂", "日本語", "∑∫", "🙂 🙃\n"] {
        assert_eq!(convert_auto(text, None, Layout::Fa).text, text);
    }
}

#[test]
fn six_supported_pairs_all_from_english() {
    assert_eq!(SUPPORTED_PAIRS.len(), 6);
    let targets: HashSet<Layout> = SUPPORTED_PAIRS.iter().map(|(_, t)| *t).collect();
    assert_eq!(targets.len(), 6);
    assert!(SUPPORTED_PAIRS.iter().all(|(s, _)| *s == Layout::En));
}
