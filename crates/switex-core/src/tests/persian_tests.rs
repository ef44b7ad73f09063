use crate::{
    Layout, PersianVariant, Route, classify_persian, convert, convert_auto, detect_source, lookup,
    text::tables::{LEGACY_ONLY, STANDARD_ONLY},
};

#[test]
fn discriminators_are_exclusive_to_their_table() {
    let standard = lookup(Layout::Fa);
    let legacy = lookup(Layout::FaLegacy);

    for &ch in STANDARD_ONLY {
        assert!(standard.contains(ch), "{ch:?} missing from fa");
        assert!(!legacy.contains(ch), "{ch:?} present in fa-legacy");
    }
    for &ch in LEGACY_ONLY {
        assert!(legacy.contains(ch), "{ch:?} missing from fa-legacy");
        assert!(!standard.contains(ch), "{ch:?} present in fa");
    }
}

#[test]
fn discriminators_share_key_positions() {
    let standard = lookup(Layout::Fa);
    let legacy = lookup(Layout::FaLegacy);
    for (&s, &l) in STANDARD_ONLY.iter().zip(LEGACY_ONLY) {
        assert_eq!(standard.position_of(s), legacy.position_of(l));
    }
}

#[test]
fn standard_only_text_resolves_to_standard() {
    assert_eq!(detect_source("کتاب"), Ok(Layout::Fa));
    assert_eq!(classify_persian("کتاب"), PersianVariant::Standard);
}

#[test]
fn legacy_only_text_resolves_to_legacy() {
    assert_eq!(detect_source("كتاب"), Ok(Layout::FaLegacy));
    let r = convert_auto("كتاب", None, Layout::Fa);
    assert_eq!(r.route, Some(Route::new(Layout::FaLegacy, Layout::En)));
    assert_eq!(r.text, ";jhf");
}

#[test]
fn text_without_discriminators_resolves_to_standard() {
    assert_eq!(detect_source("سلام"), Ok(Layout::Fa));
}

#[test]
fn legacy_layout_differs_on_pe_and_hamza_keys() {
    assert_eq!(convert("m\\", Layout::En, Layout::Fa).text, "پ\\");
    assert_eq!(convert("m\\", Layout::En, Layout::FaLegacy).text, "ئپ");
}

#[test]
fn legacy_and_standard_convert_into_each_other() {
    let r = convert("بيا", Layout::FaLegacy, Layout::Fa);
    assert_eq!(r.text, "بیا");
}
