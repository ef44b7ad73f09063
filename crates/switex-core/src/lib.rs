//! Keyboard layout tables and wrong-layout text conversion.
//!
//! Every layout is a table from physical key position to printed character.
//! Converting text means looking up the key each character was typed with in
//! the source layout and printing what that key produces in the target layout.

pub mod error;
pub mod layout;
pub mod text;

pub use error::{AmbiguousLayout, UnknownLayout};
pub use layout::{Family, Layout, SUPPORTED_PAIRS};
pub use text::{
    convert::{ConversionResult, Route, convert, convert_auto, convert_request},
    detect::{PersianVariant, classify_persian, detect_source},
    mapping::{CharacterMap, KeyPosition, lookup, lookup_id, map_char},
};

#[cfg(test)]
mod tests;
