use super::{
    detect::{classify_persian, detect_source},
    mapping::map_char,
};
use crate::layout::Layout;

/// Resolved direction of a conversion.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Route {
    /// Layout the text was typed in.
    pub source: Layout,
    /// Layout the user wanted.
    pub target: Layout,
}

impl Route {
    pub const fn new(source: Layout, target: Layout) -> Self {
        Self { source, target }
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}→{}",
            self.source.id().to_ascii_uppercase(),
            self.target.id().to_ascii_uppercase()
        )
    }
}

/// Output of one conversion request.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConversionResult {
    pub text: String,
    /// `None` when the text matched no layout and was passed through untouched.
    pub route: Option<Route>,
}

impl ConversionResult {
    pub fn changed_from(&self, input: &str) -> bool {
        self.text != input
    }
}

/// Refines an explicit `fa` source to the Persian table the text was typed with.
fn refine_source(text: &str, source: Layout) -> Layout {
    match source {
        Layout::Fa => classify_persian(text).layout(),
        other => other,
    }
}

fn map_text(text: &str, source: Layout, target: Layout) -> String {
    if source == target {
        return text.to_string();
    }

    // Non-Latin output is commonly 2 bytes per char in UTF-8.
    let mut out = String::with_capacity(text.len().saturating_mul(2));
    out.extend(text.chars().map(|ch| map_char(ch, source, target)));
    out
}

/// Converts `text` typed in `source` into what the same keys print in `target`.
///
/// Characters with no entry in `source`'s table pass through unchanged. An `fa`
/// source is refined to `fa-legacy` when the text carries legacy-only letters.
pub fn convert(text: &str, source: Layout, target: Layout) -> ConversionResult {
    let source = refine_source(text, source);
    ConversionResult {
        text: map_text(text, source, target),
        route: Some(Route::new(source, target)),
    }
}

/// Converts `text` with auto-detection of whatever side is not given.
///
/// - English text goes to `hint_target`, or to `default_target` if no hint.
/// - Text in another layout goes to `hint_target`, or to English.
/// - Text that matches no layout comes back unchanged with no route.
pub fn convert_auto(
    text: &str,
    hint_target: Option<Layout>,
    default_target: Layout,
) -> ConversionResult {
    let Ok(source) = detect_source(text) else {
        return ConversionResult {
            text: text.to_string(),
            route: None,
        };
    };

    let target = match source {
        Layout::En => hint_target.unwrap_or(default_target),
        _ => hint_target.unwrap_or(Layout::En),
    };

    convert(text, source, target)
}

/// Resolves a request where either side may be left to auto-detection.
pub fn convert_request(
    text: &str,
    source: Option<Layout>,
    target: Option<Layout>,
    default_target: Layout,
) -> ConversionResult {
    match (source, target) {
        (Some(source), Some(target)) => convert(text, source, target),
        (Some(source), None) => {
            let target = if source == Layout::En {
                default_target
            } else {
                Layout::En
            };
            convert(text, source, target)
        }
        (None, hint) => convert_auto(text, hint, default_target),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_conversions() {
        assert_eq!(convert("sghl", Layout::En, Layout::Fa).text, "سلام");
        assert_eq!(convert("ghbdtn", Layout::En, Layout::Ru).text, "привет");
        assert_eq!(convert("akuo", Layout::En, Layout::He).text, "שלום");
        assert_eq!(convert("привет", Layout::Ru, Layout::En).text, "ghbdtn");
    }

    #[test]
    fn same_layout_is_identity() {
        let r = convert("anything", Layout::Ru, Layout::Ru);
        assert_eq!(r.text, "anything");
        assert_eq!(r.route, Some(Route::new(Layout::Ru, Layout::Ru)));
    }

    #[test]
    fn unmapped_characters_pass_through() {
        assert_eq!(convert("a b\n🙂", Layout::En, Layout::Ru).text, "ф и\n🙂");
    }

    #[test]
    fn explicit_fa_source_is_refined_to_legacy() {
        let r = convert("بيا", Layout::Fa, Layout::En);
        assert_eq!(r.route, Some(Route::new(Layout::FaLegacy, Layout::En)));
        assert_eq!(r.text, "fdh");
    }

    #[test]
    fn explicit_fa_legacy_source_is_kept() {
        let r = convert("بیا", Layout::FaLegacy, Layout::En);
        assert_eq!(r.route, Some(Route::new(Layout::FaLegacy, Layout::En)));
    }

    #[test]
    fn non_english_to_non_english_goes_through_key_position() {
        assert_eq!(convert("й", Layout::Ru, Layout::Fa).text, "ض");
    }

    #[test]
    fn auto_ascii_defaults_to_configured_target() {
        let r = convert_auto("sghl", None, Layout::Fa);
        assert_eq!(r.text, "سلام");
        assert_eq!(r.route, Some(Route::new(Layout::En, Layout::Fa)));

        let r = convert_auto("ghbdtn", None, Layout::Ru);
        assert_eq!(r.text, "привет");
    }

    #[test]
    fn auto_ascii_uses_hint() {
        let r = convert_auto("ghbdtn", Some(Layout::Ru), Layout::Fa);
        assert_eq!(r.text, "привет");
    }

    #[test]
    fn auto_foreign_goes_to_english() {
        let r = convert_auto("سلام", None, Layout::Fa);
        assert_eq!(r.text, "sghl");
        assert_eq!(r.route, Some(Route::new(Layout::Fa, Layout::En)));
    }

    #[test]
    fn auto_unknown_script_passes_through() {
        let r = convert_auto("🙂🙂", None, Layout::Fa);
        assert_eq!(r.text, "🙂🙂");
        assert_eq!(r.route, None);
        assert!(!r.changed_from("🙂🙂"));
    }

    #[test]
    fn request_with_only_source() {
        let r = convert_request("привет", Some(Layout::Ru), None, Layout::Fa);
        assert_eq!(r.text, "ghbdtn");
        let r = convert_request("sghl", Some(Layout::En), None, Layout::Fa);
        assert_eq!(r.text, "سلام");
    }

    #[test]
    fn route_display_is_upper_case() {
        assert_eq!(Route::new(Layout::En, Layout::FaLegacy).to_string(), "EN→FA-LEGACY");
    }
}
