use switex_core::Route;

use crate::error::RoundTripError;

/// Result of one round trip or one daemon trigger.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ActionOutcome {
    Applied(Applied),
    Skipped(SkipReason),
    Failed(RoundTripError),
}

impl ActionOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, ActionOutcome::Applied(_))
    }
}

/// What a successful run changed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Applied {
    pub route: Route,
    pub text: String,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SkipReason {
    NoSelection,
    ClipboardEmpty,
    UnknownScript,
    NoChangeAfterConvert,
    ForegroundChanged,
    RateLimited,
    Reentry,
}

impl SkipReason {
    pub fn as_str(self) -> &'static str {
        match self {
            SkipReason::NoSelection => "no_selection",
            SkipReason::ClipboardEmpty => "clipboard_empty",
            SkipReason::UnknownScript => "unknown_script",
            SkipReason::NoChangeAfterConvert => "no_change_after_convert",
            SkipReason::ForegroundChanged => "foreground_changed",
            SkipReason::RateLimited => "rate_limited",
            SkipReason::Reentry => "reentry",
        }
    }
}

/// First `max` characters of `text` on one line, with `…` when cut.
pub fn preview(text: &str, max: usize) -> String {
    let flat = text.replace("\r\n", "↵").replace(['\r', '\n'], "↵");
    let mut out: String = flat.chars().take(max).collect();
    if flat.chars().nth(max).is_some() {
        out.push('…');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_cuts_long_text() {
        assert_eq!(preview("abcdef", 3), "abc…");
        assert_eq!(preview("abc", 3), "abc");
        assert_eq!(preview("a\nb\r\nc", 10), "a↵b↵c");
    }

    #[test]
    fn skip_reasons_are_snake_case() {
        assert_eq!(SkipReason::NoChangeAfterConvert.as_str(), "no_change_after_convert");
        assert_eq!(SkipReason::Reentry.as_str(), "reentry");
    }
}
