use switex_core::Layout;

use crate::conversion::Direction;

/// What decided the direction of a daemon run.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DirectionPolicy {
    /// Both `-f` and `-t` were given.
    Explicit,
    /// The user switched layouts just before pressing the hotkey.
    Switched,
    /// A non-English layout is active; the text was typed in English.
    ActiveLayout,
    /// Nothing known about the layouts; detect from the text.
    TextDetection,
}

impl DirectionPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            DirectionPolicy::Explicit => "explicit",
            DirectionPolicy::Switched => "switched",
            DirectionPolicy::ActiveLayout => "active_layout",
            DirectionPolicy::TextDetection => "text_detection",
        }
    }
}

/// Resolves a daemon run's direction from the flags and the layouts captured
/// at press time. Explicit sides always win over captured ones.
pub fn resolve(
    explicit: Direction,
    fired: Option<Layout>,
    previous: Option<Layout>,
) -> (Direction, DirectionPolicy) {
    if explicit.source.is_some() && explicit.target.is_some() {
        return (explicit, DirectionPolicy::Explicit);
    }

    let Some(current) = fired else {
        return (explicit, DirectionPolicy::TextDetection);
    };

    match previous {
        Some(prev) if prev != current => (
            Direction {
                source: explicit.source.or(Some(prev)),
                target: explicit.target.or(Some(current)),
            },
            DirectionPolicy::Switched,
        ),
        _ if current != Layout::En => (
            Direction {
                source: explicit.source.or(Some(Layout::En)),
                target: explicit.target.or(Some(current)),
            },
            DirectionPolicy::ActiveLayout,
        ),
        _ => (explicit, DirectionPolicy::TextDetection),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dir(source: Option<Layout>, target: Option<Layout>) -> Direction {
        Direction { source, target }
    }

    #[test]
    fn explicit_flags_win() {
        let explicit = dir(Some(Layout::Ru), Some(Layout::En));
        let (d, p) = resolve(explicit, Some(Layout::Fa), Some(Layout::En));
        assert_eq!(d, explicit);
        assert_eq!(p, DirectionPolicy::Explicit);
    }

    #[test]
    fn recent_switch_routes_previous_to_current() {
        let (d, p) = resolve(Direction::default(), Some(Layout::Fa), Some(Layout::En));
        assert_eq!(d, dir(Some(Layout::En), Some(Layout::Fa)));
        assert_eq!(p, DirectionPolicy::Switched);

        let (d, _) = resolve(Direction::default(), Some(Layout::En), Some(Layout::He));
        assert_eq!(d, dir(Some(Layout::He), Some(Layout::En)));
    }

    #[test]
    fn non_english_active_layout_assumes_english_source() {
        let (d, p) = resolve(Direction::default(), Some(Layout::Ru), None);
        assert_eq!(d, dir(Some(Layout::En), Some(Layout::Ru)));
        assert_eq!(p, DirectionPolicy::ActiveLayout);
    }

    #[test]
    fn english_without_switch_falls_back_to_text() {
        let (d, p) = resolve(dir(None, Some(Layout::Tr)), Some(Layout::En), None);
        assert_eq!(d, dir(None, Some(Layout::Tr)));
        assert_eq!(p, DirectionPolicy::TextDetection);
    }

    #[test]
    fn single_explicit_side_is_kept() {
        let (d, _) = resolve(dir(None, Some(Layout::Ar)), Some(Layout::Fa), Some(Layout::En));
        assert_eq!(d, dir(Some(Layout::En), Some(Layout::Ar)));
    }

    #[test]
    fn unknown_layout_uses_text_detection() {
        let (_, p) = resolve(Direction::default(), None, Some(Layout::En));
        assert_eq!(p, DirectionPolicy::TextDetection);
    }
}
