use thiserror::Error;

/// A layout identifier that is not one of the supported layouts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown layout '{0}'. Run --list to see supported layouts.")]
pub struct UnknownLayout(pub String);

/// Raised by source detection when the text contains no character from any table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("text contains no character from any known layout")]
pub struct AmbiguousLayout;
