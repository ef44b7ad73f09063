//! Active layout on X11 (`xkblayout-state`, `setxkbmap`) and macOS (HIToolbox
//! preferences), read through short-lived subprocesses.

use std::process::{Command, Stdio};

use switex_core::Layout;

use crate::error::PlatformError;

/// Names of macOS keyboard layouts, matched against the part of the input
/// source id after the last `.` and before any `-` variant suffix.
const MACOS_SOURCES: [(&str, Layout); 10] = [
    ("persian", Layout::Fa),
    ("arabic", Layout::Ar),
    ("russian", Layout::Ru),
    ("turkish", Layout::Tr),
    ("hebrew", Layout::He),
    ("us", Layout::En),
    ("usextended", Layout::En),
    ("british", Layout::En),
    ("australian", Layout::En),
    ("abc", Layout::En),
];

pub fn layout_for_xkb(name: &str) -> Option<Layout> {
    let layout = match name.trim().to_ascii_lowercase().as_str() {
        "us" | "gb" | "au" => Layout::En,
        "ir" => Layout::Fa,
        "ara" => Layout::Ar,
        "ru" => Layout::Ru,
        "tr" => Layout::Tr,
        "il" => Layout::He,
        _ => return None,
    };
    Some(layout)
}

/// `com.apple.keylayout.Turkish-QWERTY-PC` is looked up as `turkish`.
pub fn layout_for_macos_source(id: &str) -> Option<Layout> {
    let id = id.trim().to_ascii_lowercase();
    let name = id.rsplit('.').next()?;
    let base = name.split('-').next()?;
    MACOS_SOURCES
        .iter()
        .find(|(known, _)| *known == base)
        .map(|&(_, layout)| layout)
}

/// First layout of the `layout:` line printed by `setxkbmap -query`.
pub fn parse_setxkbmap_query(output: &str) -> Option<&str> {
    output
        .lines()
        .find_map(|line| line.strip_prefix("layout:"))
        .and_then(|rest| rest.trim().split(',').next())
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

fn run(program: &str, args: &[&str]) -> Option<String> {
    let output = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stderr(Stdio::null())
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    String::from_utf8(output.stdout).ok()
}

fn read_x11() -> Result<Option<Layout>, PlatformError> {
    if let Some(out) = run("xkblayout-state", &["print", "%s"]) {
        return Ok(layout_for_xkb(&out));
    }
    if let Some(out) = run("setxkbmap", &["-query"]) {
        return Ok(parse_setxkbmap_query(&out).and_then(layout_for_xkb));
    }
    Err(PlatformError::missing(
        "layout query",
        "neither xkblayout-state nor setxkbmap is usable",
    ))
}

fn read_macos() -> Result<Option<Layout>, PlatformError> {
    run(
        "defaults",
        &[
            "read",
            "com.apple.HIToolbox",
            "AppleCurrentKeyboardLayoutInputSourceID",
        ],
    )
    .map(|out| layout_for_macos_source(&out))
    .ok_or_else(|| PlatformError::missing("layout query", "HIToolbox preference unreadable"))
}

pub fn read_active() -> Result<Option<Layout>, PlatformError> {
    if cfg!(target_os = "macos") {
        read_macos()
    } else {
        read_x11()
    }
}
