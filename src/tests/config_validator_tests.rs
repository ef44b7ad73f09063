use switex_core::Layout;

use crate::{
    config::{Config, MAX_DELAY_MS, RawConfig, parse_default_target, parse_hotkey},
    error::ConfigError,
    input::hotkeys::{HotkeyChord, Key, Modifiers},
};

fn raw() -> RawConfig {
    RawConfig::default()
}

#[test]
fn defaults_are_valid() {
    let cfg = Config::try_from(raw()).unwrap();
    assert_eq!(cfg, Config::default());
}

#[test]
fn hotkey_is_parsed() {
    let cfg = Config::try_from(RawConfig {
        hotkey: "<ctrl>+<shift>+k".into(),
        ..raw()
    })
    .unwrap();
    assert_eq!(
        cfg.hotkey,
        HotkeyChord::new(Modifiers::CTRL | Modifiers::SHIFT, Key::Char('k'))
    );
}

#[test]
fn bad_hotkey_is_rejected_with_value() {
    let err = parse_hotkey("<ctrl>+<banana>").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidHotkey { ref value, .. } if value == "<ctrl>+<banana>"));
    assert!(err.to_string().starts_with("invalid hotkey '<ctrl>+<banana>'"));

    assert!(parse_hotkey("").is_err());
    assert!(parse_hotkey("<ctrl>+<alt>").is_err());
    assert!(parse_hotkey("a+b").is_err());
}

#[test]
fn default_target_must_not_be_english() {
    assert_eq!(parse_default_target("ru").unwrap(), Layout::Ru);
    assert_eq!(parse_default_target("FA").unwrap(), Layout::Fa);
    assert!(matches!(
        parse_default_target("en"),
        Err(ConfigError::EnglishDefaultTarget)
    ));
    assert!(matches!(
        parse_default_target("klingon"),
        Err(ConfigError::UnknownLayout(_))
    ));
}

#[test]
fn zero_capture_timeout_is_rejected() {
    let err = Config::try_from(RawConfig {
        capture_timeout_ms: 0,
        ..raw()
    })
    .unwrap_err();
    assert!(matches!(err, ConfigError::Zero { field: "capture_timeout_ms" }));
}

#[test]
fn zero_optional_delays_are_allowed() {
    let cfg = Config::try_from(RawConfig {
        restore_delay_ms: 0,
        debounce_ms: 0,
        settle_after_release_ms: 0,
        ..raw()
    })
    .unwrap();
    assert!(cfg.timings.restore_delay.is_zero());
    assert!(cfg.timings.debounce.is_zero());
}

#[test]
fn oversized_delay_is_rejected() {
    let err = Config::try_from(RawConfig {
        restore_delay_ms: MAX_DELAY_MS + 1,
        ..raw()
    })
    .unwrap_err();
    assert!(matches!(
        err,
        ConfigError::TooLarge {
            field: "restore_delay_ms",
            ..
        }
    ));
}

#[test]
fn poll_must_be_shorter_than_timeout() {
    let err = Config::try_from(RawConfig {
        capture_timeout_ms: 100,
        poll_interval_ms: 100,
        ..raw()
    })
    .unwrap_err();
    assert!(matches!(
        err,
        ConfigError::PollNotBelowTimeout {
            poll_ms: 100,
            timeout_ms: 100
        }
    ));
}

#[test]
fn blank_log_file_means_none() {
    let cfg = Config::try_from(RawConfig {
        log_file: Some("  ".into()),
        ..raw()
    })
    .unwrap();
    assert_eq!(cfg.log_file, None);
}

#[test]
fn config_converts_back_to_raw() {
    let raw_back = RawConfig::from(Config::default());
    assert_eq!(raw_back, raw());
}
