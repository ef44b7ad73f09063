use std::{
    sync::Arc,
    thread,
    time::{Duration, Instant},
};

use switex_core::Layout;
use tracing_test::traced_test;

use super::mock_platform::{MockPlatform, fast_timings};
use crate::{
    conversion::Direction,
    daemon::{Daemon, DaemonOptions},
    domain::outcome::SkipReason,
    error::{AppError, PlatformError},
    input::hotkeys::HotkeyChord,
    platform::HotkeyEvent,
};

fn options(debounce: Duration) -> DaemonOptions {
    DaemonOptions {
        hotkey: HotkeyChord::default_trigger(),
        direction: Direction::default(),
        default_target: Layout::Fa,
        timings: crate::config::Timings {
            debounce,
            ..fast_timings()
        },
        monitor_layouts: false,
    }
}

fn at(base: Instant, ms: u64) -> HotkeyEvent {
    HotkeyEvent {
        at: base + Duration::from_millis(ms),
    }
}

#[test]
fn triggers_inside_debounce_window_are_rate_limited() {
    let platform = Arc::new(MockPlatform::new());
    let mut daemon = Daemon::new(platform, options(Duration::from_millis(500)));
    let base = Instant::now();

    assert!(daemon.on_trigger(at(base, 0), None).is_ok());
    assert_eq!(
        daemon.on_trigger(at(base, 100), None).unwrap_err(),
        SkipReason::RateLimited
    );
}

#[test]
fn trigger_while_busy_is_dropped() {
    let platform = Arc::new(MockPlatform::new());
    let mut daemon = Daemon::new(platform, options(Duration::ZERO));
    let base = Instant::now();

    assert!(daemon.on_trigger(at(base, 0), None).is_ok());
    assert_eq!(
        daemon.on_trigger(at(base, 10), None).unwrap_err(),
        SkipReason::Reentry
    );
}

#[test]
fn trigger_captures_layout_at_press_time() {
    let platform = Arc::new(MockPlatform::new().with_layout(Layout::Ru));
    let mut daemon = Daemon::new(platform, options(Duration::ZERO));

    let session = daemon.on_trigger(HotkeyEvent::now(), None).unwrap();

    assert_eq!(session.layout, Some(Layout::Ru));
    assert_eq!(session.previous, None);
    assert!(session.window.is_some());
}

#[test]
fn run_converts_selection_once_per_burst() {
    let platform = Arc::new(
        MockPlatform::new()
            .with_clipboard("saved")
            .with_selection("sghl"),
    );
    let events = platform.hotkey_sender();
    let base = Instant::now();
    for ms in [0, 50, 100] {
        events.send(at(base, ms)).unwrap();
    }
    drop(events);

    Daemon::new(Arc::clone(&platform), options(Duration::from_millis(500)))
        .run()
        .unwrap();

    assert_eq!(platform.pasted(), vec!["سلام".to_string()]);
    assert_eq!(platform.clipboard().as_deref(), Some("saved"));
}

#[traced_test]
#[test]
fn trigger_during_restore_delay_is_dropped_as_reentry() {
    let platform = Arc::new(MockPlatform::new().with_selection("sghl"));
    let events = platform.hotkey_sender();
    events.send(HotkeyEvent::now()).unwrap();
    events.send(HotkeyEvent::now()).unwrap();
    drop(events);

    let mut opts = options(Duration::ZERO);
    opts.timings.restore_delay = Duration::from_millis(300);
    Daemon::new(Arc::clone(&platform), opts).run().unwrap();

    assert_eq!(platform.pasted(), vec!["سلام".to_string()]);
    assert!(logs_contain("trigger dropped"));
    assert!(logs_contain("reentry"));
    assert!(!logs_contain("rate_limited"));
}

#[test]
fn panicking_run_does_not_stop_the_daemon() {
    let platform = Arc::new(MockPlatform::new().with_selection("sghl").panicking_copy());
    let events = platform.hotkey_sender();
    let sender = thread::spawn(move || {
        events.send(HotkeyEvent::now()).unwrap();
        thread::sleep(Duration::from_millis(300));
        events.send(HotkeyEvent::now()).unwrap();
    });

    let result = Daemon::new(Arc::clone(&platform), options(Duration::ZERO)).run();
    sender.join().unwrap();

    assert!(result.is_ok());
    assert_eq!(platform.chords(), vec![HotkeyChord::copy(), HotkeyChord::paste()]);
    assert_eq!(platform.pasted(), vec!["سلام".to_string()]);
}

#[test]
fn active_non_english_layout_sets_direction() {
    let platform = Arc::new(MockPlatform::new().with_layout(Layout::Ru).with_selection("ghbdtn"));
    let events = platform.hotkey_sender();
    events.send(HotkeyEvent::now()).unwrap();
    drop(events);

    Daemon::new(Arc::clone(&platform), options(Duration::ZERO))
        .run()
        .unwrap();

    assert_eq!(platform.pasted(), vec!["привет".to_string()]);
}

#[test]
fn missing_capability_fails_start() {
    let platform = Arc::new(MockPlatform::new().missing("key simulation"));
    let _events = platform.hotkey_sender();

    let err = Daemon::new(platform, options(Duration::ZERO)).run().unwrap_err();

    assert!(matches!(
        err,
        AppError::Platform(PlatformError::CapabilityMissing {
            capability: "key simulation",
            ..
        })
    ));
}
