use std::{
    fmt::Write as _,
    io::{self, IsTerminal, Read},
    sync::Arc,
};

use switex_core::{Layout, SUPPORTED_PAIRS, convert_request};

use super::args::Cli;
use crate::{
    config::{self, Config, parse_hotkey},
    conversion::{Direction, Mode, RoundTripController},
    daemon::{Daemon, DaemonOptions},
    domain::{
        outcome::{ActionOutcome, SkipReason},
        session::CaptureSession,
    },
    error::AppError,
    platform::{self, Platform},
    utils::tracing::init_tracing,
};

/// Process exit code for any reported error.
pub const EXIT_ERROR: u8 = 1;

pub fn run(cli: Cli) -> Result<(), AppError> {
    if cli.list {
        print!("{}", supported_pairs());
        return Ok(());
    }

    let direction = Direction {
        source: parse_layout(cli.from.as_deref())?,
        target: parse_layout(cli.to.as_deref())?,
    };

    let mut cfg = if cli.daemon {
        config::load()?
    } else {
        config::load_existing()?
    };
    apply_overrides(&mut cfg, &cli)?;

    init_tracing(cfg.log_file.as_deref(), cli.verbose)?;

    if cli.daemon {
        run_daemon(cfg, direction)
    } else if cli.clipboard {
        run_clipboard(&cfg, direction)
    } else {
        run_text(cli.text, &cfg, direction)
    }
}

fn parse_layout(value: Option<&str>) -> Result<Option<Layout>, AppError> {
    value.map(str::parse::<Layout>).transpose().map_err(Into::into)
}

fn apply_overrides(cfg: &mut Config, cli: &Cli) -> Result<(), AppError> {
    if let Some(hotkey) = cli.hotkey.as_deref() {
        cfg.hotkey = parse_hotkey(hotkey)?;
    }
    if let Some(path) = cli.log.as_ref() {
        cfg.log_file = Some(path.clone());
    }
    Ok(())
}

/// The `--list` table, one line per supported pair.
pub fn supported_pairs() -> String {
    let mut out = String::from("\nSupported language pairs:\n\n");
    for (from, to) in SUPPORTED_PAIRS {
        let _ = writeln!(
            out,
            "  {:<4} ↔ {:<9} ({} ↔ {})",
            from.id().to_uppercase(),
            to.id().to_uppercase(),
            from.display_name(),
            to.display_name()
        );
    }
    out.push('\n');
    out
}

fn run_daemon(cfg: Config, direction: Direction) -> Result<(), AppError> {
    let platform: Arc<dyn Platform> = Arc::from(platform::native());
    let opts = DaemonOptions {
        hotkey: cfg.hotkey,
        direction,
        default_target: cfg.default_target,
        timings: cfg.timings,
        monitor_layouts: true,
    };
    Daemon::new(platform, opts).run()
}

fn run_clipboard(cfg: &Config, direction: Direction) -> Result<(), AppError> {
    let platform = platform::native();
    let controller = RoundTripController::new(&*platform, cfg.timings, cfg.default_target);
    let mut session = CaptureSession::detached();

    match controller.run(&mut session, direction, Mode::ClipboardOnly) {
        ActionOutcome::Applied(_) => Ok(()),
        ActionOutcome::Skipped(SkipReason::ClipboardEmpty) => Err(AppError::ClipboardEmpty),
        ActionOutcome::Skipped(_) => Ok(()),
        ActionOutcome::Failed(e) => Err(e.into()),
    }
}

fn run_text(inline: Option<String>, cfg: &Config, direction: Direction) -> Result<(), AppError> {
    let text = match inline {
        Some(text) => text,
        None => read_stdin()?,
    };
    println!("{}", convert_text(&text, direction, cfg.default_target));
    Ok(())
}

fn read_stdin() -> Result<String, AppError> {
    let mut stdin = io::stdin();
    if stdin.is_terminal() {
        eprintln!("Enter text to convert (Ctrl+D / Ctrl+Z when done):");
    }
    let mut text = String::new();
    stdin.read_to_string(&mut text)?;
    Ok(text)
}

/// Converts one-shot input; trailing line breaks are dropped.
pub fn convert_text(text: &str, direction: Direction, default_target: Layout) -> String {
    let text = text.trim_end_matches(['\n', '\r']);
    let result = convert_request(text, direction.source, direction.target, default_target);
    match result.route {
        Some(route) => tracing::debug!(%route, "converted"),
        None if !text.trim().is_empty() => {
            tracing::warn!("no layout matched the input; printing it unchanged");
        }
        None => {}
    }
    result.text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pairs_listing_names_every_pair() {
        let listing = supported_pairs();
        assert!(listing.contains("Supported language pairs:"));
        assert!(listing.contains("EN   ↔ FA        (English ↔ Persian/Farsi)"));
        assert!(listing.contains("EN   ↔ FA-LEGACY (English ↔ Persian/Farsi (legacy))"));
        assert_eq!(listing.matches('↔').count(), 2 * SUPPORTED_PAIRS.len());
    }

    #[test]
    fn explicit_pair_converts_and_trims_line_breaks() {
        let direction = Direction {
            source: Some(Layout::En),
            target: Some(Layout::Ru),
        };
        assert_eq!(convert_text("ghbdtn\r\n", direction, Layout::Fa), "привет");
    }

    #[test]
    fn unmatched_text_passes_through() {
        assert_eq!(convert_text("🙂🙂\n", Direction::default(), Layout::Fa), "🙂🙂");
    }

    #[test]
    fn unknown_layout_flag_is_an_error() {
        let err = parse_layout(Some("xx")).unwrap_err();
        assert!(err.to_string().contains("Unknown layout 'xx'"));
        assert_eq!(parse_layout(None).unwrap(), None);
    }
}
