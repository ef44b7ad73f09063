use switex_core::Layout;

use super::RawConfig;
use crate::{error::ConfigError, input::hotkeys::HotkeyChord};

/// Upper bound for every configured delay.
pub const MAX_DELAY_MS: u64 = 60_000;

pub fn parse_hotkey(value: &str) -> Result<HotkeyChord, ConfigError> {
    value.parse().map_err(|e| ConfigError::InvalidHotkey {
        value: value.to_string(),
        reason: format!("{e}"),
    })
}

/// The layout ASCII text converts to when nothing else decides.
pub fn parse_default_target(value: &str) -> Result<Layout, ConfigError> {
    match value.parse::<Layout>()? {
        Layout::En => Err(ConfigError::EnglishDefaultTarget),
        layout => Ok(layout),
    }
}

fn bounded(field: &'static str, value_ms: u64, allow_zero: bool) -> Result<(), ConfigError> {
    if value_ms == 0 && !allow_zero {
        return Err(ConfigError::Zero { field });
    }
    if value_ms > MAX_DELAY_MS {
        return Err(ConfigError::TooLarge {
            field,
            value_ms,
            max_ms: MAX_DELAY_MS,
        });
    }
    Ok(())
}

impl RawConfig {
    pub fn validate_timings(&self) -> Result<(), ConfigError> {
        bounded("capture_timeout_ms", self.capture_timeout_ms, false)?;
        bounded("poll_interval_ms", self.poll_interval_ms, false)?;
        bounded("layout_poll_ms", self.layout_poll_ms, false)?;
        bounded("restore_delay_ms", self.restore_delay_ms, true)?;
        bounded("delay_before_paste_ms", self.delay_before_paste_ms, true)?;
        bounded("settle_after_release_ms", self.settle_after_release_ms, true)?;
        bounded("debounce_ms", self.debounce_ms, true)?;

        if self.poll_interval_ms >= self.capture_timeout_ms {
            return Err(ConfigError::PollNotBelowTimeout {
                poll_ms: self.poll_interval_ms,
                timeout_ms: self.capture_timeout_ms,
            });
        }
        Ok(())
    }
}
