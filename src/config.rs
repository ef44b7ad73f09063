mod config_validator;
pub mod raw_config;

use std::{
    path::{Path, PathBuf},
    time::Duration,
};

pub use config_validator::{MAX_DELAY_MS, parse_default_target, parse_hotkey};
pub use raw_config::RawConfig;
use serde::{Deserialize, Deserializer, Serialize};
use switex_core::Layout;

use crate::{error::ConfigError, input::hotkeys::HotkeyChord};

const APP_NAME: &str = "switex";
const CONFIG_NAME: &str = "config";

/// Overrides the config file location.
pub const CONFIG_ENV: &str = "SWITEX_CONFIG";

/// Delays and bounds of the round trip and the daemon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timings {
    pub capture_timeout: Duration,
    pub poll_interval: Duration,
    pub restore_delay: Duration,
    pub delay_before_paste: Duration,
    pub settle_after_release: Duration,
    pub debounce: Duration,
    pub layout_poll: Duration,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            capture_timeout: Duration::from_millis(3000),
            poll_interval: Duration::from_millis(50),
            restore_delay: Duration::from_millis(2000),
            delay_before_paste: Duration::from_millis(120),
            settle_after_release: Duration::from_millis(150),
            debounce: Duration::from_millis(500),
            layout_poll: Duration::from_millis(150),
        }
    }
}

fn millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "RawConfig")]
pub struct Config {
    pub hotkey: HotkeyChord,
    /// Target for ASCII input when no flag or layout switch decides.
    pub default_target: Layout,
    pub timings: Timings,
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            hotkey: HotkeyChord::default_trigger(),
            default_target: Layout::Fa,
            timings: Timings::default(),
            log_file: None,
        }
    }
}

impl TryFrom<RawConfig> for Config {
    type Error = ConfigError;

    fn try_from(raw: RawConfig) -> Result<Self, Self::Error> {
        raw.validate_timings()?;

        Ok(Self {
            hotkey: parse_hotkey(&raw.hotkey)?,
            default_target: parse_default_target(&raw.default_target)?,
            timings: Timings {
                capture_timeout: Duration::from_millis(raw.capture_timeout_ms),
                poll_interval: Duration::from_millis(raw.poll_interval_ms),
                restore_delay: Duration::from_millis(raw.restore_delay_ms),
                delay_before_paste: Duration::from_millis(raw.delay_before_paste_ms),
                settle_after_release: Duration::from_millis(raw.settle_after_release_ms),
                debounce: Duration::from_millis(raw.debounce_ms),
                layout_poll: Duration::from_millis(raw.layout_poll_ms),
            },
            log_file: raw.log_file.filter(|s| !s.trim().is_empty()).map(PathBuf::from),
        })
    }
}

impl From<Config> for RawConfig {
    fn from(cfg: Config) -> Self {
        let t = cfg.timings;
        Self {
            hotkey: cfg.hotkey.to_config_string(),
            default_target: cfg.default_target.id().to_string(),
            capture_timeout_ms: millis(t.capture_timeout),
            poll_interval_ms: millis(t.poll_interval),
            restore_delay_ms: millis(t.restore_delay),
            delay_before_paste_ms: millis(t.delay_before_paste),
            settle_after_release_ms: millis(t.settle_after_release),
            debounce_ms: millis(t.debounce),
            layout_poll_ms: millis(t.layout_poll),
            log_file: cfg.log_file.map(|p| p.display().to_string()),
        }
    }
}

impl<'de> Deserialize<'de> for Config {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = RawConfig::deserialize(deserializer)?;
        Self::try_from(raw).map_err(serde::de::Error::custom)
    }
}

/// `$SWITEX_CONFIG`, or `config.toml` in the per-user config directory.
pub fn config_path() -> Result<PathBuf, ConfigError> {
    if let Some(path) = std::env::var_os(CONFIG_ENV).filter(|p| !p.is_empty()) {
        return Ok(PathBuf::from(path));
    }
    confy::get_configuration_file_path(APP_NAME, CONFIG_NAME)
        .map_err(|e| ConfigError::NoConfigDir(e.to_string()))
}

/// Loads `path`, writing the defaults there first when the file is missing.
pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
    confy::load_path(path).map_err(|source| ConfigError::Load {
        path: path.to_path_buf(),
        source,
    })
}

pub fn store_to(path: &Path, cfg: &Config) -> Result<(), ConfigError> {
    confy::store_path(path, cfg).map_err(|source| ConfigError::Store {
        path: path.to_path_buf(),
        source,
    })
}

/// Loads the user config, creating it with defaults when missing.
pub fn load() -> Result<Config, ConfigError> {
    let path = config_path()?;
    let cfg = load_from(&path)?;
    tracing::debug!(path = %path.display(), "config loaded");
    Ok(cfg)
}

/// Loads the user config if one exists; never writes a file.
pub fn load_existing() -> Result<Config, ConfigError> {
    match config_path() {
        Ok(path) if path.is_file() => load_from(&path),
        Ok(_) => Ok(Config::default()),
        Err(e) => {
            tracing::debug!(error = %e, "no config location; using defaults");
            Ok(Config::default())
        }
    }
}
