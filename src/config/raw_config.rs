use serde::{Deserialize, Serialize};

/// On-disk shape of the config file. Every field has a default so partial
/// files load; validation happens in `TryFrom<RawConfig> for Config`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawConfig {
    pub hotkey: String,
    pub default_target: String,
    pub capture_timeout_ms: u64,
    pub poll_interval_ms: u64,
    pub restore_delay_ms: u64,
    pub delay_before_paste_ms: u64,
    pub settle_after_release_ms: u64,
    pub debounce_ms: u64,
    pub layout_poll_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<String>,
}

impl Default for RawConfig {
    fn default() -> Self {
        Self {
            hotkey: "<ctrl>+<alt>+<space>".to_string(),
            default_target: "fa".to_string(),
            capture_timeout_ms: 3000,
            poll_interval_ms: 50,
            restore_delay_ms: 2000,
            delay_before_paste_ms: 120,
            settle_after_release_ms: 150,
            debounce_ms: 500,
            layout_poll_ms: 150,
            log_file: None,
        }
    }
}
