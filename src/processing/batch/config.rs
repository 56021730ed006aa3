use std::path::Path;
use serde::{Serialize, Deserialize};
use tracing::warn;
use crate::utils::ConfigError;

pub const ENV_KEY_PREFIX: &str = "SYNC_BATCH_KEY_PREFIX";
/// Legacy single-entity override, honoured for the primary entity only.
pub const ENV_LEGACY_BATCH_SIZE: &str = "SYNC_BATCH_SIZE";
pub const ENV_RESPECT_USER_LIMIT: &str = "SYNC_BATCH_RESPECT_USER_LIMIT";
pub const ENV_MEMORY_LIMIT: &str = "SYNC_BATCH_MEMORY_LIMIT";

/// Host-supplied settings for the sizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SizerSettings {
    /// Prefix of store keys; the canonical entity name is appended.
    pub key_prefix: String,
    /// Backward-compatibility shim for the old products-only override.
    pub legacy_batch_size: Option<i64>,
    /// Stop the memory adjuster from growing past the configured size.
    pub respect_user_limit: bool,
    /// Process memory limit such as `"512M"`, for the process probe.
    pub memory_limit: Option<String>,
}

impl Default for SizerSettings {
    fn default() -> Self {
        Self {
            key_prefix: "sync_batch_size_".to_string(),
            legacy_batch_size: None,
            respect_user_limit: true,
            memory_limit: None,
        }
    }
}

impl SizerSettings {
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Read(path.to_path_buf(), e.to_string()))?;
        serde_json::from_str(&text)
            .map_err(|e| ConfigError::Parse(path.to_path_buf(), e.to_string()))
    }

    /// Defaults overlaid with the process environment.
    pub fn from_env() -> Self {
        Self::default().apply_env(|key| std::env::var(key).ok())
    }

    /// Overlays variables read through `lookup`. Unparseable values are
    /// ignored so a bad environment never blocks sizing.
    pub fn apply_env<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(prefix) = lookup(ENV_KEY_PREFIX) {
            self.key_prefix = prefix;
        }
        if let Some(raw) = lookup(ENV_LEGACY_BATCH_SIZE) {
            match raw.trim().parse::<i64>() {
                Ok(size) => self.legacy_batch_size = Some(size),
                Err(_) => warn!("Ignoring {}={:?}: not an integer", ENV_LEGACY_BATCH_SIZE, raw),
            }
        }
        if let Some(raw) = lookup(ENV_RESPECT_USER_LIMIT) {
            match parse_flag(&raw) {
                Some(flag) => self.respect_user_limit = flag,
                None => warn!("Ignoring {}={:?}: not a boolean", ENV_RESPECT_USER_LIMIT, raw),
            }
        }
        if let Some(raw) = lookup(ENV_MEMORY_LIMIT) {
            self.memory_limit = Some(raw);
        }
        self
    }

    /// Memory limit in bytes; `None` when unset, unlimited or unparseable.
    pub fn memory_limit_bytes(&self) -> Option<u64> {
        self.memory_limit.as_deref().and_then(parse_memory_limit)
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Parses limits like `"256M"`, `"2g"`, `"65536"`. `"-1"` means unlimited.
pub fn parse_memory_limit(text: &str) -> Option<u64> {
    let text = text.trim();
    if text == "-1" || text.is_empty() {
        return None;
    }
    let (digits, multiplier) = match text.chars().last()?.to_ascii_lowercase() {
        'k' => (&text[..text.len() - 1], 1024),
        'm' => (&text[..text.len() - 1], 1024 * 1024),
        'g' => (&text[..text.len() - 1], 1024 * 1024 * 1024),
        _ => (text, 1),
    };
    digits.trim().parse::<u64>().ok()?.checked_mul(multiplier)
}
