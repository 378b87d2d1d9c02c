//! Environment-driven configuration.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::ConfigError;

pub const DATASET_VAR: &str = "GUARD_DATASET";
pub const SCAN_DELAY_VAR: &str = "GUARD_SCAN_DELAY_MS";

/// Pause before a scan reports, so the result does not appear instantly.
pub const DEFAULT_SCAN_DELAY: Duration = Duration::from_millis(2000);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardConfig {
    /// JSON dataset to load instead of the builtin seed.
    pub dataset_path: Option<PathBuf>,
    /// Simulated network scan delay.
    pub scan_delay: Duration,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            dataset_path: None,
            scan_delay: DEFAULT_SCAN_DELAY,
        }
    }
}

impl GuardConfig {
    /// Load configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unusable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unusable value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(raw) = lookup(DATASET_VAR) {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                return Err(ConfigError::Empty { var: DATASET_VAR });
            }
            config.dataset_path = Some(PathBuf::from(trimmed));
        }

        if let Some(raw) = lookup(SCAN_DELAY_VAR) {
            config.scan_delay = parse_delay_ms(SCAN_DELAY_VAR, &raw)?;
        }

        Ok(config)
    }

    #[must_use]
    pub fn with_dataset_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.dataset_path = Some(path.into());
        self
    }

    #[must_use]
    pub fn with_scan_delay(mut self, delay: Duration) -> Self {
        self.scan_delay = delay;
        self
    }
}

/// Parse a millisecond count.
///
/// # Errors
///
/// Returns `ConfigError::InvalidValue` if `raw` is not a non-negative integer.
pub fn parse_delay_ms(var: &'static str, raw: &str) -> Result<Duration, ConfigError> {
    raw.trim()
        .parse::<u64>()
        .map(Duration::from_millis)
        .map_err(|_| ConfigError::InvalidValue {
            var,
            raw: raw.to_string(),
        })
}
