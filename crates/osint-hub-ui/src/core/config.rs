//! Tunables for preloading and search, with defaults and validation.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::error::{ConfigError, ConfigResult};

/// Longest delay accepted for any preload or debounce timer.
pub const MAX_DELAY_MS: u32 = 60_000;

/// Top-level UI configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Deferred-import timing.
    pub preload: PreloadConfig,
    /// Search-as-you-type behaviour.
    pub search: SearchConfig,
}

/// Deferred-import timing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreloadConfig {
    /// Timer used when the host has no idle facility.
    pub idle_fallback_ms: u32,
    /// Outer delay used by `after_delay` when the caller passes none.
    pub default_delay_ms: u32,
}

impl Default for PreloadConfig {
    fn default() -> Self {
        Self {
            idle_fallback_ms: 100,
            default_delay_ms: 2_000,
        }
    }
}

impl PreloadConfig {
    /// Idle fallback as a [`Duration`].
    #[must_use]
    pub const fn idle_fallback(&self) -> Duration {
        Duration::from_millis(self.idle_fallback_ms as u64)
    }

    /// Default outer delay as a [`Duration`].
    #[must_use]
    pub const fn default_delay(&self) -> Duration {
        Duration::from_millis(self.default_delay_ms as u64)
    }
}

/// Search-as-you-type behaviour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Quiet period before a query is emitted; zero emits immediately.
    pub debounce_ms: u32,
    /// Maximum remembered queries.
    pub history_limit: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 250,
            history_limit: 10,
        }
    }
}

impl UiConfig {
    /// Parse and validate a JSON payload; missing fields keep their defaults.
    ///
    /// # Errors
    /// Returns [`ConfigError::Parse`] for malformed JSON and
    /// [`ConfigError::InvalidField`] when validation fails.
    pub fn from_json(raw: &str) -> ConfigResult<Self> {
        let config: Self =
            serde_json::from_str(raw).map_err(|source| ConfigError::Parse { source })?;
        config.validate()?;
        Ok(config)
    }

    /// Check every field against its accepted range.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidField`] naming the first offending field.
    pub fn validate(&self) -> ConfigResult<()> {
        ensure_delay("preload", "idle_fallback_ms", self.preload.idle_fallback_ms)?;
        ensure_delay("preload", "default_delay_ms", self.preload.default_delay_ms)?;
        ensure_delay("search", "debounce_ms", self.search.debounce_ms)?;
        if self.search.history_limit == 0 {
            return Err(ConfigError::InvalidField {
                section: "search",
                field: "history_limit",
                value: "0".to_string(),
                reason: "must be positive",
            });
        }
        Ok(())
    }
}

fn ensure_delay(section: &'static str, field: &'static str, value: u32) -> ConfigResult<()> {
    if value > MAX_DELAY_MS {
        return Err(ConfigError::InvalidField {
            section,
            field,
            value: value.to_string(),
            reason: "exceeds one minute",
        });
    }
    Ok(())
}
