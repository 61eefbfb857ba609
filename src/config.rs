//! Site configuration read from an optional in-page JSON block.
//!
//! The page may embed
//! `<script type="application/json" id="folio-config">{ ... }</script>`;
//! every field is optional and falls back to the defaults in [`crate::consts`].

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::time::Duration;

use serde::Deserialize;

use crate::ErrorCode;
use crate::consts;
use crate::contract::ContractMode;
use crate::page::Page;

/// Errors produced while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config block is not valid JSON for [`SiteConfig`].
    #[error("config parse failed: {0}")]
    Parse(String),

    /// A value parsed but is out of range.
    #[error("invalid config value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl ErrorCode for ConfigError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Parse(_) => "E_CONFIG_PARSE",
            Self::Invalid { .. } => "E_CONFIG_INVALID",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Page name used when the URL path has no trailing segment.
    pub home_page: String,
    /// Floating particles in the decorative background.
    pub particle_count: usize,
    /// Simulated contact submission round trip.
    pub submit_delay_ms: u64,
    pub contract_mode: ContractMode,
    /// Console log level: `error`, `warn`, `info`, `debug` or `trace`.
    pub log_level: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            home_page: consts::DEFAULT_HOME_PAGE.to_owned(),
            particle_count: consts::DEFAULT_PARTICLE_COUNT,
            submit_delay_ms: consts::DEFAULT_SUBMIT_DELAY_MS,
            contract_mode: ContractMode::default(),
            log_level: "info".to_owned(),
        }
    }
}

impl SiteConfig {
    /// Parse and validate config JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON or unknown fields and
    /// [`ConfigError::Invalid`] for out-of-range values.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let cfg: Self = serde_json::from_str(raw).map_err(|e| ConfigError::Parse(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load from the page's config block, or defaults when there is none.
    ///
    /// # Errors
    ///
    /// Propagates [`SiteConfig::from_json`] errors for a present but broken
    /// block.
    pub fn from_page(page: &dyn Page) -> Result<Self, ConfigError> {
        let Some(node) = page.by_id(consts::CONFIG_SCRIPT_ID) else {
            return Ok(Self::default());
        };
        let raw = page.text(node);
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        Self::from_json(&raw)
    }

    /// Check value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.home_page.is_empty() || self.home_page.contains('/') {
            return Err(ConfigError::Invalid {
                field: "home_page",
                reason: format!("expected a bare page name, got {:?}", self.home_page),
            });
        }
        if self.particle_count > consts::MAX_PARTICLE_COUNT {
            return Err(ConfigError::Invalid {
                field: "particle_count",
                reason: format!("{} exceeds maximum {}", self.particle_count, consts::MAX_PARTICLE_COUNT),
            });
        }
        if self.level_filter().is_none() {
            return Err(ConfigError::Invalid { field: "log_level", reason: format!("unknown level {:?}", self.log_level) });
        }
        Ok(())
    }

    #[must_use]
    pub fn submit_delay(&self) -> Duration {
        Duration::from_millis(self.submit_delay_ms)
    }

    /// Parsed `log_level`, or `None` when unrecognized.
    #[must_use]
    pub fn level_filter(&self) -> Option<log::Level> {
        self.log_level.parse::<log::Level>().ok()
    }
}
