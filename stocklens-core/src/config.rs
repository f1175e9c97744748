//! Report configuration: indicator windows and the risk-free rate.
//!
//! Stored as TOML. Every field is optional in the file; omitted fields take
//! the defaults below.
//!
//! ```toml
//! sma_window = 50
//! ema_window = 50
//! rsi_window = 14
//! bollinger_window = 20
//! stochastic_window = 14
//! risk_free_rate = 0.02
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::indicators::{bollinger, rsi, stochastic};
use crate::risk::DEFAULT_RISK_FREE_RATE;

/// Errors from loading or validating a report configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("{field} must be at least 1")]
    ZeroWindow { field: &'static str },

    #[error("risk_free_rate must be finite, got {0}")]
    InvalidRiskFreeRate(f64),
}

/// Windows and rates used to assemble a full report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub sma_window: usize,
    pub ema_window: usize,
    pub rsi_window: usize,
    pub bollinger_window: usize,
    pub stochastic_window: usize,
    /// Annualized, as a fraction (0.02 = 2%).
    pub risk_free_rate: f64,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            sma_window: 50,
            ema_window: 50,
            rsi_window: rsi::DEFAULT_WINDOW,
            bollinger_window: bollinger::DEFAULT_WINDOW,
            stochastic_window: stochastic::DEFAULT_WINDOW,
            risk_free_rate: DEFAULT_RISK_FREE_RATE,
        }
    }
}

impl ReportConfig {
    /// Load and validate a config from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate a config from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: ReportConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults with the given risk-free rate, or plain defaults for `None`.
    pub fn with_risk_free_rate(rate: Option<f64>) -> Self {
        let mut config = Self::default();
        if let Some(rate) = rate {
            config.risk_free_rate = rate;
        }
        config
    }

    /// Reject zero windows and a non-finite risk-free rate.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let windows = [
            ("sma_window", self.sma_window),
            ("ema_window", self.ema_window),
            ("rsi_window", self.rsi_window),
            ("bollinger_window", self.bollinger_window),
            ("stochastic_window", self.stochastic_window),
        ];
        for (field, window) in windows {
            if window == 0 {
                return Err(ConfigError::ZeroWindow { field });
            }
        }
        if !self.risk_free_rate.is_finite() {
            return Err(ConfigError::InvalidRiskFreeRate(self.risk_free_rate));
        }
        Ok(())
    }
}
