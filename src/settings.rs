//! # Settings Module
//!
//! ## Purpose
//! Numerical tolerances and parsing policy of the reaction balancer, persisted as JSON.
//!
//! ## Architecture
//! - **BalancerConfig**: serializable configuration with defaults for every field
//! - **ConfigManager**: loads, validates, updates and saves the configuration file
//! - **Configuration File**: `chem_config.json` in the working directory
//!
//! ## Configuration Format
//! ```json
//! {
//!   "zero_tolerance": 1e-8,
//!   "integer_tolerance": 1e-6,
//!   "max_multiplier": 12,
//!   "svd_eps": 2.220446049250313e-16,
//!   "svd_max_iterations": 1000,
//!   "duplicate_policy": "merge",
//!   "log_level": "warn"
//! }
//! ```
//! Missing fields take their default values.
//!
//! ## Usage
//! ```rust
//! use FCSysChem::Chemistry::stoichiometry::stoich_with_config;
//! use FCSysChem::settings::ConfigManager;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let dir = tempfile::tempdir()?;
//!     let mut manager = ConfigManager::with_config_file(dir.path().join("chem_config.json"));
//!     manager.set_value("max_multiplier", "24")?;
//!     let coefficients = stoich_with_config(&["Fe", "O2", "Fe2O3"], manager.get_config())?;
//!     assert_eq!(coefficients.len(), 3);
//!     Ok(())
//! }
//! ```

use crate::Chemistry::species::DuplicatePolicy;
use log::{LevelFilter, info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// default name of the configuration file
pub const CONFIG_FILE: &str = "chem_config.json";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Configuration format error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid value '{value}' for setting '{name}': {reason}")]
    InvalidValue {
        name: String,
        value: String,
        reason: String,
    },
    #[error("Unknown setting: {0}")]
    UnknownSetting(String),
}

fn invalid(name: &str, value: impl ToString, reason: &str) -> SettingsError {
    SettingsError::InvalidValue {
        name: name.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Tolerances and policies used when parsing species and balancing reactions.
///
/// # Fields
/// * `zero_tolerance` - entries of the null-space vector at or below this magnitude count as zero;
///   singular values are compared with it relative to the largest singular value
/// * `integer_tolerance` - distance from the nearest integer accepted for a scaled coefficient
/// * `max_multiplier` - largest factor tried to turn fractional coefficient ratios into integers
/// * `svd_eps` - convergence threshold of the singular value decomposition
/// * `svd_max_iterations` - iteration limit of the decomposition, 0 means no limit
/// * `duplicate_policy` - handling of an element repeated within one formula
/// * `log_level` - verbosity of the command-line tool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BalancerConfig {
    pub zero_tolerance: f64,
    pub integer_tolerance: f64,
    pub max_multiplier: u32,
    pub svd_eps: f64,
    pub svd_max_iterations: usize,
    pub duplicate_policy: DuplicatePolicy,
    pub log_level: String,
}

impl Default for BalancerConfig {
    fn default() -> Self {
        Self {
            zero_tolerance: 1e-8,
            integer_tolerance: 1e-6,
            max_multiplier: 12,
            svd_eps: f64::EPSILON,
            svd_max_iterations: 1000,
            duplicate_policy: DuplicatePolicy::Merge,
            log_level: "warn".to_string(),
        }
    }
}

fn positive(name: &str, value: f64) -> Result<(), SettingsError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(name, value, "must be a positive finite number"))
    }
}

impl BalancerConfig {
    /// Checks that every value is usable by the balancer
    pub fn validate(&self) -> Result<(), SettingsError> {
        positive("zero_tolerance", self.zero_tolerance)?;
        positive("integer_tolerance", self.integer_tolerance)?;
        positive("svd_eps", self.svd_eps)?;
        if self.integer_tolerance >= 0.5 {
            return Err(invalid(
                "integer_tolerance",
                self.integer_tolerance,
                "must be smaller than 0.5",
            ));
        }
        if self.max_multiplier == 0 {
            return Err(invalid("max_multiplier", 0, "must be at least 1"));
        }
        if LevelFilter::from_str(&self.log_level).is_err() {
            return Err(invalid(
                "log_level",
                &self.log_level,
                "expected off, error, warn, info, debug or trace",
            ));
        }
        Ok(())
    }

    /// Log level of the command-line tool, `Warn` if the stored name is not recognised
    pub fn log_level_filter(&self) -> LevelFilter {
        LevelFilter::from_str(&self.log_level).unwrap_or(LevelFilter::Warn)
    }
}

/// Owner of the balancer configuration and of the file it is stored in.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config: BalancerConfig,
    config_file: PathBuf,
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigManager {
    /// Loads `chem_config.json` from the working directory, defaults if it is absent or invalid
    pub fn new() -> Self {
        Self::with_config_file(CONFIG_FILE)
    }

    /// Same as [`ConfigManager::new`] for a custom file location
    pub fn with_config_file(config_file: impl AsRef<Path>) -> Self {
        let config_file = config_file.as_ref().to_path_buf();
        let config = match Self::load_config(&config_file) {
            Ok(config) => config,
            Err(err) => {
                warn!(
                    "Cannot use configuration from '{}' ({}), falling back to defaults",
                    config_file.display(),
                    err
                );
                BalancerConfig::default()
            }
        };
        Self {
            config,
            config_file,
        }
    }

    /// Reads and validates a configuration file. A missing file gives the default configuration.
    pub fn load_config(config_file: &Path) -> Result<BalancerConfig, SettingsError> {
        if !config_file.exists() {
            return Ok(BalancerConfig::default());
        }
        let content = fs::read_to_string(config_file)?;
        let config: BalancerConfig = serde_json::from_str(&content)?;
        config.validate()?;
        info!("Configuration loaded from '{}'", config_file.display());
        Ok(config)
    }

    pub fn save_config(&self) -> Result<(), SettingsError> {
        let content = serde_json::to_string_pretty(&self.config)?;
        fs::write(&self.config_file, content)?;
        info!("Configuration saved to '{}'", self.config_file.display());
        Ok(())
    }

    pub fn get_config(&self) -> &BalancerConfig {
        &self.config
    }

    pub fn config_file(&self) -> &Path {
        &self.config_file
    }

    /// Replaces the whole configuration after validation and saves it
    pub fn set_config(&mut self, config: BalancerConfig) -> Result<(), SettingsError> {
        config.validate()?;
        self.config = config;
        self.save_config()
    }

    /// Updates one setting given by its field name and textual value, then saves.
    ///
    /// # Example
    /// ```rust, ignore
    /// manager.set_value("duplicate_policy", "reject")?;
    /// manager.set_value("zero_tolerance", "1e-10")?;
    /// ```
    pub fn set_value(&mut self, name: &str, value: &str) -> Result<(), SettingsError> {
        let mut config = self.config.clone();
        let value = value.trim();
        match name {
            "zero_tolerance" => config.zero_tolerance = parse_value(name, value)?,
            "integer_tolerance" => config.integer_tolerance = parse_value(name, value)?,
            "max_multiplier" => config.max_multiplier = parse_value(name, value)?,
            "svd_eps" => config.svd_eps = parse_value(name, value)?,
            "svd_max_iterations" => config.svd_max_iterations = parse_value(name, value)?,
            "duplicate_policy" => {
                config.duplicate_policy = match value.to_lowercase().as_str() {
                    "merge" => DuplicatePolicy::Merge,
                    "reject" => DuplicatePolicy::Reject,
                    _ => return Err(invalid(name, value, "expected merge or reject")),
                }
            }
            "log_level" => config.log_level = value.to_lowercase(),
            _ => return Err(SettingsError::UnknownSetting(name.to_string())),
        }
        self.set_config(config)
    }

    pub fn reset_to_defaults(&mut self) -> Result<(), SettingsError> {
        self.config = BalancerConfig::default();
        self.save_config()
    }
}

fn parse_value<T: FromStr>(name: &str, value: &str) -> Result<T, SettingsError> {
    value
        .parse()
        .map_err(|_| invalid(name, value, "cannot be parsed"))
}
