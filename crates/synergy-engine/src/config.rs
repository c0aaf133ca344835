//! Configuration loading and typed config structures for the optimizer.
//!
//! The configuration lives in `synergy-config.yaml`. Every field has a
//! default, so an empty file (or no file at all) yields a working engine.
//! The structs mirror the YAML layout one-to-one.

use std::path::Path;

use serde::Deserialize;
use synergy_types::{DEFAULT_MAX_STAGE, DEFAULT_TOTAL_UNITS};

/// Environment variable that overrides `defaults.max_stage`.
pub const MAX_STAGE_ENV: &str = "SYNERGY_MAX_STAGE";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// A value parsed but is outside its allowed range.
    #[error("invalid config value for {field}: {reason}")]
    Invalid {
        /// Dotted path of the offending field.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct EngineConfig {
    /// Iteration caps and ranking parameters for the strategies.
    #[serde(default)]
    pub optimizer: OptimizerConfig,

    /// Constants of the multiplier formulas that differ between game
    /// revisions.
    #[serde(default)]
    pub multipliers: MultiplierConfig,

    /// Values used when the settings file does not provide them.
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// Rate conversion for projected results.
    #[serde(default)]
    pub display: DisplayConfig,
}

impl EngineConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// `SYNERGY_MAX_STAGE`, when set to an integer, overrides
    /// `defaults.max_stage`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or
    /// [`ConfigError::Invalid`] if a value is out of range.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML, or
    /// [`ConfigError::Invalid`] if a value is out of range.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config: Self = if yaml.trim().is_empty() {
            Self::default()
        } else {
            serde_yml::from_str(yaml)?
        };
        config.defaults.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values no strategy can run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.optimizer.energy_probe_units == 0 {
            return Err(ConfigError::Invalid {
                field: "optimizer.energy_probe_units",
                reason: String::from("must be at least 1"),
            });
        }
        for (field, value) in [
            (
                "multipliers.newb_power_trophy_bonus",
                self.multipliers.newb_power_trophy_bonus,
            ),
            (
                "multipliers.pro_power_trophy_bonus",
                self.multipliers.pro_power_trophy_bonus,
            ),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("{value} is not a finite non-negative number"),
                });
            }
        }
        Ok(())
    }
}

/// Optimizer loop parameters.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OptimizerConfig {
    /// `maximize_one_row` may run this many iterations per pooled unit.
    #[serde(default = "default_maximize_iteration_factor")]
    pub maximize_iteration_factor: u64,

    /// `flat_up_to_row` may run this many iterations per distributed unit.
    #[serde(default = "default_flat_iteration_factor")]
    pub flat_iteration_factor: u64,

    /// Units used to probe each row's energy yield when ranking rows.
    #[serde(default = "default_energy_probe_units")]
    pub energy_probe_units: u64,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            maximize_iteration_factor: default_maximize_iteration_factor(),
            flat_iteration_factor: default_flat_iteration_factor(),
            energy_probe_units: default_energy_probe_units(),
        }
    }
}

/// Power trophy magnitudes.
///
/// Two revisions of the game disagree on these (0.05/0.1 and 0.1/0.2); the
/// later values are the default.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MultiplierConfig {
    /// Power bonus granted by the newb power trophy.
    #[serde(default = "default_newb_power_trophy_bonus")]
    pub newb_power_trophy_bonus: f64,

    /// Power bonus granted by the pro power trophy.
    #[serde(default = "default_pro_power_trophy_bonus")]
    pub pro_power_trophy_bonus: f64,
}

impl Default for MultiplierConfig {
    fn default() -> Self {
        Self {
            newb_power_trophy_bonus: default_newb_power_trophy_bonus(),
            pro_power_trophy_bonus: default_pro_power_trophy_bonus(),
        }
    }
}

/// Fallback values for a fresh or incomplete settings record.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DefaultsConfig {
    /// Max stage used when the settings record has none.
    #[serde(default = "default_max_stage")]
    pub max_stage: i32,

    /// Pool size of a fresh session.
    #[serde(default = "default_total_units")]
    pub total_units: u64,
}

impl DefaultsConfig {
    /// Apply `SYNERGY_MAX_STAGE` if it is set.
    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Ok(raw) = std::env::var(MAX_STAGE_ENV) {
            self.max_stage = raw.trim().parse().map_err(|e| ConfigError::Invalid {
                field: "defaults.max_stage",
                reason: format!("{MAX_STAGE_ENV}={raw}: {e}"),
            })?;
        }
        Ok(())
    }
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            max_stage: default_max_stage(),
            total_units: default_total_units(),
        }
    }
}

/// Conversion from per-tick rates to displayed totals.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DisplayConfig {
    /// Game ticks per real hour (10 per second).
    #[serde(default = "default_ticks_per_hour")]
    pub ticks_per_hour: u64,

    /// Hours a projection covers unless the caller asks otherwise.
    #[serde(default = "default_hours")]
    pub hours: u32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            ticks_per_hour: default_ticks_per_hour(),
            hours: default_hours(),
        }
    }
}

const fn default_maximize_iteration_factor() -> u64 {
    100
}

const fn default_flat_iteration_factor() -> u64 {
    10
}

const fn default_energy_probe_units() -> u64 {
    1
}

const fn default_newb_power_trophy_bonus() -> f64 {
    0.1
}

const fn default_pro_power_trophy_bonus() -> f64 {
    0.2
}

const fn default_max_stage() -> i32 {
    DEFAULT_MAX_STAGE
}

const fn default_total_units() -> u64 {
    DEFAULT_TOTAL_UNITS
}

const fn default_ticks_per_hour() -> u64 {
    36_000
}

const fn default_hours() -> u32 {
    24
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn empty_yaml_gives_defaults() {
        let config = EngineConfig::parse("").unwrap();
        assert_eq!(config.optimizer.maximize_iteration_factor, 100);
        assert_eq!(config.optimizer.flat_iteration_factor, 10);
        assert_eq!(config.display.ticks_per_hour, 36_000);
        assert_eq!(config.defaults.total_units, 40);
    }

    #[test]
    fn default_pool_matches_a_fresh_settings_record() {
        let config = EngineConfig::default();
        let record = synergy_types::PersistedState::default();
        assert_eq!(config.defaults.total_units, DEFAULT_TOTAL_UNITS);
        assert_eq!(u64::try_from(record.total_units).unwrap(), DEFAULT_TOTAL_UNITS);
    }

    #[test]
    fn partial_yaml_keeps_other_defaults() {
        let yaml = "multipliers:\n  newb_power_trophy_bonus: 0.05\n  pro_power_trophy_bonus: 0.1\ndisplay:\n  hours: 8\n";
        let config = EngineConfig::parse(yaml).unwrap();
        assert!((config.multipliers.newb_power_trophy_bonus - 0.05).abs() < f64::EPSILON);
        assert_eq!(config.display.hours, 8);
        assert_eq!(config.display.ticks_per_hour, 36_000);
    }

    #[test]
    fn zero_probe_is_rejected() {
        let result = EngineConfig::parse("optimizer:\n  energy_probe_units: 0\n");
        assert!(matches!(result, Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn negative_trophy_bonus_is_rejected() {
        let result = EngineConfig::parse("multipliers:\n  pro_power_trophy_bonus: -1.0\n");
        assert!(matches!(result, Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn malformed_yaml_is_a_parse_error() {
        let result = EngineConfig::parse("optimizer: [unclosed");
        assert!(matches!(result, Err(ConfigError::Yaml { .. })));
    }
}
