// Copyright 2026 QubitOS Contributors
// SPDX-License-Identifier: Apache-2.0

//! Configuration management for generator models.
//!
//! Configuration is loaded from multiple sources with the following priority
//! (later sources override earlier ones):
//!
//! 1. Built-in defaults
//! 2. qubit-os-dynamics.yaml file
//! 3. Environment variables (QUBITOS_DYNAMICS_*)
//! 4. CLI arguments

use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

use crate::error::{Error, Result};

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Numerical tolerances
    #[serde(default)]
    pub numerics: NumericsConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file and environment.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let mut config = Config::default();

        let default_path = Path::new("qubit-os-dynamics.yaml");
        let path = config_path.unwrap_or(default_path);
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            config = serde_yaml::from_str(&content)?;
        }

        config.apply_env_overrides();

        Ok(config)
    }

    /// Apply environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(val) = env::var("QUBITOS_DYNAMICS_LOG_LEVEL") {
            self.logging.level = val;
        }
        if let Ok(val) = env::var("QUBITOS_DYNAMICS_LOG_FORMAT") {
            self.logging.format = val;
        }
        if let Ok(val) = env::var("QUBITOS_DYNAMICS_ANTI_HERMITIAN_ATOL") {
            if let Ok(tol) = val.parse() {
                self.numerics.anti_hermitian_atol = tol;
            }
        }
        if let Ok(val) = env::var("QUBITOS_DYNAMICS_CARRIER_FREQ_RTOL") {
            if let Ok(tol) = val.parse() {
                self.numerics.carrier_freq_rtol = tol;
            }
        }
        if let Ok(val) = env::var("QUBITOS_DYNAMICS_CARRIER_FREQ_ATOL") {
            if let Ok(tol) = val.parse() {
                self.numerics.carrier_freq_atol = tol;
            }
        }
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<()> {
        self.numerics.validate()?;
        match self.logging.format.as_str() {
            "json" | "pretty" => Ok(()),
            other => Err(Error::Config(format!(
                "Unknown log format '{}' (expected json or pretty)",
                other
            ))),
        }
    }
}

/// Numerical tolerances used by frames and models.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NumericsConfig {
    /// Absolute tolerance for the anti-Hermitian check on frame operators
    #[serde(default = "default_hermiticity_atol")]
    pub anti_hermitian_atol: f64,

    /// Absolute tolerance for the Hermitian check on Hamiltonian operators
    #[serde(default = "default_hermiticity_atol")]
    pub hermitian_atol: f64,

    /// Relative tolerance when comparing carrier frequencies of signal sets
    #[serde(default = "default_carrier_freq_rtol")]
    pub carrier_freq_rtol: f64,

    /// Absolute tolerance when comparing carrier frequencies of signal sets
    #[serde(default = "default_carrier_freq_atol")]
    pub carrier_freq_atol: f64,
}

impl Default for NumericsConfig {
    fn default() -> Self {
        Self {
            anti_hermitian_atol: default_hermiticity_atol(),
            hermitian_atol: default_hermiticity_atol(),
            carrier_freq_rtol: default_carrier_freq_rtol(),
            carrier_freq_atol: default_carrier_freq_atol(),
        }
    }
}

impl NumericsConfig {
    /// Validate tolerances.
    pub fn validate(&self) -> Result<()> {
        let tolerances = [
            ("anti_hermitian_atol", self.anti_hermitian_atol),
            ("hermitian_atol", self.hermitian_atol),
            ("carrier_freq_rtol", self.carrier_freq_rtol),
            ("carrier_freq_atol", self.carrier_freq_atol),
        ];
        for (name, value) in tolerances {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::Config(format!(
                    "{} must be a positive finite number, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }

    /// Element-wise closeness of two frequency vectors, `|a - b| <= atol + rtol * |b|`.
    pub fn carrier_freqs_close(&self, a: &[f64], b: &[f64]) -> bool {
        a.len() == b.len()
            && a.iter().zip(b).all(|(x, y)| {
                (x - y).abs() <= self.carrier_freq_atol + self.carrier_freq_rtol * y.abs()
            })
    }
}

fn default_hermiticity_atol() -> f64 {
    1e-10
}

fn default_carrier_freq_rtol() -> f64 {
    1e-5
}

fn default_carrier_freq_atol() -> f64 {
    1e-8
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format (json, pretty)
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String {
    "info".into()
}

fn default_log_format() -> String {
    "pretty".into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.numerics.anti_hermitian_atol, 1e-10);
        assert_eq!(config.numerics.carrier_freq_rtol, 1e-5);
        assert_eq!(config.numerics.carrier_freq_atol, 1e-8);
        assert_eq!(config.logging.level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut bad = Config::default();
        bad.numerics.carrier_freq_atol = -1.0;
        assert!(bad.validate().is_err());

        let mut bad = Config::default();
        bad.numerics.hermitian_atol = f64::NAN;
        let msg = format!("{}", bad.validate().unwrap_err());
        assert!(msg.contains("hermitian_atol"));

        let mut bad = Config::default();
        bad.logging.format = "xml".into();
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_config_load_from_file() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            f,
            r#"
numerics:
  carrier_freq_rtol: 1.0e-3
  carrier_freq_atol: 1.0e-6
logging:
  level: debug
"#
        )
        .unwrap();

        let config = Config::load(Some(f.path())).unwrap();
        assert_eq!(config.numerics.carrier_freq_rtol, 1e-3);
        assert_eq!(config.numerics.carrier_freq_atol, 1e-6);
        // Unspecified fields keep their defaults
        assert_eq!(config.numerics.anti_hermitian_atol, 1e-10);
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_config_load_nonexistent_file() {
        let path = Path::new("/tmp/does_not_exist_qubitos_dynamics.yaml");
        let config = Config::load(Some(path)).unwrap();
        assert_eq!(config.numerics.carrier_freq_rtol, 1e-5);
    }

    #[test]
    fn test_config_load_invalid_yaml() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "{{{{not: valid: yaml::::").unwrap();
        assert!(Config::load(Some(f.path())).is_err());
    }

    #[test]
    fn test_env_override_carrier_freq_atol() {
        let mut config = Config::default();
        std::env::set_var("QUBITOS_DYNAMICS_CARRIER_FREQ_ATOL", "1e-6");
        config.apply_env_overrides();
        assert_eq!(config.numerics.carrier_freq_atol, 1e-6);
        std::env::remove_var("QUBITOS_DYNAMICS_CARRIER_FREQ_ATOL");
    }

    #[test]
    fn test_env_override_ignores_unparsable_value() {
        let mut config = Config::default();
        std::env::set_var("QUBITOS_DYNAMICS_ANTI_HERMITIAN_ATOL", "tiny");
        config.apply_env_overrides();
        assert_eq!(config.numerics.anti_hermitian_atol, 1e-10);
        std::env::remove_var("QUBITOS_DYNAMICS_ANTI_HERMITIAN_ATOL");
    }

    #[test]
    fn test_env_override_log_level() {
        let mut config = Config::default();
        std::env::set_var("QUBITOS_DYNAMICS_LOG_LEVEL", "trace");
        config.apply_env_overrides();
        assert_eq!(config.logging.level, "trace");
        std::env::remove_var("QUBITOS_DYNAMICS_LOG_LEVEL");
    }

    #[test]
    fn test_carrier_freqs_close() {
        let numerics = NumericsConfig::default();
        assert!(numerics.carrier_freqs_close(&[5.0, 0.0], &[5.0 + 1e-6, 0.0]));
        assert!(!numerics.carrier_freqs_close(&[5.0, 0.0], &[5.1, 0.0]));
        assert!(!numerics.carrier_freqs_close(&[5.0], &[5.0, 0.0]));
    }
}
