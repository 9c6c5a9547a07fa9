//! Learning configuration
//!
//! Every threshold the miner, insight generator and accuracy tracker use
//! lives in [`LearningConfig`].
//!
//! ## Configuration Resolution
//!
//! Config is loaded with a two-layer resolution:
//! 1. An explicit path, or the override in the data dir
//!    (~/.local/share/foresight/config/learning.toml)
//! 2. Fall back to embedded defaults (compiled into binary)

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/learning.toml");

/// Thresholds used by a learning run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LearningConfig {
    /// Minimum |slope| of the overall score before a trend is reported
    pub trend_threshold: f64,
    /// Snapshots two issue types must share to be correlated
    pub min_correlation_count: usize,
    /// Snapshots a task must be critical in to predict a failure
    pub min_critical_count: usize,
    /// Average duration (ms) above which a task counts as slow
    pub slow_task_threshold_ms: f64,
    /// Slow observations needed before suggesting optimization
    pub min_slow_observations: usize,
    /// Fraction of slow duration assumed recoverable
    pub savings_ratio: f64,
    /// Relative deviation from the prior mean that counts as an anomaly
    pub anomaly_threshold: f64,
    /// Deviation above which a score drop is critical
    pub anomaly_critical_threshold: f64,
    pub opportunity_probability: f64,
    pub trend_probability: f64,
    pub anomaly_probability: f64,
    /// Patterns above this confidence count as correct predictions
    pub high_confidence_threshold: f64,
}

impl Default for LearningConfig {
    fn default() -> Self {
        Self {
            trend_threshold: 0.1,
            min_correlation_count: 2,
            min_critical_count: 2,
            slow_task_threshold_ms: 1000.0,
            min_slow_observations: 2,
            savings_ratio: 0.3,
            anomaly_threshold: 0.2,
            anomaly_critical_threshold: 0.5,
            opportunity_probability: 0.8,
            trend_probability: 0.7,
            anomaly_probability: 0.9,
            high_confidence_threshold: 0.7,
        }
    }
}

/// Where the active configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    Embedded,
    File(PathBuf),
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Embedded => write!(f, "built-in defaults"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

impl LearningConfig {
    /// Load configuration (explicit path or data-dir override first, then
    /// the embedded default)
    pub fn load(override_path: Option<&Path>) -> Result<(Self, ConfigSource)> {
        let path = match override_path {
            Some(path) => Some(path.to_path_buf()),
            None => default_config_path(),
        };

        if let Some(path) = path.filter(|p| p.exists()) {
            let content = fs::read_to_string(&path)?;
            let config = Self::from_toml(&content)?;
            return Ok((config, ConfigSource::File(path)));
        }

        Ok((Self::from_toml(DEFAULT_CONFIG)?, ConfigSource::Embedded))
    }

    /// Parse config from TOML content, layering present keys over defaults
    pub fn from_toml(content: &str) -> Result<Self> {
        let raw: RawConfig = toml::from_str(content)
            .map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))?;

        let mut config = Self::default();

        if let Some(patterns) = raw.patterns {
            if let Some(v) = patterns.trend_threshold {
                config.trend_threshold = v;
            }
            if let Some(v) = patterns.min_correlation_count {
                config.min_correlation_count = v;
            }
            if let Some(v) = patterns.min_critical_count {
                config.min_critical_count = v;
            }
            if let Some(v) = patterns.slow_task_threshold_ms {
                config.slow_task_threshold_ms = v;
            }
            if let Some(v) = patterns.min_slow_observations {
                config.min_slow_observations = v;
            }
            if let Some(v) = patterns.savings_ratio {
                config.savings_ratio = v;
            }
        }

        if let Some(insights) = raw.insights {
            if let Some(v) = insights.anomaly_threshold {
                config.anomaly_threshold = v;
            }
            if let Some(v) = insights.anomaly_critical_threshold {
                config.anomaly_critical_threshold = v;
            }
            if let Some(v) = insights.opportunity_probability {
                config.opportunity_probability = v;
            }
            if let Some(v) = insights.trend_probability {
                config.trend_probability = v;
            }
            if let Some(v) = insights.anomaly_probability {
                config.anomaly_probability = v;
            }
        }

        if let Some(accuracy) = raw.accuracy {
            if let Some(v) = accuracy.high_confidence_threshold {
                config.high_confidence_threshold = v;
            }
        }

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        let probabilities = [
            ("opportunity_probability", self.opportunity_probability),
            ("trend_probability", self.trend_probability),
            ("anomaly_probability", self.anomaly_probability),
            ("high_confidence_threshold", self.high_confidence_threshold),
            ("savings_ratio", self.savings_ratio),
        ];
        for (name, value) in probabilities {
            if !(0.0..=1.0).contains(&value) {
                return Err(Error::Config(format!(
                    "{} must be between 0 and 1, got {}",
                    name, value
                )));
            }
        }

        let thresholds = [
            ("trend_threshold", self.trend_threshold),
            ("slow_task_threshold_ms", self.slow_task_threshold_ms),
            ("anomaly_threshold", self.anomaly_threshold),
            ("anomaly_critical_threshold", self.anomaly_critical_threshold),
        ];
        for (name, value) in thresholds {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::Config(format!(
                    "{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }

        Ok(())
    }
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("foresight").join("config").join("learning.toml"))
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
struct RawConfig {
    patterns: Option<RawPatterns>,
    insights: Option<RawInsights>,
    accuracy: Option<RawAccuracy>,
}

#[derive(Debug, Deserialize)]
struct RawPatterns {
    trend_threshold: Option<f64>,
    min_correlation_count: Option<usize>,
    min_critical_count: Option<usize>,
    slow_task_threshold_ms: Option<f64>,
    min_slow_observations: Option<usize>,
    savings_ratio: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawInsights {
    anomaly_threshold: Option<f64>,
    anomaly_critical_threshold: Option<f64>,
    opportunity_probability: Option<f64>,
    trend_probability: Option<f64>,
    anomaly_probability: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawAccuracy {
    high_confidence_threshold: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_embedded_config_matches_defaults() {
        let config = LearningConfig::from_toml(DEFAULT_CONFIG).unwrap();
        assert_eq!(config, LearningConfig::default());
    }

    #[test]
    fn test_partial_override() {
        let config = LearningConfig::from_toml(
            r#"
            [insights]
            anomaly_threshold = 0.35
            "#,
        )
        .unwrap();

        assert_eq!(config.anomaly_threshold, 0.35);
        assert_eq!(config.trend_threshold, 0.1);
        assert_eq!(config.min_correlation_count, 2);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = LearningConfig::from_toml("").unwrap();
        assert_eq!(config, LearningConfig::default());
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = LearningConfig::from_toml("[patterns\ntrend = ").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_out_of_range_probability_rejected() {
        let err = LearningConfig::from_toml(
            r#"
            [insights]
            trend_probability = 1.5
            "#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("trend_probability"));
    }

    #[test]
    fn test_load_from_explicit_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[accuracy]\nhigh_confidence_threshold = 0.5").unwrap();

        let (config, source) = LearningConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.high_confidence_threshold, 0.5);
        assert_eq!(source, ConfigSource::File(file.path().to_path_buf()));
    }

    #[test]
    fn test_unreadable_config_is_io_error() {
        let dir = tempfile::tempdir().unwrap();

        // A directory exists but cannot be read as a file
        let err = LearningConfig::load(Some(dir.path())).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_missing_explicit_file_falls_back_to_embedded() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");

        let (config, source) = LearningConfig::load(Some(&missing)).unwrap();
        assert_eq!(config, LearningConfig::default());
        assert_eq!(source, ConfigSource::Embedded);
    }
}
