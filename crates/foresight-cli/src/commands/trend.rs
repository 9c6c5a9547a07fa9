//! Ad-hoc trend command

use std::path::Path;

use anyhow::{bail, Context, Result};
use foresight_core::{trend, LearningConfig};

/// Slope, mean and next-value prediction for a series
#[derive(Debug, Clone, PartialEq)]
pub struct TrendReport {
    pub samples: usize,
    pub slope: f64,
    pub mean: f64,
    pub predicted_next: f64,
}

impl TrendReport {
    pub fn direction(&self, threshold: f64) -> &'static str {
        if self.slope > threshold {
            "improving"
        } else if self.slope < -threshold {
            "declining"
        } else {
            "stable"
        }
    }
}

pub fn trend_report(values: &[f64]) -> Result<TrendReport> {
    if values.iter().any(|v| !v.is_finite()) {
        bail!("Trend values must be finite numbers");
    }
    Ok(TrendReport {
        samples: values.len(),
        slope: trend::slope(values),
        mean: trend::mean(values).unwrap_or(0.0),
        predicted_next: trend::predict_next(values),
    })
}

pub fn cmd_trend(config_path: Option<&Path>, values: &[f64]) -> Result<()> {
    let (config, _) =
        LearningConfig::load(config_path).context("Failed to load learning config")?;
    let report = trend_report(values)?;

    println!();
    println!("📈 Trend over {} value(s)", report.samples);
    println!("   Slope:          {:+.3} per step", report.slope);
    println!("   Mean:           {:.2}", report.mean);
    println!("   Predicted next: {:.2} (clamped to 0-100)", report.predicted_next);
    println!("   Direction:      {}", report.direction(config.trend_threshold));
    println!();

    Ok(())
}
