//! Anomaly Detection Insight
//!
//! Compares the latest overall score with the mean of every earlier score.
//! A relative deviation above the configured threshold is an anomaly.

use crate::error::Result;
use crate::patterns::{Impact, Timeframe, MIN_TREND_SNAPSHOTS};
use crate::trend;

use super::generator::{AnalysisContext, InsightAnalyzer};
use super::types::{Insight, InsightType};

pub struct AnomalyAnalyzer;

impl AnomalyAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Relative deviation of `current` from `baseline`, `None` when the
    /// baseline is zero
    fn deviation(current: f64, baseline: f64) -> Option<f64> {
        if baseline == 0.0 {
            return None;
        }
        Some((current - baseline).abs() / baseline)
    }
}

impl Default for AnomalyAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl InsightAnalyzer for AnomalyAnalyzer {
    fn id(&self) -> InsightType {
        InsightType::AnomalyDetection
    }

    fn name(&self) -> &'static str {
        "Anomaly Detection"
    }

    fn analyze(&self, ctx: &AnalysisContext<'_>) -> Result<Vec<Insight>> {
        if ctx.snapshots.len() < MIN_TREND_SNAPSHOTS {
            return Ok(vec![]);
        }

        let scores = ctx.scores();
        let Some((&current, prior)) = scores.split_last() else {
            return Ok(vec![]);
        };
        let Some(baseline) = trend::mean(prior) else {
            return Ok(vec![]);
        };
        let Some(deviation) = Self::deviation(current, baseline) else {
            tracing::debug!("Prior mean score is zero, skipping anomaly check");
            return Ok(vec![]);
        };

        if deviation <= ctx.config.anomaly_threshold {
            return Ok(vec![]);
        }

        let dropped = current < baseline;
        let direction = if dropped { "drop" } else { "spike" };
        let impact = if dropped && deviation > ctx.config.anomaly_critical_threshold {
            Impact::Critical
        } else {
            Impact::High
        };

        let recommendations = if dropped {
            vec![
                "Inspect the latest run for new failures or hangs",
                "Compare the latest changes against the last healthy snapshot",
                "Re-run the suite to rule out infrastructure noise",
            ]
        } else {
            vec![
                "Confirm the jump is real and not a reporting change",
                "Record what changed so the improvement can be repeated",
            ]
        };

        let timestamp = ctx
            .latest()
            .map(|s| s.timestamp.clone())
            .unwrap_or_default();

        let insight = Insight::new(
            InsightType::AnomalyDetection,
            "anomaly-overall-score",
            format!("Unusual health score {}", direction),
            format!(
                "Latest health score {:.1} deviates {:.0}% from the historical mean of {:.1}",
                current,
                deviation * 100.0,
                baseline
            ),
        )
        .with_scores(deviation.min(1.0), ctx.config.anomaly_probability)
        .with_timeframe(Timeframe::Immediate)
        .with_impact(impact)
        .with_recommendations(recommendations)
        .with_data("currentScore", current)
        .with_data("baselineMean", baseline)
        .with_data("deviation", deviation)
        .with_data("direction", direction)
        .with_data("timestamp", timestamp);

        Ok(vec![insight])
    }
}
