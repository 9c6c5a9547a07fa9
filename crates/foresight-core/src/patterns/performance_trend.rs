//! Performance Trend Detector
//!
//! Fits a line through the overall health score and reports a pattern when
//! the score is moving by more than the configured threshold per snapshot.

use crate::error::Result;
use crate::trend;

use super::miner::{MiningContext, PatternDetector};
use super::types::{Impact, Pattern, PatternType, Timeframe};

/// Snapshots needed before a trend is meaningful
pub const MIN_TREND_SNAPSHOTS: usize = 3;

pub struct PerformanceTrendDetector;

impl PerformanceTrendDetector {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PerformanceTrendDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl PatternDetector for PerformanceTrendDetector {
    fn id(&self) -> PatternType {
        PatternType::PerformanceTrend
    }

    fn name(&self) -> &'static str {
        "Performance Trend"
    }

    fn detect(&self, ctx: &MiningContext<'_>) -> Result<Vec<Pattern>> {
        if ctx.snapshots.len() < MIN_TREND_SNAPSHOTS {
            return Ok(vec![]);
        }

        let scores = ctx.scores();
        let slope = trend::slope(&scores);
        if slope.abs() <= ctx.config.trend_threshold {
            return Ok(vec![]);
        }

        let improving = slope > 0.0;
        let direction = if improving { "improving" } else { "declining" };
        let predicted = trend::predict_next(&scores);
        let first = scores.first().copied().unwrap_or_default();
        let last = scores.last().copied().unwrap_or_default();

        // Confidence is |slope| and deliberately not clamped to 1.0
        let pattern = Pattern::new(
            PatternType::PerformanceTrend,
            "performance-trend",
            slope.abs(),
            format!(
                "Overall health is {} by {:.2} points per snapshot",
                direction,
                slope.abs()
            ),
            format!(
                "Overall health score expected to reach {:.1} in the next snapshot",
                predicted
            ),
        )
        .with_evidence(vec![
            format!("Slope {:.3} over {} snapshots", slope, scores.len()),
            format!("Score moved from {:.1} to {:.1}", first, last),
        ])
        .with_actionability(if improving {
            Timeframe::LongTerm
        } else {
            Timeframe::Immediate
        })
        .with_impact(Impact::High);

        Ok(vec![pattern])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LearningConfig;
    use crate::test_utils::series;

    fn detect(scores: &[f64]) -> Vec<Pattern> {
        let snapshots = series(scores);
        let config = LearningConfig::default();
        PerformanceTrendDetector::new()
            .detect(&MiningContext::new(&snapshots, &config))
            .unwrap()
    }

    #[test]
    fn test_declining_scores() {
        let patterns = detect(&[90.0, 80.0, 70.0]);
        assert_eq!(patterns.len(), 1);

        let p = &patterns[0];
        assert_eq!(p.pattern_id, "performance-trend");
        assert!((p.confidence - 10.0).abs() < 1e-9);
        assert_eq!(p.actionability, Timeframe::Immediate);
        assert_eq!(p.impact, Impact::High);
        assert!(p.prediction.contains("60.0"));
    }

    #[test]
    fn test_improving_scores_are_long_term() {
        let patterns = detect(&[60.0, 61.0, 62.0, 63.0]);
        assert_eq!(patterns.len(), 1);
        assert_eq!(patterns[0].actionability, Timeframe::LongTerm);
        assert!((patterns[0].confidence - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_flat_scores_produce_nothing() {
        assert!(detect(&[80.0, 80.05, 80.1]).is_empty());
    }

    #[test]
    fn test_needs_three_snapshots() {
        assert!(detect(&[90.0, 10.0]).is_empty());
        assert!(detect(&[90.0]).is_empty());
    }
}
