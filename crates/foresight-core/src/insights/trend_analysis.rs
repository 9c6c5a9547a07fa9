//! Trend Analysis Insight
//!
//! Recomputes the overall score trend directly from the snapshots (it does
//! not depend on the miner's performance-trend pattern) and projects the
//! next score. Any history long enough to fit a trend gets one insight; a
//! slope within the significance threshold is reported as stable.

use crate::error::Result;
use crate::patterns::{Impact, Timeframe, MIN_TREND_SNAPSHOTS};
use crate::trend;

use super::generator::{AnalysisContext, InsightAnalyzer};
use super::types::{Insight, InsightType};

pub struct TrendAnalysisAnalyzer;

impl TrendAnalysisAnalyzer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TrendAnalysisAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl InsightAnalyzer for TrendAnalysisAnalyzer {
    fn id(&self) -> InsightType {
        InsightType::TrendAnalysis
    }

    fn name(&self) -> &'static str {
        "Trend Analysis"
    }

    fn analyze(&self, ctx: &AnalysisContext<'_>) -> Result<Vec<Insight>> {
        if ctx.snapshots.len() < MIN_TREND_SNAPSHOTS {
            return Ok(vec![]);
        }

        let scores = ctx.scores();
        let slope = trend::slope(&scores);
        let current = scores.last().copied().unwrap_or_default();
        let predicted = trend::predict_next(&scores);

        let (title, recommendations, impact) = if slope.abs() <= ctx.config.trend_threshold {
            (
                "Overall health is stable",
                vec!["Keep monitoring the health score for early signs of drift"],
                Impact::Low,
            )
        } else if slope < 0.0 {
            (
                "Overall health is declining",
                vec![
                    "Review recent changes that coincide with the decline",
                    "Prioritize fixes for the most frequent issues",
                    "Track the health score after each merge",
                ],
                Impact::High,
            )
        } else {
            (
                "Overall health is improving",
                vec![
                    "Keep the practices that drove the improvement",
                    "Raise alert thresholds to lock in the gains",
                ],
                Impact::Medium,
            )
        };

        let insight = Insight::new(
            InsightType::TrendAnalysis,
            "trend-analysis",
            title,
            format!(
                "Health score is changing by {:+.2} points per snapshot; {:.1} now, {:.1} projected next",
                slope, current, predicted
            ),
        )
        .with_scores(slope.abs(), ctx.config.trend_probability)
        .with_timeframe(Timeframe::LongTerm)
        .with_impact(impact)
        .with_recommendations(recommendations)
        .with_data("slope", slope)
        .with_data("currentScore", current)
        .with_data("predictedNextScore", predicted)
        .with_data("samples", scores.len());

        Ok(vec![insight])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LearningConfig;
    use crate::test_utils::series;

    fn analyze(scores: &[f64]) -> Vec<Insight> {
        let snapshots = series(scores);
        let config = LearningConfig::default();
        TrendAnalysisAnalyzer::new()
            .analyze(&AnalysisContext::new(&[], &snapshots, &config))
            .unwrap()
    }

    #[test]
    fn test_declining_trend() {
        let insights = analyze(&[90.0, 80.0, 70.0]);
        assert_eq!(insights.len(), 1);

        let insight = &insights[0];
        assert!((insight.confidence - 10.0).abs() < 1e-9);
        assert_eq!(insight.probability, 0.7);
        assert_eq!(insight.impact, Impact::High);
        assert_eq!(insight.supporting_data["predictedNextScore"], 60.0);
        assert_eq!(insight.supporting_data["samples"], 3);
    }

    #[test]
    fn test_improving_trend_is_medium_impact() {
        let insights = analyze(&[50.0, 55.0, 60.0]);
        assert_eq!(insights[0].impact, Impact::Medium);
        assert_eq!(insights[0].title, "Overall health is improving");
    }

    #[test]
    fn test_not_enough_history() {
        assert!(analyze(&[90.0, 70.0]).is_empty());
    }

    #[test]
    fn test_flat_history_is_stable() {
        let insights = analyze(&[75.0, 75.0, 75.0]);
        assert_eq!(insights.len(), 1);

        let insight = &insights[0];
        assert_eq!(insight.confidence, 0.0);
        assert_eq!(insight.probability, 0.7);
        assert_eq!(insight.impact, Impact::Low);
        assert_eq!(insight.title, "Overall health is stable");
        assert_eq!(insight.supporting_data["predictedNextScore"], 75.0);
    }

    #[test]
    fn test_near_flat_history_still_reported() {
        let insights = analyze(&[80.0, 80.0, 80.05]);
        assert_eq!(insights.len(), 1);
        assert!((insights[0].confidence - 0.025).abs() < 1e-9);
        assert_eq!(insights[0].impact, Impact::Low);
    }
}
