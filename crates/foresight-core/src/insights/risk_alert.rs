//! Risk Alert Insight
//!
//! Every critical-impact pattern becomes a risk alert.

use crate::error::Result;
use crate::patterns::Impact;

use super::generator::{AnalysisContext, InsightAnalyzer};
use super::types::{Insight, InsightType};

const RECOMMENDATIONS: [&str; 3] = [
    "Address the underlying issue immediately",
    "Add monitoring to catch a recurrence early",
    "Create a contingency plan in case it escalates",
];

pub struct RiskAlertAnalyzer;

impl RiskAlertAnalyzer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RiskAlertAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl InsightAnalyzer for RiskAlertAnalyzer {
    fn id(&self) -> InsightType {
        InsightType::RiskAlert
    }

    fn name(&self) -> &'static str {
        "Risk Alert"
    }

    fn analyze(&self, ctx: &AnalysisContext<'_>) -> Result<Vec<Insight>> {
        let insights = ctx
            .patterns
            .iter()
            .filter(|p| p.impact == Impact::Critical)
            .map(|pattern| {
                Insight::new(
                    InsightType::RiskAlert,
                    format!("risk-{}", pattern.pattern_id),
                    format!("Risk: {}", pattern.description),
                    pattern.prediction.clone(),
                )
                .with_scores(pattern.confidence, pattern.confidence)
                .with_timeframe(pattern.actionability)
                .with_impact(Impact::Critical)
                .with_recommendations(RECOMMENDATIONS)
                .with_data("patternId", pattern.pattern_id.clone())
                .with_data("patternType", pattern.pattern_type.as_str())
                .with_data("evidence", pattern.evidence.clone())
            })
            .collect();

        Ok(insights)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LearningConfig;
    use crate::patterns::{Pattern, PatternType, Timeframe};

    #[test]
    fn test_only_critical_patterns_alert() {
        let patterns = vec![
            Pattern::new(PatternType::IssueCorrelation, "correlation-a-b", 0.75, "d", "p")
                .with_impact(Impact::Critical)
                .with_actionability(Timeframe::Immediate),
            Pattern::new(PatternType::FailurePrediction, "failure-x", 0.9, "d", "p")
                .with_impact(Impact::High),
        ];
        let config = LearningConfig::default();

        let insights = RiskAlertAnalyzer::new()
            .analyze(&AnalysisContext::new(&patterns, &[], &config))
            .unwrap();

        assert_eq!(insights.len(), 1);
        let alert = &insights[0];
        assert_eq!(alert.insight_id, "risk-correlation-a-b");
        assert_eq!(alert.confidence, 0.75);
        assert_eq!(alert.probability, 0.75);
        assert_eq!(alert.timeframe, Timeframe::Immediate);
        assert_eq!(alert.recommendations.len(), 3);
        assert_eq!(alert.supporting_data["patternId"], "correlation-a-b");
    }
}
