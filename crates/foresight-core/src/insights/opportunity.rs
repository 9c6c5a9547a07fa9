//! Opportunity Insight
//!
//! Turns optimization patterns into actionable suggestions. The probability
//! is a fixed configured value rather than the pattern's confidence.

use crate::error::Result;
use crate::patterns::{PatternType, Timeframe};

use super::generator::{AnalysisContext, InsightAnalyzer};
use super::types::{Insight, InsightType};

const RECOMMENDATIONS: [&str; 4] = [
    "Profile the task to find where the time goes",
    "Cache expensive setup and fixtures between runs",
    "Parallelize independent test cases",
    "Set a performance budget and fail the build when it is exceeded",
];

pub struct OpportunityAnalyzer;

impl OpportunityAnalyzer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for OpportunityAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl InsightAnalyzer for OpportunityAnalyzer {
    fn id(&self) -> InsightType {
        InsightType::Opportunity
    }

    fn name(&self) -> &'static str {
        "Opportunity"
    }

    fn analyze(&self, ctx: &AnalysisContext<'_>) -> Result<Vec<Insight>> {
        let insights = ctx
            .patterns
            .iter()
            .filter(|p| p.pattern_type == PatternType::OptimizationOpportunity)
            .map(|pattern| {
                Insight::new(
                    InsightType::Opportunity,
                    format!("opportunity-{}", pattern.pattern_id),
                    format!("Opportunity: {}", pattern.description),
                    pattern.prediction.clone(),
                )
                .with_scores(pattern.confidence, ctx.config.opportunity_probability)
                .with_timeframe(Timeframe::ShortTerm)
                .with_impact(pattern.impact)
                .with_recommendations(RECOMMENDATIONS)
                .with_data("patternId", pattern.pattern_id.clone())
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
    use crate::patterns::{Impact, Pattern};

    #[test]
    fn test_probability_is_fixed() {
        let patterns = vec![
            Pattern::new(
                PatternType::OptimizationOpportunity,
                "optimization-build",
                0.4,
                "Task 'build' is slow",
                "save 1.2s",
            ),
            Pattern::new(PatternType::FailurePrediction, "failure-build", 1.0, "d", "p"),
        ];
        let config = LearningConfig::default();

        let insights = OpportunityAnalyzer::new()
            .analyze(&AnalysisContext::new(&patterns, &[], &config))
            .unwrap();

        assert_eq!(insights.len(), 1);
        let insight = &insights[0];
        assert_eq!(insight.insight_id, "opportunity-optimization-build");
        assert_eq!(insight.confidence, 0.4);
        assert_eq!(insight.probability, 0.8);
        assert_eq!(insight.impact, Impact::Medium);
        assert_eq!(insight.recommendations.len(), 4);
    }
}
