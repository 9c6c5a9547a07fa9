//! Grouped view of a learning model for renderers

use crate::engine::LearningModel;
use crate::insights::{Insight, InsightType};
use crate::patterns::{Pattern, PatternType};

/// Patterns and insights grouped the way a report presents them
#[derive(Debug, Clone)]
pub struct ModelSummary<'a> {
    pub pattern_counts: Vec<(PatternType, usize)>,
    pub insight_counts: Vec<(InsightType, usize)>,
    /// Ranked by impact, then confidence
    pub risk_alerts: Vec<&'a Insight>,
    pub opportunities: Vec<&'a Insight>,
    /// Trend analysis and anomaly insights
    pub outlook: Vec<&'a Insight>,
    /// Patterns by confidence, highest first
    pub patterns: Vec<&'a Pattern>,
}

impl<'a> ModelSummary<'a> {
    pub fn from_model(model: &'a LearningModel) -> Self {
        let pattern_counts = PatternType::all()
            .iter()
            .map(|&t| {
                (
                    t,
                    model.patterns.iter().filter(|p| p.pattern_type == t).count(),
                )
            })
            .collect();

        let insight_counts = InsightType::all()
            .iter()
            .map(|&t| {
                (
                    t,
                    model.insights.iter().filter(|i| i.insight_type == t).count(),
                )
            })
            .collect();

        let by_type = move |wanted: &[InsightType]| -> Vec<&'a Insight> {
            model
                .insights
                .iter()
                .filter(|i| wanted.contains(&i.insight_type))
                .collect()
        };

        let mut patterns: Vec<&Pattern> = model.patterns.iter().collect();
        patterns.sort_by(|a, b| {
            b.confidence
                .total_cmp(&a.confidence)
                .then_with(|| a.pattern_id.cmp(&b.pattern_id))
        });

        Self {
            pattern_counts,
            insight_counts,
            risk_alerts: by_type(&[InsightType::RiskAlert]),
            opportunities: by_type(&[InsightType::Opportunity]),
            outlook: by_type(&[InsightType::TrendAnalysis, InsightType::AnomalyDetection]),
            patterns,
        }
    }

    pub fn pattern_count(&self, pattern_type: PatternType) -> usize {
        self.pattern_counts
            .iter()
            .find(|(t, _)| *t == pattern_type)
            .map(|(_, n)| *n)
            .unwrap_or(0)
    }

    pub fn insight_count(&self, insight_type: InsightType) -> usize {
        self.insight_counts
            .iter()
            .find(|(t, _)| *t == insight_type)
            .map(|(_, n)| *n)
            .unwrap_or(0)
    }

    /// True when the run produced nothing worth reporting
    pub fn is_quiet(&self) -> bool {
        self.patterns.is_empty()
            && self.risk_alerts.is_empty()
            && self.opportunities.is_empty()
            && self.outlook.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use crate::engine::LearningEngine;
    use crate::insights::InsightType;
    use crate::models::TaskHealth;
    use crate::patterns::PatternType;
    use crate::test_utils::{series, task};

    #[test]
    fn test_summary_groups_model() {
        let mut snapshots = series(&[90.0, 80.0, 70.0]);
        for snapshot in &mut snapshots {
            snapshot
                .tasks
                .push(task("e2e", TaskHealth::Critical, 2500.0));
        }

        let mut engine = LearningEngine::new();
        let summary = engine.run(snapshots).summary();

        assert_eq!(summary.pattern_count(PatternType::PerformanceTrend), 1);
        assert_eq!(summary.pattern_count(PatternType::FailurePrediction), 1);
        assert_eq!(summary.pattern_count(PatternType::OptimizationOpportunity), 1);
        assert_eq!(summary.insight_count(InsightType::Opportunity), 1);
        assert_eq!(summary.opportunities.len(), 1);
        assert_eq!(summary.outlook.len(), 1);
        assert!(summary.risk_alerts.is_empty());
        // Trend confidence (10.0) sorts ahead of the frequency patterns
        assert_eq!(summary.patterns[0].pattern_id, "performance-trend");
        assert!(!summary.is_quiet());
    }

    #[test]
    fn test_empty_model_is_quiet() {
        let mut engine = LearningEngine::new();
        let summary = engine.run(vec![]).summary();
        assert!(summary.is_quiet());
        assert_eq!(summary.insight_count(InsightType::RiskAlert), 0);
    }
}
