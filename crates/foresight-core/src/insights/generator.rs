//! Insight Generator - orchestrates the insight analyzers

use crate::config::LearningConfig;
use crate::models::Snapshot;
use crate::patterns::Pattern;
use crate::Result;

use super::types::{Insight, InsightType};
use super::{AnomalyAnalyzer, OpportunityAnalyzer, RiskAlertAnalyzer, TrendAnalysisAnalyzer};

/// Context provided to insight analyzers
pub struct AnalysisContext<'a> {
    /// Patterns mined in this run
    pub patterns: &'a [Pattern],
    /// Snapshot history, oldest first
    pub snapshots: &'a [Snapshot],
    pub config: &'a LearningConfig,
}

impl<'a> AnalysisContext<'a> {
    pub fn new(
        patterns: &'a [Pattern],
        snapshots: &'a [Snapshot],
        config: &'a LearningConfig,
    ) -> Self {
        Self {
            patterns,
            snapshots,
            config,
        }
    }

    /// Most recent snapshot
    pub fn latest(&self) -> Option<&'a Snapshot> {
        self.snapshots.last()
    }

    /// Overall score series, oldest first
    pub fn scores(&self) -> Vec<f64> {
        self.snapshots.iter().map(|s| s.overall_score()).collect()
    }
}

/// Trait for insight analyzers
pub trait InsightAnalyzer: Send + Sync {
    /// Unique identifier for this insight type
    fn id(&self) -> InsightType;

    /// Human-readable name
    fn name(&self) -> &'static str;

    /// Analyze patterns and snapshots and produce insights
    fn analyze(&self, ctx: &AnalysisContext<'_>) -> Result<Vec<Insight>>;
}

/// Runs insight analyzers and ranks their output
pub struct InsightGenerator {
    analyzers: Vec<Box<dyn InsightAnalyzer>>,
}

impl Default for InsightGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl InsightGenerator {
    /// Create a generator with the built-in analyzers
    pub fn new() -> Self {
        let mut generator = Self { analyzers: vec![] };

        generator.register(Box::new(RiskAlertAnalyzer::new()));
        generator.register(Box::new(OpportunityAnalyzer::new()));
        generator.register(Box::new(TrendAnalysisAnalyzer::new()));
        generator.register(Box::new(AnomalyAnalyzer::new()));

        generator
    }

    /// Register an insight analyzer
    pub fn register(&mut self, analyzer: Box<dyn InsightAnalyzer>) {
        self.analyzers.push(analyzer);
    }

    /// Run all analyzers and collect insights
    pub fn generate(&self, ctx: &AnalysisContext<'_>) -> Vec<Insight> {
        let mut all_insights = vec![];

        for analyzer in &self.analyzers {
            match analyzer.analyze(ctx) {
                Ok(insights) => {
                    tracing::debug!(
                        analyzer = analyzer.id().as_str(),
                        count = insights.len(),
                        "Insight analysis complete"
                    );
                    all_insights.extend(insights);
                }
                Err(e) => {
                    tracing::warn!(
                        analyzer = analyzer.id().as_str(),
                        error = %e,
                        "Insight analysis failed"
                    );
                }
            }
        }

        // Highest impact first, then most confident, then id for stable output
        all_insights.sort_by(|a, b| {
            b.impact
                .priority()
                .cmp(&a.impact.priority())
                .then_with(|| b.confidence.total_cmp(&a.confidence))
                .then_with(|| a.insight_id.cmp(&b.insight_id))
        });

        all_insights
    }

    /// Get list of registered insight types
    pub fn insight_types(&self) -> Vec<InsightType> {
        self.analyzers.iter().map(|a| a.id()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patterns::{Impact, PatternType};
    use crate::test_utils::series;

    #[test]
    fn test_generator_creation() {
        let generator = InsightGenerator::new();
        let types = generator.insight_types();

        for insight_type in InsightType::all() {
            assert!(types.contains(insight_type));
        }
    }

    #[test]
    fn test_empty_input() {
        let config = LearningConfig::default();
        let insights = InsightGenerator::new().generate(&AnalysisContext::new(&[], &[], &config));
        assert!(insights.is_empty());
    }

    #[test]
    fn test_insights_sorted_by_impact() {
        let config = LearningConfig::default();
        let patterns = vec![
            Pattern::new(
                PatternType::OptimizationOpportunity,
                "optimization-build",
                1.0,
                "slow",
                "faster",
            ),
            Pattern::new(
                PatternType::IssueCorrelation,
                "correlation-memory_leak-cpu_spike",
                0.5,
                "together",
                "again",
            )
            .with_impact(Impact::Critical),
        ];
        let snapshots = series(&[80.0, 80.0]);

        let insights =
            InsightGenerator::new().generate(&AnalysisContext::new(&patterns, &snapshots, &config));

        assert_eq!(insights.len(), 2);
        assert_eq!(insights[0].insight_type, InsightType::RiskAlert);
        assert_eq!(insights[1].insight_type, InsightType::Opportunity);
    }
}
