//! Pattern Miner - runs every registered detector over the snapshot history

use crate::config::LearningConfig;
use crate::models::Snapshot;
use crate::Result;

use super::types::{Pattern, PatternType};
use super::{
    FailurePredictionDetector, IssueCorrelationDetector, OptimizationDetector,
    PerformanceTrendDetector,
};

/// Context provided to pattern detectors
pub struct MiningContext<'a> {
    /// Snapshot history, oldest first
    pub snapshots: &'a [Snapshot],
    pub config: &'a LearningConfig,
}

impl<'a> MiningContext<'a> {
    pub fn new(snapshots: &'a [Snapshot], config: &'a LearningConfig) -> Self {
        Self { snapshots, config }
    }

    /// Number of snapshots, as a divisor for frequency confidences
    pub fn snapshot_count(&self) -> f64 {
        self.snapshots.len() as f64
    }

    /// Overall score series, oldest first
    pub fn scores(&self) -> Vec<f64> {
        self.snapshots.iter().map(|s| s.overall_score()).collect()
    }
}

/// Trait for pattern detectors
pub trait PatternDetector: Send + Sync {
    /// Pattern family this detector produces
    fn id(&self) -> PatternType;

    /// Human-readable name
    fn name(&self) -> &'static str;

    /// Scan the history and produce patterns
    fn detect(&self, ctx: &MiningContext<'_>) -> Result<Vec<Pattern>>;
}

/// Runs pattern detectors and collects their output
pub struct PatternMiner {
    detectors: Vec<Box<dyn PatternDetector>>,
}

impl Default for PatternMiner {
    fn default() -> Self {
        Self::new()
    }
}

impl PatternMiner {
    /// Create a miner with the built-in detectors
    pub fn new() -> Self {
        let mut miner = Self { detectors: vec![] };

        miner.register(Box::new(IssueCorrelationDetector::new()));
        miner.register(Box::new(PerformanceTrendDetector::new()));
        miner.register(Box::new(FailurePredictionDetector::new()));
        miner.register(Box::new(OptimizationDetector::new()));

        miner
    }

    /// Register a pattern detector
    pub fn register(&mut self, detector: Box<dyn PatternDetector>) {
        self.detectors.push(detector);
    }

    /// Run all detectors. A failing detector is logged and skipped.
    pub fn mine(&self, ctx: &MiningContext<'_>) -> Vec<Pattern> {
        let mut all_patterns = vec![];

        for detector in &self.detectors {
            match detector.detect(ctx) {
                Ok(patterns) => {
                    tracing::debug!(
                        detector = detector.id().as_str(),
                        count = patterns.len(),
                        "Pattern detection complete"
                    );
                    all_patterns.extend(patterns);
                }
                Err(e) => {
                    tracing::warn!(
                        detector = detector.id().as_str(),
                        error = %e,
                        "Pattern detection failed"
                    );
                }
            }
        }

        all_patterns.sort_by(|a, b| a.pattern_id.cmp(&b.pattern_id));
        all_patterns
    }

    /// Get list of registered pattern types
    pub fn pattern_types(&self) -> Vec<PatternType> {
        self.detectors.iter().map(|d| d.id()).collect()
    }
}
