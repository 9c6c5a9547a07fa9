//! Optimization Opportunity Detector
//!
//! Tasks that are repeatedly slower than the configured threshold are
//! candidates for optimization. The expected saving is a fixed fraction of
//! their average slow duration.

use std::collections::BTreeMap;

use crate::error::Result;
use crate::trend;

use super::miner::{MiningContext, PatternDetector};
use super::types::{Impact, Pattern, PatternType, Timeframe};

pub struct OptimizationDetector;

impl OptimizationDetector {
    pub fn new() -> Self {
        Self
    }
}

impl Default for OptimizationDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl PatternDetector for OptimizationDetector {
    fn id(&self) -> PatternType {
        PatternType::OptimizationOpportunity
    }

    fn name(&self) -> &'static str {
        "Optimization Opportunity"
    }

    fn detect(&self, ctx: &MiningContext<'_>) -> Result<Vec<Pattern>> {
        if ctx.snapshots.len() < 2 {
            return Ok(vec![]);
        }

        let threshold = ctx.config.slow_task_threshold_ms;
        // task_id -> (name, slow durations)
        let mut slow: BTreeMap<&str, (&str, Vec<f64>)> = BTreeMap::new();

        for snapshot in ctx.snapshots {
            for task in &snapshot.tasks {
                if task.average_duration > threshold {
                    let entry = slow
                        .entry(task.task_id.as_str())
                        .or_insert_with(|| (task.name.as_str(), Vec::new()));
                    entry.0 = task.name.as_str();
                    entry.1.push(task.average_duration);
                }
            }
        }

        let total = ctx.snapshot_count();
        let mut patterns = Vec::new();

        for (task_id, (name, durations)) in slow {
            if durations.len() < ctx.config.min_slow_observations {
                continue;
            }

            let average_ms = trend::mean(&durations).unwrap_or_default();
            let savings_secs = average_ms * ctx.config.savings_ratio / 1000.0;

            let pattern = Pattern::new(
                PatternType::OptimizationOpportunity,
                format!("optimization-{}", task_id),
                (durations.len() as f64 / total).min(1.0),
                format!(
                    "Task '{}' consistently runs slower than {:.0}ms",
                    name, threshold
                ),
                format!(
                    "Optimizing '{}' could save about {:.1}s per run (average {:.1}s)",
                    name,
                    savings_secs,
                    average_ms / 1000.0
                ),
            )
            .with_evidence(vec![
                format!(
                    "Slow in {} of {} snapshots",
                    durations.len(),
                    ctx.snapshots.len()
                ),
                format!("Average slow duration {:.0}ms", average_ms),
            ])
            .with_actionability(Timeframe::ShortTerm)
            .with_impact(Impact::Medium);

            patterns.push(pattern);
        }

        Ok(patterns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LearningConfig;
    use crate::models::TaskHealth;
    use crate::test_utils::{series, task};

    fn detect_with(durations: &[f64]) -> Vec<Pattern> {
        let mut snapshots = series(&vec![80.0; durations.len()]);
        for (snapshot, &duration) in snapshots.iter_mut().zip(durations) {
            snapshot
                .tasks
                .push(task("integration", TaskHealth::Warning, duration));
        }
        let config = LearningConfig::default();
        OptimizationDetector::new()
            .detect(&MiningContext::new(&snapshots, &config))
            .unwrap()
    }

    #[test]
    fn test_repeatedly_slow_task() {
        let patterns = detect_with(&[2000.0, 900.0, 4000.0]);

        assert_eq!(patterns.len(), 1);
        let p = &patterns[0];
        assert_eq!(p.pattern_id, "optimization-integration");
        assert!((p.confidence - 2.0 / 3.0).abs() < 1e-9);
        assert_eq!(p.impact, Impact::Medium);
        assert_eq!(p.actionability, Timeframe::ShortTerm);
        // mean 3000ms * 0.3 = 0.9s
        assert!(p.prediction.contains("0.9s"));
    }

    #[test]
    fn test_threshold_is_exclusive() {
        assert!(detect_with(&[1000.0, 1000.0, 1000.0]).is_empty());
    }

    #[test]
    fn test_one_slow_observation_is_not_enough() {
        assert!(detect_with(&[5000.0, 100.0]).is_empty());
        assert!(detect_with(&[5000.0]).is_empty());
    }
}
