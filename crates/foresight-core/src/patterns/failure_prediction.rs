//! Failure Prediction Detector
//!
//! Tasks that have been critical in several snapshots are likely to be
//! critical again.

use std::collections::BTreeMap;

use crate::error::Result;
use crate::models::TaskHealth;

use super::miner::{MiningContext, PatternDetector};
use super::types::{Impact, Pattern, PatternType, Timeframe};

pub struct FailurePredictionDetector;

impl FailurePredictionDetector {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FailurePredictionDetector {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-task tally across the history
#[derive(Debug, Default)]
struct CriticalTally<'a> {
    name: &'a str,
    critical: usize,
    last_critical: Option<&'a str>,
}

impl PatternDetector for FailurePredictionDetector {
    fn id(&self) -> PatternType {
        PatternType::FailurePrediction
    }

    fn name(&self) -> &'static str {
        "Failure Prediction"
    }

    fn detect(&self, ctx: &MiningContext<'_>) -> Result<Vec<Pattern>> {
        if ctx.snapshots.len() < 2 {
            return Ok(vec![]);
        }

        let mut tallies: BTreeMap<&str, CriticalTally<'_>> = BTreeMap::new();

        for snapshot in ctx.snapshots {
            // A task listed twice in one snapshot still counts once
            let mut seen_here: Vec<&str> = Vec::new();
            for task in &snapshot.tasks {
                let tally = tallies.entry(task.task_id.as_str()).or_default();
                tally.name = task.name.as_str();

                if task.status == TaskHealth::Critical && !seen_here.contains(&task.task_id.as_str())
                {
                    seen_here.push(task.task_id.as_str());
                    tally.critical += 1;
                    tally.last_critical = Some(snapshot.timestamp.as_str());
                }
            }
        }

        let total = ctx.snapshot_count();
        let patterns = tallies
            .into_iter()
            .filter(|(_, tally)| tally.critical >= ctx.config.min_critical_count)
            .map(|(task_id, tally)| {
                Pattern::new(
                    PatternType::FailurePrediction,
                    format!("failure-{}", task_id),
                    tally.critical as f64 / total,
                    format!(
                        "Task '{}' has been critical in {} of {} snapshots",
                        tally.name,
                        tally.critical,
                        ctx.snapshots.len()
                    ),
                    format!("Task '{}' is likely to fail again", tally.name),
                )
                .with_evidence(vec![
                    format!("Critical status recorded {} times", tally.critical),
                    format!(
                        "Most recent critical snapshot: {}",
                        tally.last_critical.unwrap_or("unknown")
                    ),
                ])
                .with_actionability(Timeframe::Immediate)
                .with_impact(Impact::High)
            })
            .collect();

        Ok(patterns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LearningConfig;
    use crate::test_utils::{series, task};

    fn detect_with(statuses: &[TaskHealth]) -> Vec<Pattern> {
        let mut snapshots = series(&vec![80.0; statuses.len()]);
        for (snapshot, &status) in snapshots.iter_mut().zip(statuses) {
            snapshot.tasks.push(task("e2e", status, 500.0));
            snapshot.tasks.push(task("lint", TaskHealth::Healthy, 50.0));
        }
        let config = LearningConfig::default();
        FailurePredictionDetector::new()
            .detect(&MiningContext::new(&snapshots, &config))
            .unwrap()
    }

    #[test]
    fn test_repeated_critical_task() {
        let patterns = detect_with(&[
            TaskHealth::Critical,
            TaskHealth::Healthy,
            TaskHealth::Critical,
            TaskHealth::Warning,
        ]);

        assert_eq!(patterns.len(), 1);
        let p = &patterns[0];
        assert_eq!(p.pattern_id, "failure-e2e");
        assert!((p.confidence - 0.5).abs() < 1e-9);
        assert_eq!(p.actionability, Timeframe::Immediate);
        assert_eq!(p.impact, Impact::High);
        assert!(p.evidence[1].contains("2025-01-03"));
    }

    #[test]
    fn test_single_critical_is_not_a_pattern() {
        let patterns = detect_with(&[TaskHealth::Critical, TaskHealth::Healthy]);
        assert!(patterns.is_empty());
    }

    #[test]
    fn test_single_snapshot_yields_nothing() {
        assert!(detect_with(&[TaskHealth::Critical]).is_empty());
    }
}
