//! Issue Correlation Detector
//!
//! Counts, per snapshot, which pairs of distinct issue types appear together.
//! Pairs seen together in enough snapshots are reported in both directions,
//! since the description reads "A tends to bring B".

use std::collections::BTreeMap;

use crate::error::Result;
use crate::models::{IssueSeverity, IssueType};

use super::miner::{MiningContext, PatternDetector};
use super::types::{Impact, Pattern, PatternType, Timeframe};

/// Co-occurrence tally for one unordered pair
#[derive(Debug, Default)]
struct PairStats {
    count: usize,
    worst_severity: Option<IssueSeverity>,
}

pub struct IssueCorrelationDetector;

impl IssueCorrelationDetector {
    pub fn new() -> Self {
        Self
    }
}

impl Default for IssueCorrelationDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl PatternDetector for IssueCorrelationDetector {
    fn id(&self) -> PatternType {
        PatternType::IssueCorrelation
    }

    fn name(&self) -> &'static str {
        "Issue Correlation"
    }

    fn detect(&self, ctx: &MiningContext<'_>) -> Result<Vec<Pattern>> {
        // Keyed by (lower, higher) so each unordered pair has one entry
        let mut pairs: BTreeMap<(IssueType, IssueType), PairStats> = BTreeMap::new();

        for snapshot in ctx.snapshots {
            let mut worst: BTreeMap<IssueType, IssueSeverity> = BTreeMap::new();
            for issue in &snapshot.issues {
                worst
                    .entry(issue.issue_type)
                    .and_modify(|s| *s = (*s).max(issue.severity))
                    .or_insert(issue.severity);
            }

            let types: Vec<IssueType> = worst.keys().copied().collect();
            for (i, &a) in types.iter().enumerate() {
                for &b in &types[i + 1..] {
                    let stats = pairs.entry((a, b)).or_default();
                    stats.count += 1;
                    let pair_worst = worst[&a].max(worst[&b]);
                    stats.worst_severity = Some(match stats.worst_severity {
                        Some(s) => s.max(pair_worst),
                        None => pair_worst,
                    });
                }
            }
        }

        let total = ctx.snapshot_count();
        let mut patterns = Vec::new();

        for ((a, b), stats) in pairs {
            if stats.count < ctx.config.min_correlation_count {
                continue;
            }

            let confidence = (stats.count as f64 / total).min(1.0);
            let impact = stats
                .worst_severity
                .map(Impact::from)
                .unwrap_or(Impact::Medium);
            let actionability = if impact == Impact::Critical {
                Timeframe::Immediate
            } else {
                Timeframe::ShortTerm
            };

            for (first, second) in [(a, b), (b, a)] {
                let pattern = Pattern::new(
                    PatternType::IssueCorrelation,
                    format!("correlation-{}-{}", first, second),
                    confidence,
                    format!(
                        "{} issues frequently occur together with {} issues",
                        capitalize(&first.label()),
                        second.label()
                    ),
                    format!(
                        "When a {} is detected, expect a {} in the same run",
                        first.label(),
                        second.label()
                    ),
                )
                .with_evidence(vec![
                    format!(
                        "Co-occurred in {} of {} snapshots",
                        stats.count,
                        ctx.snapshots.len()
                    ),
                    format!("Worst severity observed: {}", impact),
                ])
                .with_actionability(actionability)
                .with_impact(impact);

                patterns.push(pattern);
            }
        }

        Ok(patterns)
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) => c.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
