//! Snapshot ingestion
//!
//! Turns raw records into validated [`Snapshot`]s ordered oldest to newest.
//! A malformed record never fails the load: it is dropped and a
//! [`LoadWarning`] explains why.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::models::Snapshot;

/// A raw snapshot record as read from storage
#[derive(Debug, Clone)]
pub struct SnapshotRecord {
    /// Where the record came from (file name), if known
    pub source: Option<String>,
    pub value: serde_json::Value,
}

impl SnapshotRecord {
    pub fn new(value: serde_json::Value) -> Self {
        Self {
            source: None,
            value,
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

/// A record that was dropped during loading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadWarning {
    /// Position of the record in the input
    pub index: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    pub reason: String,
}

impl std::fmt::Display for LoadWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.source {
            Some(source) => write!(f, "record {} ({}): {}", self.index, source, self.reason),
            None => write!(f, "record {}: {}", self.index, self.reason),
        }
    }
}

/// Result of loading a batch of records
#[derive(Debug, Clone, Default)]
pub struct LoadOutcome {
    /// Valid snapshots, oldest first
    pub snapshots: Vec<Snapshot>,
    pub warnings: Vec<LoadWarning>,
}

/// Deserialize and validate raw records
pub fn load_records(records: Vec<SnapshotRecord>) -> LoadOutcome {
    let mut candidates = Vec::with_capacity(records.len());
    let mut warnings = Vec::new();

    for (index, record) in records.into_iter().enumerate() {
        match serde_json::from_value::<Snapshot>(record.value) {
            Ok(snapshot) => candidates.push((index, record.source, snapshot)),
            Err(e) => warnings.push(drop_record(
                index,
                record.source,
                format!("unreadable snapshot: {}", e),
            )),
        }
    }

    finish(candidates, warnings)
}

/// Validate snapshots that are already typed
pub fn validate_snapshots(snapshots: Vec<Snapshot>) -> LoadOutcome {
    let candidates = snapshots
        .into_iter()
        .enumerate()
        .map(|(index, snapshot)| (index, None, snapshot))
        .collect();

    finish(candidates, Vec::new())
}

fn finish(
    candidates: Vec<(usize, Option<String>, Snapshot)>,
    mut warnings: Vec<LoadWarning>,
) -> LoadOutcome {
    let mut valid = Vec::with_capacity(candidates.len());

    for (index, source, snapshot) in candidates {
        match validate(&snapshot) {
            Ok(timestamp) => valid.push((timestamp, snapshot)),
            Err(reason) => warnings.push(drop_record(index, source, reason)),
        }
    }

    // Stable: equal timestamps keep input order
    valid.sort_by_key(|(timestamp, _)| *timestamp);
    warnings.sort_by_key(|w| w.index);

    LoadOutcome {
        snapshots: valid.into_iter().map(|(_, s)| s).collect(),
        warnings,
    }
}

fn drop_record(index: usize, source: Option<String>, reason: String) -> LoadWarning {
    warn!(
        index,
        source = source.as_deref().unwrap_or("-"),
        reason = %reason,
        "Dropping malformed snapshot"
    );
    LoadWarning {
        index,
        source,
        reason,
    }
}

/// Check a snapshot's invariants, returning its parsed timestamp
fn validate(snapshot: &Snapshot) -> Result<chrono::DateTime<chrono::Utc>, String> {
    let timestamp = snapshot
        .parsed_timestamp()
        .ok_or_else(|| format!("invalid timestamp '{}'", snapshot.timestamp))?;

    for (name, value) in snapshot.overall_health.float_fields() {
        if !value.is_finite() {
            return Err(format!("overallHealth.{} is not a finite number", name));
        }
    }

    for task in &snapshot.tasks {
        if !task.success_rate.is_finite() || !(0.0..=1.0).contains(&task.success_rate) {
            return Err(format!(
                "task '{}' has successRate {} outside 0-1",
                task.task_id, task.success_rate
            ));
        }
        if !task.average_duration.is_finite() || task.average_duration < 0.0 {
            return Err(format!(
                "task '{}' has invalid averageDuration {}",
                task.task_id, task.average_duration
            ));
        }
    }

    Ok(timestamp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{snapshot, task};

    fn record(timestamp: &str, score: f64) -> SnapshotRecord {
        SnapshotRecord::new(serde_json::to_value(snapshot(timestamp, score)).unwrap())
    }

    #[test]
    fn test_sorts_oldest_first() {
        let outcome = load_records(vec![
            record("2025-03-03T00:00:00Z", 70.0),
            record("2025-03-01T00:00:00Z", 90.0),
            record("2025-03-02T00:00:00Z", 80.0),
        ]);

        let scores: Vec<f64> = outcome.snapshots.iter().map(|s| s.overall_score()).collect();
        assert_eq!(scores, vec![90.0, 80.0, 70.0]);
        assert!(outcome.warnings.is_empty());
    }

    #[test]
    fn test_drops_unparseable_record() {
        let outcome = load_records(vec![
            record("2025-03-01T00:00:00Z", 90.0),
            SnapshotRecord::new(serde_json::json!({"timestamp": "2025-03-02T00:00:00Z"}))
                .with_source("broken.json"),
        ]);

        assert_eq!(outcome.snapshots.len(), 1);
        assert_eq!(outcome.warnings.len(), 1);
        assert_eq!(outcome.warnings[0].index, 1);
        assert_eq!(outcome.warnings[0].source.as_deref(), Some("broken.json"));
        assert!(outcome.warnings[0].reason.contains("unreadable"));
    }

    #[test]
    fn test_drops_bad_timestamp() {
        let outcome = validate_snapshots(vec![snapshot("yesterday", 90.0)]);
        assert!(outcome.snapshots.is_empty());
        assert!(outcome.warnings[0].reason.contains("timestamp"));
    }

    #[test]
    fn test_accepts_offsetless_date_time() {
        let outcome = load_records(vec![record("2025-03-01T00:00:00", 90.0)]);
        assert_eq!(outcome.snapshots.len(), 1);
        assert!(outcome.warnings.is_empty());
    }

    #[test]
    fn test_accepts_fractional_seconds_without_offset() {
        let outcome = load_records(vec![record("2025-03-02T00:00:00.000", 80.0)]);
        assert_eq!(outcome.snapshots.len(), 1);
        assert!(outcome.warnings.is_empty());
    }

    #[test]
    fn test_accepts_date_only() {
        let outcome = load_records(vec![record("2025-03-03", 70.0)]);
        assert_eq!(outcome.snapshots.len(), 1);
        assert!(outcome.warnings.is_empty());
    }

    #[test]
    fn test_mixed_timestamp_forms_sort_together() {
        let outcome = load_records(vec![
            record("2025-03-03", 70.0),
            record("2025-03-02T00:00:00.000", 80.0),
            record("2025-03-01T00:00:00", 90.0),
            record("2025-03-02T12:00:00+00:00", 75.0),
        ]);

        let scores: Vec<f64> = outcome.snapshots.iter().map(|s| s.overall_score()).collect();
        assert_eq!(scores, vec![90.0, 80.0, 75.0, 70.0]);
        assert!(outcome.warnings.is_empty());
    }

    #[test]
    fn test_drops_out_of_range_success_rate() {
        let mut bad = snapshot("2025-03-01T00:00:00Z", 90.0);
        let mut t = task("unit", crate::models::TaskHealth::Healthy, 100.0);
        t.success_rate = 1.4;
        bad.tasks.push(t);

        let outcome = validate_snapshots(vec![bad, snapshot("2025-03-02T00:00:00Z", 80.0)]);
        assert_eq!(outcome.snapshots.len(), 1);
        assert_eq!(outcome.warnings[0].index, 0);
        assert!(outcome.warnings[0].reason.contains("successRate"));
    }

    #[test]
    fn test_drops_non_finite_score() {
        let outcome = validate_snapshots(vec![snapshot("2025-03-01T00:00:00Z", f64::NAN)]);
        assert!(outcome.snapshots.is_empty());
        assert!(outcome.warnings[0].reason.contains("overallScore"));
    }

    #[test]
    fn test_empty_input() {
        let outcome = load_records(vec![]);
        assert!(outcome.snapshots.is_empty());
        assert!(outcome.warnings.is_empty());
    }
}
