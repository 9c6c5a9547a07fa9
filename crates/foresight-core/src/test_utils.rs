//! Snapshot builders for tests
//!
//! Enabled for unit tests and, via the `test-utils` feature, for other
//! crates in the workspace.

use std::collections::HashMap;

use crate::models::{
    Issue, IssueSeverity, IssueType, OverallHealth, Snapshot, TaskHealth, TaskStatus, Trends,
};

/// A snapshot with the given overall score and no tasks or issues
pub fn snapshot(timestamp: &str, overall_score: f64) -> Snapshot {
    Snapshot {
        timestamp: timestamp.to_string(),
        overall_health: OverallHealth {
            overall_score,
            test_reliability: 0.95,
            performance_stability: 0.9,
            memory_efficiency: 0.9,
            error_rate: 0.01,
            hanging_test_rate: 0.0,
            average_test_duration: 250.0,
            total_issues: 0,
            critical_issues: 0,
        },
        tasks: Vec::new(),
        issues: Vec::new(),
        trends: Trends::default(),
        recommendations: Vec::new(),
    }
}

/// One snapshot per score, a day apart starting 2025-01-01
pub fn series(scores: &[f64]) -> Vec<Snapshot> {
    scores
        .iter()
        .enumerate()
        .map(|(i, &score)| snapshot(&day(i), score))
        .collect()
}

/// RFC 3339 timestamp for day `i` after 2025-01-01
pub fn day(i: usize) -> String {
    let start = chrono::NaiveDate::from_ymd_opt(2025, 1, 1)
        .unwrap()
        .and_hms_opt(9, 0, 0)
        .unwrap()
        .and_utc();
    (start + chrono::Duration::days(i as i64)).to_rfc3339()
}

pub fn task(task_id: &str, status: TaskHealth, average_duration: f64) -> TaskStatus {
    TaskStatus {
        task_id: task_id.to_string(),
        name: format!("Task {}", task_id),
        status,
        success_rate: 0.9,
        average_duration,
        issues: Vec::new(),
        recommendations: Vec::new(),
    }
}

pub fn issue(issue_type: IssueType, severity: IssueSeverity) -> Issue {
    Issue {
        issue_type,
        severity,
        title: format!("{} detected", issue_type.label()),
        description: String::new(),
        location: "tests/".to_string(),
        duration: None,
        frequency: 1,
        impact: String::new(),
        recommendations: Vec::new(),
        metadata: HashMap::new(),
    }
}
