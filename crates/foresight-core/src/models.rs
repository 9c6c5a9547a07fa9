//! Domain models for Foresight
//!
//! A [`Snapshot`] is one recorded observation of test-suite health. Snapshots
//! are produced elsewhere (a monitoring job writes them to disk) and are
//! treated as read-only input here.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// One historical observation of system health
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// ISO-8601 timestamp
    pub timestamp: String,
    pub overall_health: OverallHealth,
    #[serde(default)]
    pub tasks: Vec<TaskStatus>,
    #[serde(default)]
    pub issues: Vec<Issue>,
    #[serde(default)]
    pub trends: Trends,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

impl Snapshot {
    /// Parse the timestamp, if it is valid ISO-8601
    pub fn parsed_timestamp(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.timestamp)
    }

    pub fn overall_score(&self) -> f64 {
        self.overall_health.overall_score
    }
}

/// Parse an ISO-8601 timestamp: RFC 3339 with an offset, a date-time without
/// one, or a bare date. Values without an offset are read as UTC.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Aggregate health metrics for a snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverallHealth {
    /// 0-100 composite health score
    pub overall_score: f64,
    pub test_reliability: f64,
    pub performance_stability: f64,
    pub memory_efficiency: f64,
    pub error_rate: f64,
    pub hanging_test_rate: f64,
    /// Milliseconds
    pub average_test_duration: f64,
    pub total_issues: u32,
    pub critical_issues: u32,
}

impl OverallHealth {
    /// Named float fields, used for finiteness validation
    pub fn float_fields(&self) -> [(&'static str, f64); 7] {
        [
            ("overallScore", self.overall_score),
            ("testReliability", self.test_reliability),
            ("performanceStability", self.performance_stability),
            ("memoryEfficiency", self.memory_efficiency),
            ("errorRate", self.error_rate),
            ("hangingTestRate", self.hanging_test_rate),
            ("averageTestDuration", self.average_test_duration),
        ]
    }
}

/// Health status of a single monitored task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskStatus {
    pub task_id: String,
    pub name: String,
    pub status: TaskHealth,
    /// Fraction of successful runs, 0.0 - 1.0
    pub success_rate: f64,
    /// Milliseconds
    pub average_duration: f64,
    #[serde(default)]
    pub issues: Vec<Issue>,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskHealth {
    Healthy,
    Warning,
    Critical,
    Unknown,
}

impl TaskHealth {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Healthy => "healthy",
            Self::Warning => "warning",
            Self::Critical => "critical",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for TaskHealth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A detected problem in the test suite
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    #[serde(rename = "type")]
    pub issue_type: IssueType,
    pub severity: IssueSeverity,
    pub title: String,
    pub description: String,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    pub frequency: u32,
    pub impact: String,
    #[serde(default)]
    pub recommendations: Vec<String>,
    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,
}

/// Kinds of issues the monitor reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueType {
    HangingTest,
    SlowTest,
    MemoryLeak,
    CpuSpike,
    ErrorPattern,
    PerformanceRegression,
}

impl IssueType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HangingTest => "hanging_test",
            Self::SlowTest => "slow_test",
            Self::MemoryLeak => "memory_leak",
            Self::CpuSpike => "cpu_spike",
            Self::ErrorPattern => "error_pattern",
            Self::PerformanceRegression => "performance_regression",
        }
    }

    /// Human-readable label ("hanging test")
    pub fn label(&self) -> String {
        self.as_str().replace('_', " ")
    }
}

impl std::str::FromStr for IssueType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "hanging_test" => Ok(Self::HangingTest),
            "slow_test" => Ok(Self::SlowTest),
            "memory_leak" => Ok(Self::MemoryLeak),
            "cpu_spike" => Ok(Self::CpuSpike),
            "error_pattern" => Ok(Self::ErrorPattern),
            "performance_regression" => Ok(Self::PerformanceRegression),
            _ => Err(format!("Unknown issue type: {}", s)),
        }
    }
}

impl std::fmt::Display for IssueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Severity of an individual issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl IssueSeverity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

impl std::fmt::Display for IssueSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Descriptive trend directions reported by the monitor
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Trends {
    pub reliability: TrendDirection,
    pub performance: TrendDirection,
    pub memory: TrendDirection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Improving,
    #[default]
    Stable,
    Degrading,
    Increasing,
    Decreasing,
}
