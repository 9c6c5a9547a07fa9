//! Core types for mined patterns

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::models::IssueSeverity;

/// Families of patterns the miner can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternType {
    /// Two issue types that keep showing up together
    IssueCorrelation,
    /// Overall health score moving in one direction
    PerformanceTrend,
    /// A task that is repeatedly critical
    FailurePrediction,
    /// A task that is repeatedly slow
    OptimizationOpportunity,
}

impl PatternType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PatternType::IssueCorrelation => "issue_correlation",
            PatternType::PerformanceTrend => "performance_trend",
            PatternType::FailurePrediction => "failure_prediction",
            PatternType::OptimizationOpportunity => "optimization_opportunity",
        }
    }

    pub fn all() -> &'static [PatternType] {
        &[
            PatternType::IssueCorrelation,
            PatternType::PerformanceTrend,
            PatternType::FailurePrediction,
            PatternType::OptimizationOpportunity,
        ]
    }
}

impl fmt::Display for PatternType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PatternType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "issue_correlation" => Ok(PatternType::IssueCorrelation),
            "performance_trend" => Ok(PatternType::PerformanceTrend),
            "failure_prediction" => Ok(PatternType::FailurePrediction),
            "optimization_opportunity" => Ok(PatternType::OptimizationOpportunity),
            _ => Err(format!("Unknown pattern type: {}", s)),
        }
    }
}

/// How soon something should be acted on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Timeframe {
    Immediate,
    ShortTerm,
    LongTerm,
}

impl Timeframe {
    pub fn as_str(&self) -> &'static str {
        match self {
            Timeframe::Immediate => "immediate",
            Timeframe::ShortTerm => "short_term",
            Timeframe::LongTerm => "long_term",
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Impact level of a pattern or insight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Impact {
    Low,
    Medium,
    High,
    Critical,
}

impl Impact {
    pub fn as_str(&self) -> &'static str {
        match self {
            Impact::Low => "low",
            Impact::Medium => "medium",
            Impact::High => "high",
            Impact::Critical => "critical",
        }
    }

    /// Numeric priority for sorting (higher = more urgent)
    pub fn priority(&self) -> u8 {
        match self {
            Impact::Low => 1,
            Impact::Medium => 2,
            Impact::High => 3,
            Impact::Critical => 4,
        }
    }
}

impl From<IssueSeverity> for Impact {
    fn from(severity: IssueSeverity) -> Self {
        match severity {
            IssueSeverity::Low => Impact::Low,
            IssueSeverity::Medium => Impact::Medium,
            IssueSeverity::High => Impact::High,
            IssueSeverity::Critical => Impact::Critical,
        }
    }
}

impl fmt::Display for Impact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A regularity mined from the snapshot history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pattern {
    /// Deterministic id, e.g. "failure-unit" or "correlation-slow_test-memory_leak"
    pub pattern_id: String,
    #[serde(rename = "type")]
    pub pattern_type: PatternType,
    /// Heuristic strength. Usually 0-1; performance trends report |slope|
    pub confidence: f64,
    pub description: String,
    pub prediction: String,
    pub evidence: Vec<String>,
    pub actionability: Timeframe,
    pub impact: Impact,
}

impl Pattern {
    pub fn new(
        pattern_type: PatternType,
        pattern_id: impl Into<String>,
        confidence: f64,
        description: impl Into<String>,
        prediction: impl Into<String>,
    ) -> Self {
        Self {
            pattern_id: pattern_id.into(),
            pattern_type,
            confidence,
            description: description.into(),
            prediction: prediction.into(),
            evidence: Vec::new(),
            actionability: Timeframe::ShortTerm,
            impact: Impact::Medium,
        }
    }

    pub fn with_evidence(mut self, evidence: Vec<String>) -> Self {
        self.evidence = evidence;
        self
    }

    pub fn with_actionability(mut self, actionability: Timeframe) -> Self {
        self.actionability = actionability;
        self
    }

    pub fn with_impact(mut self, impact: Impact) -> Self {
        self.impact = impact;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_type_serialization() {
        assert_eq!(PatternType::FailurePrediction.as_str(), "failure_prediction");
        assert_eq!(
            PatternType::from_str("optimization_opportunity").unwrap(),
            PatternType::OptimizationOpportunity
        );
        assert!(PatternType::from_str("nope").is_err());
    }

    #[test]
    fn test_impact_priority() {
        assert!(Impact::Critical.priority() > Impact::High.priority());
        assert!(Impact::High.priority() > Impact::Medium.priority());
        assert!(Impact::Medium.priority() > Impact::Low.priority());
        assert_eq!(Impact::from(IssueSeverity::Critical), Impact::Critical);
    }

    #[test]
    fn test_pattern_json_shape() {
        let pattern = Pattern::new(
            PatternType::PerformanceTrend,
            "performance-trend",
            2.5,
            "desc",
            "pred",
        )
        .with_actionability(Timeframe::LongTerm)
        .with_impact(Impact::High);

        let json = serde_json::to_value(&pattern).unwrap();
        assert_eq!(json["patternId"], "performance-trend");
        assert_eq!(json["type"], "performance_trend");
        assert_eq!(json["actionability"], "long_term");
        assert_eq!(json["impact"], "high");
    }
}
