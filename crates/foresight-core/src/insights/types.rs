//! Core types for generated insights

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::patterns::{Impact, Timeframe};

/// Types of insights that can be generated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightType {
    /// A critical pattern that needs attention now
    RiskAlert,
    /// Something that could be made faster or cheaper
    Opportunity,
    /// Direction the overall health score is heading
    TrendAnalysis,
    /// Latest snapshot deviates sharply from history
    AnomalyDetection,
}

impl InsightType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InsightType::RiskAlert => "risk_alert",
            InsightType::Opportunity => "opportunity",
            InsightType::TrendAnalysis => "trend_analysis",
            InsightType::AnomalyDetection => "anomaly_detection",
        }
    }

    pub fn all() -> &'static [InsightType] {
        &[
            InsightType::RiskAlert,
            InsightType::Opportunity,
            InsightType::TrendAnalysis,
            InsightType::AnomalyDetection,
        ]
    }
}

impl fmt::Display for InsightType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for InsightType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "risk_alert" => Ok(InsightType::RiskAlert),
            "opportunity" => Ok(InsightType::Opportunity),
            "trend_analysis" => Ok(InsightType::TrendAnalysis),
            "anomaly_detection" => Ok(InsightType::AnomalyDetection),
            _ => Err(format!("Unknown insight type: {}", s)),
        }
    }
}

/// A predictive, actionable conclusion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Insight {
    /// Deterministic id, e.g. "risk-failure-e2e" or "trend-analysis"
    pub insight_id: String,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub insight_type: InsightType,
    pub confidence: f64,
    /// Likelihood the predicted outcome happens, 0-1
    pub probability: f64,
    pub timeframe: Timeframe,
    pub impact: Impact,
    pub recommendations: Vec<String>,
    pub supporting_data: serde_json::Map<String, serde_json::Value>,
}

impl Insight {
    pub fn new(
        insight_type: InsightType,
        insight_id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            insight_id: insight_id.into(),
            title: title.into(),
            description: description.into(),
            insight_type,
            confidence: 0.0,
            probability: 0.0,
            timeframe: Timeframe::ShortTerm,
            impact: Impact::Medium,
            recommendations: Vec::new(),
            supporting_data: serde_json::Map::new(),
        }
    }

    pub fn with_scores(mut self, confidence: f64, probability: f64) -> Self {
        self.confidence = confidence;
        self.probability = probability;
        self
    }

    pub fn with_timeframe(mut self, timeframe: Timeframe) -> Self {
        self.timeframe = timeframe;
        self
    }

    pub fn with_impact(mut self, impact: Impact) -> Self {
        self.impact = impact;
        self
    }

    pub fn with_recommendations<I, S>(mut self, recommendations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.recommendations = recommendations.into_iter().map(Into::into).collect();
        self
    }

    /// Add one entry to the supporting data map
    pub fn with_data(mut self, key: &str, value: impl Into<serde_json::Value>) -> Self {
        self.supporting_data.insert(key.to_string(), value.into());
        self
    }
}
