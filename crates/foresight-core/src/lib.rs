//! Foresight Core Library
//!
//! Learning and predictive insight engine for test-suite health history:
//! - Snapshot validation and ordering
//! - Linear trend fitting
//! - Pattern mining (issue correlation, performance trend, failure
//!   prediction, optimization opportunity)
//! - Insight generation (risk alerts, opportunities, trend analysis,
//!   anomaly detection)
//! - Self-reported model accuracy
//! - Threshold configuration with file overrides

pub mod accuracy;
pub mod config;
pub mod engine;
pub mod error;
pub mod insights;
pub mod loader;
pub mod models;
pub mod patterns;
pub mod summary;
pub mod trend;

/// Snapshot builders for tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use accuracy::{AccuracyScore, ModelAccuracyTracker};
pub use config::{ConfigSource, LearningConfig};
pub use engine::{EngineState, LearningEngine, LearningModel};
pub use error::{Error, Result};
pub use insights::{Insight, InsightGenerator, InsightType};
pub use loader::{LoadOutcome, LoadWarning, SnapshotRecord};
pub use models::{Issue, IssueSeverity, IssueType, OverallHealth, Snapshot, TaskHealth, TaskStatus};
pub use patterns::{Impact, Pattern, PatternMiner, PatternType, Timeframe};
pub use summary::ModelSummary;
