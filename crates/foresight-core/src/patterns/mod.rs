//! Pattern Miner - regularities across the snapshot history
//!
//! ## Pattern Families
//!
//! - **Issue Correlation** - issue types that keep appearing together
//! - **Performance Trend** - overall health score moving steadily
//! - **Failure Prediction** - tasks that are repeatedly critical
//! - **Optimization Opportunity** - tasks that are repeatedly slow
//!
//! ## Usage
//!
//! ```rust,ignore
//! use foresight_core::patterns::{MiningContext, PatternMiner};
//!
//! let miner = PatternMiner::new();
//! let patterns = miner.mine(&MiningContext::new(&snapshots, &config));
//! ```

pub mod correlation;
pub mod failure_prediction;
pub mod miner;
pub mod optimization;
pub mod performance_trend;
pub mod types;

pub use correlation::IssueCorrelationDetector;
pub use failure_prediction::FailurePredictionDetector;
pub use miner::{MiningContext, PatternDetector, PatternMiner};
pub use optimization::OptimizationDetector;
pub use performance_trend::{PerformanceTrendDetector, MIN_TREND_SNAPSHOTS};
pub use types::{Impact, Pattern, PatternType, Timeframe};
