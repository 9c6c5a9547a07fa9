//! Insight Generator - predictive, actionable conclusions
//!
//! Insights are derived from the mined patterns and the snapshot history.
//! Each family is an [`InsightAnalyzer`]; the [`InsightGenerator`] runs them
//! all and ranks the output by impact and confidence.
//!
//! ## Core Insight Types
//!
//! - **Risk Alert** - critical-impact patterns
//! - **Opportunity** - optimization patterns worth acting on
//! - **Trend Analysis** - where the health score is heading
//! - **Anomaly Detection** - latest score far from the historical mean
//!
//! ## Usage
//!
//! ```rust,ignore
//! use foresight_core::insights::{AnalysisContext, InsightGenerator};
//!
//! let generator = InsightGenerator::new();
//! let insights = generator.generate(&AnalysisContext::new(&patterns, &snapshots, &config));
//! ```

pub mod anomaly;
pub mod generator;
pub mod opportunity;
pub mod risk_alert;
pub mod trend_analysis;
pub mod types;

pub use anomaly::AnomalyAnalyzer;
pub use generator::{AnalysisContext, InsightAnalyzer, InsightGenerator};
pub use opportunity::OpportunityAnalyzer;
pub use risk_alert::RiskAlertAnalyzer;
pub use trend_analysis::TrendAnalysisAnalyzer;
pub use types::{Insight, InsightType};
