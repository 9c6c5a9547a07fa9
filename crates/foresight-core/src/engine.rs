//! Learning Engine - runs a full learning pass over a snapshot history
//!
//! A run moves through `Idle → Loading → Mining → Generating → Scoring →
//! Done`, one synchronous pass per state. Bad input never fails a run:
//! malformed snapshots are dropped during loading, and too little history
//! simply yields fewer patterns and insights.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::{debug, info};

use crate::accuracy::{AccuracyScore, ModelAccuracyTracker};
use crate::config::LearningConfig;
use crate::error::Result;
use crate::insights::{AnalysisContext, Insight, InsightAnalyzer, InsightGenerator};
use crate::loader::{self, LoadOutcome, LoadWarning, SnapshotRecord};
use crate::models::Snapshot;
use crate::patterns::{MiningContext, Pattern, PatternDetector, PatternMiner};
use crate::summary::ModelSummary;

/// Phase of a learning run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineState {
    Idle,
    Loading,
    Mining,
    Generating,
    Scoring,
    Done,
}

impl EngineState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Mining => "mining",
            Self::Generating => "generating",
            Self::Scoring => "scoring",
            Self::Done => "done",
        }
    }
}

impl std::fmt::Display for EngineState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Output of one learning run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningModel {
    /// "model-" plus a fingerprint of the snapshot timestamps
    pub model_id: String,
    pub version: String,
    pub last_updated: DateTime<Utc>,
    pub snapshots_analyzed: usize,
    pub patterns: Vec<Pattern>,
    pub insights: Vec<Insight>,
    pub accuracy: f64,
    pub total_predictions: usize,
    pub correct_predictions: usize,
    #[serde(default)]
    pub warnings: Vec<LoadWarning>,
}

impl LearningModel {
    /// The accuracy figure under a name that does not overstate it: it is
    /// derived from pattern confidence, not from checked outcomes
    pub fn self_reported_accuracy(&self) -> f64 {
        self.accuracy
    }

    pub fn accuracy_score(&self) -> AccuracyScore {
        AccuracyScore {
            accuracy: self.self_reported_accuracy(),
            total_predictions: self.total_predictions,
            correct_predictions: self.correct_predictions,
        }
    }

    /// Pretty-printed camelCase JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read a model previously written with [`LearningModel::to_json`]
    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Grouped view for rendering
    pub fn summary(&self) -> ModelSummary<'_> {
        ModelSummary::from_model(self)
    }
}

/// Fingerprint of the ordered snapshot timestamps (first 12 hex chars)
pub fn history_fingerprint(snapshots: &[Snapshot]) -> String {
    let mut hasher = Sha256::new();
    for snapshot in snapshots {
        hasher.update(snapshot.timestamp.as_bytes());
        hasher.update(b"\n");
    }
    let digest = hex::encode(hasher.finalize());
    digest[..12].to_string()
}

/// The learning engine facade
pub struct LearningEngine {
    config: LearningConfig,
    miner: PatternMiner,
    generator: InsightGenerator,
    tracker: ModelAccuracyTracker,
    state: EngineState,
    visited: Vec<EngineState>,
    model: Option<LearningModel>,
}

impl Default for LearningEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl LearningEngine {
    /// Create an engine with default thresholds
    pub fn new() -> Self {
        Self::with_config(LearningConfig::default())
    }

    pub fn with_config(config: LearningConfig) -> Self {
        let tracker = ModelAccuracyTracker::new(config.high_confidence_threshold);
        Self {
            config,
            miner: PatternMiner::new(),
            generator: InsightGenerator::new(),
            tracker,
            state: EngineState::Idle,
            visited: vec![EngineState::Idle],
            model: None,
        }
    }

    /// Add a custom pattern detector alongside the built-in ones
    pub fn register_detector(&mut self, detector: Box<dyn PatternDetector>) {
        self.miner.register(detector);
    }

    /// Add a custom insight analyzer alongside the built-in ones
    pub fn register_analyzer(&mut self, analyzer: Box<dyn InsightAnalyzer>) {
        self.generator.register(analyzer);
    }

    pub fn config(&self) -> &LearningConfig {
        &self.config
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    /// States visited by the most recent run, in order
    pub fn visited_states(&self) -> &[EngineState] {
        &self.visited
    }

    /// Run over typed snapshots (validated and ordered during loading)
    pub fn run(&mut self, snapshots: Vec<Snapshot>) -> &LearningModel {
        self.begin();
        let outcome = loader::validate_snapshots(snapshots);
        self.process(outcome)
    }

    /// Run over raw records, dropping any that fail to parse or validate
    pub fn run_records(&mut self, records: Vec<SnapshotRecord>) -> &LearningModel {
        self.begin();
        let outcome = loader::load_records(records);
        self.process(outcome)
    }

    /// Patterns from the last completed run (empty before any run)
    pub fn patterns(&self) -> &[Pattern] {
        self.model
            .as_ref()
            .map(|m| m.patterns.as_slice())
            .unwrap_or(&[])
    }

    /// Insights from the last completed run (empty before any run)
    pub fn insights(&self) -> &[Insight] {
        self.model
            .as_ref()
            .map(|m| m.insights.as_slice())
            .unwrap_or(&[])
    }

    /// Snapshots dropped during the last run's loading phase
    pub fn warnings(&self) -> &[LoadWarning] {
        self.model
            .as_ref()
            .map(|m| m.warnings.as_slice())
            .unwrap_or(&[])
    }

    pub fn model(&self) -> Option<&LearningModel> {
        self.model.as_ref()
    }

    pub fn into_model(self) -> Option<LearningModel> {
        self.model
    }

    fn begin(&mut self) {
        self.visited.clear();
        self.visited.push(self.state);
        self.transition(EngineState::Loading);
    }

    fn process(&mut self, outcome: LoadOutcome) -> &LearningModel {
        let LoadOutcome {
            snapshots,
            warnings,
        } = outcome;
        debug!(
            valid = snapshots.len(),
            dropped = warnings.len(),
            "Snapshots loaded"
        );

        self.transition(EngineState::Mining);
        let patterns = self
            .miner
            .mine(&MiningContext::new(&snapshots, &self.config));

        self.transition(EngineState::Generating);
        let insights = self
            .generator
            .generate(&AnalysisContext::new(&patterns, &snapshots, &self.config));

        self.transition(EngineState::Scoring);
        let score = self.tracker.score(&patterns);
        debug!(
            threshold = self.tracker.threshold(),
            correct = score.correct_predictions,
            total = score.total_predictions,
            "Scored pattern confidence"
        );

        let model = LearningModel {
            model_id: format!("model-{}", history_fingerprint(&snapshots)),
            version: env!("CARGO_PKG_VERSION").to_string(),
            last_updated: Utc::now(),
            snapshots_analyzed: snapshots.len(),
            patterns,
            insights,
            accuracy: score.accuracy,
            total_predictions: score.total_predictions,
            correct_predictions: score.correct_predictions,
            warnings,
        };

        info!(
            snapshots = model.snapshots_analyzed,
            patterns = model.patterns.len(),
            insights = model.insights.len(),
            accuracy = model.accuracy,
            "Learning run complete"
        );

        self.transition(EngineState::Done);
        &*self.model.insert(model)
    }

    fn transition(&mut self, next: EngineState) {
        debug!(from = %self.state, to = %next, "Learning engine state change");
        self.state = next;
        self.visited.push(next);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::series;

    #[test]
    fn test_idle_before_run() {
        let engine = LearningEngine::new();
        assert_eq!(engine.state(), EngineState::Idle);
        assert!(engine.patterns().is_empty());
        assert!(engine.insights().is_empty());
        assert!(engine.model().is_none());
    }

    #[test]
    fn test_run_visits_every_state() {
        let mut engine = LearningEngine::new();
        engine.run(series(&[90.0, 80.0, 70.0]));

        assert_eq!(engine.state(), EngineState::Done);
        assert_eq!(
            engine.visited_states(),
            &[
                EngineState::Idle,
                EngineState::Loading,
                EngineState::Mining,
                EngineState::Generating,
                EngineState::Scoring,
                EngineState::Done,
            ]
        );
    }

    #[test]
    fn test_second_run_starts_from_done() {
        let mut engine = LearningEngine::new();
        engine.run(series(&[90.0, 80.0, 70.0]));
        engine.run(series(&[50.0]));

        assert_eq!(engine.visited_states()[0], EngineState::Done);
        assert!(engine.patterns().is_empty());
        assert_eq!(engine.model().map(|m| m.snapshots_analyzed), Some(1));
    }

    #[test]
    fn test_reads_are_idempotent() {
        let mut engine = LearningEngine::new();
        engine.run(series(&[90.0, 80.0, 70.0]));

        let first = engine.patterns().to_vec();
        let second = engine.patterns().to_vec();
        assert_eq!(first, second);
        assert_eq!(engine.insights(), engine.insights());
    }

    #[test]
    fn test_fingerprint_is_stable() {
        let a = history_fingerprint(&series(&[1.0, 2.0]));
        let b = history_fingerprint(&series(&[5.0, 6.0]));
        let c = history_fingerprint(&series(&[1.0, 2.0, 3.0]));

        assert_eq!(a.len(), 12);
        // Only timestamps feed the fingerprint
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_empty_run() {
        let mut engine = LearningEngine::new();
        let model = engine.run(vec![]);

        assert!(model.patterns.is_empty());
        assert!(model.insights.is_empty());
        assert_eq!(model.accuracy, 0.0);
        assert_eq!(model.total_predictions, 0);
    }

    #[test]
    fn test_accuracy_score_matches_model() {
        let mut engine = LearningEngine::new();
        let model = engine.run(series(&[90.0, 80.0, 70.0]));

        let score = model.accuracy_score();
        assert_eq!(score.accuracy, model.accuracy);
        assert_eq!(score.total_predictions, 1);
        // The 10.0 trend confidence clears the 0.7 threshold
        assert_eq!(score.correct_predictions, 1);
    }

    #[test]
    fn test_model_json_round_trip() {
        let mut engine = LearningEngine::new();
        let model = engine.run(series(&[90.0, 80.0, 70.0])).clone();

        let reloaded = LearningModel::from_json(&model.to_json().unwrap()).unwrap();
        assert_eq!(reloaded.model_id, model.model_id);
        assert_eq!(reloaded.patterns.len(), 1);

        let err = LearningModel::from_json("{ \"modelId\": 1 }").unwrap_err();
        assert!(matches!(err, crate::error::Error::Json(_)));
    }

    #[test]
    fn test_model_json_shape() {
        let mut engine = LearningEngine::new();
        let model = engine.run(series(&[90.0, 80.0, 70.0]));

        let json = serde_json::to_value(model).unwrap();
        assert!(json["modelId"].as_str().unwrap().starts_with("model-"));
        assert_eq!(json["totalPredictions"], 1);
        assert!(json["lastUpdated"].is_string());
    }
}
