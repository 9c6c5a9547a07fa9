//! Self-reported model accuracy
//!
//! The score is the share of patterns whose confidence is above a threshold.
//! It describes how confident the model is in what it found, not how often
//! past predictions came true.

use serde::{Deserialize, Serialize};

use crate::patterns::Pattern;

/// Accuracy figures for one run
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccuracyScore {
    /// `correct_predictions / total_predictions`, or 0 with no predictions
    pub accuracy: f64,
    pub total_predictions: usize,
    pub correct_predictions: usize,
}

/// Derives an [`AccuracyScore`] from pattern confidences
#[derive(Debug, Clone)]
pub struct ModelAccuracyTracker {
    threshold: f64,
}

impl Default for ModelAccuracyTracker {
    fn default() -> Self {
        Self::new(0.7)
    }
}

impl ModelAccuracyTracker {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn score(&self, patterns: &[Pattern]) -> AccuracyScore {
        let total_predictions = patterns.len();
        let correct_predictions = patterns
            .iter()
            .filter(|p| p.confidence > self.threshold)
            .count();

        let accuracy = if total_predictions > 0 {
            correct_predictions as f64 / total_predictions as f64
        } else {
            0.0
        };

        AccuracyScore {
            accuracy,
            total_predictions,
            correct_predictions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patterns::PatternType;

    fn pattern(confidence: f64) -> Pattern {
        Pattern::new(PatternType::FailurePrediction, "failure-x", confidence, "d", "p")
    }

    #[test]
    fn test_no_patterns_scores_zero() {
        let score = ModelAccuracyTracker::default().score(&[]);
        assert_eq!(score, AccuracyScore::default());
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let patterns = vec![pattern(0.7), pattern(0.71), pattern(10.0), pattern(0.2)];
        let score = ModelAccuracyTracker::default().score(&patterns);

        assert_eq!(score.total_predictions, 4);
        assert_eq!(score.correct_predictions, 2);
        assert_eq!(score.accuracy, 0.5);
    }

    #[test]
    fn test_custom_threshold() {
        let patterns = vec![pattern(0.6), pattern(0.4)];
        let score = ModelAccuracyTracker::new(0.5).score(&patterns);
        assert_eq!(score.correct_predictions, 1);
    }
}
