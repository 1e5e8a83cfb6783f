//! Confidence score to diagnosis label

use crate::models::{ClassificationResult, Label};

/// Scores strictly below this are classified non-cancer
pub const DEFAULT_CANCER_THRESHOLD: f64 = 1.0;

pub const CANCER_SUGGESTION: &str = "See a doctor immediately!";
pub const NON_CANCER_SUGGESTION: &str = "No cancer indication detected.";

/// Threshold rule mapping a confidence score to a label and suggestion
///
/// Total over every `f64`, including NaN (which is not `< threshold` and so
/// classifies as cancer).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassificationPolicy {
    threshold: f64,
}

impl Default for ClassificationPolicy {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_CANCER_THRESHOLD,
        }
    }
}

impl ClassificationPolicy {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn classify(&self, confidence_score: f64) -> ClassificationResult {
        let (label, suggestion) = if confidence_score < self.threshold {
            (Label::NonCancer, NON_CANCER_SUGGESTION)
        } else {
            (Label::Cancer, CANCER_SUGGESTION)
        };

        ClassificationResult {
            label,
            suggestion: suggestion.to_string(),
            confidence_score,
        }
    }
}

/// Classify with the default threshold
pub fn classify(confidence_score: f64) -> ClassificationResult {
    ClassificationPolicy::default().classify(confidence_score)
}
