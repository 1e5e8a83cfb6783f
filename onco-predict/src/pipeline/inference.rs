//! Forward pass and confidence extraction

use super::PredictionError;
use crate::classifier::Classifier;
use ndarray::Array4;
use tracing::{debug, warn};

/// Run the classifier once and return `max(output) * 100`
///
/// Classifier failures and unusable outputs (empty, NaN or infinite) are
/// reported as the same generic prediction failure as decode errors.
pub fn infer(classifier: &dyn Classifier, tensor: &Array4<f32>) -> Result<f64, PredictionError> {
    let output = classifier.forward(tensor).map_err(|e| {
        warn!("Classifier '{}' failed: {}", classifier.name(), e);
        PredictionError::PredictionFailed
    })?;

    if output.iter().any(|v| !v.is_finite()) {
        warn!(
            "Classifier '{}' returned a non-finite activation",
            classifier.name()
        );
        return Err(PredictionError::PredictionFailed);
    }

    let max = output.iter().copied().reduce(f32::max).ok_or_else(|| {
        warn!("Classifier '{}' returned an empty output", classifier.name());
        PredictionError::PredictionFailed
    })?;

    let confidence_score = f64::from(max) * 100.0;
    debug!("Confidence score {}", confidence_score);
    Ok(confidence_score)
}
