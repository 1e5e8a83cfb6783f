//! Classification result to persisted record

use crate::models::{ClassificationResult, PredictionRecord};
use crate::store::PredictionStore;
use onco_common::{time, uuid_utils, Result};
use tracing::info;

pub const SUCCESS_MESSAGE: &str = "Model is predicted successfully";
pub const UNDER_THRESHOLD_MESSAGE: &str =
    "Model is predicted successfully but under threshold. Please use the correct picture";

/// Build the record with a fresh UUID v4 and the current UTC time
pub fn assemble(result: &ClassificationResult) -> PredictionRecord {
    PredictionRecord {
        id: uuid_utils::generate_id(),
        result: result.label,
        suggestion: result.suggestion.clone(),
        confidence_score: result.confidence_score,
        created_at: time::now_iso8601(),
    }
}

/// Write the record once; the store's acknowledgement is the completion signal
pub async fn persist(store: &dyn PredictionStore, record: &PredictionRecord) -> Result<()> {
    store.put(record).await?;
    info!(
        "Stored prediction {} ({}, score {:.4})",
        record.id, record.result, record.confidence_score
    );
    Ok(())
}

/// Caller-facing message; both variants correspond to a stored record
pub fn response_message(confidence_score: f64) -> &'static str {
    if confidence_score > 0.0 {
        SUCCESS_MESSAGE
    } else {
        UNDER_THRESHOLD_MESSAGE
    }
}
