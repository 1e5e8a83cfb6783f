//! Prediction pipeline
//!
//! validate → preprocess → infer → classify → assemble → persist
//!
//! Decode and inference failures share one client-facing error
//! ([`PredictionError::PredictionFailed`]); the underlying cause is only
//! logged. A request either stores exactly one record or none.

pub mod assembler;
pub mod inference;
pub mod policy;
pub mod preprocess;
pub mod validator;

use crate::classifier::Classifier;
use crate::models::PredictionRecord;
use crate::store::PredictionStore;
use policy::ClassificationPolicy;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

pub use validator::MAX_IMAGE_BYTES;

/// Prediction failures, in the order the pipeline can produce them
#[derive(Debug, Error)]
pub enum PredictionError {
    /// Payload larger than [`MAX_IMAGE_BYTES`] (client error)
    #[error("image too large, maximum 1MB")]
    ImageTooLarge { size: usize },

    /// Decode, preprocessing or forward pass failed (client error)
    #[error("an error occurred while performing prediction")]
    PredictionFailed,

    /// Record could not be written (server fault)
    #[error(transparent)]
    Store(#[from] onco_common::Error),
}

/// Successful submission
#[derive(Debug, Clone)]
pub struct PredictionOutcome {
    pub message: &'static str,
    pub record: PredictionRecord,
}

/// One pipeline per process, shared by all request handlers
pub struct PredictionPipeline {
    classifier: Arc<dyn Classifier>,
    store: Arc<dyn PredictionStore>,
    policy: ClassificationPolicy,
}

impl PredictionPipeline {
    pub fn new(
        classifier: Arc<dyn Classifier>,
        store: Arc<dyn PredictionStore>,
        policy: ClassificationPolicy,
    ) -> Self {
        Self {
            classifier,
            store,
            policy,
        }
    }

    pub fn policy(&self) -> ClassificationPolicy {
        self.policy
    }

    /// Run one image through the whole pipeline
    ///
    /// Not idempotent: every successful call stores a new record with a new id.
    pub async fn submit(&self, image: Vec<u8>) -> Result<PredictionOutcome, PredictionError> {
        validator::validate(&image)?;
        debug!("Accepted {} byte image", image.len());

        let classifier = Arc::clone(&self.classifier);
        let confidence_score = tokio::task::spawn_blocking(move || {
            let tensor = preprocess::preprocess(&image)?;
            inference::infer(classifier.as_ref(), &tensor)
        })
        .await
        .map_err(|e| {
            warn!("Prediction task did not complete: {}", e);
            PredictionError::PredictionFailed
        })??;

        let result = self.policy.classify(confidence_score);
        let record = assembler::assemble(&result);
        assembler::persist(self.store.as_ref(), &record).await?;

        Ok(PredictionOutcome {
            message: assembler::response_message(confidence_score),
            record,
        })
    }
}
