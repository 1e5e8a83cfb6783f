//! onco-predict library interface
//!
//! Image screening service: accepts an image, classifies it with the
//! injected model, stores the outcome and serves the prediction history.

pub mod api;
pub mod classifier;
pub mod config;
pub mod error;
pub mod history;
pub mod models;
pub mod pipeline;
pub mod store;

pub use crate::classifier::{Classifier, ClassifierError};
pub use crate::error::{ApiError, ApiResult};
pub use crate::history::HistoryAccessor;
pub use crate::pipeline::{PredictionError, PredictionPipeline};

use axum::extract::DefaultBodyLimit;
use axum::Router;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::pipeline::policy::ClassificationPolicy;
use crate::pipeline::MAX_IMAGE_BYTES;
use crate::store::PredictionStore;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Write path: validate, classify, store
    pub pipeline: Arc<PredictionPipeline>,
    /// Read path over the same store
    pub history: HistoryAccessor,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    /// Wire the classifier and store (both loaded once at startup) into the pipeline
    pub fn new(
        classifier: Arc<dyn Classifier>,
        store: Arc<dyn PredictionStore>,
        policy: ClassificationPolicy,
    ) -> Self {
        Self {
            pipeline: Arc::new(PredictionPipeline::new(
                classifier,
                Arc::clone(&store),
                policy,
            )),
            history: HistoryAccessor::new(store),
            startup_time: Utc::now(),
        }
    }
}

/// Build application router
///
/// The request body limit equals the pipeline's own image limit.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::predict_routes())
        .merge(api::history_routes())
        .merge(api::health_routes())
        .layer(DefaultBodyLimit::max(MAX_IMAGE_BYTES))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
