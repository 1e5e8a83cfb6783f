//! HTTP API handlers for onco-predict

pub mod health;
pub mod histories;
pub mod predict;
pub mod types;

pub use health::health_routes;
pub use histories::history_routes;
pub use predict::predict_routes;
pub use types::ApiResponse;
