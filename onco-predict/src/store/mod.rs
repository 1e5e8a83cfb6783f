//! Prediction record store
//!
//! Records are write-once: the store exposes put/get/list and nothing that
//! updates or deletes. `list` returns records in whatever order the backend
//! iterates them; callers must not rely on it being stable.

mod memory;
mod sqlite;

pub use memory::MemoryPredictionStore;
pub use sqlite::SqlitePredictionStore;

use crate::models::PredictionRecord;
use async_trait::async_trait;
use onco_common::Result;

/// Storage capability used by the pipeline and the history accessor
#[async_trait]
pub trait PredictionStore: Send + Sync {
    /// Persist a new record under `record.id`
    async fn put(&self, record: &PredictionRecord) -> Result<()>;

    /// Fetch one record, `None` when the id is unknown
    async fn get(&self, id: &str) -> Result<Option<PredictionRecord>>;

    /// Fetch every record
    async fn list(&self) -> Result<Vec<PredictionRecord>>;
}
