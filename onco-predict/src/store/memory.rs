//! In-process record store

use super::PredictionStore;
use crate::models::PredictionRecord;
use async_trait::async_trait;
use onco_common::{Error, Result};
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Store keeping records in a map for the life of the process
#[derive(Default)]
pub struct MemoryPredictionStore {
    records: RwLock<HashMap<String, PredictionRecord>>,
}

impl MemoryPredictionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl PredictionStore for MemoryPredictionStore {
    async fn put(&self, record: &PredictionRecord) -> Result<()> {
        let mut records = self.records.write().await;
        if records.contains_key(&record.id) {
            return Err(Error::Internal(format!(
                "prediction {} already exists",
                record.id
            )));
        }
        records.insert(record.id.clone(), record.clone());
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<PredictionRecord>> {
        Ok(self.records.read().await.get(id).cloned())
    }

    async fn list(&self) -> Result<Vec<PredictionRecord>> {
        Ok(self.records.read().await.values().cloned().collect())
    }
}
