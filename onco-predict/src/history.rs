//! Read path over stored predictions

use crate::models::HistoryView;
use crate::store::PredictionStore;
use onco_common::Result;
use std::sync::Arc;

/// Looks up stored predictions and shapes them as [`HistoryView`]s
#[derive(Clone)]
pub struct HistoryAccessor {
    store: Arc<dyn PredictionStore>,
}

impl HistoryAccessor {
    pub fn new(store: Arc<dyn PredictionStore>) -> Self {
        Self { store }
    }

    /// `Ok(None)` for an unknown id; absence is not an error
    pub async fn get_one(&self, id: &str) -> Result<Option<HistoryView>> {
        Ok(self.store.get(id).await?.map(HistoryView::from))
    }

    /// Every stored prediction, in store iteration order (not guaranteed stable)
    pub async fn get_all(&self) -> Result<Vec<HistoryView>> {
        Ok(self
            .store
            .list()
            .await?
            .into_iter()
            .map(HistoryView::from)
            .collect())
    }
}
