use std::{collections::BTreeMap, sync::Arc};

use api_types::transaction::TransactionPayload;
use tokio::sync::RwLock;

use crate::ServerError;

/// Shared handle to the stored items, keyed by id.
#[derive(Clone, Debug, Default)]
pub struct Collection {
    items: Arc<RwLock<BTreeMap<i64, TransactionPayload>>>,
}

impl Collection {
    /// All items in id order.
    pub async fn items(&self) -> Vec<TransactionPayload> {
        self.items.read().await.values().cloned().collect()
    }

    pub async fn insert(&self, item: TransactionPayload) -> Result<(), ServerError> {
        let mut items = self.items.write().await;
        if items.contains_key(&item.id) {
            return Err(ServerError::Conflict(item.id));
        }
        items.insert(item.id, item);
        Ok(())
    }

    pub async fn remove(&self, id: i64) -> Result<TransactionPayload, ServerError> {
        self.items
            .write()
            .await
            .remove(&id)
            .ok_or(ServerError::NotFound(id))
    }
}
