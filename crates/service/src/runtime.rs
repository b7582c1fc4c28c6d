//! Runtime wiring helpers
//!
//! Builds the configured item store once at startup; the handle lives for the
//! whole process and needs no teardown.

use std::sync::Arc;

use configs::{StoreBackend, StoreConfig};
use tracing::info;

use crate::storage::{DynamoDbItemStore, ItemStore, LocalItemStore};

pub async fn build_store(cfg: &StoreConfig) -> anyhow::Result<Arc<dyn ItemStore>> {
    let store: Arc<dyn ItemStore> = match cfg.backend {
        StoreBackend::Dynamodb => Arc::new(DynamoDbItemStore::from_config(cfg).await),
        StoreBackend::Local => {
            Arc::new(LocalItemStore::open(&cfg.local_path, &cfg.table_name).await?)
        }
    };
    info!(backend = ?cfg.backend, table = %store.table_name(), "item store ready");
    Ok(store)
}
