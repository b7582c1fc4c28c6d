use std::sync::Arc;

use common::utils::logging::TRACE_TARGET;
use models::StudentRecord;
use tracing::{info, instrument};

use crate::errors::ServiceError;
use crate::storage::{ItemStore, PutCondition, StoreError};

/// Application service encapsulating the student record rules.
///
/// Create relies on the store's conditional put; update and delete check
/// existence with a separate read first, so a concurrent delete between the
/// two calls is not detected.
#[derive(Clone)]
pub struct StudentService {
    store: Arc<dyn ItemStore>,
}

impl StudentService {
    pub fn new(store: Arc<dyn ItemStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn ItemStore> {
        &self.store
    }

    /// Insert a new record; fails with `AlreadyExists` if the `Id` is taken.
    #[instrument(skip(self, record), fields(id = record.id))]
    pub async fn create(&self, record: &StudentRecord) -> Result<(), ServiceError> {
        match self.store.put_item(record.to_item(), PutCondition::KeyAbsent).await {
            Ok(()) => {
                info!(target: TRACE_TARGET, "Item");
                Ok(())
            }
            Err(StoreError::ConditionalCheckFailed) => Err(ServiceError::AlreadyExists(record.id)),
            Err(e) => Err(e.into()),
        }
    }

    #[instrument(skip(self))]
    pub async fn read(&self, id: i64) -> Result<StudentRecord, ServiceError> {
        let item = self.store.get_item(id).await?.ok_or(ServiceError::NotFound(id))?;
        let item_json = serde_json::to_string(&item).unwrap_or_default();
        info!(target: TRACE_TARGET, item = %item_json, "read item");
        Ok(StudentRecord::try_from(&item)?)
    }

    /// Replace every non-key field of an existing record and return the stored result.
    #[instrument(skip(self, record))]
    pub async fn update(&self, id: i64, record: &StudentRecord) -> Result<StudentRecord, ServiceError> {
        self.ensure_exists(id).await?;
        let attributes = self.store.update_item(id, record.non_key_updates()).await?;
        Ok(StudentRecord::try_from(&attributes)?)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        self.ensure_exists(id).await?;
        self.store.delete_item(id).await?;
        Ok(())
    }

    async fn ensure_exists(&self, id: i64) -> Result<(), ServiceError> {
        match self.store.get_item(id).await? {
            Some(_) => Ok(()),
            None => Err(ServiceError::NotFound(id)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::mock::{FailOn, FaultyItemStore};
    use crate::storage::LocalItemStore;
    use crate::test_support::memory_service;

    #[tokio::test]
    async fn create_then_read_round_trips() -> Result<(), anyhow::Error> {
        let svc = memory_service();
        let alice = StudentRecord::new(1, "Alice", 20, "NY");
        svc.create(&alice).await?;
        assert_eq!(svc.read(1).await?, alice);
        Ok(())
    }

    #[tokio::test]
    async fn second_create_conflicts_and_keeps_first_value() -> Result<(), anyhow::Error> {
        let svc = memory_service();
        svc.create(&StudentRecord::new(1, "Alice", 20, "NY")).await?;
        let err = svc.create(&StudentRecord::new(1, "Mallory", 66, "XX")).await.unwrap_err();
        assert!(matches!(err, ServiceError::AlreadyExists(1)));
        assert_eq!(svc.read(1).await?.student_name, "Alice");
        Ok(())
    }

    #[tokio::test]
    async fn read_missing_is_not_found() {
        let svc = memory_service();
        assert!(svc.read(9).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn update_missing_creates_nothing() -> Result<(), anyhow::Error> {
        let svc = memory_service();
        let err = svc.update(2, &StudentRecord::new(2, "Bob", 21, "LA")).await.unwrap_err();
        assert!(err.is_not_found());
        assert!(svc.store().get_item(2).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn update_replaces_fields_and_keeps_path_id() -> Result<(), anyhow::Error> {
        let svc = memory_service();
        svc.create(&StudentRecord::new(1, "Alice", 20, "NY")).await?;
        // body Id is ignored in favour of the path Id
        let updated = svc.update(1, &StudentRecord::new(99, "Bob", 21, "LA")).await?;
        assert_eq!(updated, StudentRecord::new(1, "Bob", 21, "LA"));
        assert_eq!(svc.read(1).await?, updated);
        assert!(svc.store().get_item(99).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn delete_removes_and_second_delete_is_not_found() -> Result<(), anyhow::Error> {
        let svc = memory_service();
        svc.create(&StudentRecord::new(1, "Alice", 20, "NY")).await?;
        svc.delete(1).await?;
        assert!(svc.read(1).await.unwrap_err().is_not_found());
        assert!(svc.delete(1).await.unwrap_err().is_not_found());
        Ok(())
    }

    #[tokio::test]
    async fn store_failures_surface_as_store_errors() -> Result<(), anyhow::Error> {
        let store = Arc::new(FaultyItemStore::new(LocalItemStore::in_memory("students"), vec![FailOn::Put]));
        let svc = StudentService::new(store.clone());
        let err = svc.create(&StudentRecord::new(1, "Alice", 20, "NY")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Store(StoreError::Unavailable(_))));

        store.set_failures(vec![]);
        svc.create(&StudentRecord::new(1, "Alice", 20, "NY")).await?;

        store.set_failures(vec![FailOn::Update, FailOn::Delete]);
        let err = svc.update(1, &StudentRecord::new(1, "Bob", 21, "LA")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Store(_)));
        let err = svc.delete(1).await.unwrap_err();
        assert!(matches!(err, ServiceError::Store(_)));

        store.set_failures(vec![FailOn::Get]);
        assert!(matches!(svc.read(1).await.unwrap_err(), ServiceError::Store(_)));
        Ok(())
    }

    #[tokio::test]
    async fn malformed_stored_item_is_a_model_error() -> Result<(), anyhow::Error> {
        let svc = memory_service();
        let mut item = StudentRecord::new(4, "Dee", 40, "Lima").to_item();
        item.remove("City");
        svc.store().put_item(item, PutCondition::None).await?;
        assert!(matches!(svc.read(4).await.unwrap_err(), ServiceError::Model(_)));
        Ok(())
    }
}
