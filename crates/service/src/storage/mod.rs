//! Storage abstractions for the service layer
//!
//! `ItemStore` is the only surface the service sees of the backing store: four
//! single-item operations keyed by the numeric `Id` attribute. Backends:
//! - `dynamodb`: the managed store, through `aws-sdk-dynamodb`
//! - `local`: JSON file-backed map for development and tests

use async_trait::async_trait;
use models::{AttributeUpdate, Item};
use thiserror::Error;

pub mod dynamodb;
pub mod local;

pub use dynamodb::DynamoDbItemStore;
pub use local::LocalItemStore;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The write condition did not hold (e.g. the key already exists).
    #[error("conditional check failed")]
    ConditionalCheckFailed,
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("malformed item: {0}")]
    Malformed(String),
}

/// Condition attached to a put.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PutCondition {
    None,
    /// `attribute_not_exists(Id)`
    KeyAbsent,
}

#[async_trait]
pub trait ItemStore: Send + Sync {
    fn table_name(&self) -> &str;

    async fn put_item(&self, item: Item, condition: PutCondition) -> Result<(), StoreError>;

    async fn get_item(&self, id: i64) -> Result<Option<Item>, StoreError>;

    /// Apply `PUT` updates and return every attribute after the update.
    /// An absent key is created, as the managed store does.
    async fn update_item(&self, id: i64, updates: Vec<AttributeUpdate>) -> Result<Item, StoreError>;

    /// Deleting an absent key is not an error.
    async fn delete_item(&self, id: i64) -> Result<(), StoreError>;
}

/// Store doubles for tests
#[cfg(any(test, feature = "test-support"))]
pub mod mock {
    use super::*;
    use std::sync::Mutex;

    /// Which operation a [`FaultyItemStore`] should fail.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum FailOn {
        Put,
        Get,
        Update,
        Delete,
    }

    /// Wraps a working store and fails the selected operations with `Unavailable`.
    pub struct FaultyItemStore<S: ItemStore> {
        inner: S,
        fail_on: Mutex<Vec<FailOn>>,
    }

    impl<S: ItemStore> FaultyItemStore<S> {
        pub fn new(inner: S, fail_on: Vec<FailOn>) -> Self {
            Self { inner, fail_on: Mutex::new(fail_on) }
        }

        pub fn set_failures(&self, fail_on: Vec<FailOn>) {
            if let Ok(mut guard) = self.fail_on.lock() {
                *guard = fail_on;
            }
        }

        fn check(&self, op: FailOn) -> Result<(), StoreError> {
            let failing = self.fail_on.lock().map(|f| f.contains(&op)).unwrap_or(false);
            if failing {
                return Err(StoreError::Unavailable(format!("injected {op:?} failure")));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl<S: ItemStore> ItemStore for FaultyItemStore<S> {
        fn table_name(&self) -> &str {
            self.inner.table_name()
        }

        async fn put_item(&self, item: Item, condition: PutCondition) -> Result<(), StoreError> {
            self.check(FailOn::Put)?;
            self.inner.put_item(item, condition).await
        }

        async fn get_item(&self, id: i64) -> Result<Option<Item>, StoreError> {
            self.check(FailOn::Get)?;
            self.inner.get_item(id).await
        }

        async fn update_item(&self, id: i64, updates: Vec<AttributeUpdate>) -> Result<Item, StoreError> {
            self.check(FailOn::Update)?;
            self.inner.update_item(id, updates).await
        }

        async fn delete_item(&self, id: i64) -> Result<(), StoreError> {
            self.check(FailOn::Delete)?;
            self.inner.delete_item(id).await
        }
    }
}
