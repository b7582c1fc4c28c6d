#![cfg(test)]
use std::sync::Arc;

use crate::storage::LocalItemStore;
use crate::student::StudentService;

/// Service over a fresh, non-persistent store.
pub fn memory_service() -> StudentService {
    StudentService::new(Arc::new(LocalItemStore::in_memory("students_test")))
}
