//! Service layer for student records on top of a key-value item store.
//! - `storage`: the narrow item-level store API and its DynamoDB / local-file backends.
//! - `student`: business rules (conditional create, read-before-write).
//! - `runtime`: builds the configured store once at startup.

pub mod errors;
pub mod runtime;
pub mod storage;
pub mod student;
#[cfg(test)]
pub mod test_support;
