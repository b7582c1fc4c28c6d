/// Record <-> item conversion tests
pub mod conversion_tests;

/// Wire shape (serde) tests for the HTTP record
pub mod wire_tests;
