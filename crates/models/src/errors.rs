use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("missing attribute: {0}")]
    MissingAttribute(String),
    #[error("attribute {name} is not of type {expected}")]
    WrongType { name: String, expected: &'static str },
    #[error("attribute {name} is not an integer: {value}")]
    InvalidNumber { name: String, value: String },
}
