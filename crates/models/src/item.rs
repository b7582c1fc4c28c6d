use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

/// Name of the single primary key attribute of the students table.
pub const KEY_ATTRIBUTE: &str = "Id";

/// Typed scalar attribute value, serialized in DynamoDB JSON form
/// (`{"S": "..."}` / `{"N": "..."}`).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttrValue {
    S(String),
    N(String),
}

impl AttrValue {
    pub fn number(n: i64) -> Self {
        Self::N(n.to_string())
    }

    pub fn string(s: impl Into<String>) -> Self {
        Self::S(s.into())
    }

    pub fn as_s(&self) -> Option<&str> {
        match self {
            Self::S(s) => Some(s),
            Self::N(_) => None,
        }
    }

    pub fn as_n(&self) -> Option<&str> {
        match self {
            Self::N(n) => Some(n),
            Self::S(_) => None,
        }
    }
}

/// A stored item: attribute name to typed value.
pub type Item = BTreeMap<String, AttrValue>;

/// One `PUT` action of an item update.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttributeUpdate {
    pub name: String,
    pub value: AttrValue,
}

impl AttributeUpdate {
    pub fn put(name: impl Into<String>, value: AttrValue) -> Self {
        Self { name: name.into(), value }
    }
}

/// Read a required string attribute.
pub fn get_s<'a>(item: &'a Item, name: &str) -> Result<&'a str, ModelError> {
    let value = item
        .get(name)
        .ok_or_else(|| ModelError::MissingAttribute(name.to_string()))?;
    value.as_s().ok_or_else(|| ModelError::WrongType { name: name.to_string(), expected: "S" })
}

/// Read a required numeric attribute as an integer.
pub fn get_i64(item: &Item, name: &str) -> Result<i64, ModelError> {
    let value = item
        .get(name)
        .ok_or_else(|| ModelError::MissingAttribute(name.to_string()))?;
    let raw = value
        .as_n()
        .ok_or_else(|| ModelError::WrongType { name: name.to_string(), expected: "N" })?;
    raw.trim().parse::<i64>().map_err(|_| ModelError::InvalidNumber {
        name: name.to_string(),
        value: raw.to_string(),
    })
}

/// Extract the primary key of an item.
pub fn key_of(item: &Item) -> Result<i64, ModelError> {
    get_i64(item, KEY_ATTRIBUTE)
}
