use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use models::{AttrValue, Item};

use crate::storage::StoreError;

pub(super) fn key_value(id: i64) -> AttributeValue {
    AttributeValue::N(id.to_string())
}

pub(super) fn to_sdk(value: AttrValue) -> AttributeValue {
    match value {
        AttrValue::S(s) => AttributeValue::S(s),
        AttrValue::N(n) => AttributeValue::N(n),
    }
}

fn from_sdk(name: &str, value: &AttributeValue) -> Result<AttrValue, StoreError> {
    match value {
        AttributeValue::S(s) => Ok(AttrValue::S(s.clone())),
        AttributeValue::N(n) => Ok(AttrValue::N(n.clone())),
        other => Err(StoreError::Malformed(format!(
            "attribute {name} has unsupported type: {other:?}"
        ))),
    }
}

pub(super) fn item_to_sdk(item: Item) -> HashMap<String, AttributeValue> {
    item.into_iter().map(|(k, v)| (k, to_sdk(v))).collect()
}

pub(super) fn item_from_sdk(map: &HashMap<String, AttributeValue>) -> Result<Item, StoreError> {
    map.iter()
        .map(|(k, v)| Ok((k.clone(), from_sdk(k, v)?)))
        .collect()
}
