use serde_json::json;

use crate::item::{AttrValue, Item};
use crate::student::StudentRecord;

#[test]
fn record_uses_pascal_case_field_names() {
    let value = serde_json::to_value(StudentRecord::new(1, "Alice", 20, "NY")).unwrap();
    assert_eq!(value, json!({"Id": 1, "StudentName": "Alice", "Age": 20, "City": "NY"}));
}

#[test]
fn record_requires_every_field() {
    let missing = json!({"Id": 1, "StudentName": "Alice", "Age": 20});
    assert!(serde_json::from_value::<StudentRecord>(missing).is_err());
}

#[test]
fn record_rejects_non_integer_id_and_age() {
    let bad_id = json!({"Id": "one", "StudentName": "Alice", "Age": 20, "City": "NY"});
    assert!(serde_json::from_value::<StudentRecord>(bad_id).is_err());
    let bad_age = json!({"Id": 1, "StudentName": "Alice", "Age": 20.5, "City": "NY"});
    assert!(serde_json::from_value::<StudentRecord>(bad_age).is_err());
}

#[test]
fn record_ignores_unknown_fields() {
    let extra = json!({"Id": 1, "StudentName": "Alice", "Age": 20, "City": "NY", "Grade": "A"});
    let record: StudentRecord = serde_json::from_value(extra).unwrap();
    assert_eq!(record, StudentRecord::new(1, "Alice", 20, "NY"));
}

#[test]
fn item_serializes_as_dynamodb_json() {
    let item: Item = StudentRecord::new(1, "Alice", 20, "NY").to_item();
    let value = serde_json::to_value(&item).unwrap();
    assert_eq!(
        value,
        json!({
            "Id": {"N": "1"},
            "StudentName": {"S": "Alice"},
            "Age": {"N": "20"},
            "City": {"S": "NY"}
        })
    );
    let back: Item = serde_json::from_value(value).unwrap();
    assert_eq!(back.get("City"), Some(&AttrValue::S("NY".into())));
}
