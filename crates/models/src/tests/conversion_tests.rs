use crate::errors::ModelError;
use crate::item::{self, AttrValue, Item, KEY_ATTRIBUTE};
use crate::student::{parse_student_id, StudentRecord, ATTR_AGE, ATTR_CITY, ATTR_STUDENT_NAME};

fn alice() -> StudentRecord {
    StudentRecord::new(1, "Alice", 20, "NY")
}

#[test]
fn record_to_item_uses_typed_attributes() {
    let item = alice().to_item();
    assert_eq!(item.len(), 4);
    assert_eq!(item.get(KEY_ATTRIBUTE), Some(&AttrValue::N("1".into())));
    assert_eq!(item.get(ATTR_STUDENT_NAME), Some(&AttrValue::S("Alice".into())));
    assert_eq!(item.get(ATTR_AGE), Some(&AttrValue::N("20".into())));
    assert_eq!(item.get(ATTR_CITY), Some(&AttrValue::S("NY".into())));
}

#[test]
fn item_decodes_back_into_record() {
    let record = StudentRecord::new(-7, "Zoë", 0, "");
    let item = record.to_item();
    assert_eq!(StudentRecord::try_from(&item), Ok(record));
}

#[test]
fn missing_attribute_is_reported() {
    let mut item = alice().to_item();
    item.remove(ATTR_CITY);
    assert_eq!(
        StudentRecord::try_from(&item),
        Err(ModelError::MissingAttribute(ATTR_CITY.into()))
    );
}

#[test]
fn wrong_attribute_type_is_reported() {
    let mut item = alice().to_item();
    item.insert(ATTR_AGE.into(), AttrValue::S("20".into()));
    assert!(matches!(
        StudentRecord::try_from(&item),
        Err(ModelError::WrongType { expected: "N", .. })
    ));
}

#[test]
fn non_integer_number_is_reported() {
    let mut item: Item = alice().to_item();
    item.insert(ATTR_AGE.into(), AttrValue::N("20.5".into()));
    assert!(matches!(
        StudentRecord::try_from(&item),
        Err(ModelError::InvalidNumber { .. })
    ));
    assert!(item::get_i64(&item, ATTR_AGE).is_err());
}

#[test]
fn non_key_updates_cover_every_field_but_id() {
    let updates = StudentRecord::new(1, "Bob", 21, "LA").non_key_updates();
    let names: Vec<&str> = updates.iter().map(|u| u.name.as_str()).collect();
    assert_eq!(names, vec![ATTR_STUDENT_NAME, ATTR_AGE, ATTR_CITY]);
    assert!(updates.iter().all(|u| u.name != KEY_ATTRIBUTE));
    assert_eq!(updates[1].value, AttrValue::N("21".into()));
}

#[test]
fn path_id_parsing() {
    assert_eq!(parse_student_id("42"), Ok(42));
    assert_eq!(parse_student_id("-3"), Ok(-3));
    assert!(matches!(parse_student_id("abc"), Err(ModelError::Validation(_))));
    assert!(parse_student_id("1.5").is_err());
    assert!(parse_student_id("").is_err());
}
