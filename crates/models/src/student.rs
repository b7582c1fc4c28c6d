use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::item::{self, AttrValue, AttributeUpdate, Item, KEY_ATTRIBUTE};

pub const ATTR_STUDENT_NAME: &str = "StudentName";
pub const ATTR_AGE: &str = "Age";
pub const ATTR_CITY: &str = "City";

/// Student record as exchanged over HTTP.
///
/// Field names on the wire are PascalCase (`Id`, `StudentName`, `Age`, `City`)
/// and all four are required.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StudentRecord {
    pub id: i64,
    pub student_name: String,
    pub age: i64,
    pub city: String,
}

impl StudentRecord {
    pub fn new(id: i64, student_name: impl Into<String>, age: i64, city: impl Into<String>) -> Self {
        Self { id, student_name: student_name.into(), age, city: city.into() }
    }

    /// Store representation: `Id`/`Age` as numbers, names as strings.
    pub fn to_item(&self) -> Item {
        let mut item = Item::new();
        item.insert(KEY_ATTRIBUTE.to_string(), AttrValue::number(self.id));
        item.insert(ATTR_STUDENT_NAME.to_string(), AttrValue::string(&self.student_name));
        item.insert(ATTR_AGE.to_string(), AttrValue::number(self.age));
        item.insert(ATTR_CITY.to_string(), AttrValue::string(&self.city));
        item
    }

    /// Full replacement of every non-key attribute.
    pub fn non_key_updates(&self) -> Vec<AttributeUpdate> {
        vec![
            AttributeUpdate::put(ATTR_STUDENT_NAME, AttrValue::string(&self.student_name)),
            AttributeUpdate::put(ATTR_AGE, AttrValue::number(self.age)),
            AttributeUpdate::put(ATTR_CITY, AttrValue::string(&self.city)),
        ]
    }
}

impl TryFrom<&Item> for StudentRecord {
    type Error = ModelError;

    fn try_from(item: &Item) -> Result<Self, Self::Error> {
        Ok(Self {
            id: item::key_of(item)?,
            student_name: item::get_s(item, ATTR_STUDENT_NAME)?.to_string(),
            age: item::get_i64(item, ATTR_AGE)?,
            city: item::get_s(item, ATTR_CITY)?.to_string(),
        })
    }
}

/// Parse the textual `{Id}` path segment.
pub fn parse_student_id(raw: &str) -> Result<i64, ModelError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| ModelError::Validation(format!("Id must be an integer, got {raw:?}")))
}
