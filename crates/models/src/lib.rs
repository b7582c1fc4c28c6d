//! Record and item definitions shared by the service and server crates.
//! - `student`: the HTTP-facing record shape.
//! - `item`: the store's typed attribute representation.
//! - conversions between the two live next to the record.

pub mod errors;
pub mod item;
pub mod student;

pub use item::{AttrValue, AttributeUpdate, Item};
pub use student::StudentRecord;

#[cfg(test)]
mod tests;
