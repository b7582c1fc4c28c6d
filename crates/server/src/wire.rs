//! Response envelopes and message texts of the student endpoints.
//!
//! Every response body of the legacy surface is `{"data": ...}`; clients match
//! on the exact message strings below.

use std::io;

use serde::ser::Error as _;
use serde::{Deserialize, Serialize};
use serde_json::ser::Formatter;

pub const CREATED_MESSAGE: &str = "Your details have been created";
pub const DELETED_MESSAGE: &str = "Your details are deleted successfully";
pub const NOT_FOUND_MESSAGE: &str = "You either deleted the details or You haven't created";

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct DataResponse<T> {
    pub data: T,
}

impl<T> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// Encode `value` as JSON text laid out like Python's `json.dumps` defaults:
/// `", "` and `": "` separators and non-ASCII characters escaped as `\uXXXX`.
pub fn to_python_json<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<String> {
    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, PythonFormatter);
    value.serialize(&mut ser)?;
    String::from_utf8(buf).map_err(serde_json::Error::custom)
}

struct PythonFormatter;

impl Formatter for PythonFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first { Ok(()) } else { writer.write_all(b", ") }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first { Ok(()) } else { writer.write_all(b", ") }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }

    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        let mut start = 0;
        for (i, ch) in fragment.char_indices() {
            if ch.is_ascii() {
                continue;
            }
            writer.write_all(fragment[start..i].as_bytes())?;
            let mut units = [0u16; 2];
            for unit in ch.encode_utf16(&mut units) {
                writer.write_all(format!("\\u{unit:04x}").as_bytes())?;
            }
            start = i + ch.len_utf8();
        }
        writer.write_all(fragment[start..].as_bytes())
    }
}
