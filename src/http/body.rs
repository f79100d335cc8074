// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Structured request data

use bytes::Bytes;
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use serde_json::{Number, Value};

use crate::error::Result;

/// Binary file attached to a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHandle {
    /// File name sent in the multipart part
    pub file_name: String,
    /// MIME type of the file, `application/octet-stream` when unknown
    pub content_type: Option<String>,
    /// File contents
    pub bytes: Bytes,
}

impl FileHandle {
    /// Create a new file handle
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: None,
            bytes: bytes.into(),
        }
    }

    /// Set the MIME type
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// MIME type, falling back to `application/octet-stream`
    pub fn mime(&self) -> &str {
        self.content_type
            .as_deref()
            .unwrap_or("application/octet-stream")
    }
}

/// Request data as handed to the pipeline
///
/// Mirrors a JSON value, with two differences: objects keep the insertion
/// order of their keys, and a leaf may be a [`FileHandle`].
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Body {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Vec<Body>),
    Object(Vec<(String, Body)>),
    File(FileHandle),
}

impl Body {
    /// An object without fields
    pub fn empty_object() -> Self {
        Body::Object(Vec::new())
    }

    /// Start an object; chain [`Body::field`] to fill it
    pub fn object() -> Self {
        Self::empty_object()
    }

    /// Append a field to an object. Has no effect on other shapes.
    pub fn field(mut self, name: impl Into<String>, value: impl Into<Body>) -> Self {
        if let Body::Object(ref mut fields) = self {
            fields.push((name.into(), value.into()));
        }
        self
    }

    /// Look up a field of an object (first match)
    pub fn get(&self, name: &str) -> Option<&Body> {
        match self {
            Body::Object(fields) => fields.iter().find(|(k, _)| k == name).map(|(_, v)| v),
            _ => None,
        }
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Body::String(_))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Body::Null)
    }

    /// Short name of the shape, used in diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            Body::Null => "null",
            Body::Bool(_) => "bool",
            Body::Number(_) => "number",
            Body::String(_) => "string",
            Body::Array(_) => "array",
            Body::Object(_) => "object",
            Body::File(_) => "file",
        }
    }

    /// Serialize to a JSON string
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Raw bytes sent when the body is passed through unmodified.
    ///
    /// Strings and files go out as they are, null as nothing, anything else
    /// as JSON.
    pub fn to_bytes(&self) -> Result<Bytes> {
        match self {
            Body::Null => Ok(Bytes::new()),
            Body::String(s) => Ok(Bytes::from(s.clone())),
            Body::File(file) => Ok(file.bytes.clone()),
            other => Ok(Bytes::from(serde_json::to_vec(other)?)),
        }
    }
}

impl Serialize for Body {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Body::Null => serializer.serialize_unit(),
            Body::Bool(b) => serializer.serialize_bool(*b),
            Body::Number(n) => n.serialize(serializer),
            Body::String(s) => serializer.serialize_str(s),
            Body::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Body::Object(fields) => {
                let mut map = serializer.serialize_map(Some(fields.len()))?;
                for (name, value) in fields {
                    map.serialize_entry(name, value)?;
                }
                map.end()
            }
            // Files carry no enumerable properties once serialized
            Body::File(_) => serializer.serialize_map(Some(0))?.end(),
        }
    }
}

impl From<Value> for Body {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Body::Null,
            Value::Bool(b) => Body::Bool(b),
            Value::Number(n) => Body::Number(n),
            Value::String(s) => Body::String(s),
            Value::Array(items) => Body::Array(items.into_iter().map(Body::from).collect()),
            Value::Object(map) => {
                Body::Object(map.into_iter().map(|(k, v)| (k, Body::from(v))).collect())
            }
        }
    }
}

impl From<&str> for Body {
    fn from(s: &str) -> Self {
        Body::String(s.to_string())
    }
}

impl From<String> for Body {
    fn from(s: String) -> Self {
        Body::String(s)
    }
}

impl From<bool> for Body {
    fn from(b: bool) -> Self {
        Body::Bool(b)
    }
}

impl From<i64> for Body {
    fn from(n: i64) -> Self {
        Body::Number(n.into())
    }
}

impl From<i32> for Body {
    fn from(n: i32) -> Self {
        Body::Number(n.into())
    }
}

impl From<u64> for Body {
    fn from(n: u64) -> Self {
        Body::Number(n.into())
    }
}

impl From<f64> for Body {
    fn from(n: f64) -> Self {
        Number::from_f64(n).map(Body::Number).unwrap_or(Body::Null)
    }
}

impl From<FileHandle> for Body {
    fn from(file: FileHandle) -> Self {
        Body::File(file)
    }
}

impl<T: Into<Body>> From<Vec<T>> for Body {
    fn from(items: Vec<T>) -> Self {
        Body::Array(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Body>> From<Option<T>> for Body {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Body::Null)
    }
}

impl<K: Into<String>, V: Into<Body>> FromIterator<(K, V)> for Body {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Body::Object(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}
