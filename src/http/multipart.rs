// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Multipart form-data encoding
//!
//! Structured data is flattened into a single list of fields. Every leaf is
//! named by its own key only, never by its full path, so `{"a": {"id": 1},
//! "b": {"id": 2}}` yields two fields both called `id`. Array elements are
//! named by their index. Servers usually keep the last of several equally
//! named fields, which makes such siblings shadow each other.

use serde_json::Number;

use super::body::{Body, FileHandle};

/// Value of a single form field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormValue {
    Text(String),
    File(FileHandle),
}

impl FormValue {
    /// Text content, if this is not a file
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FormValue::Text(s) => Some(s),
            FormValue::File(_) => None,
        }
    }
}

/// Flattened form fields, in the order they go on the wire.
///
/// The transport picks the boundary when it renders the body.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MultipartEncoding {
    fields: Vec<(String, FormValue)>,
}

impl MultipartEncoding {
    /// Create an empty encoding
    pub fn new() -> Self {
        Self::default()
    }

    /// Flatten `data` into a new encoding
    pub fn from_body(data: &Body) -> Self {
        let mut encoding = Self::new();
        encoding.append_body(data);
        encoding
    }

    /// Flatten `data` and append its leaves.
    ///
    /// Only objects and arrays can be flattened. Any other top-level shape is
    /// skipped with a warning.
    pub fn append_body(&mut self, data: &Body) {
        match data {
            Body::Object(fields) => {
                for (name, value) in fields {
                    self.append_entry(name, value);
                }
            }
            Body::Array(items) => {
                for (index, value) in items.iter().enumerate() {
                    self.append_entry(&index.to_string(), value);
                }
            }
            other => {
                tracing::warn!(
                    kind = other.kind(),
                    "Unsupported data shape passed to multipart encoding, skipping"
                );
            }
        }
    }

    fn append_entry(&mut self, name: &str, value: &Body) {
        match value {
            Body::Object(_) | Body::Array(_) => self.append_body(value),
            Body::File(file) => self.append_file(name, file.clone()),
            Body::String(s) => self.append_text(name, s.clone()),
            Body::Number(n) => self.append_text(name, number_text(n)),
            Body::Bool(b) => self.append_text(name, b.to_string()),
            Body::Null => self.append_text(name, String::new()),
        }
    }

    /// Append a text field
    pub fn append_text(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields
            .push((name.into(), FormValue::Text(value.into())));
    }

    /// Append a file field
    pub fn append_file(&mut self, name: impl Into<String>, file: FileHandle) {
        self.fields.push((name.into(), FormValue::File(file)));
    }

    pub fn fields(&self) -> &[(String, FormValue)] {
        &self.fields
    }

    pub fn into_fields(self) -> Vec<(String, FormValue)> {
        self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Value a server keeping the last occurrence would see for `name`
    pub fn get(&self, name: &str) -> Option<&FormValue> {
        self.fields
            .iter()
            .rev()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v)
    }
}

/// Text of a numeric field: whole floats lose their `.0` and positive
/// exponents carry a sign, so `1.0` is sent as `1` and `1e21` as `1e+21`.
fn number_text(n: &Number) -> String {
    if let Some(f) = n.as_f64().filter(|_| n.is_f64()) {
        if f.fract() == 0.0 && f.abs() < 1e21 {
            return format!("{:.0}", f + 0.0);
        }
    }

    let text = n.to_string();
    match text.find('e') {
        Some(pos) if !text[pos + 1..].starts_with('-') => {
            format!("{}e+{}", &text[..pos], &text[pos + 1..])
        }
        _ => text,
    }
}
