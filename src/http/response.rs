// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Transport responses and how they are classified

use std::fmt;
use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde_json::Value;

use super::request::Method;
use crate::error::{Error, Result};

/// Status codes a transport may reject with that still count as success
pub const REDIRECT_STATUS_CODES: [u16; 2] = [301, 302];

/// Fields that may describe an error, least important first
const DESCRIPTION_FIELDS: [&str; 4] = ["status", "msg", "message", "description"];

/// What a transport hands back, on resolution and rejection alike
#[derive(Debug, Clone, PartialEq)]
pub struct TransportResponse {
    /// Status code, 0 when no response was received
    pub status: u16,
    /// Decoded body
    pub data: Value,
    /// Response headers
    pub headers: HeaderMap,
}

impl TransportResponse {
    /// Create a response without headers
    pub fn new(status: u16, data: Value) -> Self {
        Self {
            status,
            data,
            headers: HeaderMap::new(),
        }
    }

    /// Add a header, ignoring invalid names or values
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        if let (Ok(name), Ok(value)) = (HeaderName::try_from(name), HeaderValue::try_from(value)) {
            self.headers.insert(name, value);
        }
        self
    }

    /// Check if status is one of the tolerated redirects
    pub fn is_redirect(&self) -> bool {
        REDIRECT_STATUS_CODES.contains(&self.status)
    }

    /// Get a header value
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

/// JavaScript-style truthiness of a decoded value
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Best human-readable description of a failed response
pub fn describe_failure(method: Method, url: &str, response: &TransportResponse) -> String {
    let description = match &response.data {
        Value::String(s) => s.clone(),
        Value::Object(fields) => DESCRIPTION_FIELDS
            .iter()
            .filter_map(|name| fields.get(*name))
            .filter(|v| is_truthy(v))
            .last()
            .map(display_value)
            .unwrap_or_else(|| response.data.to_string()),
        Value::Array(_) => response.data.to_string(),
        _ => String::new(),
    };

    if !description.is_empty() {
        return description;
    }

    format!(
        "HTTP {} request to {} failed: {} (Status {})",
        method,
        url,
        display_value(&response.data),
        response.status
    )
}

/// Turn a transport outcome into a response or a typed error
pub(crate) fn classify(
    method: Method,
    url: &str,
    outcome: std::result::Result<TransportResponse, TransportResponse>,
) -> Result<TransportResponse> {
    match outcome {
        Ok(response) => Ok(response),
        Err(response) if response.is_redirect() => {
            tracing::debug!(status = response.status, url, "Treating redirect as success");
            Ok(response)
        }
        Err(response) => {
            let message = describe_failure(method, url, &response);
            tracing::info!(
                method = %method,
                url,
                status = response.status,
                error = %message,
                "Request failed"
            );
            Err(Error::transport(message, response.status))
        }
    }
}

/// Function deriving the resolved value from the decoded body and the raw response
pub type ResponseTransform = Arc<dyn Fn(&Value, &TransportResponse) -> Result<Value> + Send + Sync>;

/// How the resolved value is taken from a successful response
#[derive(Clone)]
pub enum ReturnProperty {
    /// Index the decoded body by this key
    Key(String),
    /// Compute the value
    Transform(ResponseTransform),
}

impl fmt::Debug for ReturnProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReturnProperty::Key(key) => f.debug_tuple("Key").field(key).finish(),
            ReturnProperty::Transform(_) => f.write_str("Transform(..)"),
        }
    }
}

/// What the caller expects from a successful response
#[derive(Debug, Clone, Default)]
pub struct ResponseContract {
    /// Keys that must be present and truthy on the decoded body
    pub required_properties: Vec<String>,
    /// Value to resolve with; the whole body when absent
    pub return_property: Option<ReturnProperty>,
}

impl ResponseContract {
    pub fn new() -> Self {
        Self::default()
    }

    /// Require a property on the decoded body
    pub fn require(mut self, property: impl Into<String>) -> Self {
        self.required_properties.push(property.into());
        self
    }

    /// Resolve with the given property of the decoded body
    pub fn returning(mut self, property: impl Into<String>) -> Self {
        self.return_property = Some(ReturnProperty::Key(property.into()));
        self
    }

    /// Resolve with a value computed from the response
    pub fn transform<F>(mut self, f: F) -> Self
    where
        F: Fn(&Value, &TransportResponse) -> Result<Value> + Send + Sync + 'static,
    {
        self.return_property = Some(ReturnProperty::Transform(Arc::new(f)));
        self
    }

    /// Fail with the first required property that is missing or falsy
    pub fn validate(&self, data: &Value) -> Result<()> {
        match self
            .required_properties
            .iter()
            .find(|p| !data.get(p.as_str()).is_some_and(is_truthy))
        {
            Some(missing) => Err(Error::missing_property(missing.clone())),
            None => Ok(()),
        }
    }

    /// Validate the response and extract the resolved value
    pub fn apply(&self, response: TransportResponse) -> Result<Value> {
        self.validate(&response.data)?;

        match &self.return_property {
            None => Ok(response.data),
            Some(ReturnProperty::Key(key)) => {
                Ok(response.data.get(key.as_str()).cloned().unwrap_or(Value::Null))
            }
            Some(ReturnProperty::Transform(f)) => f(&response.data, &response),
        }
    }
}
