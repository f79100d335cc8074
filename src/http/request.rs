// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Request descriptor and builder

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::Serialize;

use super::body::Body;
use crate::error::{Error, Result};

/// Methods the pipeline accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Method {
    #[default]
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Options,
}

impl Method {
    pub const ALL: [Method; 6] = [
        Method::Options,
        Method::Get,
        Method::Post,
        Method::Patch,
        Method::Put,
        Method::Delete,
    ];

    /// Upper-case method name
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
            Method::Options => "OPTIONS",
        }
    }

    /// POST, PUT and PATCH write to the server and carry a body
    pub fn is_state_changing(&self) -> bool {
        matches!(self, Method::Post | Method::Put | Method::Patch)
    }

    /// Parse an optional method name. Missing or empty names mean GET.
    pub fn parse_or_default(method: Option<&str>) -> Result<Self> {
        match method.map(str::trim) {
            None | Some("") => Ok(Method::Get),
            Some(name) => name.parse(),
        }
    }
}

impl FromStr for Method {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Method::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::InvalidMethod(s.to_lowercase()))
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
            Method::Options => reqwest::Method::OPTIONS,
        }
    }
}

/// Logical request, before headers and body are derived
#[derive(Debug, Clone, Default)]
pub struct ApiRequest {
    /// Request method
    pub method: Method,
    /// Absolute URL, or a path resolved against the configured base URL
    pub url: String,
    /// Request data
    pub data: Option<Body>,
    /// Caller-supplied headers
    pub headers: HeaderMap,
}

impl ApiRequest {
    /// Create a request with the given method
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            data: None,
            headers: HeaderMap::new(),
        }
    }

    /// Create a request from an untyped method name
    pub fn with_method_name(method: Option<&str>, url: impl Into<String>) -> Result<Self> {
        Ok(Self::new(Method::parse_or_default(method)?, url))
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::Get, url)
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self::new(Method::Post, url)
    }

    pub fn put(url: impl Into<String>) -> Self {
        Self::new(Method::Put, url)
    }

    pub fn patch(url: impl Into<String>) -> Self {
        Self::new(Method::Patch, url)
    }

    pub fn delete(url: impl Into<String>) -> Self {
        Self::new(Method::Delete, url)
    }

    pub fn options(url: impl Into<String>) -> Self {
        Self::new(Method::Options, url)
    }

    /// Set a header, ignoring names or values that are not valid HTTP
    pub fn header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Self {
        match (
            HeaderName::try_from(name.as_ref()),
            HeaderValue::try_from(value.as_ref()),
        ) {
            (Ok(name), Ok(value)) => {
                self.headers.insert(name, value);
            }
            _ => tracing::warn!(header = name.as_ref(), "Ignoring invalid request header"),
        }
        self
    }

    /// Set a header, failing on invalid names or values
    pub fn try_header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Result<Self> {
        let header_name = HeaderName::try_from(name.as_ref())
            .map_err(|e| Error::invalid_header(name.as_ref(), e))?;
        let header_value = HeaderValue::try_from(value.as_ref())
            .map_err(|e| Error::invalid_header(name.as_ref(), e))?;
        self.headers.insert(header_name, header_value);
        Ok(self)
    }

    /// Set multiple headers
    pub fn headers(mut self, headers: HashMap<String, String>) -> Self {
        for (name, value) in headers {
            self = self.header(name, value);
        }
        self
    }

    /// Set the request data
    pub fn data(mut self, data: impl Into<Body>) -> Self {
        self.data = Some(data.into());
        self
    }

    /// Set the request data from any serializable value
    pub fn json<T: Serialize>(mut self, data: &T) -> Result<Self> {
        self.data = Some(Body::from(serde_json::to_value(data)?));
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_parsing_is_case_insensitive() {
        assert_eq!("post".parse::<Method>().unwrap(), Method::Post);
        assert_eq!("Patch".parse::<Method>().unwrap(), Method::Patch);
        assert_eq!("OPTIONS".parse::<Method>().unwrap(), Method::Options);
    }

    #[test]
    fn test_method_defaults_to_get() {
        assert_eq!(Method::parse_or_default(None).unwrap(), Method::Get);
        assert_eq!(Method::parse_or_default(Some("")).unwrap(), Method::Get);
    }

    #[test]
    fn test_unknown_method_is_rejected() {
        let err = ApiRequest::with_method_name(Some("TRACE"), "/x").unwrap_err();
        assert_eq!(err, Error::InvalidMethod("trace".into()));
    }

    #[test]
    fn test_headers_are_case_insensitive() {
        let req = ApiRequest::get("/x")
            .header("content-type", "text/plain")
            .header("Content-Type", "application/json");
        assert_eq!(req.headers.len(), 1);
        assert_eq!(req.headers.get("CONTENT-TYPE").unwrap(), "application/json");
    }

    #[test]
    fn test_invalid_header_is_ignored_or_rejected() {
        let req = ApiRequest::get("/x").header("bad header", "v");
        assert!(req.headers.is_empty());

        let err = ApiRequest::get("/x").try_header("x-ok", "line\nbreak").unwrap_err();
        assert!(matches!(err, Error::InvalidHeader { .. }));
    }

    #[test]
    fn test_json_data() {
        #[derive(Serialize)]
        struct Todo {
            title: String,
        }
        let req = ApiRequest::post("/todos")
            .json(&Todo { title: "Milk".into() })
            .unwrap();
        assert_eq!(
            req.data.unwrap().get("title"),
            Some(&Body::String("Milk".into()))
        );
    }
}
