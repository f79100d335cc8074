// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Transport seam and the bundled reqwest transport

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::header::{HeaderMap, CONTENT_TYPE};
use reqwest::multipart::{Form, Part};
use reqwest::redirect::Policy;
use reqwest::Client;
use serde_json::Value;
use url::Url;

use super::body::Body;
use super::multipart::{FormValue, MultipartEncoding};
use super::request::Method;
use super::response::TransportResponse;
use crate::error::{Error, Result};

/// Resolved response, or the rejected one
pub type TransportResult = std::result::Result<TransportResponse, TransportResponse>;

/// Body of a fully derived request
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// No body
    Empty,
    /// Already serialized text, sent as-is
    Text(String),
    /// Caller data passed through untouched under the caller's content type
    Data(Body),
    /// Form data; the transport renders it and announces the boundary
    Multipart(MultipartEncoding),
}

impl Payload {
    /// Short name of the body encoding, used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            Payload::Empty => "empty",
            Payload::Text(_) => "text",
            Payload::Data(_) => "data",
            Payload::Multipart(_) => "multipart",
        }
    }
}

/// Request handed to the transport, after header and body derivation
#[derive(Debug, Clone)]
pub struct TransportRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub payload: Payload,
}

/// Executes derived requests
///
/// Implementations resolve with the response on transport-level success and
/// reject with the same shape otherwise. They must not cache responses.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: TransportRequest) -> TransportResult;
}

/// Transport backed by `reqwest`
///
/// 2xx responses resolve, every other status rejects. Network failures
/// reject with status 0 and the error text as body.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Create a transport with a default client
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .redirect(Policy::limited(10))
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client })
    }

    /// Create a transport with a request timeout
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client })
    }

    /// Wrap an existing client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    fn rejection(status: u16, error: impl ToString) -> TransportResponse {
        TransportResponse::new(status, Value::String(error.to_string()))
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: TransportRequest) -> TransportResult {
        let start = Instant::now();
        let TransportRequest {
            method,
            url,
            headers,
            payload,
        } = request;

        let mut builder = self
            .client
            .request(method.into(), url.clone())
            .headers(headers);

        builder = match payload {
            Payload::Empty => builder,
            Payload::Text(text) => builder.body(text),
            Payload::Data(body) => builder.body(body.to_bytes().map_err(|e| Self::rejection(0, e))?),
            Payload::Multipart(encoding) => {
                builder.multipart(multipart_form(encoding).map_err(|e| Self::rejection(0, e))?)
            }
        };

        let response = builder.send().await.map_err(|e| {
            Self::rejection(e.status().map(|s| s.as_u16()).unwrap_or(0), e)
        })?;

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| Self::rejection(status.as_u16(), e))?;

        tracing::debug!(
            method = %method,
            url = %url,
            status = status.as_u16(),
            time_ms = start.elapsed().as_millis() as u64,
            "Transport response"
        );

        let response = TransportResponse {
            status: status.as_u16(),
            data: decode_body(&headers, &bytes),
            headers,
        };

        if status.is_success() {
            Ok(response)
        } else {
            Err(response)
        }
    }
}

/// Render flattened fields as a reqwest form; reqwest sets the boundary and
/// the `Content-Type` header
pub(crate) fn multipart_form(encoding: MultipartEncoding) -> reqwest::Result<Form> {
    let mut form = Form::new();
    for (name, value) in encoding.into_fields() {
        let part = match value {
            FormValue::Text(text) => Part::text(text),
            FormValue::File(file) => {
                let mime = file.mime().to_string();
                Part::bytes(file.bytes.to_vec())
                    .file_name(file.file_name)
                    .mime_str(&mime)?
            }
        };
        form = form.part(name, part);
    }
    Ok(form)
}

/// Decode a response body: JSON when it is declared or looks like JSON, text otherwise
pub(crate) fn decode_body(headers: &HeaderMap, bytes: &[u8]) -> Value {
    if bytes.is_empty() {
        return Value::Null;
    }

    let text = String::from_utf8_lossy(bytes);
    let trimmed = text.trim_start();
    let declared_json = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|ct| ct.contains("json"))
        .unwrap_or(false);

    if declared_json || trimmed.starts_with('{') || trimmed.starts_with('[') {
        if let Ok(value) = serde_json::from_str(trimmed) {
            return value;
        }
    }

    Value::String(text.into_owned())
}
