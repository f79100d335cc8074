// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Request pipeline: header derivation, body encoding, transport call and
//! outcome classification

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use futures::future::{self, BoxFuture, FutureExt};
use parking_lot::RwLock;
use reqwest::header::{
    HeaderMap, HeaderValue, ACCEPT_LANGUAGE, CACHE_CONTROL, CONTENT_LANGUAGE, CONTENT_TYPE,
    PRAGMA,
};
use serde_json::Value;
use url::Url;

use super::cache::{OptionsCache, OptionsFuture};
use super::config::{parse_header, ApiConfig, OptionsFormatter};
use crate::error::{Error, Result};
use crate::http::values::{APPLICATION_JSON, NO_CACHE};
use crate::http::{
    classify, ApiRequest, Body, Method, MultipartEncoding, Payload, ReqwestTransport,
    ResponseContract, Transport, TransportRequest, TransportResponse, NOCACHE_PARAM,
};

/// API client
///
/// Cheap to clone; clones share default headers, the OPTIONS cache and the
/// transport.
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    inner: Arc<Inner>,
}

struct Inner {
    default_headers: RwLock<HeaderMap>,
    base_url: Option<Url>,
    options_formatter: Option<OptionsFormatter>,
    cache_buster: bool,
    languages: Vec<String>,
    options_cache: OptionsCache,
}

impl ApiClient {
    /// Create a client on top of the given transport
    pub fn new<T: Transport + 'static>(transport: T, config: ApiConfig) -> Self {
        Self::with_shared_transport(Arc::new(transport), config)
    }

    /// Create a client sharing an existing transport
    pub fn with_shared_transport(transport: Arc<dyn Transport>, config: ApiConfig) -> Self {
        let languages = config.languages.user_languages();
        Self {
            transport,
            inner: Arc::new(Inner {
                default_headers: RwLock::new(config.default_headers),
                base_url: config.base_url,
                options_formatter: config.options_formatter,
                cache_buster: config.cache_buster,
                languages,
                options_cache: OptionsCache::new(config.cache_enabled),
            }),
        }
    }

    /// Create a client using the bundled reqwest transport
    pub fn with_reqwest(config: ApiConfig) -> Result<Self> {
        Ok(Self::new(ReqwestTransport::new()?, config))
    }

    /// Set a default header, e.g. a token that only becomes known after setup
    pub fn set_default_header(&self, name: impl AsRef<str>, value: impl AsRef<str>) -> Result<()> {
        let (name, value) = parse_header(name.as_ref(), value.as_ref())?;
        self.inner.default_headers.write().insert(name, value);
        Ok(())
    }

    /// Merge several default headers. Nothing is applied if one is invalid.
    pub fn set_default_headers(&self, headers: &HashMap<String, String>) -> Result<()> {
        let parsed = headers
            .iter()
            .map(|(name, value)| parse_header(name, value))
            .collect::<Result<Vec<_>>>()?;

        let mut defaults = self.inner.default_headers.write();
        for (name, value) in parsed {
            defaults.insert(name, value);
        }
        Ok(())
    }

    /// Current default headers
    pub fn default_headers(&self) -> HeaderMap {
        self.inner.default_headers.read().clone()
    }

    /// Detected user languages, most preferred first
    pub fn user_languages(&self) -> &[String] {
        &self.inner.languages
    }

    /// Formatter applied to OPTIONS responses
    pub fn options_formatter(&self) -> Option<&OptionsFormatter> {
        self.inner.options_formatter.as_ref()
    }

    pub fn enable_cache(&self) {
        self.inner.options_cache.enable();
    }

    /// Bypass the OPTIONS cache; entries already stored are kept
    pub fn disable_cache(&self) {
        self.inner.options_cache.disable();
    }

    pub fn is_cache_enabled(&self) -> bool {
        self.inner.options_cache.is_enabled()
    }

    /// Drop every cached OPTIONS response
    pub fn invalidate_options_cache(&self) {
        self.inner.options_cache.invalidate();
    }

    /// Issue a request and resolve with the decoded body
    pub async fn request(&self, request: ApiRequest) -> Result<Value> {
        self.request_with(request, &ResponseContract::default()).await
    }

    /// Issue a request, validate the response and extract the declared value
    pub async fn request_with(
        &self,
        request: ApiRequest,
        contract: &ResponseContract,
    ) -> Result<Value> {
        let response = self.dispatch(request).await?;
        contract.apply(response)
    }

    /// Derive the request now and return the pending, classified transport call
    fn dispatch(&self, request: ApiRequest) -> BoxFuture<'static, Result<TransportResponse>> {
        let method = request.method;
        let url = request.url.clone();
        let prepared = match self.prepare(request) {
            Ok(prepared) => prepared,
            Err(e) => return future::ready(Err(e)).boxed(),
        };

        tracing::debug!(
            method = %prepared.method,
            url = %prepared.url,
            headers = prepared.headers.len(),
            body = prepared.payload.kind(),
            "Issuing request"
        );

        let transport = self.transport.clone();
        async move {
            let outcome = transport.send(prepared).await;
            classify(method, &url, outcome)
        }
        .boxed()
    }

    pub async fn get(&self, url: &str) -> Result<Value> {
        self.request(ApiRequest::get(url)).await
    }

    pub async fn post(&self, url: &str, data: impl Into<Body>) -> Result<Value> {
        self.request(ApiRequest::post(url).data(data)).await
    }

    pub async fn put(&self, url: &str, data: impl Into<Body>) -> Result<Value> {
        self.request(ApiRequest::put(url).data(data)).await
    }

    pub async fn patch(&self, url: &str, data: impl Into<Body>) -> Result<Value> {
        self.request(ApiRequest::patch(url).data(data)).await
    }

    pub async fn delete(&self, url: &str) -> Result<Value> {
        self.request(ApiRequest::delete(url)).await
    }

    /// Uncached OPTIONS request; the formatter is not applied
    pub async fn options(&self, url: &str) -> Result<Value> {
        self.request(ApiRequest::options(url)).await
    }

    /// Formatted OPTIONS response for `url`, memoized per URL while the cache
    /// is enabled.
    ///
    /// The call is registered immediately, so calling this twice before the
    /// first future resolves issues a single request.
    pub fn get_options(&self, url: &str, force_refresh: bool) -> OptionsFuture {
        self.inner.options_cache.fetch(url, force_refresh, || {
            let call = self.dispatch(ApiRequest::options(url));
            let formatter = self.inner.options_formatter.clone();
            async move {
                let data = call.await?.data;
                match formatter {
                    Some(format) => format(data).await,
                    None => Ok(data),
                }
            }
            .boxed()
            .shared()
        })
    }

    /// Derive the request the transport receives
    pub fn prepare(&self, request: ApiRequest) -> Result<TransportRequest> {
        let ApiRequest {
            method,
            url,
            data,
            headers,
        } = request;

        let mut url = self.resolve_url(&url)?;
        let mut headers = self.derive_headers(method, &headers);
        let payload = encode_body(method, data, &mut headers)?;

        if method == Method::Get && self.inner.cache_buster {
            let token = Utc::now().timestamp_millis() + fastrand::i64(0..=9999);
            url.query_pairs_mut()
                .append_pair(NOCACHE_PARAM, &token.to_string());
        }

        Ok(TransportRequest {
            method,
            url,
            headers,
            payload,
        })
    }

    fn resolve_url(&self, url: &str) -> Result<Url> {
        let resolved = match self.inner.base_url {
            Some(ref base) => base.join(url),
            None => Url::parse(url),
        };
        resolved.map_err(|e| Error::url(url, e))
    }

    fn derive_headers(&self, method: Method, supplied: &HeaderMap) -> HeaderMap {
        let mut headers = self.inner.default_headers.read().clone();

        for name in supplied.keys() {
            headers.remove(name);
        }
        for (name, value) in supplied {
            headers.append(name.clone(), value.clone());
        }

        headers
            .entry(PRAGMA)
            .or_insert(HeaderValue::from_static(NO_CACHE));
        headers
            .entry(CACHE_CONTROL)
            .or_insert(HeaderValue::from_static(NO_CACHE));

        let languages = &self.inner.languages;
        if !languages.is_empty() {
            if let Ok(value) = HeaderValue::from_str(&languages.join(", ")) {
                headers.entry(ACCEPT_LANGUAGE).or_insert(value);
            }
        }

        if method.is_state_changing() {
            if let Some(first) = languages.first().and_then(|l| HeaderValue::from_str(l).ok()) {
                headers.entry(CONTENT_LANGUAGE).or_insert(first);
            }
        }

        headers
    }
}

/// Choose the body encoding. Only POST, PUT and PATCH carry a body.
fn encode_body(method: Method, data: Option<Body>, headers: &mut HeaderMap) -> Result<Payload> {
    if !method.is_state_changing() {
        return Ok(Payload::Empty);
    }

    let data = data.unwrap_or_else(Body::empty_object);

    let content_type = headers
        .get(CONTENT_TYPE)
        .filter(|v| !v.is_empty())
        .map(|v| v.to_str().unwrap_or_default().to_string());

    match content_type {
        Some(ct) => {
            let essence = ct.split(';').next().unwrap_or_default().trim();
            if essence.eq_ignore_ascii_case(APPLICATION_JSON) && !data.is_string() {
                Ok(Payload::Text(data.to_json_string()?))
            } else {
                Ok(Payload::Data(data))
            }
        }
        None => {
            // The transport announces the multipart boundary
            headers.remove(CONTENT_TYPE);
            Ok(Payload::Multipart(MultipartEncoding::from_body(&data)))
        }
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.inner.base_url)
            .field("languages", &self.inner.languages)
            .field("options_cache", &self.inner.options_cache)
            .finish()
    }
}
