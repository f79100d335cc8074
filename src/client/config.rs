// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Client configuration

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures::future::{self, BoxFuture, FutureExt};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde_json::Value;
use url::Url;

use super::language::LanguageHints;
use crate::error::{Error, Result};

/// Hook applied to every OPTIONS response before it resolves
pub type OptionsFormatter = Arc<dyn Fn(Value) -> BoxFuture<'static, Result<Value>> + Send + Sync>;

/// Client configuration
#[derive(Clone)]
pub struct ApiConfig {
    /// Headers merged into every request; request headers win
    pub default_headers: HeaderMap,
    /// Base for relative request URLs
    pub base_url: Option<Url>,
    /// Formatter for OPTIONS responses
    pub options_formatter: Option<OptionsFormatter>,
    /// Memoize OPTIONS responses per URL
    pub cache_enabled: bool,
    /// Append a random `_nocache` query parameter to GET requests
    pub cache_buster: bool,
    /// Source of `Accept-Language` and `Content-Language`
    pub languages: LanguageHints,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            default_headers: HeaderMap::new(),
            base_url: None,
            options_formatter: None,
            cache_enabled: true,
            cache_buster: false,
            languages: LanguageHints::default(),
        }
    }
}

impl fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiConfig")
            .field("default_headers", &self.default_headers)
            .field("base_url", &self.base_url)
            .field("options_formatter", &self.options_formatter.is_some())
            .field("cache_enabled", &self.cache_enabled)
            .field("cache_buster", &self.cache_buster)
            .field("languages", &self.languages)
            .finish()
    }
}

impl ApiConfig {
    /// Create a new config
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a default header
    pub fn header(mut self, name: impl AsRef<str>, value: impl AsRef<str>) -> Result<Self> {
        let (name, value) = parse_header(name.as_ref(), value.as_ref())?;
        self.default_headers.insert(name, value);
        Ok(self)
    }

    /// Add several default headers
    pub fn default_headers_from(mut self, headers: &HashMap<String, String>) -> Result<Self> {
        for (name, value) in headers {
            self = self.header(name, value)?;
        }
        Ok(self)
    }

    /// Set the base URL relative request URLs are resolved against
    pub fn base_url(mut self, base_url: impl AsRef<str>) -> Result<Self> {
        let parsed =
            Url::parse(base_url.as_ref()).map_err(|e| Error::url(base_url.as_ref(), e))?;
        self.base_url = Some(parsed);
        Ok(self)
    }

    /// Format OPTIONS responses synchronously
    pub fn format_options<F>(mut self, f: F) -> Self
    where
        F: Fn(Value) -> Value + Send + Sync + 'static,
    {
        let formatter: OptionsFormatter =
            Arc::new(move |data: Value| future::ready(Ok::<_, Error>(f(data))).boxed());
        self.options_formatter = Some(formatter);
        self
    }

    /// Format OPTIONS responses asynchronously
    pub fn format_options_async<F, Fut>(mut self, f: F) -> Self
    where
        F: Fn(Value) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value>> + Send + 'static,
    {
        let formatter: OptionsFormatter = Arc::new(move |data: Value| f(data).boxed());
        self.options_formatter = Some(formatter);
        self
    }

    /// Enable or disable the OPTIONS cache
    pub fn cache_enabled(mut self, enabled: bool) -> Self {
        self.cache_enabled = enabled;
        self
    }

    /// Enable or disable the `_nocache` parameter on GET requests
    pub fn cache_buster(mut self, enabled: bool) -> Self {
        self.cache_buster = enabled;
        self
    }

    /// Set the language hints
    pub fn languages(mut self, languages: LanguageHints) -> Self {
        self.languages = languages;
        self
    }
}

pub(crate) fn parse_header(name: &str, value: &str) -> Result<(HeaderName, HeaderValue)> {
    let header_name = HeaderName::try_from(name).map_err(|e| Error::invalid_header(name, e))?;
    let header_value = HeaderValue::try_from(value).map_err(|e| Error::invalid_header(name, e))?;
    Ok((header_name, header_value))
}
