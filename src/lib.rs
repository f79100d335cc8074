// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! # API Wrapper
//!
//! Normalizes outgoing API requests and classifies their responses on top of
//! an injectable HTTP transport.
//!
//! ## Features
//!
//! - Default headers merged into every request, request headers win
//! - `Pragma`/`Cache-Control: no-cache` and language headers
//! - Multipart form-data unless a content type is given, JSON on request
//! - 301/302 treated as success, other failures turned into typed errors
//! - Response contracts: required properties and the value to return
//! - Per-URL OPTIONS cache with an optional response formatter
//! - Server date conversion
//!
//! ## Example
//!
//! ```rust,no_run
//! use api_wrapper::{ApiClient, ApiConfig, LanguageHints, ResponseContract, ApiRequest};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ApiConfig::new()
//!         .base_url("https://api.example.com/v1/")?
//!         .header("X-Client", "backoffice")?
//!         .languages(LanguageHints::from_env());
//!     let client = ApiClient::with_reqwest(config)?;
//!
//!     let id = client
//!         .request_with(
//!             ApiRequest::post("users").data(json!({"name": "Ada"})),
//!             &ResponseContract::new().require("id").returning("id"),
//!         )
//!         .await?;
//!     println!("Created user {}", id);
//!
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod date;
pub mod error;
pub mod http;

// Client
pub use client::{ApiClient, ApiConfig, LanguageHints, OptionsCache, OptionsFormatter, OptionsFuture};

// Errors
pub use error::{Error, Result};

// HTTP
pub use http::{
    ApiRequest, Body, FileHandle, FormValue, Method, MultipartEncoding, Payload, ReqwestTransport,
    ResponseContract, ReturnProperty, Transport, TransportRequest, TransportResponse,
    TransportResult,
};

// Dates
pub use date::{from_server, to_server};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
