// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! API client
//!
//! Configuration, user language detection, the OPTIONS cache and the request
//! pipeline tying them to a transport.

mod cache;
mod client;
mod config;
mod language;

pub use cache::{OptionsCache, OptionsFuture};
pub use client::ApiClient;
pub use config::{ApiConfig, OptionsFormatter};
pub use language::LanguageHints;
