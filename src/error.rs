// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Error types for the API wrapper
//!
//! Every failure of the request pipeline surfaces as an [`Error`]. The type is
//! `Clone` because a single OPTIONS future may be awaited by many callers, and
//! each of them receives its own copy of the rejection.

use thiserror::Error;

/// Result type alias for API wrapper operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the API wrapper
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Request method outside the allowed set
    #[error("Invalid API request method: {0}")]
    InvalidMethod(String),

    /// Header name or value could not be used
    #[error("Invalid header '{name}': {reason}")]
    InvalidHeader { name: String, reason: String },

    /// URL could not be parsed or resolved
    #[error("Invalid URL '{url}': {reason}")]
    Url { url: String, reason: String },

    /// Transport rejected the request with a non-redirect status
    #[error("{message}")]
    Transport { message: String, status: u16 },

    /// Successful response lacks a property the caller requires
    #[error("Required property {property} missing in response")]
    MissingProperty { property: String },

    /// Body could not be serialized
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Server timestamp could not be parsed
    #[error("Invalid server date '{input}': {reason}")]
    DateParse { input: String, reason: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a transport error
    pub fn transport(message: impl Into<String>, status: u16) -> Self {
        Error::Transport {
            message: message.into(),
            status,
        }
    }

    /// Create a response validation error
    pub fn missing_property(property: impl Into<String>) -> Self {
        Error::MissingProperty {
            property: property.into(),
        }
    }

    /// Create an invalid header error
    pub fn invalid_header(name: impl Into<String>, reason: impl ToString) -> Self {
        Error::InvalidHeader {
            name: name.into(),
            reason: reason.to_string(),
        }
    }

    /// Create a URL error
    pub fn url(url: impl Into<String>, reason: impl ToString) -> Self {
        Error::Url {
            url: url.into(),
            reason: reason.to_string(),
        }
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Error::Other(msg.into())
    }

    /// Check if the transport rejected the request
    pub fn is_transport(&self) -> bool {
        matches!(self, Error::Transport { .. })
    }

    /// Check if a successful response failed validation
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::MissingProperty { .. })
    }

    /// Check if this is a client error (4xx)
    pub fn is_client_error(&self) -> bool {
        matches!(self.status_code(), Some(s) if (400..500).contains(&s))
    }

    /// Check if this is a server error (5xx)
    pub fn is_server_error(&self) -> bool {
        matches!(self.status_code(), Some(s) if (500..600).contains(&s))
    }

    /// Get HTTP status code if available
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Error::Transport { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<url::ParseError> for Error {
    fn from(e: url::ParseError) -> Self {
        Error::Url {
            url: String::new(),
            reason: e.to_string(),
        }
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Other(s)
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Other(s.to_string())
    }
}
