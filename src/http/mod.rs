// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTTP layer for the API wrapper
//!
//! Plain request/response types, the structured request body, multipart
//! form-data encoding and the transport seam the pipeline calls into.

mod body;
mod multipart;
mod request;
mod response;
mod transport;

pub use body::{Body, FileHandle};
pub use multipart::{FormValue, MultipartEncoding};
pub use request::{ApiRequest, Method};
pub use response::{
    describe_failure, is_truthy, ResponseContract, ResponseTransform, ReturnProperty,
    TransportResponse, REDIRECT_STATUS_CODES,
};
pub use transport::{Payload, ReqwestTransport, Transport, TransportRequest, TransportResult};

pub(crate) use response::classify;

/// Query parameter appended to GET requests when cache busting is enabled
pub const NOCACHE_PARAM: &str = "_nocache";

/// Common header values
pub mod values {
    pub const NO_CACHE: &str = "no-cache";
    pub const APPLICATION_JSON: &str = "application/json";
}
