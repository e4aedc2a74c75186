//
// Copyright (c) 2024 Oracle and/or its affiliates. All rights reserved.
//
// Licensed under the Universal Permissive License v 1.0 as shown at
//  https://oss.oracle.com/licenses/upl/
//
use num_enum::TryFromPrimitive;

include!(concat!(env!("OUT_DIR"), "/ua.rs"));

pub(crate) fn sdk_version() -> &'static str {
    SDK_VERSION
}

pub(crate) fn user_agent() -> &'static str {
    USER_AGENT
}

/// Enumeration of all possible errors returned by this library.
#[derive(Debug, Clone)]
pub struct CosmosError {
    pub code: CosmosErrorCode,
    pub message: String,
}

impl std::error::Error for CosmosError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        None
    }
}

impl std::fmt::Display for CosmosError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        return write!(f, "code={:?} message=\"{}\"", self.code, self.message);
    }
}

impl CosmosError {
    pub fn new(code: CosmosErrorCode, msg: &str) -> CosmosError {
        CosmosError {
            code,
            message: msg.to_string(),
        }
    }

    /// Map an HTTP-style status integer to an error code.
    ///
    /// Statuses the service is known to return map to their specific code;
    /// anything else maps to [`CosmosErrorCode::ServiceError`].
    pub fn from_status(status: u16, msg: &str) -> CosmosError {
        if let Ok(code) = CosmosErrorCode::try_from(status) {
            return CosmosError {
                code,
                message: msg.to_string(),
            };
        }
        CosmosError {
            code: CosmosErrorCode::ServiceError,
            message: format!("unexpected http status {}: {}", status, msg),
        }
    }
}

macro_rules! ia_error {
    ($($t:tt)*) => {{
        let m = format!($($t)*);
        CosmosError {
            code: crate::error::CosmosErrorCode::IllegalArgument,
            message: format!("{} ({})", m, crate::error::sdk_version()),
        }
    }};
}

pub(crate) use ia_error;

macro_rules! ia_err {
    ($($t:tt)*) => {{
        let m = format!($($t)*);
        Err(CosmosError {
            code: crate::error::CosmosErrorCode::IllegalArgument,
            message: format!("{} ({})", m, crate::error::sdk_version()),
        })
    }};
}

pub(crate) use ia_err;

impl From<reqwest::Error> for CosmosError {
    fn from(e: reqwest::Error) -> Self {
        let mut code = CosmosErrorCode::ServiceError;
        if e.is_timeout() {
            code = CosmosErrorCode::RequestTimeout;
        }
        CosmosError {
            code,
            message: format!(
                "reqwest error: {} ({})",
                e.to_string(),
                crate::error::sdk_version()
            ),
        }
    }
}

impl From<reqwest::header::InvalidHeaderValue> for CosmosError {
    fn from(e: reqwest::header::InvalidHeaderValue) -> Self {
        ia_error!("invalid header value: {}", e.to_string())
    }
}

impl From<url::ParseError> for CosmosError {
    fn from(e: url::ParseError) -> Self {
        ia_error!("error parsing url: {}", e.to_string())
    }
}

impl From<serde_json::Error> for CosmosError {
    fn from(e: serde_json::Error) -> Self {
        ia_error!("json error: {}", e.to_string())
    }
}

// CosmosErrorCode represents the error code.
// Error codes are divided into categories as follows:
//
// 1. Codes below 1000 mirror the HTTP status the service answered with.
// The Cosmos DB data plane reports all request failures this way; the
// variants listed are the statuses the service documents for the item and
// query operations this crate performs.
//
// 2. Codes from 1000 are client-side: illegal arguments detected before a
// request is sent, transport failures, and statuses the service is not
// expected to produce.
//
#[derive(Debug, Clone, Copy, Eq, PartialEq, TryFromPrimitive)]
#[repr(u16)]
pub enum CosmosErrorCode {
    /// The request body, headers, or query text were rejected by the service.
    BadRequest = 400,

    /// The authorization header was missing, malformed, or signed with the
    /// wrong key.
    Unauthorized = 401,

    /// The key is valid but does not grant access to the resource, or the
    /// account is in a state that forbids the operation.
    Forbidden = 403,

    /// The database, container, or item does not exist.
    ///
    /// Point reads surface this as an empty result rather than an error; see
    /// [`ReadItemResult::item()`](crate::ReadItemResult::item()).
    NotFound = 404,

    /// The operation did not complete within the service-side time limit.
    ServiceRequestTimeout = 408,

    /// A write conflicted with an existing item's unique index (id within
    /// the partition).
    Conflict = 409,

    /// The resource existed but was deleted, or its continuation state is no
    /// longer valid.
    Gone = 410,

    /// An optimistic-concurrency precondition (etag) failed.
    PreconditionFailed = 412,

    /// The item exceeds the service's per-item size limit.
    RequestEntityTooLarge = 413,

    /// The operation was throttled for exceeding provisioned throughput.
    ///
    /// This crate performs no retries; throttling is returned to the caller
    /// like any other failure.
    TooManyRequests = 429,

    /// Transient write conflict; the service suggests the request be retried.
    RetryWith = 449,

    /// An internal service failure.
    InternalServerError = 500,

    /// The service could not be reached in a healthy state.
    ServiceUnavailable = 503,

    /// The application provided an illegal argument for the operation.
    IllegalArgument = 1001,

    /// The request did not complete within the client-side timeout.
    RequestTimeout = 1002,

    /// A transport-level failure, or a response the client could not
    /// interpret (missing headers, undecodable body, unexpected status).
    ServiceError = 1003,

    /// An unknown error has occurred.
    UnknownError = 1125,
}
