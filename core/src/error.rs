//! Error types for the Meetup API client.
//!
//! # Design
//! HTTP failures are split by status code so callers can tell "fix your
//! credentials" (`Unauthorized`) from "fix the request or try later"
//! (`BadRequest`) from everything else (`Client`). Each of these carries the
//! decoded JSON error payload returned by the service. A body that is not
//! valid JSON never reaches classification and surfaces as `Decode` with the
//! raw body attached.

use serde_json::Value;
use thiserror::Error;

/// Errors returned by `MeetupClient` and the response classifier.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The API key was absent or blank.
    #[error("Meetup API key not found")]
    MissingApiKey,

    /// The response body (success or error) was not valid JSON.
    #[error("failed to decode JSON body of HTTP {status} response: {source}")]
    Decode {
        status: u16,
        body: String,
        #[source]
        source: serde_json::Error,
    },

    /// HTTP 401: the service rejected the API key.
    #[error("unauthorized: {payload}")]
    Unauthorized { payload: Value },

    /// HTTP 400 or 500.
    ///
    /// Server errors share this variant with bad requests for compatibility
    /// with the service's historical clients; `status` tells them apart.
    #[error("bad request (HTTP {status}): {payload}")]
    BadRequest { status: u16, payload: Value },

    /// Any other non-2xx status.
    #[error("client error (HTTP {status}): {payload}")]
    Client { status: u16, payload: Value },

    /// The body was valid JSON but not the shape the operation expects.
    #[error("unexpected response shape: {0}")]
    UnexpectedShape(#[source] serde_json::Error),

    /// The request never produced an HTTP response.
    #[error("transport failure: {0}")]
    Transport(String),
}

impl ApiError {
    /// HTTP status code behind this error, if one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized { .. } => Some(401),
            ApiError::Decode { status, .. }
            | ApiError::BadRequest { status, .. }
            | ApiError::Client { status, .. } => Some(*status),
            ApiError::MissingApiKey | ApiError::UnexpectedShape(_) | ApiError::Transport(_) => None,
        }
    }

    /// Decoded error payload for HTTP-level failures.
    pub fn payload(&self) -> Option<&Value> {
        match self {
            ApiError::Unauthorized { payload }
            | ApiError::BadRequest { payload, .. }
            | ApiError::Client { payload, .. } => Some(payload),
            _ => None,
        }
    }
}
