//! HTTP exchange types and the transport seam.
//!
//! # Design
//! Requests and responses are plain data. `MeetupClient` builds an
//! `HttpRequest`, hands it to a `Transport`, and classifies the returned
//! `HttpResponse`. The core crate never opens a socket itself, so the
//! classifier and query building can be tested without a network.
//!
//! The response body is kept as raw bytes; decoding (and UTF-8 validation)
//! belongs to the classifier.

use crate::error::ApiError;

/// A GET request described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
}

/// An HTTP response described as plain data.
///
/// Produced by a `Transport` and consumed exactly once by
/// `classify::process_response`.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Executes a single blocking GET.
///
/// Implementations must return non-2xx responses as `Ok` so that status
/// interpretation stays with the classifier. `Err` is reserved for failures
/// that produced no response at all.
pub trait Transport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        (**self).execute(request)
    }
}
