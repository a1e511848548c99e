//! Response classifier: raw HTTP response in, JSON value or typed error out.

use serde_json::Value;

use crate::error::ApiError;
use crate::http::HttpResponse;

/// Decode a successful response, or turn a failed one into an `ApiError`.
///
/// Both branches decode the body as UTF-8 JSON. A malformed body is logged
/// and returned as `ApiError::Decode`; it is never replaced by a default.
pub fn process_response(response: HttpResponse) -> Result<Value, ApiError> {
    tracing::debug!(status = response.status, bytes = response.body.len(), "received response");
    let success = response.is_success();
    let status = response.status;
    let value = decode_json(status, response.body)?;
    if success {
        Ok(value)
    } else {
        Err(classify(status, value))
    }
}

/// Map a non-success status and its decoded error body to an `ApiError`.
pub fn classify(status: u16, payload: Value) -> ApiError {
    match status {
        401 => ApiError::Unauthorized { payload },
        400 | 500 => ApiError::BadRequest { status, payload },
        _ => ApiError::Client { status, payload },
    }
}

fn decode_json(status: u16, body: Vec<u8>) -> Result<Value, ApiError> {
    serde_json::from_slice(&body).map_err(|source| {
        let body = String::from_utf8_lossy(&body).into_owned();
        tracing::error!(status, %body, "value error when parsing JSON from response data");
        ApiError::Decode { status, body, source }
    })
}
