use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Code attached to failures where the request never completed.
pub const NETWORK_ERROR: &str = "NETWORK_ERROR";
/// Code attached to successful responses whose payload failed validation.
pub const INVALID_RESPONSE: &str = "INVALID_RESPONSE";

const INVALID_RESPONSE_MESSAGE: &str = "Invalid response format from server";
const GENERIC_FAILURE_MESSAGE: &str = "Request failed";

/// Broad failure class derived from an [`ApiError`] code.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// Transport never completed (connection refused, reset, DNS...).
    Network,
    /// Server answered with a non-success status.
    Http,
    /// Server answered 2xx but the payload failed the shape check.
    InvalidResponse,
    /// Failure that could not be classified.
    Unclassified,
}

/// The single error shape surfaced by every transport operation.
///
/// Constructors and deserialization both go through [`ApiError::new`]; a
/// struct literal skips its blank-message substitution.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Error)]
#[serde(from = "ApiErrorFields")]
#[error("{}: {message}", .code.as_deref().unwrap_or("UNCLASSIFIED"))]
pub struct ApiError {
    /// User-displayable message, never empty.
    pub message: String,
    /// Machine-matchable code (stringified HTTP status, `NETWORK_ERROR`, `INVALID_RESPONSE`).
    pub code: Option<String>,
    /// Opaque diagnostic payload.
    pub details: Option<Value>,
}

#[derive(Deserialize)]
struct ApiErrorFields {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    details: Option<Value>,
}

impl From<ApiErrorFields> for ApiError {
    fn from(fields: ApiErrorFields) -> Self {
        Self::new(fields.message.unwrap_or_default(), fields.code, fields.details)
    }
}

impl ApiError {
    /// Construct an error, substituting a generic message for blank input.
    pub fn new(message: impl Into<String>, code: Option<String>, details: Option<Value>) -> Self {
        let message = message.into();
        let message = if message.trim().is_empty() {
            GENERIC_FAILURE_MESSAGE.to_owned()
        } else {
            message
        };
        Self {
            message,
            code,
            details,
        }
    }

    /// Request never completed.
    pub fn network(fallback: impl Into<String>) -> Self {
        Self::new(fallback, Some(NETWORK_ERROR.to_owned()), None)
    }

    /// Successful status with a payload that failed validation.
    pub fn invalid_response(details: Option<String>) -> Self {
        Self::new(
            INVALID_RESPONSE_MESSAGE,
            Some(INVALID_RESPONSE.to_owned()),
            details.map(Value::String),
        )
    }

    /// Failure that could not be assigned a code.
    pub fn unclassified(message: impl Into<String>, details: Option<String>) -> Self {
        Self::new(message, None, details.map(Value::String))
    }

    /// Build an error from a non-success response.
    ///
    /// `body` is the raw response body when it could be read. A JSON object
    /// body contributes its `message` (or string `detail`) and its
    /// `details`/`detail` diagnostic; anything else falls back to `fallback`.
    pub fn from_http_response(status: u16, body: Option<&[u8]>, fallback: &str) -> Self {
        let code = Some(status.to_string());
        let parsed = body
            .and_then(|bytes| serde_json::from_slice::<Value>(bytes).ok())
            .and_then(|value| match value {
                Value::Object(map) => Some(map),
                _ => None,
            });

        let Some(map) = parsed else {
            return Self::new(fallback, code, None);
        };

        let message = non_blank_str(map.get("message"))
            .or_else(|| non_blank_str(map.get("detail")))
            .unwrap_or(fallback)
            .to_owned();
        let details = map
            .get("details")
            .or_else(|| map.get("detail"))
            .filter(|value| !value.is_null())
            .cloned();

        Self::new(message, code, details)
    }

    /// Taxonomy variant this error belongs to.
    pub fn kind(&self) -> ApiErrorKind {
        match self.code.as_deref() {
            Some(NETWORK_ERROR) => ApiErrorKind::Network,
            Some(INVALID_RESPONSE) => ApiErrorKind::InvalidResponse,
            Some(code) if code.parse::<u16>().is_ok() => ApiErrorKind::Http,
            _ => ApiErrorKind::Unclassified,
        }
    }

    /// HTTP status carried by the code, if any.
    pub fn status(&self) -> Option<u16> {
        match self.kind() {
            ApiErrorKind::Http => self.code.as_deref().and_then(|code| code.parse().ok()),
            _ => None,
        }
    }
}

fn non_blank_str(value: Option<&Value>) -> Option<&str> {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}
