//! Transport failure taxonomy and its user-facing projection.
//!
//! A failure is classified exactly once, where the transport error is first
//! observed, into a [`FailureKind`]. Retry decisions ([`classify`]) and user
//! messages ([`describe_error`]) are both derived from that value.

use std::error::Error as StdError;

use thiserror::Error;

pub const NETWORK_MESSAGE: &str = "Network error. Please check your internet connection.";
pub const TIMEOUT_MESSAGE: &str = "Request timed out. Please try again.";
pub const RATE_LIMITED_MESSAGE: &str = "Too many requests. Please wait a moment and try again.";
pub const SERVER_ERROR_MESSAGE: &str = "Server error. Please try again later.";
pub const NOT_FOUND_MESSAGE: &str = "Location not found. Please try a different city.";
pub const UNEXPECTED_MESSAGE: &str = "An unexpected error occurred. Please try again.";

/// Transport-level signal carried by a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// Unreachable host, aborted connection, generic network failure.
    Network,
    Timeout,
    /// The server answered with a non-success status.
    HttpStatus(u16),
    /// No transport metadata (application errors, malformed input).
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Classification {
    Retryable,
    Fatal,
}

/// Decide whether a failure of the given kind is worth retrying.
pub fn classify(kind: FailureKind) -> Classification {
    match kind {
        FailureKind::Network | FailureKind::Timeout => Classification::Retryable,
        FailureKind::HttpStatus(429) => Classification::Retryable,
        FailureKind::HttpStatus(status) if (500..=599).contains(&status) => {
            Classification::Retryable
        }
        FailureKind::HttpStatus(_) | FailureKind::Unknown => Classification::Fatal,
    }
}

/// Errors that know which transport signal produced them.
pub trait Transient {
    fn failure_kind(&self) -> FailureKind;

    fn classification(&self) -> Classification {
        classify(self.failure_kind())
    }
}

/// Error returned by weather and geocoding requests.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("network error: {0}")]
    Network(String),

    #[error("request timed out: {0}")]
    Timeout(String),

    #[error("request failed with status code {status}")]
    Http {
        status: u16,
        /// `reason` or `message` field of a JSON error body, if any.
        server_message: Option<String>,
        body: String,
    },

    #[error("failed to decode response: {0}")]
    Decode(String),

    /// Geocoding returned no match for the query.
    #[error("no location found for '{0}'")]
    NotFound(String),

    #[error("{0}")]
    Application(String),
}

impl FetchError {
    /// Build an HTTP error from a status and the raw response body.
    pub fn from_status(status: u16, body: String) -> Self {
        let server_message = server_message(&body);
        FetchError::Http {
            status,
            server_message,
            body: truncate_body(&body),
        }
    }

    /// A failure while streaming a response body.
    ///
    /// reqwest reports an aborted body read as a decode error; payload
    /// decoding happens separately, so anything here is a transport failure.
    pub fn from_body_read(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout(err.to_string())
        } else {
            FetchError::Network(format!("failed to read response body: {err}"))
        }
    }
}

impl Transient for FetchError {
    fn failure_kind(&self) -> FailureKind {
        match self {
            FetchError::Network(_) => FailureKind::Network,
            FetchError::Timeout(_) => FailureKind::Timeout,
            FetchError::Http { status, .. } => FailureKind::HttpStatus(*status),
            FetchError::Decode(_) | FetchError::NotFound(_) | FetchError::Application(_) => {
                FailureKind::Unknown
            }
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout(err.to_string())
        } else if err.is_connect() || err.is_request() || err.is_body() {
            FetchError::Network(err.to_string())
        } else if let Some(status) = err.status() {
            FetchError::Http {
                status: status.as_u16(),
                server_message: None,
                body: String::new(),
            }
        } else if err.is_decode() {
            FetchError::Decode(err.to_string())
        } else {
            FetchError::Application(err.to_string())
        }
    }
}

/// Human-readable message for any error, suitable for direct display.
///
/// Transport metadata is recovered by downcasting to [`FetchError`]; other
/// errors fall back to their own message. Never returns an empty string.
pub fn describe_error(error: &(dyn StdError + 'static)) -> String {
    if let Some(fetch) = error.downcast_ref::<FetchError>() {
        if let Some(message) = describe_fetch(fetch) {
            return message;
        }
    }

    non_empty(error.to_string()).unwrap_or_else(|| UNEXPECTED_MESSAGE.to_string())
}

/// [`describe_error`] for errors that went through `anyhow` context layers.
pub fn describe_anyhow(error: &anyhow::Error) -> String {
    for cause in error.chain() {
        if let Some(fetch) = cause.downcast_ref::<FetchError>() {
            if let Some(message) = describe_fetch(fetch) {
                return message;
            }
        }
    }

    non_empty(error.to_string()).unwrap_or_else(|| UNEXPECTED_MESSAGE.to_string())
}

fn describe_fetch(error: &FetchError) -> Option<String> {
    let fixed = match error.failure_kind() {
        FailureKind::Network => Some(NETWORK_MESSAGE),
        FailureKind::Timeout => Some(TIMEOUT_MESSAGE),
        FailureKind::HttpStatus(429) => Some(RATE_LIMITED_MESSAGE),
        FailureKind::HttpStatus(status) if (500..=599).contains(&status) => {
            Some(SERVER_ERROR_MESSAGE)
        }
        FailureKind::HttpStatus(404) => Some(NOT_FOUND_MESSAGE),
        _ => None,
    };
    if let Some(message) = fixed {
        return Some(message.to_string());
    }

    match error {
        FetchError::Http {
            server_message: Some(message),
            ..
        } => non_empty(message.clone()),
        FetchError::NotFound(_) => Some(NOT_FOUND_MESSAGE.to_string()),
        _ => None,
    }
}

fn non_empty(message: String) -> Option<String> {
    if message.trim().is_empty() { None } else { Some(message) }
}

fn server_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["message", "reason"]
        .iter()
        .filter_map(|key| value.get(key).and_then(|v| v.as_str()))
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn http(status: u16) -> FetchError {
        FetchError::from_status(status, String::new())
    }

    #[test]
    fn classify_matches_transport_signals() {
        assert_eq!(classify(FailureKind::Network), Classification::Retryable);
        assert_eq!(classify(FailureKind::Timeout), Classification::Retryable);
        assert_eq!(classify(FailureKind::HttpStatus(429)), Classification::Retryable);
        assert_eq!(classify(FailureKind::HttpStatus(500)), Classification::Retryable);
        assert_eq!(classify(FailureKind::HttpStatus(503)), Classification::Retryable);
        assert_eq!(classify(FailureKind::HttpStatus(599)), Classification::Retryable);

        assert_eq!(classify(FailureKind::HttpStatus(400)), Classification::Fatal);
        assert_eq!(classify(FailureKind::HttpStatus(404)), Classification::Fatal);
        assert_eq!(classify(FailureKind::HttpStatus(428)), Classification::Fatal);
        assert_eq!(classify(FailureKind::HttpStatus(600)), Classification::Fatal);
        assert_eq!(classify(FailureKind::Unknown), Classification::Fatal);
    }

    #[test]
    fn application_errors_are_fatal() {
        assert_eq!(FetchError::Decode("bad".into()).classification(), Classification::Fatal);
        assert_eq!(FetchError::NotFound("x".into()).classification(), Classification::Fatal);
        assert_eq!(
            FetchError::Application("boom".into()).classification(),
            Classification::Fatal
        );
    }

    #[test]
    fn describes_transport_failures() {
        assert_eq!(describe_error(&FetchError::Network("down".into())), NETWORK_MESSAGE);
        assert_eq!(describe_error(&FetchError::Timeout("slow".into())), TIMEOUT_MESSAGE);
        assert_eq!(describe_error(&http(429)), RATE_LIMITED_MESSAGE);
        assert_eq!(describe_error(&http(500)), SERVER_ERROR_MESSAGE);
        assert_eq!(describe_error(&http(502)), SERVER_ERROR_MESSAGE);
        assert_eq!(describe_error(&http(404)), NOT_FOUND_MESSAGE);
    }

    #[test]
    fn server_message_is_returned_verbatim() {
        let err = FetchError::from_status(400, r#"{"error":true,"reason":"Invalid latitude"}"#.into());
        assert_eq!(describe_error(&err), "Invalid latitude");

        let err = FetchError::from_status(422, r#"{"message":"Bad city"}"#.into());
        assert_eq!(describe_error(&err), "Bad city");
    }

    #[test]
    fn status_messages_win_over_server_message() {
        let err = FetchError::from_status(503, r#"{"reason":"maintenance"}"#.into());
        assert_eq!(describe_error(&err), SERVER_ERROR_MESSAGE);
    }

    #[test]
    fn other_status_without_body_uses_error_message() {
        let msg = describe_error(&http(400));
        assert_eq!(msg, "request failed with status code 400");
    }

    #[test]
    fn not_found_uses_location_message() {
        assert_eq!(describe_error(&FetchError::NotFound("Atlantis".into())), NOT_FOUND_MESSAGE);
    }

    #[test]
    fn plain_errors_use_their_message() {
        let err = std::io::Error::other("disk on fire");
        assert_eq!(describe_error(&err), "disk on fire");
    }

    #[test]
    fn empty_messages_fall_back_to_generic_text() {
        let err = std::io::Error::other("");
        assert_eq!(describe_error(&err), UNEXPECTED_MESSAGE);

        let err = FetchError::Application("   ".into());
        assert_eq!(describe_error(&err), UNEXPECTED_MESSAGE);

        let err = FetchError::from_status(400, r#"{"reason":""}"#.into());
        assert!(!describe_error(&err).is_empty());
    }

    #[test]
    fn anyhow_context_does_not_hide_transport_metadata() {
        let err = anyhow::Error::new(FetchError::Timeout("slow".into()))
            .context("Failed to fetch weather for Paris");
        assert_eq!(describe_anyhow(&err), TIMEOUT_MESSAGE);

        let err = anyhow::anyhow!("plain failure");
        assert_eq!(describe_anyhow(&err), "plain failure");

        let err = anyhow::anyhow!("");
        assert_eq!(describe_anyhow(&err), UNEXPECTED_MESSAGE);
    }

    #[test]
    fn long_bodies_are_truncated() {
        let body = "x".repeat(500);
        match FetchError::from_status(400, body) {
            FetchError::Http { body, server_message, .. } => {
                assert_eq!(body.len(), 203);
                assert!(server_message.is_none());
            }
            other => panic!("unexpected variant: {other:?}"),
        }
    }
}
