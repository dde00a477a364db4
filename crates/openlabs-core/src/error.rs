use std::io;

use reqwest::StatusCode;
use thiserror::Error;

/// Unified error surface for the client core.
///
/// Every failure a command can hit maps onto one of these kinds so the
/// command layer can print a single human-readable line without inspecting
/// transport internals. A login response with no recognizable token is
/// deliberately not represented here; extraction returns `Option` and the
/// login flow degrades with a warning instead of failing.
#[derive(Error, Debug)]
pub enum Error {
    /// Filesystem failure reading or writing the configuration file.
    /// A missing file is a normal first run, never this error.
    #[error("configuration error: {0}")]
    Config(#[source] io::Error),

    /// Network-level failure: DNS, connection refused, timeout, TLS, or
    /// request construction. Surfaces immediately; there are no retries.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The API answered with a non-success status. `detail` carries the
    /// server's message verbatim when the body provided one.
    #[error("request failed with status {status}{}", .detail.as_deref().map(|d| format!(" - {d}")).unwrap_or_default())]
    Api {
        status: StatusCode,
        detail: Option<String>,
    },

    /// A response body claimed to be JSON but did not parse, or did not
    /// match the expected shape.
    #[error("invalid response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl Error {
    /// Classify a non-success response, digging a human-readable `detail`
    /// message out of the body when the server sent one.
    pub(crate) fn from_status(status: StatusCode, body: &str) -> Self {
        let detail = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|value| value.get("detail").cloned())
            .map(|detail| match detail {
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            });
        Error::Api { status, detail }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_status_extracts_detail() {
        let err = Error::from_status(StatusCode::NOT_FOUND, r#"{"detail": "range not found"}"#);
        match &err {
            Error::Api { status, detail } => {
                assert_eq!(*status, StatusCode::NOT_FOUND);
                assert_eq!(detail.as_deref(), Some("range not found"));
            }
            other => panic!("expected Api error, got {other:?}"),
        }
        assert!(err.to_string().contains("range not found"));
    }

    #[test]
    fn from_status_with_non_string_detail() {
        let err = Error::from_status(StatusCode::UNPROCESSABLE_ENTITY, r#"{"detail": {"field": "name"}}"#);
        assert!(err.to_string().contains("field"));
    }

    #[test]
    fn from_status_without_detail() {
        let err = Error::from_status(StatusCode::INTERNAL_SERVER_ERROR, "<html>oops</html>");
        match err {
            Error::Api { status, detail } => {
                assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
                assert!(detail.is_none());
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn from_status_with_empty_body() {
        let err = Error::from_status(StatusCode::UNAUTHORIZED, "");
        assert_eq!(err.to_string(), "request failed with status 401 Unauthorized");
    }
}
