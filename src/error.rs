use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;

/// What went wrong, as a closed set so callers can branch exhaustively
/// instead of probing response shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Rejected before any network call (malformed date, bad id).
    Validation,
    /// Missing or rejected credentials.
    Auth,
    /// The upstream said the resource does not exist.
    NotFound,
    /// Any other upstream error response.
    Upstream,
    /// The upstream could not be reached at all.
    Network,
}

/// Error carried through the whole crate. `Clone` because the dedup layer
/// fans a single failure out to every concurrent waiter.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ApiError {
    pub kind: ErrorKind,
    /// Upstream status code, when one was received.
    pub status: Option<u16>,
    pub message: String,
    /// Original upstream body, forwarded verbatim where available.
    pub raw: Option<Value>,
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Validation,
            status: None,
            message: message.into(),
            raw: None,
        }
    }

    pub fn auth(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Auth,
            status: None,
            message: message.into(),
            raw: None,
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Network,
            status: None,
            message: message.into(),
            raw: None,
        }
    }

    /// Build an error from an upstream error response. The message is the
    /// body's `message` field, else its `error` field, else a generic text
    /// for the status code.
    pub fn from_upstream(status: StatusCode, body: Option<Value>) -> Self {
        let message = body
            .as_ref()
            .and_then(|b| b.get("message").and_then(Value::as_str))
            .or_else(|| {
                body.as_ref()
                    .and_then(|b| b.get("error").and_then(Value::as_str))
            })
            .map(str::to_string)
            .unwrap_or_else(|| generic_message(status).to_string());

        let kind = match status {
            StatusCode::UNAUTHORIZED => ErrorKind::Auth,
            StatusCode::NOT_FOUND => ErrorKind::NotFound,
            _ => ErrorKind::Upstream,
        };

        Self {
            kind,
            status: Some(status.as_u16()),
            message,
            raw: body,
        }
    }

    pub fn from_transport(err: reqwest::Error) -> Self {
        Self::network(format!("upstream unreachable: {err}"))
    }

    pub fn is_not_found(&self) -> bool {
        self.kind == ErrorKind::NotFound
    }
}

fn generic_message(status: StatusCode) -> &'static str {
    match status {
        StatusCode::BAD_REQUEST => "Bad request",
        StatusCode::UNAUTHORIZED => "Authentication required",
        StatusCode::FORBIDDEN => "Forbidden",
        StatusCode::NOT_FOUND => "Not found",
        StatusCode::CONFLICT => "Conflict",
        StatusCode::UNPROCESSABLE_ENTITY => "Unprocessable entity",
        StatusCode::SERVICE_UNAVAILABLE => "Service unavailable",
        s if s.is_server_error() => "Server error",
        _ => "Request failed",
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.kind {
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::Auth => StatusCode::UNAUTHORIZED,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Upstream => self
                .status
                .and_then(|s| StatusCode::from_u16(s).ok())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            ErrorKind::Network => StatusCode::BAD_GATEWAY,
        };

        // Forward the original body when there is one, synthesize otherwise.
        match self.raw {
            Some(body) => (status, Json(body)).into_response(),
            None => (status, Json(json!({ "message": self.message }))).into_response(),
        }
    }
}
