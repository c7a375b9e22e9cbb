use axum::{
    http::{header, Method},
    response::{IntoResponse, Response},
};
use bytes::Bytes;

use crate::error::ApiError;
use crate::state::AppState;

/// Forward a request to the upstream and reproduce its status and body
/// untouched. Backend error bodies are never rewritten; only an unreachable
/// upstream produces a synthesized message (as a 502, via `ApiError`).
pub async fn proxy(
    state: &AppState,
    method: Method,
    path: &str,
    token: Option<&str>,
    body: Option<Bytes>,
) -> Result<Response, ApiError> {
    let (status, bytes) = state.backend.forward(method, path, token, body).await?;
    Ok((
        status,
        [(header::CONTENT_TYPE, "application/json")],
        bytes,
    )
        .into_response())
}

/// Append a forwarded query string, when the caller sent one.
pub fn with_query(path: String, query: Option<String>) -> String {
    match query {
        Some(q) if !q.is_empty() => format!("{path}?{q}"),
        _ => path,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_is_appended_when_present() {
        assert_eq!(
            with_query("/api/foods".into(), Some("search=oat".into())),
            "/api/foods?search=oat"
        );
        assert_eq!(with_query("/api/foods".into(), Some(String::new())), "/api/foods");
        assert_eq!(with_query("/api/foods".into(), None), "/api/foods");
    }
}
