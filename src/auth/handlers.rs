use axum::{
    extract::State,
    http::Method,
    response::Response,
    routing::{delete, get, post, put},
    Router,
};
use bytes::Bytes;
use tracing::instrument;

use super::extract::BearerToken;
use crate::error::ApiError;
use crate::proxy::proxy;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/register", post(register))
        .route("/auth/logout", post(logout))
        .route("/auth/cookie-login", post(cookie_login))
        .route("/auth/status", get(status))
        .route("/auth/profile", get(profile))
        .route("/profile", put(update_profile))
        .route("/password", put(change_password))
        .route("/account", delete(delete_account))
}

#[instrument(skip(state, body))]
async fn login(State(state): State<AppState>, body: Bytes) -> Result<Response, ApiError> {
    proxy(&state, Method::POST, "/api/auth/login", None, Some(body)).await
}

#[instrument(skip(state, body))]
async fn register(State(state): State<AppState>, body: Bytes) -> Result<Response, ApiError> {
    proxy(&state, Method::POST, "/api/auth/register", None, Some(body)).await
}

#[instrument(skip(state, token))]
async fn logout(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
) -> Result<Response, ApiError> {
    proxy(&state, Method::POST, "/api/auth/logout", Some(&token), None).await
}

#[instrument(skip(state, body))]
async fn cookie_login(State(state): State<AppState>, body: Bytes) -> Result<Response, ApiError> {
    proxy(
        &state,
        Method::POST,
        "/api/auth/cookie-login",
        None,
        Some(body),
    )
    .await
}

#[instrument(skip(state, token))]
async fn status(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
) -> Result<Response, ApiError> {
    proxy(&state, Method::GET, "/api/auth/status", Some(&token), None).await
}

#[instrument(skip(state, token))]
async fn profile(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
) -> Result<Response, ApiError> {
    proxy(&state, Method::GET, "/api/auth/profile", Some(&token), None).await
}

#[instrument(skip(state, token, body))]
async fn update_profile(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    body: Bytes,
) -> Result<Response, ApiError> {
    proxy(&state, Method::PUT, "/api/profile", Some(&token), Some(body)).await
}

#[instrument(skip(state, token, body))]
async fn change_password(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    body: Bytes,
) -> Result<Response, ApiError> {
    proxy(&state, Method::PUT, "/api/password", Some(&token), Some(body)).await
}

#[instrument(skip(state, token))]
async fn delete_account(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
) -> Result<Response, ApiError> {
    proxy(&state, Method::DELETE, "/api/account", Some(&token), None).await
}
