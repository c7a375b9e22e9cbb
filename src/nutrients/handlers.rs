use axum::{
    extract::{Path, RawQuery, State},
    http::Method,
    response::Response,
    routing::get,
    Router,
};
use tracing::instrument;

use crate::auth::extract::BearerToken;
use crate::error::ApiError;
use crate::proxy::{proxy, with_query};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/nutrients", get(list_nutrients))
        .route("/nutrients/category/:category", get(nutrients_by_category))
}

#[instrument(skip(state, token))]
async fn list_nutrients(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    RawQuery(query): RawQuery,
) -> Result<Response, ApiError> {
    let path = with_query("/api/nutrients".into(), query);
    proxy(&state, Method::GET, &path, Some(&token), None).await
}

#[instrument(skip(state, token))]
async fn nutrients_by_category(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    Path(category): Path<String>,
) -> Result<Response, ApiError> {
    proxy(
        &state,
        Method::GET,
        &format!("/api/nutrients/category/{category}"),
        Some(&token),
        None,
    )
    .await
}
