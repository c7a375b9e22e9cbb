use axum::{
    extract::{Path, RawQuery, State},
    http::Method,
    response::Response,
    routing::{get, post},
    Router,
};
use bytes::Bytes;
use tracing::instrument;
use uuid::Uuid;

use crate::auth::extract::BearerToken;
use crate::dates::{format_day, parse_day};
use crate::error::ApiError;
use crate::proxy::{proxy, with_query};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/meal-logs", get(list_meal_logs).post(create_meal_log))
        .route(
            "/meal-logs/:id",
            get(get_meal_log).put(update_meal_log).delete(delete_meal_log),
        )
        .route("/meal-logs/user/date/:date", get(meal_logs_for_date))
        .route("/meal-logs/:id/items", post(add_items))
        .route("/meal-log-items", get(list_items).post(create_item))
        .route(
            "/meal-log-items/:id",
            get(get_item).put(update_item).delete(delete_item),
        )
        .route("/meal-log-items/meal-log/:meal_log_id", get(items_for_meal_log))
        .route("/meal-log-items/food/:food_id", get(items_for_food))
}

#[instrument(skip(state, token))]
async fn list_meal_logs(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    RawQuery(query): RawQuery,
) -> Result<Response, ApiError> {
    let path = with_query("/api/meal-logs".into(), query);
    proxy(&state, Method::GET, &path, Some(&token), None).await
}

#[instrument(skip(state, token, body))]
async fn create_meal_log(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    body: Bytes,
) -> Result<Response, ApiError> {
    proxy(&state, Method::POST, "/api/meal-logs", Some(&token), Some(body)).await
}

#[instrument(skip(state, token))]
async fn get_meal_log(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    Path(id): Path<Uuid>,
) -> Result<Response, ApiError> {
    proxy(
        &state,
        Method::GET,
        &format!("/api/meal-logs/{id}"),
        Some(&token),
        None,
    )
    .await
}

#[instrument(skip(state, token, body))]
async fn update_meal_log(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    Path(id): Path<Uuid>,
    body: Bytes,
) -> Result<Response, ApiError> {
    proxy(
        &state,
        Method::PUT,
        &format!("/api/meal-logs/{id}"),
        Some(&token),
        Some(body),
    )
    .await
}

#[instrument(skip(state, token))]
async fn delete_meal_log(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    Path(id): Path<Uuid>,
) -> Result<Response, ApiError> {
    proxy(
        &state,
        Method::DELETE,
        &format!("/api/meal-logs/{id}"),
        Some(&token),
        None,
    )
    .await
}

/// The date is validated here, before any network hop; the backend never
/// sees a malformed or impossible date.
#[instrument(skip(state, token))]
async fn meal_logs_for_date(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    Path(date): Path<String>,
) -> Result<Response, ApiError> {
    let day = parse_day(&date)?;
    proxy(
        &state,
        Method::GET,
        &format!("/api/meal-logs/user/date/{}", format_day(day)),
        Some(&token),
        None,
    )
    .await
}

#[instrument(skip(state, token, body))]
async fn add_items(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    Path(id): Path<Uuid>,
    body: Bytes,
) -> Result<Response, ApiError> {
    proxy(
        &state,
        Method::POST,
        &format!("/api/meal-logs/{id}/items"),
        Some(&token),
        Some(body),
    )
    .await
}

#[instrument(skip(state, token))]
async fn list_items(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    RawQuery(query): RawQuery,
) -> Result<Response, ApiError> {
    let path = with_query("/api/meal-log-items".into(), query);
    proxy(&state, Method::GET, &path, Some(&token), None).await
}

#[instrument(skip(state, token, body))]
async fn create_item(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    body: Bytes,
) -> Result<Response, ApiError> {
    proxy(
        &state,
        Method::POST,
        "/api/meal-log-items",
        Some(&token),
        Some(body),
    )
    .await
}

#[instrument(skip(state, token))]
async fn get_item(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    Path(id): Path<Uuid>,
) -> Result<Response, ApiError> {
    proxy(
        &state,
        Method::GET,
        &format!("/api/meal-log-items/{id}"),
        Some(&token),
        None,
    )
    .await
}

#[instrument(skip(state, token, body))]
async fn update_item(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    Path(id): Path<Uuid>,
    body: Bytes,
) -> Result<Response, ApiError> {
    proxy(
        &state,
        Method::PUT,
        &format!("/api/meal-log-items/{id}"),
        Some(&token),
        Some(body),
    )
    .await
}

#[instrument(skip(state, token))]
async fn delete_item(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    Path(id): Path<Uuid>,
) -> Result<Response, ApiError> {
    proxy(
        &state,
        Method::DELETE,
        &format!("/api/meal-log-items/{id}"),
        Some(&token),
        None,
    )
    .await
}

#[instrument(skip(state, token))]
async fn items_for_meal_log(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    Path(meal_log_id): Path<Uuid>,
) -> Result<Response, ApiError> {
    proxy(
        &state,
        Method::GET,
        &format!("/api/meal-log-items/meal-log/{meal_log_id}"),
        Some(&token),
        None,
    )
    .await
}

#[instrument(skip(state, token))]
async fn items_for_food(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    Path(food_id): Path<Uuid>,
) -> Result<Response, ApiError> {
    proxy(
        &state,
        Method::GET,
        &format!("/api/meal-log-items/food/{food_id}"),
        Some(&token),
        None,
    )
    .await
}
