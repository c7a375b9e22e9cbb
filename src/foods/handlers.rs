use axum::{
    extract::{Path, RawQuery, State},
    http::Method,
    response::Response,
    routing::get,
    Router,
};
use bytes::Bytes;
use tracing::instrument;
use uuid::Uuid;

use crate::auth::extract::BearerToken;
use crate::error::ApiError;
use crate::proxy::{proxy, with_query};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/foods", get(list_foods).post(create_food))
        .route(
            "/foods/:id",
            get(get_food).put(update_food).delete(delete_food),
        )
        .route(
            "/food-nutrients",
            get(list_food_nutrients).post(create_food_nutrient),
        )
        .route(
            "/food-nutrients/:id",
            get(get_food_nutrient)
                .put(update_food_nutrient)
                .delete(delete_food_nutrient),
        )
        .route("/food-nutrients/food/:food_id", get(nutrients_for_food))
}

#[instrument(skip(state, token))]
async fn list_foods(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    RawQuery(query): RawQuery,
) -> Result<Response, ApiError> {
    let path = with_query("/api/foods".into(), query);
    proxy(&state, Method::GET, &path, Some(&token), None).await
}

#[instrument(skip(state, token, body))]
async fn create_food(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    body: Bytes,
) -> Result<Response, ApiError> {
    proxy(&state, Method::POST, "/api/foods", Some(&token), Some(body)).await
}

#[instrument(skip(state, token))]
async fn get_food(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    Path(id): Path<Uuid>,
) -> Result<Response, ApiError> {
    proxy(
        &state,
        Method::GET,
        &format!("/api/foods/{id}"),
        Some(&token),
        None,
    )
    .await
}

#[instrument(skip(state, token, body))]
async fn update_food(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    Path(id): Path<Uuid>,
    body: Bytes,
) -> Result<Response, ApiError> {
    proxy(
        &state,
        Method::PUT,
        &format!("/api/foods/{id}"),
        Some(&token),
        Some(body),
    )
    .await
}

#[instrument(skip(state, token))]
async fn delete_food(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    Path(id): Path<Uuid>,
) -> Result<Response, ApiError> {
    proxy(
        &state,
        Method::DELETE,
        &format!("/api/foods/{id}"),
        Some(&token),
        None,
    )
    .await
}

#[instrument(skip(state, token))]
async fn list_food_nutrients(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    RawQuery(query): RawQuery,
) -> Result<Response, ApiError> {
    let path = with_query("/api/food-nutrients".into(), query);
    proxy(&state, Method::GET, &path, Some(&token), None).await
}

#[instrument(skip(state, token, body))]
async fn create_food_nutrient(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    body: Bytes,
) -> Result<Response, ApiError> {
    proxy(
        &state,
        Method::POST,
        "/api/food-nutrients",
        Some(&token),
        Some(body),
    )
    .await
}

#[instrument(skip(state, token))]
async fn get_food_nutrient(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    Path(id): Path<Uuid>,
) -> Result<Response, ApiError> {
    proxy(
        &state,
        Method::GET,
        &format!("/api/food-nutrients/{id}"),
        Some(&token),
        None,
    )
    .await
}

#[instrument(skip(state, token, body))]
async fn update_food_nutrient(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    Path(id): Path<Uuid>,
    body: Bytes,
) -> Result<Response, ApiError> {
    proxy(
        &state,
        Method::PUT,
        &format!("/api/food-nutrients/{id}"),
        Some(&token),
        Some(body),
    )
    .await
}

#[instrument(skip(state, token))]
async fn delete_food_nutrient(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    Path(id): Path<Uuid>,
) -> Result<Response, ApiError> {
    proxy(
        &state,
        Method::DELETE,
        &format!("/api/food-nutrients/{id}"),
        Some(&token),
        None,
    )
    .await
}

#[instrument(skip(state, token))]
async fn nutrients_for_food(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    Path(food_id): Path<Uuid>,
) -> Result<Response, ApiError> {
    proxy(
        &state,
        Method::GET,
        &format!("/api/food-nutrients/food/{food_id}"),
        Some(&token),
        None,
    )
    .await
}
