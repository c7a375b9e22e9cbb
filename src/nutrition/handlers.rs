use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use tracing::instrument;
use uuid::Uuid;

use super::summary::{DailyNutrition, MealNutrition, WeeklyDay};
use super::week::fetch_week;
use crate::auth::extract::BearerToken;
use crate::dates::parse_day;
use crate::error::ApiError;
use crate::nutrition::client::NutritionBackend;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/nutrition/date/:date", get(daily))
        .route("/nutrition/meal/:meal_log_id", get(meal))
        .route("/nutrition/week/:date", get(weekly))
}

/// Daily aggregate. Concurrent requests for the same token and date share
/// one upstream call through the state-wide flight table.
#[instrument(skip(state, token))]
async fn daily(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    Path(date): Path<String>,
) -> Result<Json<DailyNutrition>, ApiError> {
    let day = parse_day(&date)?;
    let backend = state.backend.clone();
    let daily = state
        .daily_flights
        .join((token.clone(), day), move || async move {
            backend.daily_summary(&token, day).await
        })
        .await?;
    Ok(Json(daily))
}

#[instrument(skip(state, token))]
async fn meal(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    Path(meal_log_id): Path<Uuid>,
) -> Result<Json<MealNutrition>, ApiError> {
    let backend = state.backend.clone();
    let summary = state
        .meal_flights
        .join((token.clone(), meal_log_id), move || async move {
            backend.meal_summary(&token, meal_log_id).await
        })
        .await?;
    Ok(Json(summary))
}

/// Seven days ending at the given date, assembled from per-day fetches.
/// Days the backend has no data for come back as zero entries; the daily
/// flight table keeps a concurrent daily view from paying twice.
#[instrument(skip(state, token))]
async fn weekly(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    Path(date): Path<String>,
) -> Result<Json<Vec<WeeklyDay>>, ApiError> {
    let end = parse_day(&date)?;
    let week = fetch_week(end, |day| {
        let backend = state.backend.clone();
        let flights = state.daily_flights.clone();
        let token = token.clone();
        async move {
            flights
                .join((token.clone(), day), move || async move {
                    backend.daily_summary(&token, day).await
                })
                .await
        }
    })
    .await?;
    Ok(Json(week))
}
