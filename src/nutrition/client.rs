use async_trait::async_trait;
use time::Date;
use uuid::Uuid;

use crate::backend::BackendClient;
use crate::dates::format_day;
use crate::error::ApiError;
use crate::meal_logs::dto::MealLog;
use crate::nutrition::summary::{DailyNutrition, MealNutrition};

/// The slice of the upstream API the aggregation layer depends on. A trait
/// so trackers can be fed a test double instead of a live backend.
#[async_trait]
pub trait NutritionBackend: Send + Sync {
    async fn daily_summary(&self, token: &str, date: Date) -> Result<DailyNutrition, ApiError>;
    async fn meal_summary(&self, token: &str, meal_log_id: Uuid) -> Result<MealNutrition, ApiError>;
    async fn meals_for_date(&self, token: &str, date: Date) -> Result<Vec<MealLog>, ApiError>;
}

#[async_trait]
impl NutritionBackend for BackendClient {
    async fn daily_summary(&self, token: &str, date: Date) -> Result<DailyNutrition, ApiError> {
        self.get_json(token, &format!("/api/nutrition/date/{}", format_day(date)))
            .await
    }

    async fn meal_summary(&self, token: &str, meal_log_id: Uuid) -> Result<MealNutrition, ApiError> {
        self.get_json(token, &format!("/api/nutrition/meal/{meal_log_id}"))
            .await
    }

    async fn meals_for_date(&self, token: &str, date: Date) -> Result<Vec<MealLog>, ApiError> {
        self.get_json(token, &format!("/api/meal-logs/user/date/{}", format_day(date)))
            .await
    }
}
