use axum::http::Method;
use uuid::Uuid;

use super::dto::{MealLog, MealLogItem, NewMealLog, NewMealLogItem, UpdateMealLog, UpdateMealLogItem};
use crate::backend::BackendClient;
use crate::error::ApiError;

impl BackendClient {
    pub async fn create_meal_log(&self, token: &str, log: &NewMealLog) -> Result<MealLog, ApiError> {
        self.send_json(Method::POST, Some(token), "/api/meal-logs", log)
            .await
    }

    pub async fn list_meal_logs(&self, token: &str) -> Result<Vec<MealLog>, ApiError> {
        self.get_json(token, "/api/meal-logs").await
    }

    pub async fn get_meal_log(&self, token: &str, id: Uuid) -> Result<MealLog, ApiError> {
        self.get_json(token, &format!("/api/meal-logs/{id}")).await
    }

    pub async fn update_meal_log(
        &self,
        token: &str,
        id: Uuid,
        update: &UpdateMealLog,
    ) -> Result<MealLog, ApiError> {
        self.send_json(
            Method::PUT,
            Some(token),
            &format!("/api/meal-logs/{id}"),
            update,
        )
        .await
    }

    /// Deleting a meal log removes all of its items with it.
    pub async fn delete_meal_log(&self, token: &str, id: Uuid) -> Result<(), ApiError> {
        self.send_empty(Method::DELETE, token, &format!("/api/meal-logs/{id}"))
            .await
    }

    /// Add several items to a meal log in one call.
    pub async fn add_meal_log_items(
        &self,
        token: &str,
        meal_log_id: Uuid,
        items: &[NewMealLogItem],
    ) -> Result<Vec<MealLogItem>, ApiError> {
        self.send_json(
            Method::POST,
            Some(token),
            &format!("/api/meal-logs/{meal_log_id}/items"),
            items,
        )
        .await
    }

    pub async fn create_meal_log_item(
        &self,
        token: &str,
        item: &NewMealLogItem,
    ) -> Result<MealLogItem, ApiError> {
        self.send_json(Method::POST, Some(token), "/api/meal-log-items", item)
            .await
    }

    pub async fn get_meal_log_item(&self, token: &str, id: Uuid) -> Result<MealLogItem, ApiError> {
        self.get_json(token, &format!("/api/meal-log-items/{id}"))
            .await
    }

    pub async fn update_meal_log_item(
        &self,
        token: &str,
        id: Uuid,
        update: &UpdateMealLogItem,
    ) -> Result<MealLogItem, ApiError> {
        self.send_json(
            Method::PUT,
            Some(token),
            &format!("/api/meal-log-items/{id}"),
            update,
        )
        .await
    }

    pub async fn delete_meal_log_item(&self, token: &str, id: Uuid) -> Result<(), ApiError> {
        self.send_empty(Method::DELETE, token, &format!("/api/meal-log-items/{id}"))
            .await
    }

    pub async fn items_for_meal_log(
        &self,
        token: &str,
        meal_log_id: Uuid,
    ) -> Result<Vec<MealLogItem>, ApiError> {
        self.get_json(token, &format!("/api/meal-log-items/meal-log/{meal_log_id}"))
            .await
    }

    pub async fn items_for_food(
        &self,
        token: &str,
        food_id: Uuid,
    ) -> Result<Vec<MealLogItem>, ApiError> {
        self.get_json(token, &format!("/api/meal-log-items/food/{food_id}"))
            .await
    }
}
