use axum::http::Method;
use uuid::Uuid;

use super::dto::{Food, FoodNutrient, FoodNutrientPayload, FoodPayload};
use crate::backend::BackendClient;
use crate::error::ApiError;

impl BackendClient {
    pub async fn list_foods(&self, token: &str) -> Result<Vec<Food>, ApiError> {
        self.get_json(token, "/api/foods").await
    }

    pub async fn create_food(&self, token: &str, food: &FoodPayload) -> Result<Food, ApiError> {
        self.send_json(Method::POST, Some(token), "/api/foods", food)
            .await
    }

    pub async fn get_food(&self, token: &str, id: Uuid) -> Result<Food, ApiError> {
        self.get_json(token, &format!("/api/foods/{id}")).await
    }

    pub async fn update_food(
        &self,
        token: &str,
        id: Uuid,
        food: &FoodPayload,
    ) -> Result<Food, ApiError> {
        self.send_json(Method::PUT, Some(token), &format!("/api/foods/{id}"), food)
            .await
    }

    pub async fn delete_food(&self, token: &str, id: Uuid) -> Result<(), ApiError> {
        self.send_empty(Method::DELETE, token, &format!("/api/foods/{id}"))
            .await
    }

    pub async fn list_food_nutrients(&self, token: &str) -> Result<Vec<FoodNutrient>, ApiError> {
        self.get_json(token, "/api/food-nutrients").await
    }

    pub async fn create_food_nutrient(
        &self,
        token: &str,
        value: &FoodNutrientPayload,
    ) -> Result<FoodNutrient, ApiError> {
        self.send_json(Method::POST, Some(token), "/api/food-nutrients", value)
            .await
    }

    pub async fn get_food_nutrient(&self, token: &str, id: Uuid) -> Result<FoodNutrient, ApiError> {
        self.get_json(token, &format!("/api/food-nutrients/{id}"))
            .await
    }

    pub async fn update_food_nutrient(
        &self,
        token: &str,
        id: Uuid,
        value: &FoodNutrientPayload,
    ) -> Result<FoodNutrient, ApiError> {
        self.send_json(
            Method::PUT,
            Some(token),
            &format!("/api/food-nutrients/{id}"),
            value,
        )
        .await
    }

    pub async fn delete_food_nutrient(&self, token: &str, id: Uuid) -> Result<(), ApiError> {
        self.send_empty(Method::DELETE, token, &format!("/api/food-nutrients/{id}"))
            .await
    }

    /// All nutrient values recorded for one food.
    pub async fn nutrients_for_food(
        &self,
        token: &str,
        food_id: Uuid,
    ) -> Result<Vec<FoodNutrient>, ApiError> {
        self.get_json(token, &format!("/api/food-nutrients/food/{food_id}"))
            .await
    }
}
