use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Where a food definition came from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FoodSource {
    /// Entered by a user, owned by that user.
    User,
    /// Imported from an external food database.
    External,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Food {
    pub id: Uuid,
    pub name: String,
    pub serving_size_gram: f64,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub source: FoodSource,
    #[serde(default)]
    pub user_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodPayload {
    pub name: String,
    pub serving_size_gram: f64,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub source: FoodSource,
}

/// Per-food nutrient value. At most one row exists per
/// (food, nutrient) pair; the backend enforces it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodNutrient {
    pub id: Uuid,
    pub food_id: Uuid,
    pub nutrient_id: Uuid,
    pub amount_per_100g: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodNutrientPayload {
    pub food_id: Uuid,
    pub nutrient_id: Uuid,
    pub amount_per_100g: f64,
}
