use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::nutrition::summary::MealBreakdown;

/// The four logging slots a day is divided into.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snacks,
}

/// One logged eating occasion. Owned by exactly one user; deleting it
/// removes its items with it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealLog {
    pub id: Uuid,
    pub user_id: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub meal_type: MealType,
    #[serde(default)]
    pub items: Vec<MealLogItem>,
    // Totals are filled in by the backend when it has computed them.
    #[serde(default)]
    pub total_calories: Option<f64>,
    #[serde(default)]
    pub total_protein: Option<f64>,
    #[serde(default)]
    pub total_carbs: Option<f64>,
    #[serde(default)]
    pub total_fat: Option<f64>,
}

impl MealLog {
    pub fn breakdown(&self) -> MealBreakdown {
        MealBreakdown {
            meal_log_id: self.id,
            meal_type: self.meal_type,
            total_calories: self.total_calories,
            total_protein: self.total_protein,
            total_carbs: self.total_carbs,
            total_fat: self.total_fat,
        }
    }
}

/// One food entry within a meal log. `quantity` counts servings,
/// `quantity_grams` is absolute mass; the two are edited independently and
/// no relationship between them is enforced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealLogItem {
    pub id: Uuid,
    pub meal_log_id: Uuid,
    pub food_id: Uuid,
    pub quantity: f64,
    pub quantity_grams: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMealLog {
    pub meal_type: MealType,
    #[serde(default)]
    pub items: Vec<NewMealLogItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMealLogItem {
    pub food_id: Uuid,
    pub quantity: f64,
    pub quantity_grams: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateMealLog {
    pub meal_type: MealType,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateMealLogItem {
    pub quantity: f64,
    pub quantity_grams: f64,
}
