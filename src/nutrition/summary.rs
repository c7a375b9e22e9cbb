use serde::{Deserialize, Serialize};
use time::Date;
use uuid::Uuid;

use crate::dates::day;
use crate::meal_logs::dto::MealType;

/// One macro nutrient line in a daily or per-meal summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MacroBreakdown {
    pub name: String,
    pub amount: f64,
    pub unit: String,
}

/// One vitamin/mineral line in a daily or per-meal summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MicroBreakdown {
    pub name: String,
    pub amount: f64,
    pub unit: String,
}

/// Per-meal slice of a daily summary. Totals are optional on the wire;
/// the reducer treats absent values as zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealBreakdown {
    pub meal_log_id: Uuid,
    pub meal_type: MealType,
    pub total_calories: Option<f64>,
    pub total_protein: Option<f64>,
    pub total_carbs: Option<f64>,
    pub total_fat: Option<f64>,
}

/// Daily aggregate as computed by the upstream backend. Derived, never
/// persisted here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyNutrition {
    #[serde(with = "day")]
    pub date: Date,
    #[serde(default)]
    pub user_id: Option<Uuid>,
    pub total_calories: f64,
    #[serde(default)]
    pub macro_nutrients: Vec<MacroBreakdown>,
    #[serde(default)]
    pub micro_nutrients: Vec<MicroBreakdown>,
    #[serde(default)]
    pub meals: Vec<MealBreakdown>,
}

/// Aggregate for a single meal log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealNutrition {
    pub meal_log_id: Uuid,
    pub total_calories: f64,
    #[serde(default)]
    pub macro_nutrients: Vec<MacroBreakdown>,
    #[serde(default)]
    pub micro_nutrients: Vec<MicroBreakdown>,
}

/// Calorie and macro totals reduced from a list of meals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MacroTotals {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

/// One day in a weekly trend view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeeklyDay {
    #[serde(with = "day")]
    pub date: Date,
    pub total_calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

impl WeeklyDay {
    /// Zero-value entry for a day the backend has no data for.
    pub fn empty(date: Date) -> Self {
        Self {
            date,
            total_calories: 0.0,
            protein: 0.0,
            carbs: 0.0,
            fat: 0.0,
        }
    }

    pub fn from_daily(daily: &DailyNutrition) -> Self {
        let totals = reduce_meal_totals(&daily.meals);
        Self {
            date: daily.date,
            total_calories: daily.total_calories,
            protein: totals.protein,
            carbs: totals.carbs,
            fat: totals.fat,
        }
    }
}

/// Sum calorie and macro totals across meals. Missing fields count as zero;
/// an empty slice reduces to the all-zero total.
pub fn reduce_meal_totals(meals: &[MealBreakdown]) -> MacroTotals {
    meals.iter().fold(MacroTotals::default(), |acc, meal| {
        MacroTotals {
            calories: acc.calories + meal.total_calories.unwrap_or(0.0),
            protein: acc.protein + meal.total_protein.unwrap_or(0.0),
            carbs: acc.carbs + meal.total_carbs.unwrap_or(0.0),
            fat: acc.fat + meal.total_fat.unwrap_or(0.0),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn meal(cal: Option<f64>, protein: Option<f64>, carbs: Option<f64>, fat: Option<f64>) -> MealBreakdown {
        MealBreakdown {
            meal_log_id: Uuid::new_v4(),
            meal_type: MealType::Lunch,
            total_calories: cal,
            total_protein: protein,
            total_carbs: carbs,
            total_fat: fat,
        }
    }

    #[test]
    fn empty_input_reduces_to_zero() {
        assert_eq!(reduce_meal_totals(&[]), MacroTotals::default());
    }

    #[test]
    fn sums_across_meals() {
        let totals = reduce_meal_totals(&[
            meal(Some(420.0), Some(30.0), Some(40.0), Some(12.0)),
            meal(Some(580.0), Some(25.0), Some(60.0), Some(20.0)),
        ]);
        assert_eq!(totals.calories, 1000.0);
        assert_eq!(totals.protein, 55.0);
        assert_eq!(totals.carbs, 100.0);
        assert_eq!(totals.fat, 32.0);
    }

    #[test]
    fn missing_fields_count_as_zero() {
        let totals = reduce_meal_totals(&[
            meal(Some(300.0), None, Some(10.0), None),
            meal(None, None, None, None),
        ]);
        assert_eq!(totals.calories, 300.0);
        assert_eq!(totals.protein, 0.0);
        assert_eq!(totals.carbs, 10.0);
        assert_eq!(totals.fat, 0.0);
    }

    #[test]
    fn daily_summary_deserializes_with_sparse_body() {
        // Upstream omits empty arrays and per-meal totals it has not computed.
        let daily: DailyNutrition = serde_json::from_str(
            r#"{
                "date": "2024-03-01",
                "total_calories": 1800.5,
                "meals": [
                    {
                        "meal_log_id": "7b1f1d4e-9f43-4f0f-9d8e-1c2b3a4d5e6f",
                        "meal_type": "Breakfast",
                        "total_calories": 400.0,
                        "total_protein": null,
                        "total_carbs": 55.0,
                        "total_fat": 9.5
                    }
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(daily.date, date!(2024 - 03 - 01));
        assert!(daily.macro_nutrients.is_empty());
        let totals = reduce_meal_totals(&daily.meals);
        assert_eq!(totals.calories, 400.0);
        assert_eq!(totals.protein, 0.0);
    }

    #[test]
    fn weekly_day_derives_macros_from_meals() {
        let daily = DailyNutrition {
            date: date!(2024 - 03 - 01),
            user_id: None,
            total_calories: 1500.0,
            macro_nutrients: vec![],
            micro_nutrients: vec![],
            meals: vec![
                meal(Some(700.0), Some(40.0), Some(70.0), Some(25.0)),
                meal(Some(800.0), Some(35.0), Some(90.0), Some(30.0)),
            ],
        };
        let weekly = WeeklyDay::from_daily(&daily);
        assert_eq!(weekly.total_calories, 1500.0);
        assert_eq!(weekly.protein, 75.0);
        assert_eq!(weekly.carbs, 160.0);
        assert_eq!(weekly.fat, 55.0);
    }
}
