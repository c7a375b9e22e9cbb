use std::sync::Arc;
use std::time::Duration;

use time::Date;
use uuid::Uuid;

use crate::backend::BackendClient;
use crate::config::AppConfig;
use crate::nutrition::dedup::FlightTable;
use crate::nutrition::summary::{DailyNutrition, MealNutrition};

#[derive(Clone)]
pub struct AppState {
    pub backend: BackendClient,
    pub config: Arc<AppConfig>,
    /// Collapses concurrent identical daily-summary fetches, keyed by
    /// bearer token and date. Distinct tokens never share an entry.
    pub daily_flights: FlightTable<(String, Date), DailyNutrition>,
    pub meal_flights: FlightTable<(String, Uuid), MealNutrition>,
}

impl AppState {
    pub fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);
        Self::from_config(config)
    }

    pub fn from_config(config: Arc<AppConfig>) -> anyhow::Result<Self> {
        let backend = BackendClient::new(
            &config.upstream_base_url,
            Duration::from_secs(config.request_timeout_secs),
        )?;
        Ok(Self {
            backend,
            config,
            daily_flights: FlightTable::new(),
            meal_flights: FlightTable::new(),
        })
    }

    /// State pointed at an arbitrary upstream, for tests.
    pub fn for_upstream(base_url: &str) -> Self {
        let config = Arc::new(AppConfig {
            upstream_base_url: base_url.to_string(),
            request_timeout_secs: 5,
        });
        Self::from_config(config).expect("state for test upstream")
    }
}
