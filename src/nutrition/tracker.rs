use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use time::Date;
use tracing::debug;
use uuid::Uuid;

use crate::error::ApiError;
use crate::nutrition::client::NutritionBackend;
use crate::nutrition::dedup::FlightTable;
use crate::nutrition::summary::{
    reduce_meal_totals, DailyNutrition, MacroTotals, MealNutrition, WeeklyDay,
};
use crate::nutrition::week::fetch_week;
use crate::session::AuthSession;

/// A date's meal logs together with their reduced totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealLogsSnapshot {
    pub logs: Vec<crate::meal_logs::dto::MealLog>,
    pub totals: MacroTotals,
}

#[derive(Default)]
struct TrackerCache {
    current_user: Option<Uuid>,
    daily: HashMap<Date, DailyNutrition>,
    meals: HashMap<Uuid, MealNutrition>,
    logs: HashMap<Date, MealLogsSnapshot>,
}

impl TrackerCache {
    fn reset_for(&mut self, user: Uuid) {
        self.daily.clear();
        self.meals.clear();
        self.logs.clear();
        self.current_user = Some(user);
    }
}

/// Caching front for nutrition reads on behalf of one client session.
///
/// Summaries are memoized per date/meal and concurrent identical fetches are
/// collapsed through per-resource flight tables. The tracker remembers which
/// user its caches were built for; when a call arrives under a different
/// user, every cached value and in-flight entry is dropped before anything
/// is fetched for the new user. Cached aggregates never outlive the session
/// that produced them.
///
/// Each tracker owns its own flight tables; two trackers never share
/// in-flight requests.
pub struct NutritionTracker {
    backend: Arc<dyn NutritionBackend>,
    cache: Mutex<TrackerCache>,
    daily_flights: FlightTable<(Uuid, Date), DailyNutrition>,
    meal_flights: FlightTable<(Uuid, Uuid), MealNutrition>,
    log_flights: FlightTable<(Uuid, Date), MealLogsSnapshot>,
}

impl NutritionTracker {
    pub fn new(backend: Arc<dyn NutritionBackend>) -> Self {
        Self {
            backend,
            cache: Mutex::new(TrackerCache::default()),
            daily_flights: FlightTable::new(),
            meal_flights: FlightTable::new(),
            log_flights: FlightTable::new(),
        }
    }

    /// Compare the session's user against the one the caches belong to and
    /// wipe everything on a mismatch.
    fn ensure_user(&self, user: Uuid) {
        let mut cache = self.cache.lock().expect("tracker cache poisoned");
        if cache.current_user != Some(user) {
            if cache.current_user.is_some() {
                debug!(user_id = %user, "session user changed, dropping cached nutrition data");
            }
            cache.reset_for(user);
            self.daily_flights.clear();
            self.meal_flights.clear();
            self.log_flights.clear();
        }
    }

    /// Daily summary for `date`, memoized per date.
    pub async fn daily(
        &self,
        session: &AuthSession,
        date: Date,
    ) -> Result<DailyNutrition, ApiError> {
        let user = session.user.id;
        self.ensure_user(user);

        if let Some(hit) = self
            .cache
            .lock()
            .expect("tracker cache poisoned")
            .daily
            .get(&date)
            .cloned()
        {
            return Ok(hit);
        }

        let backend = Arc::clone(&self.backend);
        let token = session.access_token_id.clone();
        let daily = self
            .daily_flights
            .join((user, date), move || async move {
                backend.daily_summary(&token, date).await
            })
            .await?;

        self.commit(user, |cache| {
            cache.daily.insert(date, daily.clone());
        });
        Ok(daily)
    }

    /// Seven-day trend ending at `end`. Shares the daily flight table, so a
    /// concurrent daily view of any of the days costs no extra request.
    pub async fn weekly(
        &self,
        session: &AuthSession,
        end: Date,
    ) -> Result<Vec<WeeklyDay>, ApiError> {
        self.ensure_user(session.user.id);
        fetch_week(end, |date| self.daily(session, date)).await
    }

    /// Aggregate for one meal log, memoized per meal id.
    pub async fn meal(
        &self,
        session: &AuthSession,
        meal_log_id: Uuid,
    ) -> Result<MealNutrition, ApiError> {
        let user = session.user.id;
        self.ensure_user(user);

        if let Some(hit) = self
            .cache
            .lock()
            .expect("tracker cache poisoned")
            .meals
            .get(&meal_log_id)
            .cloned()
        {
            return Ok(hit);
        }

        let backend = Arc::clone(&self.backend);
        let token = session.access_token_id.clone();
        let summary = self
            .meal_flights
            .join((user, meal_log_id), move || async move {
                backend.meal_summary(&token, meal_log_id).await
            })
            .await?;

        self.commit(user, |cache| {
            cache.meals.insert(meal_log_id, summary.clone());
        });
        Ok(summary)
    }

    /// The date's meal logs plus their reduced calorie/macro totals.
    pub async fn meal_logs(
        &self,
        session: &AuthSession,
        date: Date,
    ) -> Result<MealLogsSnapshot, ApiError> {
        let user = session.user.id;
        self.ensure_user(user);

        if let Some(hit) = self
            .cache
            .lock()
            .expect("tracker cache poisoned")
            .logs
            .get(&date)
            .cloned()
        {
            return Ok(hit);
        }

        let backend = Arc::clone(&self.backend);
        let token = session.access_token_id.clone();
        let snapshot = self
            .log_flights
            .join((user, date), move || async move {
                let logs = backend.meals_for_date(&token, date).await?;
                let breakdowns: Vec<_> = logs.iter().map(|l| l.breakdown()).collect();
                let totals = reduce_meal_totals(&breakdowns);
                Ok(MealLogsSnapshot { logs, totals })
            })
            .await?;

        self.commit(user, |cache| {
            cache.logs.insert(date, snapshot.clone());
        });
        Ok(snapshot)
    }

    /// Store a freshly fetched value, unless the session user changed while
    /// the request was in flight; stale results are discarded, not cached.
    fn commit(&self, user: Uuid, write: impl FnOnce(&mut TrackerCache)) {
        let mut cache = self.cache.lock().expect("tracker cache poisoned");
        if cache.current_user == Some(user) {
            write(&mut cache);
        }
    }

    #[cfg(test)]
    fn cached_daily_dates(&self) -> usize {
        self.cache.lock().unwrap().daily.len()
    }
}
