use std::future::Future;

use futures::future::join_all;
use time::Date;

use crate::dates::week_dates;
use crate::error::ApiError;
use crate::nutrition::summary::{DailyNutrition, WeeklyDay};

/// Fetch the seven days ending at `end`, in parallel.
///
/// A day the backend knows nothing about (`NotFound`) becomes a zero-value
/// entry; any other failure aborts the whole week. The output is ordered
/// oldest to newest by index, never by completion order.
pub async fn fetch_week<F, Fut>(end: Date, fetch_day: F) -> Result<Vec<WeeklyDay>, ApiError>
where
    F: Fn(Date) -> Fut,
    Fut: Future<Output = Result<DailyNutrition, ApiError>>,
{
    let days = week_dates(end);
    let results = join_all(days.into_iter().map(|date| {
        let fut = fetch_day(date);
        async move {
            match fut.await {
                Ok(daily) => Ok(WeeklyDay::from_daily(&daily)),
                Err(e) if e.is_not_found() => Ok(WeeklyDay::empty(date)),
                Err(e) => Err(e),
            }
        }
    }))
    .await;
    results.into_iter().collect()
}
