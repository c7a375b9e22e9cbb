use std::future::Future;
use std::hash::Hash;
use std::sync::Arc;

use dashmap::{mapref::entry::Entry, DashMap};
use futures::future::{BoxFuture, FutureExt, Shared};

use crate::error::ApiError;

type InFlight<V> = Shared<BoxFuture<'static, Result<V, ApiError>>>;

/// Collapses concurrent identical fetches onto one in-flight request.
///
/// The table keys in-flight futures; the first caller for a key starts the
/// underlying request and every concurrent caller awaits a shared handle to
/// it. The entry is removed when the request settles, success or failure, so
/// errors are never cached and a retry always issues a fresh call.
///
/// Tables do not share state: two instances may duplicate requests between
/// them. That scope is deliberate.
pub struct FlightTable<K, V>
where
    K: Eq + Hash + Clone + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    flights: Arc<DashMap<K, InFlight<V>>>,
}

impl<K, V> Clone for FlightTable<K, V>
where
    K: Eq + Hash + Clone + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            flights: Arc::clone(&self.flights),
        }
    }
}

impl<K, V> Default for FlightTable<K, V>
where
    K: Eq + Hash + Clone + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> FlightTable<K, V>
where
    K: Eq + Hash + Clone + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self {
            flights: Arc::new(DashMap::new()),
        }
    }

    /// Await the in-flight request for `key`, starting one via `producer` if
    /// none exists. All concurrent callers observe the same result, errors
    /// included.
    pub async fn join<F, Fut>(&self, key: K, producer: F) -> Result<V, ApiError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, ApiError>> + Send + 'static,
    {
        let flight = match self.flights.entry(key.clone()) {
            Entry::Occupied(entry) => entry.get().clone(),
            Entry::Vacant(slot) => {
                let flights = Arc::clone(&self.flights);
                let fut = producer();
                let flight = async move {
                    let result = fut.await;
                    // Deregister before any waiter observes the result, so a
                    // caller that retries after an error starts a fresh call.
                    flights.remove(&key);
                    result
                }
                .boxed()
                .shared();
                slot.insert(flight.clone());
                flight
            }
        };
        flight.await
    }

    /// Drop every in-flight entry. Requests already started keep running for
    /// their current waiters; no future caller will join them.
    pub fn clear(&self) {
        self.flights.clear();
    }

    pub fn in_flight(&self) -> usize {
        self.flights.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use axum::http::StatusCode;

    fn slow_ok(calls: Arc<AtomicUsize>, value: u32) -> impl Future<Output = Result<u32, ApiError>> {
        async move {
            calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(30)).await;
            Ok(value)
        }
    }

    #[tokio::test]
    async fn concurrent_joins_share_one_call() {
        let table: FlightTable<&str, u32> = FlightTable::new();
        let calls = Arc::new(AtomicUsize::new(0));

        let (a, b, c) = tokio::join!(
            table.join("k", || slow_ok(calls.clone(), 7)),
            table.join("k", || slow_ok(calls.clone(), 7)),
            table.join("k", || slow_ok(calls.clone(), 7)),
        );

        assert_eq!(a.unwrap(), 7);
        assert_eq!(b.unwrap(), 7);
        assert_eq!(c.unwrap(), 7);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(table.in_flight(), 0);
    }

    #[tokio::test]
    async fn distinct_keys_do_not_share() {
        let table: FlightTable<&str, u32> = FlightTable::new();
        let calls = Arc::new(AtomicUsize::new(0));

        let (a, b) = tokio::join!(
            table.join("a", || slow_ok(calls.clone(), 1)),
            table.join("b", || slow_ok(calls.clone(), 2)),
        );

        assert_eq!(a.unwrap(), 1);
        assert_eq!(b.unwrap(), 2);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn errors_propagate_to_all_waiters_and_clear_the_key() {
        let table: FlightTable<&str, u32> = FlightTable::new();
        let calls = Arc::new(AtomicUsize::new(0));

        let fail = |calls: Arc<AtomicUsize>| async move {
            calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(10)).await;
            Err(ApiError::from_upstream(StatusCode::SERVICE_UNAVAILABLE, None))
        };

        let (a, b) = tokio::join!(
            table.join("k", || fail(calls.clone())),
            table.join("k", || fail(calls.clone())),
        );
        assert!(a.is_err());
        assert!(b.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        // No negative caching: the next join issues a fresh call.
        let retry = table.join("k", || slow_ok(calls.clone(), 9)).await;
        assert_eq!(retry.unwrap(), 9);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn sequential_joins_each_fetch() {
        let table: FlightTable<&str, u32> = FlightTable::new();
        let calls = Arc::new(AtomicUsize::new(0));

        table.join("k", || slow_ok(calls.clone(), 1)).await.unwrap();
        table.join("k", || slow_ok(calls.clone(), 2)).await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn independent_tables_do_not_share_flights() {
        let left: FlightTable<&str, u32> = FlightTable::new();
        let right: FlightTable<&str, u32> = FlightTable::new();
        let calls = Arc::new(AtomicUsize::new(0));

        let (a, b) = tokio::join!(
            left.join("k", || slow_ok(calls.clone(), 1)),
            right.join("k", || slow_ok(calls.clone(), 1)),
        );
        assert!(a.is_ok() && b.is_ok());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
