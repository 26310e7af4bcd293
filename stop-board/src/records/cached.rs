//! Record retrieval with bounded memoization.
//!
//! Stop and route records are static enough to fetch once and keep, but a
//! page that browses many stops would accumulate them without bound. Each
//! record kind therefore sits behind a [`BoundedCache`]: a lookup on
//! behalf of a render promotes the entry (the record is still wanted),
//! and the least-recently-wanted record is what eviction reclaims.

use std::sync::Arc;

use futures::future::join_all;
use tokio::sync::Mutex;

use crate::cache::BoundedCache;
use crate::domain::{RouteId, StopId};

use super::client::{RecordClient, RouteRecord, StopRecord};
use super::error::RecordError;

/// Cache capacities for the record layer.
#[derive(Debug, Clone)]
pub struct RecordCacheConfig {
    /// Maximum number of stop records held.
    pub stop_capacity: usize,

    /// Maximum number of route records held.
    pub route_capacity: usize,
}

impl Default for RecordCacheConfig {
    fn default() -> Self {
        Self {
            stop_capacity: 100,
            route_capacity: 100,
        }
    }
}

/// Record client with bounded caches in front of it.
///
/// Shared by every panel on the page; all panels benefit from each
/// other's lookups.
pub struct CachedRecordClient {
    client: RecordClient,
    stops: Mutex<BoundedCache<StopId, Arc<StopRecord>>>,
    routes: Mutex<BoundedCache<RouteId, Arc<RouteRecord>>>,
}

impl CachedRecordClient {
    /// Create a new cached client.
    pub fn new(client: RecordClient, config: &RecordCacheConfig) -> Self {
        Self {
            client,
            stops: Mutex::new(BoundedCache::new(config.stop_capacity)),
            routes: Mutex::new(BoundedCache::new(config.route_capacity)),
        }
    }

    /// Get a stop record, fetching on a miss.
    ///
    /// A hit counts as the record still being wanted and promotes it. The
    /// cache lock is not held across the fetch, so two concurrent misses
    /// for the same stop may both fetch; the later `set` wins and the
    /// records are identical.
    pub async fn get_stop(&self, stop: &StopId) -> Result<Arc<StopRecord>, RecordError> {
        {
            let mut stops = self.stops.lock().await;
            if let Some(record) = stops.get(stop, true) {
                return Ok(Arc::clone(record));
            }
        }

        let record = Arc::new(self.client.fetch_stop(stop).await?);
        self.stops.lock().await.set(stop.clone(), Arc::clone(&record));
        Ok(record)
    }

    /// Get a route record, fetching on a miss. Same promotion and
    /// locking behavior as [`get_stop`](Self::get_stop).
    pub async fn get_route(&self, route: &RouteId) -> Result<Arc<RouteRecord>, RecordError> {
        {
            let mut routes = self.routes.lock().await;
            if let Some(record) = routes.get(route, true) {
                return Ok(Arc::clone(record));
            }
        }

        let record = Arc::new(self.client.fetch_route(route).await?);
        self.routes
            .lock()
            .await
            .set(route.clone(), Arc::clone(&record));
        Ok(record)
    }

    /// Fetch several route records concurrently, for the route list on a
    /// stop panel. Results line up with the input order.
    pub async fn get_routes(
        &self,
        routes: &[RouteId],
    ) -> Vec<Result<Arc<RouteRecord>, RecordError>> {
        join_all(routes.iter().map(|route| self.get_route(route))).await
    }

    /// Whether a stop record is cached. A probe only; recency untouched.
    pub async fn has_stop(&self, stop: &StopId) -> bool {
        self.stops.lock().await.has(stop)
    }

    /// Whether a route record is cached. A probe only; recency untouched.
    pub async fn has_route(&self, route: &RouteId) -> bool {
        self.routes.lock().await.has(route)
    }

    /// Access the underlying client for operations that bypass the cache.
    pub fn client(&self) -> &RecordClient {
        &self.client
    }
}
