//! Per-route view cache with single-flight loading.
//!
//! # Responsibilities
//! - Invoke each route's loader at most once per process lifetime
//! - Make concurrent callers share one in-flight load
//! - Leave the slot empty on failure so the next navigation retries
//!
//! # Design Decisions
//! - Keyed by `RouteId`; slots created on first access
//! - Each slot is a `tokio::sync::OnceCell`, which parks concurrent
//!   initializers behind the one that is already running
//! - The map shard guard is dropped before awaiting the load

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::OnceCell;

use crate::observability::metrics;
use crate::routing::error::LoadError;
use crate::routing::loader::ViewLoader;
use crate::routing::table::RouteId;

/// Write-once cache of loaded views.
pub struct ViewCache<V> {
    slots: Arc<DashMap<RouteId, Arc<OnceCell<V>>>>,
}

impl<V: Clone + Send + Sync + 'static> ViewCache<V> {
    pub fn new() -> Self {
        Self {
            slots: Arc::new(DashMap::new()),
        }
    }

    /// Return the cached view for `id`, loading it with `loader` if absent.
    pub async fn get_or_load(
        &self,
        id: RouteId,
        loader: &dyn ViewLoader<V>,
    ) -> Result<V, LoadError> {
        let slot = self.slots.entry(id).or_default().clone();

        let result = slot
            .get_or_try_init(|| async {
                tracing::debug!(route = %id, "Loading view");
                let loaded = loader.load().await;
                metrics::record_view_load(if loaded.is_ok() { "ok" } else { "error" });
                loaded
            })
            .await;

        result.cloned()
    }

    /// The cached view for `id`, without loading.
    pub fn get(&self, id: RouteId) -> Option<V> {
        self.slots.get(&id).and_then(|slot| slot.get().cloned())
    }

    pub fn is_loaded(&self, id: RouteId) -> bool {
        self.get(id).is_some()
    }

    /// Number of routes with a loaded view.
    pub fn loaded_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.value().initialized()).count()
    }
}

impl<V: Clone + Send + Sync + 'static> Default for ViewCache<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Clone for ViewCache<V> {
    fn clone(&self) -> Self {
        Self {
            slots: self.slots.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn counting_loader(
        calls: Arc<AtomicUsize>,
        fail_first: bool,
    ) -> impl ViewLoader<String> {
        move || {
            let calls = calls.clone();
            async move {
                let n = calls.fetch_add(1, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(20)).await;
                if fail_first && n == 0 {
                    Err(LoadError::new("resource fetch failed"))
                } else {
                    Ok(format!("view-{}", n))
                }
            }
        }
    }

    #[tokio::test]
    async fn test_loader_invoked_once() {
        let cache = ViewCache::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let loader = counting_loader(calls.clone(), false);

        let first = cache.get_or_load(RouteId(0), &loader).await.unwrap();
        let second = cache.get_or_load(RouteId(0), &loader).await.unwrap();

        assert_eq!(first, "view-0");
        assert_eq!(second, "view-0");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(cache.is_loaded(RouteId(0)));
        assert!(!cache.is_loaded(RouteId(1)));
    }

    #[tokio::test]
    async fn test_concurrent_loads_share_flight() {
        let cache = ViewCache::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let loader = counting_loader(calls.clone(), false);

        let loads = (0..8).map(|_| cache.get_or_load(RouteId(3), &loader));
        let results = futures_util::future::join_all(loads).await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(results.iter().all(|r| r.as_deref() == Ok("view-0")));
    }

    #[tokio::test]
    async fn test_failure_does_not_poison_slot() {
        let cache = ViewCache::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let loader = counting_loader(calls.clone(), true);

        let err = cache.get_or_load(RouteId(0), &loader).await.unwrap_err();
        assert_eq!(err.message(), "resource fetch failed");
        assert!(!cache.is_loaded(RouteId(0)));

        let view = cache.get_or_load(RouteId(0), &loader).await.unwrap();
        assert_eq!(view, "view-1");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(cache.loaded_count(), 1);
    }
}
