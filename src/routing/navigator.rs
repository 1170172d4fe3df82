//! Navigation driver.
//!
//! # State Machine
//! ```text
//! Pending → Matching → Loading → Ready
//!              │  ▲
//!              ▼  │
//!          Redirecting
//!
//! Any state → Failed
//! ```
//!
//! # Responsibilities
//! - Resolve, load and apply title metadata for a single navigation
//! - Skip the title side effect for navigations superseded by a newer one
//! - Recover `NoMatch` and `RedirectCycle` through the default route
//!
//! # Design Decisions
//! - Superseded loads are not cancelled; they still populate the cache
//! - Staleness is decided by a monotonically increasing sequence number
//! - `ViewLoad` errors are returned as-is; the next navigation retries

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::observability::metrics;
use crate::routing::cache::ViewCache;
use crate::routing::error::{RouteError, RouteResult};
use crate::routing::matcher::PathParams;
use crate::routing::resolver::Resolver;
use crate::routing::table::{RouteId, RouteTable};
use crate::routing::title::TitleSink;

/// Phases of a single navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationState {
    Pending,
    Matching,
    Redirecting,
    Loading,
    Ready,
    Failed,
}

/// A completed navigation.
#[derive(Debug, Clone)]
pub struct Navigation<V> {
    /// Sequence number assigned when the navigation started.
    pub seq: u64,
    pub route: RouteId,
    pub name: Option<String>,
    /// Path that finally matched (after redirects).
    pub path: String,
    pub params: PathParams,
    /// Query string pairs, decoded, in order.
    pub query: Vec<(String, String)>,
    pub redirects: Vec<String>,
    pub title: Option<String>,
    /// False when a newer navigation started before this one finished.
    pub title_applied: bool,
    /// Set when the default route was used after this error.
    pub recovered_from: Option<RouteError>,
    pub view: V,
}

/// Owns the resolver, the view cache and the navigation sequence.
pub struct Navigator<V> {
    resolver: Resolver<V>,
    cache: ViewCache<V>,
    title_sink: Arc<dyn TitleSink>,
    sequence: AtomicU64,
    default_route: Option<String>,
}

impl<V: Clone + Send + Sync + 'static> Navigator<V> {
    pub fn new(resolver: Resolver<V>, title_sink: Arc<dyn TitleSink>) -> Self {
        Self {
            resolver,
            cache: ViewCache::new(),
            title_sink,
            sequence: AtomicU64::new(0),
            default_route: None,
        }
    }

    /// Path navigated to when a location cannot be resolved.
    pub fn with_default_route(mut self, path: impl Into<String>) -> Self {
        self.default_route = Some(path.into());
        self
    }

    pub fn table(&self) -> &Arc<RouteTable<V>> {
        self.resolver.table()
    }

    pub fn cache(&self) -> &ViewCache<V> {
        &self.cache
    }

    /// Sequence number of the most recently started navigation.
    pub fn current_seq(&self) -> u64 {
        self.sequence.load(Ordering::SeqCst)
    }

    /// Navigate to `location` (a path with an optional `?query`).
    pub async fn navigate(&self, location: &str) -> RouteResult<Navigation<V>> {
        let seq = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        transition(seq, NavigationState::Pending);

        let result = match self.run(seq, location).await {
            Err(err @ (RouteError::NoMatch { .. } | RouteError::RedirectCycle { .. })) => {
                self.recover(seq, location, err).await
            }
            other => other,
        };

        match result {
            Ok(navigation) => {
                transition(seq, NavigationState::Ready);
                metrics::record_navigation(if navigation.recovered_from.is_some() {
                    "recovered"
                } else {
                    "ready"
                });
                Ok(navigation)
            }
            Err(err) => {
                transition(seq, NavigationState::Failed);
                metrics::record_navigation(match err {
                    RouteError::NoMatch { .. } => "no_match",
                    RouteError::RedirectCycle { .. } => "redirect_cycle",
                    RouteError::ViewLoad { .. } => "view_load_error",
                });
                Err(err)
            }
        }
    }

    async fn recover(
        &self,
        seq: u64,
        location: &str,
        err: RouteError,
    ) -> RouteResult<Navigation<V>> {
        let fallback = self.default_route.as_deref().unwrap_or("none");
        match &err {
            RouteError::RedirectCycle { chain } => tracing::error!(
                seq,
                chain = %chain.join(" -> "),
                fallback = %fallback,
                "Redirect cycle"
            ),
            _ => tracing::warn!(
                seq,
                location = %location,
                fallback = %fallback,
                "No route matched"
            ),
        }

        let Some(default_route) = self.default_route.as_deref() else {
            return Err(err);
        };

        match self.run(seq, default_route).await {
            Ok(mut navigation) => {
                navigation.recovered_from = Some(err);
                Ok(navigation)
            }
            Err(fallback_err) => {
                tracing::error!(seq, error = %fallback_err, "Default route failed");
                Err(err)
            }
        }
    }

    async fn run(&self, seq: u64, location: &str) -> RouteResult<Navigation<V>> {
        transition(seq, NavigationState::Matching);
        let resolution = self.resolver.resolve(location)?;
        if !resolution.redirects.is_empty() {
            transition(seq, NavigationState::Redirecting);
        }

        if !self.cache.is_loaded(resolution.id) {
            transition(seq, NavigationState::Loading);
        }
        let view = self
            .cache
            .get_or_load(resolution.id, resolution.loader.as_ref())
            .await
            .map_err(|source| RouteError::ViewLoad {
                path: resolution.path.clone(),
                source,
            })?;

        let title = resolution.route.meta.title.clone();
        let title_applied = self.apply_title(seq, title.as_deref());

        Ok(Navigation {
            seq,
            route: resolution.id,
            name: resolution.route.name.clone(),
            path: resolution.path,
            params: resolution.params,
            query: resolution.query,
            redirects: resolution.redirects,
            title,
            title_applied,
            recovered_from: None,
            view,
        })
    }

    /// Apply `title` unless a newer navigation has started.
    fn apply_title(&self, seq: u64, title: Option<&str>) -> bool {
        let latest = self.current_seq();
        if latest != seq {
            tracing::debug!(seq, latest, "Navigation superseded, skipping title update");
            return false;
        }
        match title {
            Some(title) => {
                self.title_sink.set_title(title);
                true
            }
            None => false,
        }
    }
}

fn transition(seq: u64, state: NavigationState) {
    tracing::debug!(seq, state = ?state, "Navigation state");
}
