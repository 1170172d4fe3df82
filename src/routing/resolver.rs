//! Route resolution.
//!
//! # Responsibilities
//! - Resolve a navigation path to a view route and its parameters
//! - Follow redirects (including the `*` fallback's) before any loader runs
//! - Bound redirect chains to guarantee termination
//! - Split locations into path and query, for the input and every redirect target
//!
//! # Design Decisions
//! - Pure lookup: no loading and no side effects
//! - Hop bound instead of cycle detection; a chain longer than
//!   `max_redirects` fails with `RedirectCycle`
//! - A redirect target with a query replaces the query carried so far;
//!   one without a query keeps it

use std::sync::Arc;

use crate::observability::metrics;
use crate::routing::error::{RouteError, RouteResult};
use crate::routing::loader::SharedLoader;
use crate::routing::matcher::PathParams;
use crate::routing::table::{RouteDefinition, RouteId, RouteKind, RouteTable};

/// Default bound on redirect hops per navigation.
pub const DEFAULT_MAX_REDIRECTS: usize = 5;

/// Outcome of a successful resolution.
pub struct Resolution<'a, V> {
    pub id: RouteId,
    pub route: &'a RouteDefinition<V>,
    pub loader: SharedLoader<V>,
    /// Path that finally matched (after redirects).
    pub path: String,
    pub params: PathParams,
    /// Decoded query pairs of the location that resolved.
    pub query: Vec<(String, String)>,
    /// Paths that were redirected away from, in order.
    pub redirects: Vec<String>,
}

/// Resolves paths against an immutable route table.
pub struct Resolver<V> {
    table: Arc<RouteTable<V>>,
    max_redirects: usize,
}

impl<V> Resolver<V> {
    pub fn new(table: Arc<RouteTable<V>>) -> Self {
        Self::with_max_redirects(table, DEFAULT_MAX_REDIRECTS)
    }

    pub fn with_max_redirects(table: Arc<RouteTable<V>>, max_redirects: usize) -> Self {
        Self {
            table,
            max_redirects,
        }
    }

    pub fn table(&self) -> &Arc<RouteTable<V>> {
        &self.table
    }

    /// Resolve `location` (a path with an optional `?query`) to a view route.
    pub fn resolve(&self, location: &str) -> RouteResult<Resolution<'_, V>> {
        let (path, mut query) = split_location(location);
        let mut current = path.to_string();
        let mut redirects = Vec::new();

        loop {
            let (id, route, params) =
                self.table
                    .match_path(&current)
                    .ok_or_else(|| RouteError::NoMatch {
                        path: current.clone(),
                    })?;

            match &route.kind {
                RouteKind::View(loader) => {
                    return Ok(Resolution {
                        id,
                        route,
                        loader: loader.clone(),
                        path: current,
                        params,
                        query,
                        redirects,
                    });
                }
                RouteKind::Redirect(target) => {
                    redirects.push(current);
                    if redirects.len() > self.max_redirects {
                        let mut chain = redirects;
                        chain.push(target.clone());
                        return Err(RouteError::RedirectCycle { chain });
                    }
                    tracing::debug!(
                        from = %redirects.last().map(String::as_str).unwrap_or_default(),
                        to = %target,
                        route = %route.label(),
                        "Following redirect"
                    );
                    metrics::record_redirect();

                    let (target_path, target_query) = split_location(target);
                    if !target_query.is_empty() {
                        query = target_query;
                    }
                    current = target_path.to_string();
                }
            }
        }
    }
}

/// Split `location` into its path and decoded query pairs, dropping any fragment.
pub fn split_location(location: &str) -> (&str, Vec<(String, String)>) {
    let location = location.split('#').next().unwrap_or_default();
    match location.split_once('?') {
        Some((path, query)) => (path, crate::http::form::decode(query)),
        None => (location, Vec::new()),
    }
}
