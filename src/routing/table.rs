//! Route definitions and the ordered route table.
//!
//! # Responsibilities
//! - Hold route definitions in declaration order
//! - Enforce table invariants at construction (single trailing wildcard, unique names)
//! - First-match lookup and reverse routing by name
//!
//! # Design Decisions
//! - Immutable after construction; shared via `Arc` without locks
//! - Routes are identified by position (`RouteId`)
//! - Explicit NoMatch (`None`) rather than silent default

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::config::schema::RouteConfig;
use crate::routing::error::TableError;
use crate::routing::loader::{SharedLoader, ViewLoader, ViewRegistry};
use crate::routing::matcher::{PathParams, PathPattern};

/// Stable identity of a route within its table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RouteId(pub usize);

impl fmt::Display for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Display metadata attached to a route.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct RouteMeta {
    /// Document title applied after a successful navigation.
    pub title: Option<String>,
}

/// What a route resolves to.
pub enum RouteKind<V> {
    /// Render a lazily loaded view.
    View(SharedLoader<V>),
    /// Re-resolve against another path before any loader runs.
    Redirect(String),
}

impl<V> Clone for RouteKind<V> {
    fn clone(&self) -> Self {
        match self {
            Self::View(loader) => Self::View(loader.clone()),
            Self::Redirect(target) => Self::Redirect(target.clone()),
        }
    }
}

impl<V> fmt::Debug for RouteKind<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::View(_) => f.write_str("View(..)"),
            Self::Redirect(target) => f.debug_tuple("Redirect").field(target).finish(),
        }
    }
}

/// A single route definition.
#[derive(Debug)]
pub struct RouteDefinition<V> {
    pub path: PathPattern,
    pub name: Option<String>,
    pub meta: RouteMeta,
    pub kind: RouteKind<V>,
}

impl<V> RouteDefinition<V> {
    /// A route rendering the view produced by `loader`.
    pub fn view(path: &str, loader: impl ViewLoader<V> + 'static) -> Result<Self, TableError> {
        Ok(Self {
            path: PathPattern::parse(path)?,
            name: None,
            meta: RouteMeta::default(),
            kind: RouteKind::View(Arc::new(loader)),
        })
    }

    /// A route redirecting to `target`.
    pub fn redirect(path: &str, target: impl Into<String>) -> Result<Self, TableError> {
        Ok(Self {
            path: PathPattern::parse(path)?,
            name: None,
            meta: RouteMeta::default(),
            kind: RouteKind::Redirect(target.into()),
        })
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.meta.title = Some(title.into());
        self
    }

    /// Human-readable label for logs: the name if set, otherwise the pattern.
    pub fn label(&self) -> String {
        self.name.clone().unwrap_or_else(|| self.path.to_string())
    }
}

/// Ordered, immutable route table.
#[derive(Debug)]
pub struct RouteTable<V> {
    routes: Vec<RouteDefinition<V>>,
}

impl<V> RouteTable<V> {
    /// Build a table, checking ordering and naming invariants.
    pub fn new(routes: Vec<RouteDefinition<V>>) -> Result<Self, TableError> {
        let mut names = HashSet::new();
        let mut wildcard_at = None;

        for (index, route) in routes.iter().enumerate() {
            if route.path.is_catch_all() {
                if wildcard_at.is_some() {
                    return Err(TableError::DuplicateWildcard);
                }
                wildcard_at = Some(index);
            }
            if let Some(name) = &route.name {
                if !names.insert(name.as_str()) {
                    return Err(TableError::DuplicateName(name.clone()));
                }
            }
        }

        if let Some(index) = wildcard_at {
            if index + 1 != routes.len() {
                return Err(TableError::MisplacedWildcard { index });
            }
        }

        Ok(Self { routes })
    }

    /// Build a table from parsed configuration, resolving view names
    /// against `registry`.
    pub fn from_config(
        configs: &[RouteConfig],
        registry: &ViewRegistry<V>,
    ) -> Result<Self, TableError> {
        let mut routes = Vec::with_capacity(configs.len());

        for config in configs {
            let kind = match (&config.view, &config.redirect) {
                (Some(view), None) => {
                    let loader = registry.get(view).ok_or_else(|| TableError::UnknownView {
                        route: config.label(),
                        view: view.clone(),
                    })?;
                    RouteKind::View(loader)
                }
                (None, Some(target)) => RouteKind::Redirect(target.clone()),
                _ => {
                    return Err(TableError::AmbiguousKind {
                        route: config.label(),
                    })
                }
            };

            routes.push(RouteDefinition {
                path: PathPattern::parse(&config.path)?,
                name: config.name.clone(),
                meta: config.meta.clone(),
                kind,
            });
        }

        Self::new(routes)
    }

    /// Find the first route matching `path`, falling back to the `*` entry.
    pub fn match_path(&self, path: &str) -> Option<(RouteId, &RouteDefinition<V>, PathParams)> {
        let structural = self.routes.iter().enumerate().find_map(|(index, route)| {
            route
                .path
                .matches(path)
                .map(|params| (RouteId(index), route, params))
        });

        structural.or_else(|| {
            self.fallback()
                .map(|(id, route)| (id, route, PathParams::new()))
        })
    }

    /// The `*` entry, if any. Always last by construction.
    pub fn fallback(&self) -> Option<(RouteId, &RouteDefinition<V>)> {
        self.routes
            .last()
            .filter(|route| route.path.is_catch_all())
            .map(|route| (RouteId(self.routes.len() - 1), route))
    }

    pub fn get(&self, id: RouteId) -> Option<&RouteDefinition<V>> {
        self.routes.get(id.0)
    }

    pub fn find_by_name(&self, name: &str) -> Option<(RouteId, &RouteDefinition<V>)> {
        self.routes
            .iter()
            .enumerate()
            .find(|(_, route)| route.name.as_deref() == Some(name))
            .map(|(index, route)| (RouteId(index), route))
    }

    /// Render the path of a named route.
    pub fn path_for(&self, name: &str, params: &PathParams) -> Result<String, TableError> {
        let (_, route) = self
            .find_by_name(name)
            .ok_or_else(|| TableError::UnknownRoute(name.to_string()))?;

        route.path.render(params).map_err(|param| TableError::MissingParam {
            route: name.to_string(),
            param,
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = (RouteId, &RouteDefinition<V>)> {
        self.routes
            .iter()
            .enumerate()
            .map(|(index, route)| (RouteId(index), route))
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
