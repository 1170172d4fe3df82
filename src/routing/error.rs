//! Routing error definitions.

use thiserror::Error;

/// Failure reported by a view loader.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct LoadError {
    message: String,
}

impl LoadError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Errors that end a navigation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RouteError {
    /// No pattern matched and the table has no `*` fallback.
    #[error("No route matches '{path}'")]
    NoMatch { path: String },

    /// The redirect hop bound was exceeded.
    #[error("Redirect cycle detected: {}", chain.join(" -> "))]
    RedirectCycle { chain: Vec<String> },

    /// The view loader failed. The cache slot stays empty, so a later
    /// navigation retries.
    #[error("Failed to load view for '{path}': {source}")]
    ViewLoad {
        path: String,
        #[source]
        source: LoadError,
    },
}

/// Errors raised while building a route table.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TableError {
    #[error("Invalid route pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// A `*` entry that is not the last entry would shadow everything after it.
    #[error("Wildcard route must be the last entry (found at position {index})")]
    MisplacedWildcard { index: usize },

    #[error("Route table contains more than one wildcard route")]
    DuplicateWildcard,

    #[error("Duplicate route name '{0}'")]
    DuplicateName(String),

    #[error("Route '{route}' references unknown view '{view}'")]
    UnknownView { route: String, view: String },

    #[error("Route '{route}' must define exactly one of `view` or `redirect`")]
    AmbiguousKind { route: String },

    #[error("No route named '{0}'")]
    UnknownRoute(String),

    #[error("Route '{route}' requires parameter '{param}'")]
    MissingParam { route: String, param: String },
}

/// Result type for navigation.
pub type RouteResult<T> = Result<T, RouteError>;
