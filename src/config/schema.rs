//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the
//! application. All types derive Serde traits for deserialization from
//! TOML files.

use serde::{Deserialize, Serialize};

use crate::routing::resolver::DEFAULT_MAX_REDIRECTS;
use crate::routing::table::RouteMeta;

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Navigation settings.
    pub router: RouterConfig,

    /// Request facade defaults.
    pub http: HttpConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Route definitions, in match order.
    pub routes: Vec<RouteConfig>,
}

/// Navigation settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Maximum redirect hops before a navigation fails.
    pub max_redirects: usize,

    /// Path navigated to when a location cannot be resolved.
    pub default_route: Option<String>,

    /// Directory holding `<view>.html` templates.
    pub views_dir: String,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            max_redirects: DEFAULT_MAX_REDIRECTS,
            default_route: None,
            views_dir: "views".to_string(),
        }
    }
}

/// Request facade defaults, applied to every call.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Base for relative request URLs.
    pub base_url: Option<String>,

    /// Keep and send cookies.
    pub with_credentials: bool,

    /// Content type sent with form bodies.
    pub content_type: String,

    /// Honor `HTTP_PROXY`/`HTTPS_PROXY` from the environment.
    pub use_system_proxy: bool,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            with_credentials: true,
            content_type: "application/x-www-form-urlencoded;charset=utf-8".to_string(),
            use_system_proxy: true,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// A single route entry.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RouteConfig {
    /// Optional unique identifier.
    #[serde(default)]
    pub name: Option<String>,

    /// Path pattern (`/article/:id`) or `*`.
    pub path: String,

    /// View to render. Exclusive with `redirect`.
    #[serde(default)]
    pub view: Option<String>,

    /// Path to redirect to. Exclusive with `view`.
    #[serde(default)]
    pub redirect: Option<String>,

    #[serde(default)]
    pub meta: RouteMeta,
}

impl RouteConfig {
    /// Name if set, otherwise the path.
    pub fn label(&self) -> String {
        self.name.clone().unwrap_or_else(|| self.path.clone())
    }
}
