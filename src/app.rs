//! Application context.
//!
//! Built once at startup from validated configuration and passed
//! explicitly to everything that navigates or sends requests.

use std::path::Path;
use std::sync::Arc;

use thiserror::Error;

use crate::config::{AppConfig, ConfigError};
use crate::http::{ApiClient, RequestError};
use crate::routing::{Navigator, Resolver, RouteTable, TableError, TitleSink};
use crate::views::{template_registry, TemplateView};

/// Errors raised while assembling the application.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Route table error: {0}")]
    Table(#[from] TableError),

    #[error("HTTP client error: {0}")]
    Client(#[from] RequestError),
}

/// The route table, navigator and request client of one process.
pub struct App {
    pub config: AppConfig,
    pub navigator: Navigator<TemplateView>,
    pub api: ApiClient,
}

impl App {
    /// Assemble the application from validated configuration.
    pub fn new(config: AppConfig, title_sink: Arc<dyn TitleSink>) -> Result<Self, AppError> {
        let views_dir = Path::new(&config.router.views_dir);
        let registry = template_registry(
            views_dir,
            config.routes.iter().filter_map(|r| r.view.as_deref()),
        );

        let table = Arc::new(RouteTable::from_config(&config.routes, &registry)?);
        let resolver = Resolver::with_max_redirects(table, config.router.max_redirects);
        let mut navigator = Navigator::new(resolver, title_sink);
        if let Some(default_route) = &config.router.default_route {
            navigator = navigator.with_default_route(default_route.clone());
        }

        let api = ApiClient::new(&config.http)?;

        tracing::info!(
            routes = navigator.table().len(),
            views = registry.len(),
            views_dir = %views_dir.display(),
            max_redirects = config.router.max_redirects,
            "Application initialized"
        );

        Ok(Self {
            config,
            navigator,
            api,
        })
    }

    /// Load configuration from `path` and assemble the application.
    pub fn from_file(path: &Path, title_sink: Arc<dyn TitleSink>) -> Result<Self, AppError> {
        let config = crate::config::load_config(path)?;
        Self::new(config, title_sink)
    }
}
