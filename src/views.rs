//! Template-backed views for the blog.
//!
//! Each view is an HTML template at `<views_dir>/<name>.html`, read
//! asynchronously the first time its route is visited.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::routing::error::LoadError;
use crate::routing::loader::{ViewFuture, ViewLoader, ViewRegistry};

/// A loaded view template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    pub name: String,
    pub html: String,
}

/// Views are shared between navigations without copying the template.
pub type TemplateView = Arc<Template>;

/// Loads one template file.
#[derive(Debug, Clone)]
pub struct TemplateLoader {
    name: String,
    path: PathBuf,
}

impl TemplateLoader {
    pub fn new(dir: &Path, name: &str) -> Self {
        Self {
            name: name.to_string(),
            path: dir.join(format!("{}.html", name)),
        }
    }
}

impl ViewLoader<TemplateView> for TemplateLoader {
    fn load(&self) -> ViewFuture<TemplateView> {
        let name = self.name.clone();
        let path = self.path.clone();
        Box::pin(async move {
            let html = tokio::fs::read_to_string(&path).await.map_err(|e| {
                LoadError::new(format!("{}: {}", path.display(), e))
            })?;
            tracing::debug!(view = %name, bytes = html.len(), "Template loaded");
            Ok(Arc::new(Template { name, html }))
        })
    }
}

/// Register a [`TemplateLoader`] for each view name.
///
/// Files are not touched until a route using the view is visited.
pub fn template_registry<'a>(
    dir: &Path,
    names: impl IntoIterator<Item = &'a str>,
) -> ViewRegistry<TemplateView> {
    let mut registry = ViewRegistry::new();
    for name in names {
        registry.register(name, TemplateLoader::new(dir, name));
    }
    registry
}
