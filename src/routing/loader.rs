//! Deferred view factories.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use futures_util::future::BoxFuture;

use crate::routing::error::LoadError;

/// Future returned by a view loader.
pub type ViewFuture<V> = BoxFuture<'static, Result<V, LoadError>>;

/// A no-argument deferred factory producing a view.
///
/// The router only inspects success or failure; the view itself is opaque.
pub trait ViewLoader<V>: Send + Sync {
    fn load(&self) -> ViewFuture<V>;
}

impl<V, F, Fut> ViewLoader<V> for F
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = Result<V, LoadError>> + Send + 'static,
{
    fn load(&self) -> ViewFuture<V> {
        Box::pin(self())
    }
}

/// Shared handle to a loader.
pub type SharedLoader<V> = Arc<dyn ViewLoader<V>>;

/// Maps view names (as written in configuration) to their loaders.
pub struct ViewRegistry<V> {
    loaders: HashMap<String, SharedLoader<V>>,
}

impl<V> ViewRegistry<V> {
    pub fn new() -> Self {
        Self {
            loaders: HashMap::new(),
        }
    }

    /// Register a loader under `name`, replacing any previous one.
    pub fn register(&mut self, name: impl Into<String>, loader: impl ViewLoader<V> + 'static) {
        self.loaders.insert(name.into(), Arc::new(loader));
    }

    pub fn get(&self, name: &str) -> Option<SharedLoader<V>> {
        self.loaders.get(name).cloned()
    }

    pub fn len(&self) -> usize {
        self.loaders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loaders.is_empty()
    }
}

impl<V> Default for ViewRegistry<V> {
    fn default() -> Self {
        Self::new()
    }
}
