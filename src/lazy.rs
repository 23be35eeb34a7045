//! Deferred feature modules, loaded at most once on first use.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::OnceCell;

use crate::error::GnavError;

/// Produces a feature module on demand (the dynamic import).
#[async_trait]
pub trait ModuleLoader<T: ?Sized + Send + Sync>: Send + Sync {
    async fn load(&self) -> Result<Arc<T>, GnavError>;
}

/// Compute-once handle to a lazily loaded module.
///
/// The first successful [`LazyModule::get`] stores the module; later
/// calls return the stored handle without touching the loader. A failed
/// load stores nothing, so the next call retries.
pub struct LazyModule<T: ?Sized + Send + Sync> {
    name: &'static str,
    loader: Arc<dyn ModuleLoader<T>>,
    cell: OnceCell<Arc<T>>,
}

impl<T: ?Sized + Send + Sync> LazyModule<T> {
    pub fn new(name: &'static str, loader: Arc<dyn ModuleLoader<T>>) -> Self {
        Self {
            name,
            loader,
            cell: OnceCell::new(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Return the module, loading it first if needed.
    pub async fn get(&self) -> Result<Arc<T>, GnavError> {
        let module = self
            .cell
            .get_or_try_init(|| async {
                tracing::debug!(module = self.name, "Loading module");
                self.loader.load().await
            })
            .await?;
        Ok(Arc::clone(module))
    }

    /// The module if it has already been loaded.
    pub fn loaded(&self) -> Option<Arc<T>> {
        self.cell.get().cloned()
    }

    pub fn is_loaded(&self) -> bool {
        self.cell.initialized()
    }
}

impl<T: ?Sized + Send + Sync> fmt::Debug for LazyModule<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazyModule")
            .field("name", &self.name)
            .field("loaded", &self.is_loaded())
            .finish()
    }
}

/// Loader for a module bundled with the host: hands out the same
/// instance every time.
pub struct Bundled<T: ?Sized>(pub Arc<T>);

#[async_trait]
impl<T: ?Sized + Send + Sync> ModuleLoader<T> for Bundled<T> {
    async fn load(&self) -> Result<Arc<T>, GnavError> {
        Ok(Arc::clone(&self.0))
    }
}

/// Loader for a module the host does not ship. Every load fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct Unavailable;

#[async_trait]
impl<T: ?Sized + Send + Sync> ModuleLoader<T> for Unavailable {
    async fn load(&self) -> Result<Arc<T>, GnavError> {
        Err(GnavError::ModuleLoad {
            module: std::any::type_name::<T>().to_string(),
            reason: "module is not available in this build".to_string(),
        })
    }
}
