//! Lazily loaded resource handles.
//!
//! A [`Lazy`] is declared once, stored anywhere (a struct field, a `static`
//! behind `LazyLock`), and decodes on first access through the shared cache.
//! Two handles for the same resource and type share one cached value.

use std::fmt;
use std::sync::{Arc, OnceLock};

use serde::de::DeserializeOwned;

use crate::cache::TypedCache;
use crate::decode::Format;
use crate::embedded::Embedded;
use crate::error::Result;
use crate::store::ResourceStore;

/// A typed resource binding that loads on first use.
///
/// # Example
///
/// ```ignore
/// use std::sync::Arc;
/// use embedded_res::{DirStore, Lazy};
///
/// struct Settings {
///     config: Lazy<Config>,
///     banner: Lazy<String>,
/// }
///
/// let store = Arc::new(DirStore::new("assets"));
/// let settings = Settings {
///     config: Lazy::yaml(store.clone(), "config.yaml"),
///     banner: Lazy::text(store, "banner.txt"),
/// };
///
/// println!("{}", settings.config.get()?.app.name);
/// ```
pub struct Lazy<T> {
    store: Arc<dyn ResourceStore>,
    path: String,
    format: Format,
    cache: &'static TypedCache,
    value: OnceLock<Arc<T>>,
}

impl<T> Lazy<T>
where
    T: DeserializeOwned + Send + Sync + 'static,
{
    /// A JSON resource decoded as `T`.
    pub fn json(store: Arc<dyn ResourceStore>, path: impl Into<String>) -> Self {
        Self::new(store, path, Format::Json)
    }

    /// A YAML resource decoded as `T`.
    pub fn yaml(store: Arc<dyn ResourceStore>, path: impl Into<String>) -> Self {
        Self::new(store, path, Format::Yaml)
    }

    /// A resource in the given format decoded as `T`.
    pub fn new(store: Arc<dyn ResourceStore>, path: impl Into<String>, format: Format) -> Self {
        Self {
            store,
            path: path.into(),
            format,
            cache: TypedCache::global(),
            value: OnceLock::new(),
        }
    }

    /// Load through `cache` instead of the global cache.
    pub fn with_cache(mut self, cache: &'static TypedCache) -> Self {
        self.cache = cache;
        self
    }

    /// Get the value, loading it on first call.
    ///
    /// A failed load leaves the handle empty; the next call tries again.
    pub fn get(&self) -> Result<Arc<T>> {
        if let Some(value) = self.value.get() {
            return Ok(value.clone());
        }
        let loaded = Embedded::new(self.cache).load::<T, _>(&*self.store, &self.path, self.format)?;
        Ok(self.value.get_or_init(|| loaded).clone())
    }
}

impl Lazy<String> {
    /// A UTF-8 text resource.
    pub fn text(store: Arc<dyn ResourceStore>, path: impl Into<String>) -> Self {
        Self::new(store, path, Format::Text)
    }
}

impl<T> Lazy<T> {
    /// Check if the value has been loaded by this handle.
    pub fn is_loaded(&self) -> bool {
        self.value.get().is_some()
    }

    /// Logical path of the resource.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Decoding format.
    pub fn format(&self) -> Format {
        self.format
    }
}

impl<T> fmt::Debug for Lazy<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lazy")
            .field("origin", &self.store.origin())
            .field("path", &self.path)
            .field("format", &self.format)
            .field("loaded", &self.is_loaded())
            .finish()
    }
}
