//! The resource loading facade.
//!
//! ```text
//! load_json(store, "TestData/sample.json")
//!     │
//!     ├─► CacheKey(origin, path, json, T)
//!     │
//!     └─► TypedCache::get_or_load
//!             │ (miss)
//!             ├─► resolve(path)
//!             ├─► ResourceStore::lookup(location)
//!             └─► decode::<T>(bytes, json)
//! ```

use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::cache::{CacheKey, TypedCache};
use crate::decode::{self, Format};
use crate::error::{EmbedError, Result};
use crate::path::resolve;
use crate::store::{ResourceStore, load as load_bytes};

/// Loads and memoizes resources through one [`TypedCache`].
///
/// # Example
///
/// ```ignore
/// use embedded_res::{DirStore, Embedded, TypedCache};
///
/// let store = DirStore::new("assets").with_origin("my-app");
/// let cache = TypedCache::new();
/// let embedded = Embedded::new(&cache);
///
/// let config = embedded.yaml::<Config, _>(&store, "config.yaml")?;
/// let readme = embedded.text(&store, "docs/readme.txt")?;
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Embedded<'c> {
    cache: &'c TypedCache,
}

impl Embedded<'static> {
    /// Facade bound to the process-wide cache.
    pub fn global() -> Self {
        Self {
            cache: TypedCache::global(),
        }
    }
}

impl Default for Embedded<'static> {
    fn default() -> Self {
        Self::global()
    }
}

impl<'c> Embedded<'c> {
    /// Facade bound to the given cache.
    pub fn new(cache: &'c TypedCache) -> Self {
        Self { cache }
    }

    /// The cache this facade reads and fills.
    pub fn cache(&self) -> &'c TypedCache {
        self.cache
    }

    /// Load a JSON resource decoded as `T`.
    pub fn json<T, S>(&self, store: &S, path: &str) -> Result<Arc<T>>
    where
        T: DeserializeOwned + Send + Sync + 'static,
        S: ResourceStore + ?Sized,
    {
        self.load(store, path, Format::Json)
    }

    /// Load a YAML resource decoded as `T`.
    pub fn yaml<T, S>(&self, store: &S, path: &str) -> Result<Arc<T>>
    where
        T: DeserializeOwned + Send + Sync + 'static,
        S: ResourceStore + ?Sized,
    {
        self.load(store, path, Format::Yaml)
    }

    /// Load a UTF-8 text resource.
    pub fn text<S>(&self, store: &S, path: &str) -> Result<Arc<String>>
    where
        S: ResourceStore + ?Sized,
    {
        self.load(store, path, Format::Text)
    }

    /// Load a resource in any format decoded as `T`.
    pub fn load<T, S>(&self, store: &S, path: &str, format: Format) -> Result<Arc<T>>
    where
        T: DeserializeOwned + Send + Sync + 'static,
        S: ResourceStore + ?Sized,
    {
        let key = CacheKey::<T>::new(store.origin(), path, format);
        self.cache.get_or_load(&key, || load_uncached(store, path, format))
    }
}

/// Resolve, read and decode without touching any cache.
pub fn load_uncached<T, S>(store: &S, path: &str, format: Format) -> Result<T>
where
    T: DeserializeOwned,
    S: ResourceStore + ?Sized,
{
    let location = resolve(path);
    let bytes = load_bytes(store, path, &location)?;
    decode::decode(&bytes, format).map_err(|e| EmbedError::decode(path, format, e))
}

/// Load a JSON resource through the global cache.
pub fn load_json<T, S>(store: &S, path: &str) -> Result<Arc<T>>
where
    T: DeserializeOwned + Send + Sync + 'static,
    S: ResourceStore + ?Sized,
{
    Embedded::global().json(store, path)
}

/// Load a YAML resource through the global cache.
pub fn load_yaml<T, S>(store: &S, path: &str) -> Result<Arc<T>>
where
    T: DeserializeOwned + Send + Sync + 'static,
    S: ResourceStore + ?Sized,
{
    Embedded::global().yaml(store, path)
}

/// Load a UTF-8 text resource through the global cache.
pub fn load_text<S>(store: &S, path: &str) -> Result<Arc<String>>
where
    S: ResourceStore + ?Sized,
{
    Embedded::global().text(store, path)
}
