//! In-memory resource store.

use std::io;

use rustc_hash::FxHashMap;

use super::ResourceStore;
use crate::path::{ResolvedLocation, resolve};

/// A simple map-based resource store.
///
/// Suited to bytes compiled into the binary with `include_bytes!` and to
/// tests. Paths are normalized on insert, so `"/a//b.json"` and `"a/b.json"`
/// name the same resource.
///
/// # Example
///
/// ```ignore
/// use embedded_res::MapStore;
///
/// let mut store = MapStore::new("my-app");
/// store.insert("data/site.json", r#"{"title":"My Blog"}"#);
/// store.insert_bytes("logo.txt", include_bytes!("../assets/logo.txt").to_vec());
/// ```
#[derive(Debug, Default, Clone)]
pub struct MapStore {
    origin: String,
    files: FxHashMap<String, Vec<u8>>,
}

impl MapStore {
    /// Create a new empty store with the given origin.
    pub fn new(origin: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            files: FxHashMap::default(),
        }
    }

    /// Insert a resource with string content.
    pub fn insert(&mut self, path: &str, content: impl AsRef<str>) {
        self.insert_bytes(path, content.as_ref().as_bytes().to_vec());
    }

    /// Insert a resource with binary content.
    pub fn insert_bytes(&mut self, path: &str, content: impl Into<Vec<u8>>) {
        self.files.insert(resolve(path).relative_path(), content.into());
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, path: &str, content: impl AsRef<str>) -> Self {
        self.insert(path, content);
        self
    }

    /// Check if a path exists.
    pub fn contains(&self, path: &str) -> bool {
        self.files.contains_key(&resolve(path).relative_path())
    }

    /// Get the number of resources.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Iterate over all resource paths.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }
}

impl ResourceStore for MapStore {
    fn origin(&self) -> &str {
        &self.origin
    }

    fn lookup(&self, location: &ResolvedLocation) -> io::Result<Option<Vec<u8>>> {
        Ok(self.files.get(&location.relative_path()).cloned())
    }

    fn describe(&self) -> String {
        format!("in-memory store '{}'", self.origin)
    }
}
