//! Parallel preloading.
//!
//! Loads many resources at once on the rayon thread pool so that later
//! requests are cache hits. Results keep the order of the input paths.

use std::sync::Arc;

use rayon::prelude::*;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::decode::Format;
use crate::embedded::Embedded;
use crate::error::Result;
use crate::store::ResourceStore;

impl Embedded<'_> {
    /// Load every path in parallel, decoded as `T`.
    pub fn preload<T, S, P>(&self, store: &S, paths: &[P], format: Format) -> Vec<Result<Arc<T>>>
    where
        T: DeserializeOwned + Send + Sync + 'static,
        S: ResourceStore + ?Sized,
        P: AsRef<str> + Sync,
    {
        paths
            .par_iter()
            .map(|path| self.load::<T, S>(store, path.as_ref(), format))
            .collect()
    }

    /// Load every path in parallel as UTF-8 text.
    pub fn preload_text<S, P>(&self, store: &S, paths: &[P]) -> Vec<Result<Arc<String>>>
    where
        S: ResourceStore + ?Sized,
        P: AsRef<str> + Sync,
    {
        self.preload(store, paths, Format::Text)
    }
}

/// Load every path as text into the global cache.
///
/// Returns the number of resources loaded, or the first error in input order.
pub fn warmup<S, P>(store: &S, paths: &[P]) -> Result<usize>
where
    S: ResourceStore + ?Sized,
    P: AsRef<str> + Sync,
{
    let results = Embedded::global().preload_text(store, paths);
    let count = results.len();
    for result in results {
        result?;
    }
    debug!(origin = store.origin(), count, "warmed up resources");
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::TypedCache;
    use crate::error::ErrorKind;
    use crate::store::MapStore;
    use crate::testing::{CountingStore, fixtures};

    #[test]
    fn test_preload_text_keeps_order() {
        let cache = TypedCache::new();
        let store = MapStore::new("batch")
            .with("a.txt", "A")
            .with("b.txt", "B")
            .with("c.txt", "C");

        let results = Embedded::new(&cache).preload_text(&store, &["c.txt", "a.txt", "b.txt"]);
        let texts: Vec<String> = results.into_iter().map(|r| (*r.unwrap()).clone()).collect();
        assert_eq!(texts, ["C", "A", "B"]);
        assert_eq!(cache.len(), 3);
    }

    #[test]
    fn test_preload_then_hit() {
        let cache = TypedCache::new();
        let store = CountingStore::new(fixtures());
        let embedded = Embedded::new(&cache);

        let results = embedded.preload::<serde_json::Value, _, _>(
            &store,
            &["TestData/sample.json"],
            Format::Json,
        );
        assert!(results[0].is_ok());

        embedded
            .json::<serde_json::Value, _>(&store, "TestData/sample.json")
            .unwrap();
        assert_eq!(store.lookups(), 1);
    }

    #[test]
    fn test_preload_reports_each_failure() {
        let cache = TypedCache::new();
        let store = MapStore::new("batch-fail").with("ok.txt", "fine");
        let results = Embedded::new(&cache).preload_text(&store, &["ok.txt", "missing.txt"]);
        assert!(results[0].is_ok());
        assert_eq!(results[1].as_ref().unwrap_err().kind(), ErrorKind::ResourceNotFound);
    }

    #[test]
    fn test_warmup() {
        let store = MapStore::new("batch-warmup").with("x.txt", "x").with("y.txt", "y");
        assert_eq!(warmup(&store, &["x.txt", "y.txt"]).unwrap(), 2);

        let err = warmup(&store, &["x.txt", "z.txt"]).unwrap_err();
        assert_eq!(err.path(), "z.txt");
    }
}
