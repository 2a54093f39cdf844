//! Typed memoization of decoded resources.
//!
//! # Caching Strategy
//!
//! ```text
//! TypedCache
//! └── RwLock<FxHashMap<RawKey, Arc<Slot>>>
//!     └── Slot
//!         └── Mutex<Option<Arc<dyn Any + Send + Sync>>>
//! ```
//!
//! The map lock is only held long enough to find or create a slot. Loading
//! happens under the slot's own mutex, so different keys load in parallel
//! while concurrent misses on one key run a single loader.
//!
//! Entries are never evicted. A failed load stores nothing, its empty slot
//! is dropped once no other caller is waiting on it, and the next request
//! for the key retries from scratch.

mod key;
mod slot;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, LazyLock};

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use tracing::{debug, trace, warn};

pub use key::CacheKey;
use key::RawKey;
use slot::Slot;

// =============================================================================
// Global Cache
// =============================================================================

/// Global shared cache used by the crate-level `load_*` functions.
static GLOBAL_CACHE: LazyLock<TypedCache> = LazyLock::new(TypedCache::new);

/// Snapshot of cache counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Requests answered from a stored entry.
    pub hits: u64,
    /// Loader executions that succeeded and were stored.
    pub loads: u64,
    /// Loader executions that failed.
    pub failures: u64,
}

// =============================================================================
// TypedCache
// =============================================================================

/// A thread-safe cache of decoded values of any type.
///
/// Use [`TypedCache::global`] for the process-wide instance, or
/// [`TypedCache::new`] for an isolated one.
#[derive(Default)]
pub struct TypedCache {
    slots: RwLock<FxHashMap<RawKey, Arc<Slot>>>,
    hits: AtomicU64,
    loads: AtomicU64,
    failures: AtomicU64,
}

impl TypedCache {
    /// Create a new empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide default cache.
    pub fn global() -> &'static TypedCache {
        &GLOBAL_CACHE
    }

    /// Return the value cached under `key`, or run `loader` and cache its result.
    ///
    /// The loader's error is returned as-is and nothing is stored. Concurrent
    /// callers with an equal key wait for the running loader and receive the
    /// same `Arc`.
    ///
    /// `loader` must not request the same key again; that would wait on itself.
    pub fn get_or_load<T, E, F>(&self, key: &CacheKey<T>, loader: F) -> Result<Arc<T>, E>
    where
        T: Send + Sync + 'static,
        E: std::fmt::Display,
        F: FnOnce() -> Result<T, E>,
    {
        let slot = self.slot(key.raw());

        let result = slot.get_or_try_init(|| {
            debug!(%key, "cache miss, loading");
            loader()
        });

        match result {
            Ok((value, true)) => {
                self.loads.fetch_add(1, Ordering::Relaxed);
                debug!(%key, "cached");
                Ok(value)
            }
            Ok((value, false)) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                trace!(%key, "cache hit");
                Ok(value)
            }
            Err(e) => {
                self.failures.fetch_add(1, Ordering::Relaxed);
                warn!(%key, error = %e, "load failed, nothing cached");
                self.discard_empty(key.raw(), slot);
                Err(e)
            }
        }
    }

    /// Return the cached value for `key` without loading.
    ///
    /// Never waits: a key whose load is still running reads as absent.
    pub fn get<T: Send + Sync + 'static>(&self, key: &CacheKey<T>) -> Option<Arc<T>> {
        self.slots.read().get(key.raw())?.get::<T>()
    }

    /// Check if a value is cached under `key`.
    pub fn contains<T: ?Sized>(&self, key: &CacheKey<T>) -> bool {
        self.slots
            .read()
            .get(key.raw())
            .is_some_and(|slot| slot.is_filled())
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        self.slots.read().values().filter(|s| s.is_filled()).count()
    }

    /// Check if nothing has been cached.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Current counters.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            loads: self.loads.load(Ordering::Relaxed),
            failures: self.failures.load(Ordering::Relaxed),
        }
    }

    /// Find or create the slot for a key.
    fn slot(&self, key: &RawKey) -> Arc<Slot> {
        if let Some(slot) = self.slots.read().get(key) {
            return slot.clone();
        }
        self.slots.write().entry(key.clone()).or_default().clone()
    }

    /// Drop a slot left empty by a failed load.
    ///
    /// Waiters clone the slot under the map lock, so a strong count of two
    /// (the map and `slot`) under the write lock means nobody else holds it.
    fn discard_empty(&self, key: &RawKey, slot: Arc<Slot>) {
        let mut slots = self.slots.write();
        let unused = slots.get(key).is_some_and(|current| {
            Arc::ptr_eq(current, &slot) && !slot.is_filled() && Arc::strong_count(&slot) == 2
        });
        if unused {
            slots.remove(key);
        }
    }
}

// =============================================================================
// Debug
// =============================================================================

impl std::fmt::Debug for TypedCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypedCache")
            .field("entries", &self.len())
            .field("stats", &self.stats())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::Format;
    use crate::testing::init_tracing;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Barrier;
    use std::thread;
    use std::time::Duration;

    fn key<T: 'static>(path: &str) -> CacheKey<T> {
        CacheKey::new("test", path, Format::Json)
    }

    #[test]
    fn test_miss_then_hit() {
        init_tracing();
        let cache = TypedCache::new();
        let calls = AtomicUsize::new(0);
        let load = || {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok::<_, String>(vec![1, 2, 3])
        };

        let first = cache.get_or_load(&key::<Vec<i32>>("a"), load).unwrap();
        let second = cache.get_or_load(&key::<Vec<i32>>("a"), load).unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.stats(), CacheStats { hits: 1, loads: 1, failures: 0 });
    }

    #[test]
    fn test_type_separation() {
        let cache = TypedCache::new();
        let as_string = cache
            .get_or_load(&key::<String>("same"), || Ok::<_, String>("text".to_string()))
            .unwrap();
        let as_number = cache
            .get_or_load(&key::<u64>("same"), || Ok::<_, String>(42u64))
            .unwrap();

        assert_eq!(*as_string, "text");
        assert_eq!(*as_number, 42);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_failure_not_cached() {
        init_tracing();
        let cache = TypedCache::new();
        let k = key::<u32>("flaky");

        let err = cache.get_or_load(&k, || Err::<u32, _>("malformed")).unwrap_err();
        assert_eq!(err, "malformed");
        assert!(!cache.contains(&k));
        assert!(cache.get(&k).is_none());
        assert!(cache.is_empty());
        assert!(cache.slots.read().is_empty());

        let value = cache.get_or_load(&k, || Ok::<_, &str>(5)).unwrap();
        assert_eq!(*value, 5);
        assert!(cache.contains(&k));
        assert_eq!(cache.stats().failures, 1);
    }

    #[test]
    fn test_get_without_loading() {
        let cache = TypedCache::new();
        let k = key::<String>("peek");
        assert!(cache.get(&k).is_none());
        cache.get_or_load(&k, || Ok::<_, String>("v".into())).unwrap();
        assert_eq!(cache.get(&k).as_deref().map(String::as_str), Some("v"));
    }

    #[test]
    fn test_repeated_failures_leave_no_slots() {
        let cache = TypedCache::new();
        for i in 0..16 {
            let k = key::<u32>(&format!("missing-{i}"));
            assert!(cache.get_or_load(&k, || Err::<u32, _>("not found")).is_err());
        }
        assert!(cache.slots.read().is_empty());
        assert_eq!(cache.stats().failures, 16);
    }

    #[test]
    fn test_get_does_not_wait_for_running_load() {
        let cache = TypedCache::new();
        let k = key::<String>("slow");
        let started = Barrier::new(2);
        let release = Barrier::new(2);
        let (cache, k, started, release) = (&cache, &k, &started, &release);

        thread::scope(|s| {
            let loader = s.spawn(move || {
                cache
                    .get_or_load(k, move || {
                        started.wait();
                        release.wait();
                        Ok::<_, String>("done".to_string())
                    })
                    .unwrap()
            });

            started.wait();
            assert!(cache.get(k).is_none());
            assert!(!cache.contains(k));
            release.wait();

            assert_eq!(*loader.join().unwrap(), "done");
        });

        assert_eq!(cache.get(k).as_deref().map(String::as_str), Some("done"));
    }

    #[test]
    fn test_concurrent_misses_coalesce() {
        const THREADS: usize = 8;

        let cache = TypedCache::new();
        let calls = AtomicUsize::new(0);
        let barrier = Barrier::new(THREADS);
        let (cache, calls, barrier) = (&cache, &calls, &barrier);

        let results: Vec<Arc<Vec<String>>> = thread::scope(|s| {
            let handles: Vec<_> = (0..THREADS)
                .map(|_| {
                    s.spawn(move || {
                        barrier.wait();
                        cache
                            .get_or_load(&key::<Vec<String>>("shared"), move || {
                                calls.fetch_add(1, Ordering::SeqCst);
                                thread::sleep(Duration::from_millis(20));
                                Ok::<_, String>(vec!["a".into(), "b".into(), "c".into()])
                            })
                            .unwrap()
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        for value in &results {
            assert!(Arc::ptr_eq(value, &results[0]));
            assert_eq!(value.as_slice(), ["a", "b", "c"]);
        }
    }

    #[test]
    fn test_global_is_shared() {
        assert!(std::ptr::eq(TypedCache::global(), TypedCache::global()));
    }
}
