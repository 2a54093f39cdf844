//! Per-key cache slots.

use std::any::Any;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;

/// A decoded value with its concrete type erased.
pub(crate) type CacheEntry = Arc<dyn Any + Send + Sync>;

/// Holds the decoded value for one key.
///
/// The mutex is held for the whole load, so concurrent misses on the same
/// key wait for the first loader instead of running their own.
#[derive(Default)]
pub(crate) struct Slot {
    entry: Mutex<Option<CacheEntry>>,
    /// Set once `entry` is populated; readable without waiting on a load.
    filled: AtomicBool,
}

impl Slot {
    /// Get the stored value, or run `load` and store its result on success.
    ///
    /// The second tuple field reports whether `load` ran.
    pub(crate) fn get_or_try_init<T, E>(
        &self,
        load: impl FnOnce() -> Result<T, E>,
    ) -> Result<(Arc<T>, bool), E>
    where
        T: Send + Sync + 'static,
    {
        let mut entry = self.entry.lock();

        if let Some(value) = entry.as_ref().and_then(|e| downcast::<T>(e)) {
            return Ok((value, false));
        }

        let value = Arc::new(load()?);
        *entry = Some(value.clone() as CacheEntry);
        self.filled.store(true, Ordering::Release);
        Ok((value, true))
    }

    /// Return the stored value without waiting on a running load.
    pub(crate) fn get<T: Send + Sync + 'static>(&self) -> Option<Arc<T>> {
        if !self.is_filled() {
            return None;
        }
        self.entry.lock().as_ref().and_then(downcast::<T>)
    }

    /// Check if a value has been stored.
    pub(crate) fn is_filled(&self) -> bool {
        self.filled.load(Ordering::Acquire)
    }
}

fn downcast<T: Send + Sync + 'static>(entry: &CacheEntry) -> Option<Arc<T>> {
    entry.clone().downcast::<T>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_stores_on_success() {
        let slot = Slot::default();
        let (first, loaded) = slot.get_or_try_init(|| Ok::<_, ()>(7u32)).unwrap();
        assert!(loaded);
        let (second, loaded) = slot
            .get_or_try_init::<u32, ()>(|| panic!("should not reload"))
            .unwrap();
        assert!(!loaded);
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_slot_stays_empty_on_failure() {
        let slot = Slot::default();
        let result = slot.get_or_try_init::<u32, &str>(|| Err("bad"));
        assert_eq!(result.unwrap_err(), "bad");
        assert!(!slot.is_filled());
        assert!(slot.get::<u32>().is_none());

        let (value, loaded) = slot.get_or_try_init(|| Ok::<_, &str>(1u32)).unwrap();
        assert!(loaded);
        assert_eq!(*value, 1);
    }
}
