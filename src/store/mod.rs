//! Resource stores: where resource bytes come from.
//!
//! ```text
//! ┌───────────────────────────────────────────────────────┐
//! │                   Resource Lookup                     │
//! ├───────────────────────────────────────────────────────┤
//! │                                                       │
//! │  "dir/file.json" ──► resolve() ──► ResolvedLocation   │
//! │                                        │              │
//! │                        ResourceStore::lookup          │
//! │                                        │              │
//! │                     ├─► DirStore  (bundle directory)  │
//! │                     └─► MapStore  (in-memory bytes)   │
//! │                                                       │
//! └───────────────────────────────────────────────────────┘
//! ```
//!
//! Every store carries an *origin*: a namespace string that becomes part of
//! each cache key, so the same logical path in two stores never collides.

mod dir;
mod map;

use std::io;
use std::sync::Arc;

use crate::error::{EmbedError, Result};
use crate::path::ResolvedLocation;

pub use dir::DirStore;
pub use map::MapStore;

// =============================================================================
// ResourceStore Trait
// =============================================================================

/// A source of bundled resource bytes.
///
/// Implementations map a [`ResolvedLocation`] to raw bytes.
///
/// # Example
///
/// ```ignore
/// use embedded_res::{ResolvedLocation, ResourceStore};
///
/// struct Static;
///
/// impl ResourceStore for Static {
///     fn origin(&self) -> &str {
///         "static"
///     }
///
///     fn lookup(&self, location: &ResolvedLocation) -> std::io::Result<Option<Vec<u8>>> {
///         match location.relative_path().as_str() {
///             "greeting.txt" => Ok(Some(b"hello".to_vec())),
///             _ => Ok(None),
///         }
///     }
/// }
/// ```
pub trait ResourceStore: Send + Sync {
    /// Namespace identifier, included in every cache key.
    fn origin(&self) -> &str;

    /// Look up a resource.
    ///
    /// Return `Ok(None)` when nothing matches, and `Err` when a matching
    /// resource exists but could not be read.
    fn lookup(&self, location: &ResolvedLocation) -> io::Result<Option<Vec<u8>>>;

    /// Human-readable location used in error messages.
    fn describe(&self) -> String {
        self.origin().to_string()
    }
}

// =============================================================================
// Pointer Impls
// =============================================================================

impl<S: ResourceStore + ?Sized> ResourceStore for &S {
    fn origin(&self) -> &str {
        (**self).origin()
    }

    fn lookup(&self, location: &ResolvedLocation) -> io::Result<Option<Vec<u8>>> {
        (**self).lookup(location)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

impl<S: ResourceStore + ?Sized> ResourceStore for Box<S> {
    fn origin(&self) -> &str {
        (**self).origin()
    }

    fn lookup(&self, location: &ResolvedLocation) -> io::Result<Option<Vec<u8>>> {
        (**self).lookup(location)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

impl<S: ResourceStore + ?Sized> ResourceStore for Arc<S> {
    fn origin(&self) -> &str {
        (**self).origin()
    }

    fn lookup(&self, location: &ResolvedLocation) -> io::Result<Option<Vec<u8>>> {
        (**self).lookup(location)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

// =============================================================================
// Loading
// =============================================================================

/// Load the bytes for `location` from `store`.
///
/// A missing resource and a failed read are both errors; there is no
/// fallback.
pub fn load<S: ResourceStore + ?Sized>(
    store: &S,
    path: &str,
    location: &ResolvedLocation,
) -> Result<Vec<u8>> {
    match store.lookup(location) {
        Ok(Some(bytes)) => Ok(bytes),
        Ok(None) => Err(EmbedError::not_found(path, store.origin(), store.describe())),
        Err(e) => Err(EmbedError::read(path, e)),
    }
}
