//! Cache keys.

use std::any::TypeId;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use crate::decode::Format;

/// Type-erased key as stored in the cache map.
///
/// `type_name` is carried for diagnostics only and does not take part in
/// equality or hashing.
#[derive(Debug, Clone)]
pub(crate) struct RawKey {
    origin: String,
    path: String,
    format: Format,
    type_id: TypeId,
    type_name: &'static str,
}

impl PartialEq for RawKey {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
            && self.format == other.format
            && self.path == other.path
            && self.origin == other.origin
    }
}

impl Eq for RawKey {}

impl Hash for RawKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.origin.hash(state);
        self.path.hash(state);
        self.format.hash(state);
        self.type_id.hash(state);
    }
}

impl fmt::Display for RawKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}:{}",
            self.origin, self.path, self.format, self.type_name
        )
    }
}

/// Identifies one decoded artifact: origin, logical path, format and target type.
///
/// The target type is a type parameter, so a key can only ever be used to
/// fetch the type it was built for. Two keys for the same path that differ
/// only in `T` name different cache entries.
pub struct CacheKey<T: ?Sized> {
    raw: RawKey,
    _marker: PhantomData<fn() -> T>,
}

impl<T: ?Sized + 'static> CacheKey<T> {
    /// Build a key for decoding `path` from `origin` as `format` into `T`.
    pub fn new(origin: impl Into<String>, path: impl Into<String>, format: Format) -> Self {
        Self {
            raw: RawKey {
                origin: origin.into(),
                path: path.into(),
                format,
                type_id: TypeId::of::<T>(),
                type_name: std::any::type_name::<T>(),
            },
            _marker: PhantomData,
        }
    }
}

impl<T: ?Sized> CacheKey<T> {
    /// Origin identifier of the store.
    pub fn origin(&self) -> &str {
        &self.raw.origin
    }

    /// Logical path.
    pub fn path(&self) -> &str {
        &self.raw.path
    }

    /// Decoding format.
    pub fn format(&self) -> Format {
        self.raw.format
    }

    /// Name of the target type.
    pub fn type_name(&self) -> &'static str {
        self.raw.type_name
    }

    pub(crate) fn raw(&self) -> &RawKey {
        &self.raw
    }
}

impl<T: ?Sized> Clone for CacheKey<T> {
    fn clone(&self) -> Self {
        Self {
            raw: self.raw.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T: ?Sized> PartialEq for CacheKey<T> {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl<T: ?Sized> Eq for CacheKey<T> {}

impl<T: ?Sized> Hash for CacheKey<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.raw.hash(state);
    }
}

impl<T: ?Sized> fmt::Debug for CacheKey<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CacheKey").field(&self.raw.to_string()).finish()
    }
}

impl<T: ?Sized> fmt::Display for CacheKey<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.raw, f)
    }
}
