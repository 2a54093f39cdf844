//! # embedded-res
//!
//! Typed, memoized loading of resources that ship with a program.
//!
//! Ask for a logical path and a target type; the crate finds the file in a
//! [`ResourceStore`], decodes it as JSON, YAML or UTF-8 text, and caches the
//! decoded value so later requests for the same resource and type are free:
//!
//! - **Path resolution**: `dir/sub/file.json` → subdirectory, base name, extension
//! - **Stores**: a bundle directory ([`DirStore`]) or in-memory bytes ([`MapStore`])
//! - **Typed cache**: one cache for values of any type, keyed by
//!   (origin, path, format, type)
//! - **Lazy handles**: declare a resource once, decode on first use
//!
//! ## Quick Start
//!
//! ```ignore
//! use embedded_res::{load_json, load_text, DirStore};
//!
//! #[derive(serde::Deserialize)]
//! struct User { name: String }
//!
//! let bundle = DirStore::new("assets").with_origin("my-app");
//!
//! let user = load_json::<User, _>(&bundle, "TestData/sample.json")?;
//! let notes = load_text(&bundle, "TestData/sample.txt")?;
//!
//! // Served from the cache, no I/O:
//! let again = load_json::<User, _>(&bundle, "TestData/sample.json")?;
//! ```
//!
//! ## Errors
//!
//! Resources are part of the build. A missing file, a read error or a decode
//! error is reported as an [`EmbedError`] and is never replaced by a default.
//! Failed loads are not cached.
//!
//! ## Modules
//!
//! - [`cache`]: The typed cache and its keys
//! - [`store`]: Resource stores
//! - [`path`]: Logical path resolution
//! - [`decode`]: Format dispatch and decoders
//! - [`handle`]: Lazily loaded handles
//! - [`config`]: Runtime configuration

#![forbid(unsafe_code)]
#![warn(missing_docs)]

#[cfg(feature = "batch")]
pub mod batch;
pub mod cache;
pub mod config;
pub mod decode;
pub mod embedded;
pub mod error;
pub mod handle;
pub mod path;
pub mod store;

#[cfg(test)]
mod testing;

// =============================================================================
// Prelude - import commonly used items with a single `use`
// =============================================================================

/// Prelude module for convenient imports.
///
/// ```ignore
/// use embedded_res::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        DirStore, EmbedError, Embedded, Format, Lazy, MapStore, ResourceStore, TypedCache,
        load_json, load_text, load_yaml,
    };
}

// =============================================================================
// High-Level API
// =============================================================================

pub use embedded::{Embedded, load_json, load_text, load_uncached, load_yaml};
pub use handle::Lazy;

#[cfg(feature = "batch")]
pub use batch::warmup;

// =============================================================================
// Infrastructure
// =============================================================================

pub use cache::{CacheKey, CacheStats, TypedCache};
pub use config::{Config, ConfigBuilder};
pub use decode::Format;
pub use error::{DecodeError, EmbedError, ErrorKind, Result};
pub use path::{ResolvedLocation, resolve};
pub use store::{DirStore, MapStore, ResourceStore};
