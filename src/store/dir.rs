//! Directory-backed resource store.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::ResourceStore;
use crate::path::ResolvedLocation;

/// A resource store rooted at a directory on disk.
///
/// Plays the role of an application bundle: resources are looked up as
/// `root/subdirectory/base.extension`.
#[derive(Debug, Clone)]
pub struct DirStore {
    root: PathBuf,
    origin: String,
}

impl DirStore {
    /// Create a store rooted at `root`.
    ///
    /// The origin defaults to the root's display form.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let origin = root.display().to_string();
        Self { root, origin }
    }

    /// Override the origin identifier.
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = origin.into();
        self
    }

    /// Root directory of this store.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Full on-disk path for a location.
    pub fn path_of(&self, location: &ResolvedLocation) -> PathBuf {
        let mut path = self.root.clone();
        if let Some(dir) = location.subdirectory() {
            path.extend(dir.split('/'));
        }
        path.push(location.file_name());
        path
    }
}

impl ResourceStore for DirStore {
    fn origin(&self) -> &str {
        &self.origin
    }

    fn lookup(&self, location: &ResolvedLocation) -> io::Result<Option<Vec<u8>>> {
        read_disk(&self.path_of(location))
    }

    fn describe(&self) -> String {
        self.root.display().to_string()
    }
}

/// Read a file from disk.
///
/// Anything that does not name an existing file is not found: a missing
/// path, a directory, a path running through a regular file, or a name the
/// platform rejects.
fn read_disk(path: &Path) -> io::Result<Option<Vec<u8>>> {
    match fs::metadata(path) {
        Ok(m) if m.is_dir() => Ok(None),
        Ok(_) => fs::read(path).map(Some),
        Err(e) if is_unresolvable(&e) => Ok(None),
        Err(e) => Err(e),
    }
}

fn is_unresolvable(e: &io::Error) -> bool {
    matches!(
        e.kind(),
        io::ErrorKind::NotFound | io::ErrorKind::NotADirectory | io::ErrorKind::InvalidFilename
    )
}
