//! Logical path resolution.
//!
//! A logical path such as `TestData/config.yaml` is split into the triple a
//! bundle lookup understands:
//!
//! ```text
//! "dir/sub/file.json"
//!  └──┬──┘ └┬─┘ └┬─┘
//!  subdir  base  extension
//! ```
//!
//! This is plain string splitting. `.` and `..` segments are kept as-is.

use std::fmt;

/// A logical path split into subdirectory, base name and extension.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResolvedLocation {
    subdirectory: Option<String>,
    base_name: String,
    extension: String,
}

impl ResolvedLocation {
    /// Create a location from its parts.
    pub fn new(
        subdirectory: Option<String>,
        base_name: impl Into<String>,
        extension: impl Into<String>,
    ) -> Self {
        Self {
            subdirectory,
            base_name: base_name.into(),
            extension: extension.into(),
        }
    }

    /// Directory segments before the file name, joined by `/`.
    pub fn subdirectory(&self) -> Option<&str> {
        self.subdirectory.as_deref()
    }

    /// File name without its extension.
    pub fn base_name(&self) -> &str {
        &self.base_name
    }

    /// Extension without the leading dot (empty if none).
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// File name with its extension (`base.ext`).
    pub fn file_name(&self) -> String {
        if self.extension.is_empty() {
            self.base_name.clone()
        } else {
            format!("{}.{}", self.base_name, self.extension)
        }
    }

    /// Rebuild the `/`-separated relative path (`subdir/base.ext`).
    pub fn relative_path(&self) -> String {
        match &self.subdirectory {
            Some(dir) => format!("{dir}/{}", self.file_name()),
            None => self.file_name(),
        }
    }
}

impl fmt::Display for ResolvedLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.relative_path())
    }
}

/// Split a logical path into a [`ResolvedLocation`].
///
/// Empty segments are skipped, so `"/a//b.txt"` resolves like `"a/b.txt"`.
/// A leading or trailing dot does not delimit an extension: `".env"` and
/// `"notes."` have none, so [`ResolvedLocation::relative_path`] always
/// names the same file.
pub fn resolve(logical_path: &str) -> ResolvedLocation {
    let segments: Vec<&str> = logical_path.split('/').filter(|s| !s.is_empty()).collect();

    let (file_name, subdirectory) = match segments.split_last() {
        Some((last, [])) => (*last, None),
        Some((last, dirs)) => (*last, Some(dirs.join("/"))),
        None => (logical_path, None),
    };

    let (base_name, extension) = match file_name.rfind('.') {
        Some(idx) if idx > 0 && idx + 1 < file_name.len() => {
            (&file_name[..idx], &file_name[idx + 1..])
        }
        _ => (file_name, ""),
    };

    ResolvedLocation {
        subdirectory,
        base_name: base_name.to_string(),
        extension: extension.to_string(),
    }
}
