//! Error types for resource loading.

use std::io;

use thiserror::Error;

use crate::decode::Format;

/// Result alias used throughout the crate.
pub type Result<T, E = EmbedError> = std::result::Result<T, E>;

/// Error produced while decoding raw resource bytes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Input is not well-formed for its format.
    #[error("syntax error: {0}")]
    Syntax(String),

    /// Input is well-formed but does not fit the requested type.
    #[error("schema mismatch: {0}")]
    Schema(String),

    /// Text resource is not valid UTF-8.
    #[error("not valid UTF-8")]
    InvalidEncoding,
}

/// Broad classification of an [`EmbedError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The path did not resolve to any resource in the store.
    ResourceNotFound,
    /// The resource was located but its bytes could not be read.
    ReadFailure,
    /// The bytes do not parse or do not satisfy the requested type.
    DecodeFailure,
    /// A text resource is not valid UTF-8.
    EncodingFailure,
}

/// Error type for every resource loading operation.
///
/// Resources are expected to ship with the program, so each variant points at
/// a packaging defect. None of them is recovered from internally.
///
/// # Example
///
/// ```ignore
/// match load_json::<Settings, _>(&store, "settings.json") {
///     Ok(settings) => { /* use settings */ }
///     Err(EmbedError::ResourceNotFound { path, .. }) => {
///         eprintln!("missing resource: {path}");
///     }
///     Err(e) => eprintln!("{e}"),
/// }
/// ```
#[derive(Debug, Error)]
pub enum EmbedError {
    /// The store has no resource at this path.
    #[error("resource not found: '{path}' in {location}")]
    ResourceNotFound {
        /// Logical path that was requested.
        path: String,
        /// Origin identifier of the store.
        origin: String,
        /// Human-readable store location.
        location: String,
    },

    /// The resource exists but reading it failed.
    #[error("failed to load resource '{path}': {source}")]
    ReadFailure {
        /// Logical path that was requested.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The bytes could not be decoded into the requested type.
    #[error("failed to decode {format} from '{path}': {source}")]
    Decode {
        /// Logical path that was requested.
        path: String,
        /// Format the bytes were decoded as.
        format: Format,
        /// Decoder failure.
        #[source]
        source: DecodeError,
    },
}

impl EmbedError {
    /// Create a not-found error.
    pub fn not_found(
        path: impl Into<String>,
        origin: impl Into<String>,
        location: impl Into<String>,
    ) -> Self {
        Self::ResourceNotFound {
            path: path.into(),
            origin: origin.into(),
            location: location.into(),
        }
    }

    /// Create a read failure.
    pub fn read(path: impl Into<String>, source: io::Error) -> Self {
        Self::ReadFailure {
            path: path.into(),
            source,
        }
    }

    /// Create a decode failure.
    pub fn decode(path: impl Into<String>, format: Format, source: DecodeError) -> Self {
        Self::Decode {
            path: path.into(),
            format,
            source,
        }
    }

    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ResourceNotFound { .. } => ErrorKind::ResourceNotFound,
            Self::ReadFailure { .. } => ErrorKind::ReadFailure,
            Self::Decode {
                source: DecodeError::InvalidEncoding,
                ..
            } => ErrorKind::EncodingFailure,
            Self::Decode { .. } => ErrorKind::DecodeFailure,
        }
    }

    /// Logical path the failing request was made for.
    pub fn path(&self) -> &str {
        match self {
            Self::ResourceNotFound { path, .. }
            | Self::ReadFailure { path, .. }
            | Self::Decode { path, .. } => path,
        }
    }

    /// Check if this is a text encoding failure.
    pub fn is_encoding_failure(&self) -> bool {
        self.kind() == ErrorKind::EncodingFailure
    }

    /// Check if the resource was missing.
    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::ResourceNotFound
    }
}
