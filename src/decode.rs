//! Decoding raw resource bytes into typed values.
//!
//! ```text
//! bytes ──► decode(bytes, format) ──► T
//!              │
//!              ├─► Json  ─► serde_json
//!              ├─► Yaml  ─► serde_yaml
//!              └─► Text  ─► UTF-8 (BOM stripped) ─► T from string
//! ```

use std::fmt;

use serde::de::DeserializeOwned;
use serde::de::value::{Error as ValueError, StringDeserializer};

use crate::config;
use crate::error::DecodeError;

/// Resource format tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    /// JSON document.
    Json,
    /// YAML document.
    Yaml,
    /// UTF-8 text.
    Text,
}

impl Format {
    /// Lowercase name of the format.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Yaml => "yaml",
            Self::Text => "text",
        }
    }

    /// Guess the format from a file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            "txt" | "text" | "md" => Some(Self::Text),
            _ => None,
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decode bytes in the given format into `T`.
///
/// For [`Format::Text`] the decoded string is handed to `T`'s `Deserialize`
/// impl, so `T = String` always works.
pub fn decode<T: DeserializeOwned>(bytes: &[u8], format: Format) -> Result<T, DecodeError> {
    match format {
        Format::Json => decode_json(bytes),
        Format::Yaml => decode_yaml(bytes),
        Format::Text => {
            let text = decode_text(bytes)?;
            T::deserialize(StringDeserializer::<ValueError>::new(text))
                .map_err(|e| DecodeError::Schema(e.to_string()))
        }
    }
}

/// Decode bytes as UTF-8 text.
///
/// A leading BOM is stripped unless disabled via [`config`].
pub fn decode_text(bytes: &[u8]) -> Result<String, DecodeError> {
    let bytes = if config::get().strip_bom {
        bytes.strip_prefix(b"\xef\xbb\xbf").unwrap_or(bytes)
    } else {
        bytes
    };
    std::str::from_utf8(bytes)
        .map(str::to_owned)
        .map_err(|_| DecodeError::InvalidEncoding)
}

/// Decode a JSON document into `T`.
pub fn decode_json<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, DecodeError> {
    use serde_json::error::Category;

    serde_json::from_slice(bytes).map_err(|e| match e.classify() {
        Category::Data => DecodeError::Schema(e.to_string()),
        Category::Syntax | Category::Eof | Category::Io => DecodeError::Syntax(e.to_string()),
    })
}

/// Decode a YAML document into `T`.
///
/// The document is parsed into a [`serde_yaml::Value`] first, so malformed
/// input is always a syntax error and only a well-formed document can fail
/// on shape.
pub fn decode_yaml<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, DecodeError> {
    let value: serde_yaml::Value =
        serde_yaml::from_slice(bytes).map_err(|e| DecodeError::Syntax(e.to_string()))?;
    serde_yaml::from_value(value).map_err(|e| DecodeError::Schema(e.to_string()))
}
