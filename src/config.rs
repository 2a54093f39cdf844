//! Configuration for embedded-res.
//!
//! Use [`ConfigBuilder`] at application startup to change decoding behavior.
//! Nothing is read from the environment or from files.

use std::sync::OnceLock;

/// Global configuration, initialized via [`ConfigBuilder::init`].
static CONFIG: OnceLock<Config> = OnceLock::new();

/// Runtime configuration for embedded-res.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Strip a leading UTF-8 byte order mark from text resources.
    pub strip_bom: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self { strip_bom: true }
    }
}

/// Configuration builder for fluent API.
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    strip_bom: Option<bool>,
}

impl ConfigBuilder {
    /// Create a new configuration builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether a UTF-8 BOM is stripped from text resources.
    ///
    /// Default: `true`
    ///
    /// # Example
    ///
    /// ```
    /// use embedded_res::config::ConfigBuilder;
    ///
    /// ConfigBuilder::new().strip_bom(false).init();
    /// ```
    pub fn strip_bom(mut self, strip: bool) -> Self {
        self.strip_bom = Some(strip);
        self
    }

    /// Build the configuration without installing it.
    pub fn build(self) -> Config {
        let default = Config::default();
        Config {
            strip_bom: self.strip_bom.unwrap_or(default.strip_bom),
        }
    }

    /// Build and initialize the global configuration.
    ///
    /// This can only be called once. Subsequent calls are ignored.
    /// Returns `true` if configuration was set, `false` if already initialized.
    pub fn init(self) -> bool {
        CONFIG.set(self.build()).is_ok()
    }
}

/// Get the current configuration, or default if not initialized.
pub fn get() -> &'static Config {
    CONFIG.get_or_init(Config::default)
}
