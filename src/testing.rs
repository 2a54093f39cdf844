//! Shared fixtures for unit tests.

use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};

use serde::Deserialize;

use crate::path::ResolvedLocation;
use crate::store::{MapStore, ResourceStore};

pub(crate) const SAMPLE_JSON: &str = r#"{
  "name": "Test User",
  "age": 30,
  "email": "test@example.com",
  "tags": ["swift", "testing", "json"]
}
"#;

pub(crate) const CONFIG_YAML: &str = "\
app:
  name: TestApp
  version: \"1.0.0\"
  debug: true

database:
  host: localhost
  port: 5432
  name: testdb

features:
  - authentication
  - notifications
  - analytics
";

pub(crate) const SAMPLE_TXT: &str = "Hello, World!\nThis is a test text file.\nWith multiple lines.\n";

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub(crate) struct User {
    pub name: String,
    pub age: u32,
    pub email: String,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub(crate) struct App {
    pub name: String,
    pub version: String,
    pub debug: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub(crate) struct Database {
    pub host: String,
    pub port: u16,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub(crate) struct Config {
    pub app: App,
    pub database: Database,
    pub features: Vec<String>,
}

/// Route `tracing` output to the test harness (`RUST_LOG=debug` to see it).
pub(crate) fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// In-memory store holding the sample resources under `TestData/`.
pub(crate) fn fixtures() -> MapStore {
    MapStore::new("fixtures")
        .with("TestData/sample.json", SAMPLE_JSON)
        .with("TestData/config.yaml", CONFIG_YAML)
        .with("TestData/sample.txt", SAMPLE_TXT)
}

/// Store wrapper that counts lookups.
pub(crate) struct CountingStore<S> {
    inner: S,
    lookups: AtomicUsize,
}

impl<S> CountingStore<S> {
    pub(crate) fn new(inner: S) -> Self {
        Self {
            inner,
            lookups: AtomicUsize::new(0),
        }
    }

    pub(crate) fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

impl<S: ResourceStore> ResourceStore for CountingStore<S> {
    fn origin(&self) -> &str {
        self.inner.origin()
    }

    fn lookup(&self, location: &ResolvedLocation) -> io::Result<Option<Vec<u8>>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.inner.lookup(location)
    }
}
