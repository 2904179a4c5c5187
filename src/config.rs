//! Configuration for notestore
//!
//! Constructed explicitly and handed to `open_store`; there is no global
//! configuration.

use std::path::PathBuf;
use std::str::FromStr;

use crate::error::NoteError;

/// Main configuration for a notestore instance
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Store Configuration
    // -------------------------------------------------------------------------
    /// Which store implementation to open
    pub backend: Backend,

    /// Directory holding the snapshot file
    pub data_dir: PathBuf,

    /// Snapshot file name inside `data_dir`
    pub file_name: String,
}

/// Store implementation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// Process memory only; everything is lost on exit
    Memory,

    /// In-memory table mirrored to a snapshot file
    File,
}

impl FromStr for Backend {
    type Err = NoteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "memory" => Ok(Backend::Memory),
            "file" => Ok(Backend::File),
            other => Err(NoteError::Config(format!("unknown backend: {other}"))),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: Backend::File,
            data_dir: PathBuf::from("."),
            file_name: "notes.pb".to_string(),
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Full path of the snapshot file
    pub fn store_path(&self) -> PathBuf {
        self.data_dir.join(&self.file_name)
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the store backend
    pub fn backend(mut self, backend: Backend) -> Self {
        self.config.backend = backend;
        self
    }

    /// Set the data directory
    pub fn data_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.data_dir = path.into();
        self
    }

    /// Set the snapshot file name
    pub fn file_name(mut self, name: impl Into<String>) -> Self {
        self.config.file_name = name.into();
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
