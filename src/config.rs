//! Configuration for an extraction run.
//!
//! Plain structs with builder methods, usable from library code without any
//! CLI framework.
//!
//! # Example
//!
//! ```rust
//! use overrustle::config::ExtractConfig;
//!
//! let config = ExtractConfig::new()
//!     .with_output_root("exports")
//!     .with_buffer_size(128 * 1024);
//!
//! assert_eq!(config.extension, "txt");
//! ```

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::streaming::DEFAULT_BUFFER_SIZE;

/// Settings for [`Extractor`](crate::extract::Extractor).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractConfig {
    /// Directory that receives `<username>/<channel>.json` (default: `.`)
    pub output_root: PathBuf,

    /// Extension of chat log files inside a channel (default: `txt`)
    pub extension: String,

    /// Read buffer size per file (default: 64KB)
    pub buffer_size: usize,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            output_root: PathBuf::from("."),
            extension: "txt".to_string(),
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }
}

impl ExtractConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the directory artifacts are written under.
    #[must_use]
    pub fn with_output_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.output_root = root.into();
        self
    }

    /// Sets the chat log file extension (without the dot).
    #[must_use]
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Sets the read buffer size.
    #[must_use]
    pub fn with_buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size;
        self
    }
}
