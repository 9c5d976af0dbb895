//! Where channels and their text files come from.
//!
//! Decompressing archives is somebody else's job; by the time the
//! extraction runs, each channel is a directory of plain text log files.
//! [`ChannelSource`] is the seam: [`DirectoryChannels`] reads an extracted
//! layout like this one:
//!
//! ```text
//! logs/
//! ├── destiny/            <- channel "destiny"
//! │   ├── 2016-04-17.txt
//! │   └── 2016-04-18.txt
//! └── lirik/              <- channel "lirik"
//!     └── April 2016/
//!         └── 2016-04-18.txt
//! ```

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{OverrustleError, Result};

/// One channel: a name and the directory holding its text files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Channel {
    name: String,
    root: PathBuf,
}

impl Channel {
    /// Creates a channel named `name` whose files live under `root`.
    pub fn new(name: impl Into<String>, root: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            root: root.into(),
        }
    }

    /// Returns the channel name used for records and artifact file names.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the directory holding the channel's files.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Lists files with the given extension under the channel root,
    /// recursively, sorted by path and without duplicates.
    ///
    /// # Errors
    ///
    /// Returns [`OverrustleError::IoAt`] if a directory can't be read.
    pub fn text_files(&self, extension: &str) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();

        for entry in WalkDir::new(&self.root).follow_links(true) {
            let entry = entry.map_err(|e| {
                let path = e.path().unwrap_or(&self.root).to_path_buf();
                OverrustleError::io_at(path, e.into())
            })?;

            if entry.file_type().is_file() && has_extension(entry.path(), extension) {
                files.push(entry.into_path());
            }
        }

        files.sort();
        files.dedup();
        Ok(files)
    }
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension() == Some(OsStr::new(extension))
}

/// Supplies the channels of one extraction run.
pub trait ChannelSource {
    /// Returns the channels to process, in processing order.
    fn channels(&self) -> Result<Vec<Channel>>;

    /// Returns where the channels come from, for error messages.
    fn location(&self) -> &Path;
}

/// Channels from an extracted logs directory: every immediate
/// subdirectory is one channel, named after the directory.
///
/// Loose files directly under the logs directory are ignored.
#[derive(Debug, Clone)]
pub struct DirectoryChannels {
    root: PathBuf,
}

impl DirectoryChannels {
    /// Reads channels from the subdirectories of `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl ChannelSource for DirectoryChannels {
    fn channels(&self) -> Result<Vec<Channel>> {
        let entries = fs::read_dir(&self.root).map_err(|e| OverrustleError::io_at(&self.root, e))?;

        let mut channels = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| OverrustleError::io_at(&self.root, e))?;
            let path = entry.path();
            if path.is_dir() {
                let name = entry.file_name().to_string_lossy().into_owned();
                channels.push(Channel::new(name, path));
            }
        }

        channels.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(channels)
    }

    fn location(&self) -> &Path {
        &self.root
    }
}
