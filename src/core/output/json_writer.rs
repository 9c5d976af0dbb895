//! JSON artifact writer.

use std::fs;
use std::io::Write;
use std::path::{Component, Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::{OverrustleError, Result};
use crate::record::ChatRecord;

/// Artifacts under one output root.
///
/// # Example
///
/// ```rust
/// use overrustle::core::output::ArtifactStore;
/// use overrustle::ChatRecord;
/// use chrono::{TimeZone, Utc};
///
/// let dir = tempfile::tempdir()?;
/// let store = ArtifactStore::new(dir.path());
///
/// assert!(!store.exists("moobot", "destiny"));
///
/// let ts = Utc.with_ymd_and_hms(2016, 4, 18, 0, 3, 38).unwrap();
/// let records = vec![ChatRecord::new(ts, "moobot", "hi", "destiny")];
/// store.write("moobot", "destiny", &records)?;
///
/// assert!(store.exists("moobot", "destiny"));
/// assert_eq!(store.read("moobot", "destiny")?, records);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    root: PathBuf,
}

impl ArtifactStore {
    /// Creates a store writing under `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the output root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns `<root>/<username>`, the directory holding a user's artifacts.
    pub fn user_dir(&self, username: &str) -> PathBuf {
        self.root.join(username)
    }

    /// Returns `<root>/<username>/<channel>.json`.
    pub fn artifact_path(&self, username: &str, channel: &str) -> PathBuf {
        self.user_dir(username).join(format!("{channel}.json"))
    }

    /// Returns `true` if the artifact for this key already exists.
    pub fn exists(&self, username: &str, channel: &str) -> bool {
        self.artifact_path(username, channel).is_file()
    }

    /// Writes the artifact for this key, creating the user directory if
    /// needed.
    ///
    /// The JSON goes to a temporary file next to the artifact, which is then
    /// renamed over the artifact path, so a partially written artifact is
    /// never visible under its final name.
    pub fn write(&self, username: &str, channel: &str, records: &[ChatRecord]) -> Result<PathBuf> {
        let path = self.artifact_path(username, channel);
        let dir = path.parent().unwrap_or(&self.root);
        fs::create_dir_all(dir).map_err(|e| OverrustleError::io_at(dir, e))?;

        let json = to_json(records)?;

        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| OverrustleError::io_at(dir, e))?;
        tmp.write_all(json.as_bytes())
            .and_then(|()| tmp.as_file().sync_all())
            .map_err(|e| OverrustleError::io_at(tmp.path(), e))?;
        tmp.persist(&path)
            .map_err(|e| OverrustleError::io_at(&path, e.error))?;

        Ok(path)
    }

    /// Reads the artifact for this key back into records.
    pub fn read(&self, username: &str, channel: &str) -> Result<Vec<ChatRecord>> {
        let path = self.artifact_path(username, channel);
        let json = fs::read_to_string(&path).map_err(|e| OverrustleError::io_at(&path, e))?;
        from_json(&json)
    }

    /// Checks that `username` is usable as a single directory name.
    pub fn validate_username(username: &str) -> Result<()> {
        if username.is_empty() {
            return Err(OverrustleError::invalid_username(username, "empty"));
        }
        if username.contains(['/', '\\']) {
            return Err(OverrustleError::invalid_username(
                username,
                "contains a path separator",
            ));
        }
        let mut components = Path::new(username).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => Ok(()),
            _ => Err(OverrustleError::invalid_username(
                username,
                "not a plain directory name",
            )),
        }
    }
}

/// Serializes records as a JSON array.
pub fn to_json(records: &[ChatRecord]) -> Result<String> {
    Ok(serde_json::to_string(records)?)
}

/// Parses a JSON array of records.
pub fn from_json(json: &str) -> Result<Vec<ChatRecord>> {
    Ok(serde_json::from_str(json)?)
}
