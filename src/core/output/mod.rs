//! Per-(username, channel) result artifacts.
//!
//! Each channel's matches for one user end up in a single JSON file:
//!
//! ```text
//! <output root>/<username>/<channel>.json
//! ```
//!
//! The file holds a JSON array of records:
//!
//! ```json
//! [{"dt":1460937818,"username":"moobot","message":"hi","channel":"destiny"}]
//! ```
//!
//! An artifact that exists is complete: it is written to a temporary file
//! first and renamed into place. Reruns use [`ArtifactStore::exists`] to skip
//! channels that are already done.

mod json_writer;

pub use json_writer::{ArtifactStore, from_json, to_json};
