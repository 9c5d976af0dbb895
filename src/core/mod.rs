//! Per-user aggregation and artifact output.
//!
//! This module contains:
//! - [`aggregate`] - Collect one user's records across a channel's files
//! - [`output`] - Write and read `<username>/<channel>.json` artifacts

pub mod aggregate;
pub mod output;

pub use aggregate::{UserAggregator, UserMatches, filter_user};
pub use output::{ArtifactStore, from_json, to_json};
