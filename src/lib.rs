//! # Overrustle
//!
//! A Rust library for pulling one user's messages out of OverRustle-style
//! chat log archives and exporting them as one JSON file per channel.
//!
//! ## Overview
//!
//! OverRustle logs are plain text, one message per line:
//!
//! ```text
//! [2016-04-18 00:03:38 UTC] moobot: There's 95% <3 between AlasdairSc and Justin
//! ```
//!
//! Each channel is a directory of such files. An extraction run walks every
//! channel, keeps the lines said by the target user and writes
//! `<output>/<username>/<channel>.json`. A channel whose artifact already
//! exists is skipped, so an interrupted run can simply be restarted.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use overrustle::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let config = ExtractConfig::new().with_output_root("exports");
//!     let extractor = Extractor::new(config, &TracingObserver);
//!
//!     let summary = extractor.run(&DirectoryChannels::new("logs"), "moobot")?;
//!     println!("{} records", summary.total_matched());
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Parsing Single Lines
//!
//! ```rust
//! use overrustle::observe::NoopObserver;
//! use overrustle::parsing::parse_line;
//!
//! let line = "[2016-04-18 00:03:38 UTC] alasdairsc: !love Justin";
//! let record = parse_line(line, "destiny", &NoopObserver).unwrap();
//!
//! assert_eq!(record.username(), "alasdairsc");
//! assert_eq!(record.message(), "!love Justin");
//! assert_eq!(record.epoch_seconds(), 1460937818);
//! ```
//!
//! ## Module Structure
//!
//! - [`parsing`] - timestamp parser and single-line matcher
//! - [`streaming`] - [`ChatLogStream`](streaming::ChatLogStream), a lazy
//!   record iterator over any `BufRead`
//! - [`core`] - per-user aggregation and the JSON [`ArtifactStore`](core::ArtifactStore)
//! - [`source`] - channel enumeration ([`ChannelSource`](source::ChannelSource))
//! - [`extract`] - the [`Extractor`](extract::Extractor) driving a whole run
//! - [`observe`] - injected [`Observer`](observe::Observer) for progress and diagnostics
//! - [`config`] - [`ExtractConfig`](config::ExtractConfig)
//! - [`error`] - unified error type ([`OverrustleError`], [`Result`])
//! - [`prelude`] - convenient re-exports

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod extract;
pub mod observe;
pub mod parsing;
pub mod record;
pub mod source;
pub mod streaming;

// Re-export the main types at the crate root for convenience
pub use error::{OverrustleError, Result};
pub use record::ChatRecord;

/// Convenient re-exports for common usage.
///
/// ```rust
/// use overrustle::prelude::*;
/// ```
pub mod prelude {
    pub use crate::ChatRecord;
    pub use crate::error::{OverrustleError, Result};

    // Configuration
    pub use crate::config::ExtractConfig;

    // Parsing
    pub use crate::parsing::{LineMatcher, parse_line, parse_timestamp};
    pub use crate::streaming::ChatLogStream;

    // Aggregation and output
    pub use crate::core::aggregate::{UserAggregator, UserMatches, filter_user};
    pub use crate::core::output::{ArtifactStore, to_json};

    // Running
    pub use crate::extract::{ChannelOutcome, Extractor, RunSummary};
    pub use crate::source::{Channel, ChannelSource, DirectoryChannels};

    // Observability
    pub use crate::observe::{Event, NoopObserver, Observer, TracingObserver};
}
