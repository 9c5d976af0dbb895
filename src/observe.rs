//! Observability events for long-running extractions.
//!
//! Components that report progress or diagnostics take an `&dyn Observer`
//! instead of reaching for a global logger. The binary passes a
//! [`TracingObserver`]; tests usually pass a closure.
//!
//! # Example
//!
//! ```rust
//! use overrustle::observe::{Event, Observer};
//! use std::cell::Cell;
//!
//! let dropped = Cell::new(0);
//! let observer = |event: &Event<'_>| {
//!     if let Event::LineDropped { .. } = event {
//!         dropped.set(dropped.get() + 1);
//!     }
//! };
//!
//! let record = overrustle::parsing::parse_line("garbage", "", &observer);
//! assert!(record.is_none());
//! assert_eq!(dropped.get(), 1);
//! ```

use std::path::Path;

use crate::record::ChatRecord;

/// Why a line produced no record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    /// The line doesn't have the `[timestamp] user: message` shape.
    NoMatch,
    /// The shape matched but the timestamp was malformed or not UTC.
    BadTimestamp,
    /// The username was empty after trimming.
    EmptyUsername,
}

impl std::fmt::Display for DropReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DropReason::NoMatch => write!(f, "no match"),
            DropReason::BadTimestamp => write!(f, "bad timestamp"),
            DropReason::EmptyUsername => write!(f, "empty username"),
        }
    }
}

/// Something worth reporting happened.
#[derive(Debug, Clone, Copy)]
pub enum Event<'a> {
    /// A non-blank line was dropped by the line matcher.
    LineDropped {
        /// The trimmed line text
        line: &'a str,
        /// Why it was dropped
        reason: DropReason,
    },

    /// A record from the target user was collected.
    RecordMatched {
        /// The matched record
        record: &'a ChatRecord,
    },

    /// A file is about to be scanned.
    FileStarted {
        /// Channel being processed
        channel: &'a str,
        /// The file
        path: &'a Path,
        /// 1-based position of the file within the channel
        index: usize,
        /// Number of files in the channel
        total: usize,
    },

    /// A file finished scanning.
    FileFinished {
        /// Channel being processed
        channel: &'a str,
        /// The file
        path: &'a Path,
        /// Records from the target user found in this file
        matched: usize,
    },

    /// A channel was skipped because its artifact already exists.
    ChannelSkipped {
        /// The skipped channel
        channel: &'a str,
        /// The existing artifact
        artifact: &'a Path,
    },

    /// A channel's artifact was written.
    ChannelWritten {
        /// The channel
        channel: &'a str,
        /// The new artifact
        artifact: &'a Path,
        /// Records written
        matched: usize,
    },
}

/// Receives [`Event`]s from the parsing pipeline.
///
/// Any `Fn(&Event)` closure is an observer.
pub trait Observer {
    /// Handles one event.
    fn on_event(&self, event: &Event<'_>);
}

impl<F> Observer for F
where
    F: Fn(&Event<'_>),
{
    fn on_event(&self, event: &Event<'_>) {
        self(event);
    }
}

/// Observer that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl Observer for NoopObserver {
    fn on_event(&self, _event: &Event<'_>) {}
}

/// Observer that forwards events to `tracing`.
///
/// Per-line events go to `trace`/`debug`, per-file match summaries and
/// written channels go to `info`, and skipped channels to `debug`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl Observer for TracingObserver {
    fn on_event(&self, event: &Event<'_>) {
        match *event {
            Event::LineDropped { line, reason } => {
                tracing::trace!(%reason, "couldn't find a match in {:?}", line);
            }
            Event::RecordMatched { record } => {
                tracing::debug!(channel = record.channel(), "found message {}", record);
            }
            Event::FileStarted {
                channel,
                path,
                index,
                total,
            } => {
                let stem = path.file_stem().unwrap_or_default().to_string_lossy();
                tracing::debug!("[{channel} | {index}/{total}] processing {stem}...");
            }
            Event::FileFinished {
                channel,
                path,
                matched,
            } => {
                if matched > 0 {
                    let stem = path.file_stem().unwrap_or_default().to_string_lossy();
                    tracing::info!(channel, "found {matched} chat messages in {stem}");
                }
            }
            Event::ChannelSkipped { channel, artifact } => {
                tracing::debug!(channel, "{} already exists, skipping...", artifact.display());
            }
            Event::ChannelWritten {
                channel,
                artifact,
                matched,
            } => {
                tracing::info!(channel, "wrote {matched} messages to {}", artifact.display());
            }
        }
    }
}
