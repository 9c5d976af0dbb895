//! Collect one user's records from a channel.
//!
//! [`UserAggregator`] is fed one file's records at a time, in sorted file
//! order, and keeps the records whose username equals the target exactly.
//!
//! # Example
//!
//! ```
//! use overrustle::core::aggregate::UserAggregator;
//! use overrustle::observe::NoopObserver;
//! use overrustle::streaming::ChatLogStream;
//! use std::io::Cursor;
//! use std::path::Path;
//!
//! let text = "[2016-04-18 00:03:38 UTC] alasdairsc: !love Justin
//! [2016-04-18 00:03:38 UTC] moobot:There's 95% <3 between AlasdairSc and Justin";
//!
//! let mut aggregator = UserAggregator::new("moobot", "", &NoopObserver);
//! let stream = ChatLogStream::new(Cursor::new(text), "", &NoopObserver);
//! aggregator.collect_file(Path::new("2016-04-18.txt"), stream)?;
//!
//! let matches = aggregator.finish();
//! assert_eq!(matches.count(), 1);
//! assert_eq!(matches.records()[0].username(), "moobot");
//! # Ok::<(), overrustle::OverrustleError>(())
//! ```
//!
//! # Behavior Notes
//!
//! - Username matching is exact and case-sensitive: `MooBot` is not `moobot`
//! - No deduplication: identical lines in two files yield two records
//! - Order is file order, then line order

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::observe::{Event, Observer};
use crate::record::ChatRecord;

/// Matches found in one channel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserMatches {
    records: Vec<ChatRecord>,
    per_file: Vec<(PathBuf, usize)>,
}

impl UserMatches {
    /// Returns the matched records in file-then-line order.
    pub fn records(&self) -> &[ChatRecord] {
        &self.records
    }

    /// Consumes the matches, returning the records.
    pub fn into_records(self) -> Vec<ChatRecord> {
        self.records
    }

    /// Returns the number of matched records.
    pub fn count(&self) -> usize {
        self.records.len()
    }

    /// Returns `(file, matches)` for every file collected, zero counts included.
    pub fn per_file(&self) -> &[(PathBuf, usize)] {
        &self.per_file
    }

    /// Returns the number of files collected.
    pub fn files_scanned(&self) -> usize {
        self.per_file.len()
    }
}

/// Accumulates one user's records across the files of one channel.
pub struct UserAggregator<'o> {
    username: String,
    channel: String,
    observer: &'o dyn Observer,
    matches: UserMatches,
}

impl<'o> UserAggregator<'o> {
    /// Creates an empty aggregator for `username` in `channel`.
    pub fn new(
        username: impl Into<String>,
        channel: impl Into<String>,
        observer: &'o dyn Observer,
    ) -> Self {
        Self {
            username: username.into(),
            channel: channel.into(),
            observer,
            matches: UserMatches::default(),
        }
    }

    /// Returns the target username.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns `true` if `record` was said by the target user.
    pub fn is_target(&self, record: &ChatRecord) -> bool {
        record.username() == self.username
    }

    /// Consumes one file's records and keeps the target user's.
    ///
    /// Returns the number of matches in this file. A
    /// [`FileFinished`](Event::FileFinished) event is emitted once the file
    /// is exhausted.
    ///
    /// # Errors
    ///
    /// Stops at and returns the first error from `records`; the matches
    /// collected from earlier files are kept.
    pub fn collect_file<I>(&mut self, path: &Path, records: I) -> Result<usize>
    where
        I: IntoIterator<Item = Result<ChatRecord>>,
    {
        let mut count = 0;

        for record in records {
            let record = record?;
            if self.is_target(&record) {
                self.observer.on_event(&Event::RecordMatched { record: &record });
                self.matches.records.push(record);
                count += 1;
            }
        }

        self.matches.per_file.push((path.to_path_buf(), count));
        self.observer.on_event(&Event::FileFinished {
            channel: &self.channel,
            path,
            matched: count,
        });

        Ok(count)
    }

    /// Returns the number of records matched so far.
    pub fn count(&self) -> usize {
        self.matches.count()
    }

    /// Finishes the channel, handing over the matches.
    pub fn finish(self) -> UserMatches {
        self.matches
    }
}

/// Keeps the records said by `username`, preserving order.
///
/// In-memory counterpart of [`UserAggregator`] for callers that already
/// hold a record list.
pub fn filter_user(records: Vec<ChatRecord>, username: &str) -> Vec<ChatRecord> {
    records
        .into_iter()
        .filter(|r| r.username() == username)
        .collect()
}
