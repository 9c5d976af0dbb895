//! The single-line chat grammar.
//!
//! ```text
//! [2016-04-18 00:03:38 UTC] moobot:There's 95% <3 between AlasdairSc and Justin
//! ^ timestamp token          ^ user ^ message (one optional space after ':')
//! ```
//!
//! Lines that don't fit are dropped, not reported as errors: foreign or
//! corrupt lines are expected in real logs.

use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;

use crate::observe::{DropReason, Event, Observer};
use crate::parsing::timestamp::parse_timestamp;
use crate::record::ChatRecord;

/// Regex for one chat line.
///
/// Groups: 1 = timestamp token, 2 = username (up to the first `:`),
/// 3 = message. Anchored at the start only.
pub const CHAT_LINE_PATTERN: &str = r"^\[([0-9]{4}-[0-9]{2}-[0-9]{2} [0-9]{2}:[0-9]{2}:[0-9]{2} [^\]\s]+)\] ([^:]+):\s?(.*)";

static DEFAULT_MATCHER: LazyLock<LineMatcher> = LazyLock::new(LineMatcher::new);

/// Applies the chat line grammar.
///
/// Holds the compiled regex so a stream compiles it once.
#[derive(Debug, Clone)]
pub struct LineMatcher {
    regex: Regex,
}

impl LineMatcher {
    /// Compiles a new matcher for [`CHAT_LINE_PATTERN`].
    pub fn new() -> Self {
        Self {
            regex: Regex::new(CHAT_LINE_PATTERN).expect("chat line pattern is valid"),
        }
    }

    /// Returns a handle to the process-wide matcher without recompiling.
    pub fn shared() -> Self {
        DEFAULT_MATCHER.clone()
    }

    /// Returns the pattern this matcher applies.
    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }

    /// Matches one line, reporting dropped lines to `observer`.
    ///
    /// `line` should already be known to be non-blank. Username and message
    /// are trimmed before the record is built.
    pub fn parse(&self, line: &str, channel: &str, observer: &dyn Observer) -> Option<ChatRecord> {
        match self.split(line) {
            Ok((timestamp, username, message)) => {
                Some(ChatRecord::new(timestamp, username, message, channel))
            }
            Err(reason) => {
                observer.on_event(&Event::LineDropped { line, reason });
                None
            }
        }
    }

    /// Splits a line into its trimmed parts, or says why it can't.
    pub fn split<'a>(&self, line: &'a str) -> Result<(DateTime<Utc>, &'a str, &'a str), DropReason> {
        let caps = self.regex.captures(line).ok_or(DropReason::NoMatch)?;

        let ts_token = caps.get(1).map_or("", |m| m.as_str());
        let username = caps.get(2).map_or("", |m| m.as_str().trim());
        let message = caps.get(3).map_or("", |m| m.as_str().trim());

        let timestamp = parse_timestamp(ts_token).map_err(|_| DropReason::BadTimestamp)?;

        if username.is_empty() {
            return Err(DropReason::EmptyUsername);
        }

        Ok((timestamp, username, message))
    }

    /// Returns `true` if `line` would produce a record.
    pub fn is_match(&self, line: &str) -> bool {
        self.split(line).is_ok()
    }
}

impl Default for LineMatcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Parses one line with a shared [`LineMatcher`].
///
/// # Example
///
/// ```
/// use overrustle::observe::NoopObserver;
/// use overrustle::parsing::parse_line;
///
/// let record = parse_line(
///     "[2016-04-18 00:03:38 UTC] alasdairsc: !love Justin",
///     "destiny",
///     &NoopObserver,
/// )
/// .unwrap();
/// assert_eq!(record.username(), "alasdairsc");
/// assert_eq!(record.message(), "!love Justin");
///
/// assert!(parse_line("garbage text with no brackets", "", &NoopObserver).is_none());
/// ```
pub fn parse_line(line: &str, channel: &str, observer: &dyn Observer) -> Option<ChatRecord> {
    DEFAULT_MATCHER.parse(line, channel, observer)
}
