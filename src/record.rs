//! The chat record type produced by the line matcher.
//!
//! A [`ChatRecord`] is one successfully parsed chat line: who said what,
//! when, and in which channel.
//!
//! # Examples
//!
//! ```
//! use overrustle::ChatRecord;
//! use chrono::{TimeZone, Utc};
//!
//! let ts = Utc.with_ymd_and_hms(2016, 4, 18, 0, 3, 38).unwrap();
//! let record = ChatRecord::new(ts, "moobot", "hello", "destiny");
//!
//! assert_eq!(record.username(), "moobot");
//! assert_eq!(record.channel(), "destiny");
//! ```
//!
//! ## Serialization
//!
//! Records serialize to the artifact entry shape, with the timestamp as
//! integer epoch seconds under `dt`:
//!
//! ```
//! use overrustle::ChatRecord;
//! use chrono::{TimeZone, Utc};
//!
//! let ts = Utc.with_ymd_and_hms(2016, 4, 18, 0, 3, 38).unwrap();
//! let record = ChatRecord::new(ts, "moobot", "hello", "");
//! let json = serde_json::to_string(&record)?;
//!
//! assert_eq!(json, r#"{"dt":1460937818,"username":"moobot","message":"hello","channel":""}"#);
//! # Ok::<(), serde_json::Error>(())
//! ```

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

/// One parsed chat line.
///
/// | Field | Serialized as | Description |
/// |-------|---------------|-------------|
/// | `timestamp` | `dt` (i64) | When the line was logged, UTC, second precision |
/// | `username` | `username` | The speaker, trimmed, never empty |
/// | `message` | `message` | The message text, trimmed, may be empty |
/// | `channel` | `channel` | Source channel; empty when unknown |
///
/// The timestamp is a `DateTime<Utc>`, so a record can't carry a
/// timestamp in any other zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRecord {
    #[serde(rename = "dt", with = "chrono::serde::ts_seconds")]
    timestamp: DateTime<Utc>,

    username: String,

    message: String,

    #[serde(default)]
    channel: String,
}

impl ChatRecord {
    /// Creates a record from already-validated parts.
    ///
    /// The line matcher is the usual producer; this is public so callers can
    /// build records for tests or from other sources. Sub-second precision
    /// is truncated away. The username is taken as given: the line matcher
    /// never produces an empty one, but this constructor doesn't check.
    pub fn new(
        timestamp: DateTime<Utc>,
        username: impl Into<String>,
        message: impl Into<String>,
        channel: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: timestamp.trunc_subsecs(0),
            username: username.into(),
            message: message.into(),
            channel: channel.into(),
        }
    }

    /// Returns when the line was logged.
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Returns the timestamp as seconds since the Unix epoch.
    pub fn epoch_seconds(&self) -> i64 {
        self.timestamp.timestamp()
    }

    /// Returns the speaker.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the message text.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the channel identifier (empty if unknown).
    pub fn channel(&self) -> &str {
        &self.channel
    }

    /// Returns `true` if the message text is empty.
    pub fn is_empty(&self) -> bool {
        self.message.is_empty()
    }
}

impl std::fmt::Display for ChatRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}] {}: {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.username,
            self.message
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2016, 4, 18, 0, 3, 38).unwrap()
    }

    #[test]
    fn test_record_new() {
        let record = ChatRecord::new(ts(), "alasdairsc", "!love Justin", "");
        assert_eq!(record.timestamp(), ts());
        assert_eq!(record.username(), "alasdairsc");
        assert_eq!(record.message(), "!love Justin");
        assert_eq!(record.channel(), "");
        assert!(!record.is_empty());
    }

    #[test]
    fn test_record_new_truncates_subseconds() {
        let precise = ts() + chrono::Duration::milliseconds(999);
        let record = ChatRecord::new(precise, "moobot", "hi", "");
        assert_eq!(record.timestamp(), ts());

        let json = serde_json::to_string(&record).unwrap();
        let back: ChatRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_record_epoch_seconds() {
        let record = ChatRecord::new(ts(), "a", "b", "c");
        assert_eq!(record.epoch_seconds(), 1460937818);
    }

    #[test]
    fn test_record_serialization_field_order() {
        let record = ChatRecord::new(ts(), "moobot", "hi", "destiny");
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(
            json,
            r#"{"dt":1460937818,"username":"moobot","message":"hi","channel":"destiny"}"#
        );
    }

    #[test]
    fn test_record_deserialization_missing_channel() {
        let json = r#"{"dt":1460937818,"username":"moobot","message":"hi"}"#;
        let record: ChatRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.channel(), "");
        assert_eq!(record.timestamp(), ts());
    }

    #[test]
    fn test_record_epoch_round_trip() {
        let record = ChatRecord::new(ts(), "moobot", "hi", "");
        let back = DateTime::<Utc>::from_timestamp(record.epoch_seconds(), 0).unwrap();
        assert_eq!(back, record.timestamp());
    }

    #[test]
    fn test_record_display() {
        let record = ChatRecord::new(ts(), "moobot", "hi", "");
        assert_eq!(record.to_string(), "[2016-04-18 00:03:38 UTC] moobot: hi");
    }
}
