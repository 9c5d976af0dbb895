//! Line grammar for OverRustle-style chat logs.
//!
//! Each log line carries one message:
//!
//! ```text
//! [2016-04-18 00:03:38 UTC] alasdairsc: !love Justin
//! ```
//!
//! - [`timestamp`] parses the bracketed `YYYY-MM-DD HH:MM:SS <ZONE>` token
//!   into a UTC instant.
//! - [`line`] applies the full grammar to one line and builds a
//!   [`ChatRecord`](crate::ChatRecord), or reports why it couldn't.

pub mod line;
pub mod timestamp;

pub use line::{CHAT_LINE_PATTERN, LineMatcher, parse_line};
pub use timestamp::{TIMESTAMP_FORMAT, UTC_ZONE, is_utc_zone, parse_timestamp};
