//! Line-by-line streaming over chat log files.
//!
//! Chat log archives can hold multi-gigabyte text files, so records are
//! produced lazily from a [`BufRead`](std::io::BufRead): only the current
//! line is held in memory.
//!
//! # Example
//!
//! ```rust
//! use overrustle::observe::NoopObserver;
//! use overrustle::streaming::ChatLogStream;
//! use std::io::Cursor;
//!
//! let text = "
//! [2016-04-18 00:03:38 UTC] alasdairsc: !love Justin
//! [2016-04-18 00:03:38 UTC] moobot:There's 95% <3 between AlasdairSc and Justin
//! ";
//!
//! let records: Vec<_> = ChatLogStream::new(Cursor::new(text), "", &NoopObserver)
//!     .collect::<overrustle::Result<_>>()?;
//!
//! assert_eq!(records.len(), 2);
//! assert_eq!(records[1].username(), "moobot");
//! # Ok::<(), overrustle::OverrustleError>(())
//! ```

mod chatlog;

pub use chatlog::{ChatLogStream, DEFAULT_BUFFER_SIZE};
