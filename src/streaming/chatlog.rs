//! Streaming parser for chat log text files.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::error::{OverrustleError, Result};
use crate::observe::Observer;
use crate::parsing::LineMatcher;
use crate::record::ChatRecord;

/// Default read buffer capacity (64KB).
pub const DEFAULT_BUFFER_SIZE: usize = 64 * 1024;

/// Iterator over the records of one chat log source.
///
/// Each line is trimmed; blank lines are skipped without reaching the line
/// matcher, and non-matching lines are dropped (the observer hears about
/// them). Records come out in line order.
///
/// Lines are decoded as UTF-8 lossily, so a stray invalid byte only affects
/// the line it's on. A read error is yielded once and ends the stream.
pub struct ChatLogStream<'o, R: BufRead> {
    reader: R,
    channel: String,
    matcher: LineMatcher,
    observer: &'o dyn Observer,
    path: Option<PathBuf>,
    buffer: Vec<u8>,
    lines_read: u64,
    bytes_read: u64,
    total_bytes: Option<u64>,
    finished: bool,
}

impl<'o, R: BufRead> ChatLogStream<'o, R> {
    /// Streams records from any buffered reader.
    pub fn new(reader: R, channel: impl Into<String>, observer: &'o dyn Observer) -> Self {
        Self {
            reader,
            channel: channel.into(),
            matcher: LineMatcher::shared(),
            observer,
            path: None,
            buffer: Vec::with_capacity(512),
            lines_read: 0,
            bytes_read: 0,
            total_bytes: None,
            finished: false,
        }
    }

    /// Returns the channel attached to every record.
    pub fn channel(&self) -> &str {
        &self.channel
    }

    /// Returns the number of raw lines read so far, blank ones included.
    pub fn lines_read(&self) -> u64 {
        self.lines_read
    }

    /// Returns the number of bytes consumed so far.
    pub fn bytes_processed(&self) -> u64 {
        self.bytes_read
    }

    /// Returns the source size in bytes, if known.
    pub fn total_bytes(&self) -> Option<u64> {
        self.total_bytes
    }

    /// Returns approximate progress as a percentage (0.0 to 100.0).
    pub fn progress(&self) -> Option<f64> {
        match self.total_bytes {
            Some(0) => Some(100.0),
            Some(total) => Some((self.bytes_read as f64 / total as f64) * 100.0),
            None => None,
        }
    }

    fn read_error(&self, err: io::Error) -> OverrustleError {
        match &self.path {
            Some(path) => OverrustleError::io_at(path.clone(), err),
            None => OverrustleError::Io(err),
        }
    }
}

impl<'o> ChatLogStream<'o, BufReader<File>> {
    /// Opens a file and streams its records.
    ///
    /// # Errors
    ///
    /// Returns [`OverrustleError::IoAt`] if the file can't be opened.
    pub fn open(
        path: &Path,
        channel: impl Into<String>,
        buffer_size: usize,
        observer: &'o dyn Observer,
    ) -> Result<Self> {
        let file = File::open(path).map_err(|e| OverrustleError::io_at(path, e))?;
        let file_size = file
            .metadata()
            .map_err(|e| OverrustleError::io_at(path, e))?
            .len();

        let reader = BufReader::with_capacity(buffer_size, file);
        let mut stream = Self::new(reader, channel, observer);
        stream.path = Some(path.to_path_buf());
        stream.total_bytes = Some(file_size);
        Ok(stream)
    }
}

impl<R: BufRead> Iterator for ChatLogStream<'_, R> {
    type Item = Result<ChatRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        loop {
            self.buffer.clear();
            match self.reader.read_until(b'\n', &mut self.buffer) {
                Ok(0) => {
                    self.finished = true;
                    return None;
                }
                Ok(n) => {
                    self.bytes_read += n as u64;
                    self.lines_read += 1;

                    let text = String::from_utf8_lossy(&self.buffer);
                    let line = text.trim();
                    if line.is_empty() {
                        continue;
                    }

                    if let Some(record) = self.matcher.parse(line, &self.channel, self.observer) {
                        return Some(Ok(record));
                    }
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => {
                    self.finished = true;
                    return Some(Err(self.read_error(e)));
                }
            }
        }
    }
}
