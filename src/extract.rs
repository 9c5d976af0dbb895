//! Extraction runs: every channel, one user, one artifact per channel.
//!
//! [`Extractor::run`] walks the channels of a [`ChannelSource`] in order.
//! For each channel it first checks whether the artifact already exists; if
//! it does, the channel is skipped without reading any of its files. That
//! check is what makes reruns after an interruption cheap.
//!
//! # Example
//!
//! ```rust,no_run
//! use overrustle::config::ExtractConfig;
//! use overrustle::extract::Extractor;
//! use overrustle::observe::TracingObserver;
//! use overrustle::source::DirectoryChannels;
//!
//! let config = ExtractConfig::new().with_output_root("exports");
//! let extractor = Extractor::new(config, &TracingObserver);
//!
//! let summary = extractor.run(&DirectoryChannels::new("logs"), "moobot")?;
//! println!("{} written, {} skipped", summary.written(), summary.skipped());
//! # Ok::<(), overrustle::OverrustleError>(())
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::ExtractConfig;
use crate::core::aggregate::UserAggregator;
use crate::core::output::ArtifactStore;
use crate::error::{OverrustleError, Result};
use crate::observe::{Event, Observer};
use crate::source::{Channel, ChannelSource};
use crate::streaming::ChatLogStream;

/// What happened to one channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChannelOutcome {
    /// The artifact already existed; nothing was read.
    Skipped {
        channel: String,
        artifact: PathBuf,
    },
    /// The channel was scanned and its artifact written.
    Written {
        channel: String,
        artifact: PathBuf,
        /// Files scanned
        files: usize,
        /// Records written
        matched: usize,
    },
}

impl ChannelOutcome {
    /// Returns the channel name.
    pub fn channel(&self) -> &str {
        match self {
            ChannelOutcome::Skipped { channel, .. } | ChannelOutcome::Written { channel, .. } => {
                channel
            }
        }
    }

    /// Returns the artifact path.
    pub fn artifact(&self) -> &PathBuf {
        match self {
            ChannelOutcome::Skipped { artifact, .. } | ChannelOutcome::Written { artifact, .. } => {
                artifact
            }
        }
    }

    /// Returns `true` if the channel was skipped.
    pub fn is_skipped(&self) -> bool {
        matches!(self, ChannelOutcome::Skipped { .. })
    }
}

/// Outcomes of a whole run, in channel order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub outcomes: Vec<ChannelOutcome>,
}

impl RunSummary {
    /// Returns the number of channels written.
    pub fn written(&self) -> usize {
        self.outcomes.iter().filter(|o| !o.is_skipped()).count()
    }

    /// Returns the number of channels skipped.
    pub fn skipped(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_skipped()).count()
    }

    /// Returns the number of records written across all channels.
    pub fn total_matched(&self) -> usize {
        self.outcomes
            .iter()
            .map(|o| match o {
                ChannelOutcome::Written { matched, .. } => *matched,
                ChannelOutcome::Skipped { .. } => 0,
            })
            .sum()
    }
}

/// Drives channels through the stream parser, aggregator and artifact store.
pub struct Extractor<'o> {
    config: ExtractConfig,
    store: ArtifactStore,
    observer: &'o dyn Observer,
}

impl<'o> Extractor<'o> {
    /// Creates an extractor writing under `config.output_root`.
    pub fn new(config: ExtractConfig, observer: &'o dyn Observer) -> Self {
        let store = ArtifactStore::new(config.output_root.clone());
        Self {
            config,
            store,
            observer,
        }
    }

    /// Returns the artifact store this extractor writes to.
    pub fn store(&self) -> &ArtifactStore {
        &self.store
    }

    /// Extracts `username`'s records from every channel of `source`.
    ///
    /// When the output root is the logs directory, the user's own artifact
    /// directory is not treated as a channel.
    ///
    /// # Errors
    ///
    /// - [`OverrustleError::InvalidUsername`] before anything is read
    /// - [`OverrustleError::EmptyInputSet`] if the source has no channels
    /// - I/O and JSON errors abort the run; channels finished before the
    ///   error keep their artifacts
    pub fn run(&self, source: &dyn ChannelSource, username: &str) -> Result<RunSummary> {
        ArtifactStore::validate_username(username)?;

        let user_dir = fs::canonicalize(self.store.user_dir(username)).ok();
        let channels: Vec<Channel> = source
            .channels()?
            .into_iter()
            .filter(|channel| !is_same_dir(channel.root(), user_dir.as_deref()))
            .collect();
        if channels.is_empty() {
            return Err(OverrustleError::empty_input(source.location()));
        }

        let mut summary = RunSummary::default();
        for channel in &channels {
            summary
                .outcomes
                .push(self.extract_channel(channel, username)?);
        }
        Ok(summary)
    }

    /// Extracts one channel, or skips it if its artifact exists.
    pub fn extract_channel(&self, channel: &Channel, username: &str) -> Result<ChannelOutcome> {
        let name = channel.name();

        if self.store.exists(username, name) {
            let artifact = self.store.artifact_path(username, name);
            self.observer.on_event(&Event::ChannelSkipped {
                channel: name,
                artifact: &artifact,
            });
            return Ok(ChannelOutcome::Skipped {
                channel: name.to_string(),
                artifact,
            });
        }

        let files = channel.text_files(&self.config.extension)?;
        let total = files.len();
        let mut aggregator = UserAggregator::new(username, name, self.observer);

        for (i, path) in files.iter().enumerate() {
            self.observer.on_event(&Event::FileStarted {
                channel: name,
                path,
                index: i + 1,
                total,
            });
            let stream = ChatLogStream::open(path, name, self.config.buffer_size, self.observer)?;
            aggregator.collect_file(path, stream)?;
        }

        let matches = aggregator.finish();
        let matched = matches.count();
        let artifact = self.store.write(username, name, matches.records())?;
        self.observer.on_event(&Event::ChannelWritten {
            channel: name,
            artifact: &artifact,
            matched,
        });

        Ok(ChannelOutcome::Written {
            channel: name.to_string(),
            artifact,
            files: total,
            matched,
        })
    }
}

/// Returns `true` if `dir` resolves to `other`.
fn is_same_dir(dir: &Path, other: Option<&Path>) -> bool {
    match other {
        Some(other) => fs::canonicalize(dir).is_ok_and(|dir| dir == other),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observe::NoopObserver;
    use crate::source::DirectoryChannels;
    use std::cell::RefCell;
    use tempfile::{TempDir, tempdir};

    fn write_log(logs: &Path, channel: &str, file: &str, body: &str) {
        let dir = logs.join(channel);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(file), body).unwrap();
    }

    fn setup() -> (TempDir, TempDir) {
        let logs = tempdir().unwrap();
        write_log(
            logs.path(),
            "destiny",
            "2016-04-18.txt",
            "[2016-04-18 00:03:38 UTC] alasdairsc: !love Justin
[2016-04-18 00:03:38 UTC] moobot:There's 95% <3 between AlasdairSc and Justin
",
        );
        write_log(
            logs.path(),
            "destiny",
            "2016-04-17.txt",
            "[2016-04-17 10:00:00 UTC] moobot: earlier\n",
        );
        write_log(
            logs.path(),
            "lirik",
            "2016-04-18.txt",
            "[2016-04-18 01:00:00 UTC] someone: hi\n",
        );
        (logs, tempdir().unwrap())
    }

    #[test]
    fn test_run_writes_one_artifact_per_channel() {
        let (logs, out) = setup();
        let extractor = Extractor::new(
            ExtractConfig::new().with_output_root(out.path()),
            &NoopObserver,
        );

        let summary = extractor
            .run(&DirectoryChannels::new(logs.path()), "moobot")
            .unwrap();

        assert_eq!(summary.written(), 2);
        assert_eq!(summary.skipped(), 0);
        assert_eq!(summary.total_matched(), 2);

        let destiny = extractor.store().read("moobot", "destiny").unwrap();
        let msgs: Vec<_> = destiny.iter().map(|r| r.message()).collect();
        assert_eq!(
            msgs,
            vec!["earlier", "There's 95% <3 between AlasdairSc and Justin"]
        );
        assert!(destiny.iter().all(|r| r.channel() == "destiny"));

        // Channels with no matches still get an (empty) artifact.
        assert!(extractor.store().read("moobot", "lirik").unwrap().is_empty());
    }

    #[test]
    fn test_rerun_skips_and_leaves_artifact_untouched() {
        let (logs, out) = setup();
        let extractor = Extractor::new(
            ExtractConfig::new().with_output_root(out.path()),
            &NoopObserver,
        );
        let source = DirectoryChannels::new(logs.path());

        extractor.run(&source, "moobot").unwrap();
        let artifact = extractor.store().artifact_path("moobot", "destiny");
        let before = fs::read(&artifact).unwrap();

        // New input for a finished channel must not be picked up.
        write_log(
            logs.path(),
            "destiny",
            "2016-04-19.txt",
            "[2016-04-19 00:00:00 UTC] moobot: later\n",
        );

        let summary = extractor.run(&source, "moobot").unwrap();
        assert_eq!(summary.skipped(), 2);
        assert_eq!(summary.written(), 0);
        assert_eq!(fs::read(&artifact).unwrap(), before);
    }

    #[test]
    fn test_skipped_channel_reads_no_files() {
        let (logs, out) = setup();
        let extractor = Extractor::new(
            ExtractConfig::new().with_output_root(out.path()),
            &NoopObserver,
        );
        extractor.store().write("moobot", "destiny", &[]).unwrap();

        let events = RefCell::new(Vec::new());
        let observer = |event: &Event<'_>| match event {
            Event::FileStarted { channel, .. } => events.borrow_mut().push(format!("file:{channel}")),
            Event::ChannelSkipped { channel, .. } => {
                events.borrow_mut().push(format!("skip:{channel}"));
            }
            Event::ChannelWritten { channel, .. } => {
                events.borrow_mut().push(format!("write:{channel}"));
            }
            _ => {}
        };
        let extractor = Extractor::new(
            ExtractConfig::new().with_output_root(out.path()),
            &observer,
        );
        extractor
            .run(&DirectoryChannels::new(logs.path()), "moobot")
            .unwrap();

        assert_eq!(
            *events.borrow(),
            vec!["skip:destiny", "file:lirik", "write:lirik"]
        );
    }

    #[test]
    fn test_empty_input_set() {
        let logs = tempdir().unwrap();
        let out = tempdir().unwrap();
        let extractor = Extractor::new(
            ExtractConfig::new().with_output_root(out.path()),
            &NoopObserver,
        );
        let err = extractor
            .run(&DirectoryChannels::new(logs.path()), "moobot")
            .unwrap_err();
        assert!(err.is_empty_input());
    }

    #[test]
    fn test_invalid_username_rejected_before_work() {
        let (logs, out) = setup();
        let extractor = Extractor::new(
            ExtractConfig::new().with_output_root(out.path()),
            &NoopObserver,
        );
        let err = extractor
            .run(&DirectoryChannels::new(logs.path()), "../escape")
            .unwrap_err();
        assert!(err.is_invalid_username());
        assert!(fs::read_dir(out.path()).unwrap().next().is_none());
    }

    #[test]
    fn test_output_dir_inside_logs_is_not_a_channel() {
        let (logs, _out) = setup();
        let extractor = Extractor::new(
            ExtractConfig::new().with_output_root(logs.path()),
            &NoopObserver,
        );
        let source = DirectoryChannels::new(logs.path());

        let first = extractor.run(&source, "moobot").unwrap();
        assert_eq!(first.written(), 2);

        let second = extractor.run(&source, "moobot").unwrap();
        let channels: Vec<_> = second.outcomes.iter().map(ChannelOutcome::channel).collect();
        assert_eq!(channels, vec!["destiny", "lirik"]);
        assert_eq!(second.skipped(), 2);
        assert!(!logs.path().join("moobot").join("moobot.json").exists());
    }

    #[test]
    fn test_custom_extension() {
        let logs = tempdir().unwrap();
        let out = tempdir().unwrap();
        write_log(
            logs.path(),
            "destiny",
            "a.log",
            "[2016-04-18 00:00:00 UTC] moobot: from log\n",
        );
        write_log(
            logs.path(),
            "destiny",
            "b.txt",
            "[2016-04-18 00:00:00 UTC] moobot: from txt\n",
        );

        let extractor = Extractor::new(
            ExtractConfig::new()
                .with_output_root(out.path())
                .with_extension("log"),
            &NoopObserver,
        );
        extractor
            .run(&DirectoryChannels::new(logs.path()), "moobot")
            .unwrap();

        let records = extractor.store().read("moobot", "destiny").unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].message(), "from log");
    }
}
