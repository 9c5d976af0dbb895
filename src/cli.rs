//! Command-line interface definition using clap.
//!
//! [`Args`] converts into an [`ExtractConfig`] so the binary and library
//! callers configure runs the same way.

use std::path::PathBuf;

use clap::Parser;

use crate::config::ExtractConfig;

/// Extract one user's messages from OverRustle chat logs into
/// per-channel JSON files.
#[derive(Parser, Debug, Clone)]
#[command(name = "overrustle")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    overrustle ./logs moobot
    overrustle ./logs moobot -o exports
    overrustle ./logs moobot --extension log -v

Each subdirectory of LOGS_DIR is one channel. Results go to
<OUTPUT_DIR>/<USERNAME>/<CHANNEL>.json; channels whose result
already exists are skipped.")]
pub struct Args {
    /// Directory with one subdirectory of text logs per channel
    pub logs_dir: PathBuf,

    /// Exact, case-sensitive username to extract
    pub username: String,

    /// Directory that receives <USERNAME>/<CHANNEL>.json
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub output_dir: PathBuf,

    /// Extension of chat log files
    #[arg(long, value_name = "EXT", default_value = "txt")]
    pub extension: String,

    /// Log per-file progress and dropped lines
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Builds the run configuration from the parsed arguments.
    pub fn to_config(&self) -> ExtractConfig {
        ExtractConfig::new()
            .with_output_root(&self.output_dir)
            .with_extension(self.extension.trim_start_matches('.'))
    }

    /// Returns the default log directive for this verbosity.
    pub fn log_directive(&self) -> &'static str {
        if self.verbose {
            "overrustle=debug"
        } else {
            "overrustle=info"
        }
    }
}
