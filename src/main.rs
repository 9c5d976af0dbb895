//! # overrustle CLI
//!
//! Command-line interface for the overrustle library.

use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;
use tracing_subscriber::EnvFilter;

use overrustle::OverrustleError;
use overrustle::cli::Args;
use overrustle::extract::{ChannelOutcome, Extractor};
use overrustle::observe::TracingObserver;
use overrustle::source::DirectoryChannels;

fn main() {
    if let Err(e) = run() {
        eprintln!("❌ Error: {}", e);
        process::exit(1);
    }
}

fn init_logging(args: &Args) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(args.log_directive()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run() -> Result<(), OverrustleError> {
    let total_start = Instant::now();
    let args = <Args as ClapParser>::parse();
    init_logging(&args);

    let config = args.to_config();

    // Print header
    println!("📦 overrustle v{}", env!("CARGO_PKG_VERSION"));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("📂 Logs:    {}", args.logs_dir.display());
    println!("👤 User:    {}", args.username);
    println!("💾 Output:  {}", config.output_root.display());
    println!("📄 Files:   *.{}", config.extension);
    println!();

    let extractor = Extractor::new(config, &TracingObserver);
    let summary = extractor.run(&DirectoryChannels::new(&args.logs_dir), &args.username)?;

    for outcome in &summary.outcomes {
        match outcome {
            ChannelOutcome::Written {
                channel,
                artifact,
                files,
                matched,
            } => println!(
                "✅ {:<20} {} messages from {} files -> {}",
                channel,
                matched,
                files,
                artifact.display()
            ),
            ChannelOutcome::Skipped { channel, artifact } => println!(
                "⏭️  {:<20} skipped, {} exists",
                channel,
                artifact.display()
            ),
        }
    }

    let total_time = total_start.elapsed();

    // Summary
    println!();
    println!("📊 Summary:");
    println!("   Channels written:  {}", summary.written());
    println!("   Channels skipped:  {}", summary.skipped());
    println!("   Messages:          {}", summary.total_matched());
    println!("   Total time:        {:.2}s", total_time.as_secs_f64());

    Ok(())
}
