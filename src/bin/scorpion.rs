// src/bin/scorpion.rs
// =============================================================================
// Entry point of the `scorpion` binary: prints EXIF and filesystem metadata
// for every image file given directly or found under a given directory.
//
// Reports go to stdout; diagnostics (bad inputs, unreadable files) go through
// the logger, also on stdout. The exit code is always 0.
// =============================================================================

use std::io;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use arachnida::cli::ScorpionCli;
use arachnida::inspect;

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let cli = ScorpionCli::parse();

    let stdout = io::stdout();
    let reported = inspect::run(&cli.inputs, &mut stdout.lock());
    tracing::debug!("Printed {} report(s)", reported);
}
