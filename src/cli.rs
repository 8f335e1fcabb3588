// src/cli.rs
// =============================================================================
// This file defines the command-line interfaces of both binaries using the
// `clap` crate's derive API.
//
//   spider [-r] [-l N] [-p PATH] URL
//   scorpion FILE_OR_DIR...
//
// Neither tool uses exit codes to report per-resource failures; those are
// logged and the process still exits 0.
// =============================================================================

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::config::{CrawlConfig, DEFAULT_DEPTH, DEFAULT_SAVE_PATH, DEFAULT_TIMEOUT_SECS};

#[derive(Parser, Debug)]
#[command(
    name = "spider",
    version,
    about = "Spider - Download images script.",
    long_about = "spider downloads every .jpg, .jpeg, .gif, .png and .bmp image found on a web page. \
                  With -r it follows the page's links depth-first, down to -l levels."
)]
pub struct SpiderCli {
    /// URL to extract from.
    pub url: String,

    /// Recursive link exploration.
    ///
    /// Without this flag only the given page is processed.
    #[arg(short = 'r')]
    pub recursive: bool,

    /// Depth of exploration (only meaningful with -r).
    #[arg(short = 'l', default_value_t = DEFAULT_DEPTH, allow_negative_numbers = true)]
    pub level: i32,

    /// Path for downloads, created if missing.
    #[arg(short = 'p', default_value = DEFAULT_SAVE_PATH)]
    pub path: PathBuf,

    /// Per-request timeout in seconds.
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Stop the whole crawl after this many seconds.
    #[arg(long)]
    pub deadline: Option<u64>,

    /// Print a JSON summary of the crawl when it finishes.
    #[arg(long)]
    pub json: bool,
}

impl SpiderCli {
    // Depth budget actually used: -l with -r, a single page without
    pub fn depth(&self) -> i32 {
        if self.recursive {
            self.level
        } else {
            1
        }
    }

    pub fn crawl_config(&self) -> CrawlConfig {
        let mut config = CrawlConfig::default().with_save_path(&self.path);
        config.request_timeout = Duration::from_secs(self.timeout);
        config.deadline = self.deadline.map(Duration::from_secs);
        config
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "scorpion",
    version,
    about = "Scorpion - EXIF and Metadata Viewer"
)]
pub struct ScorpionCli {
    /// input one, more files or a folder
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why #[arg(short = 'r')] instead of #[arg(short)]?
//    - `short` alone takes the first letter of the field name
//    - Our field names (recursive, level, path) are more descriptive than
//      the single letters the tool accepts, so we spell the letter out
//
// 2. What is allow_negative_numbers?
//    - By default clap reads "-1" as an unknown flag
//    - With this setting "-l -1" parses as level = -1
//
// 3. Why Option<u64> for --deadline?
//    - None means "no deadline"; clap leaves it None when the flag is absent
// -----------------------------------------------------------------------------
