// src/lib.rs
// =============================================================================
// Library root shared by the two binaries:
//
// - spider:   crawls a website (optionally recursively) and downloads images
// - scorpion: prints the embedded EXIF tags and filesystem timestamps of images
//
// The two pipelines share no runtime state. The only thing they have in
// common is the static configuration in `config` (the image allow-list).
// =============================================================================

pub mod cli;      // src/cli.rs - command-line definitions for both binaries
pub mod config;   // src/config.rs - allow-lists, header set, crawl settings
pub mod errors;   // src/errors.rs - typed error taxonomy
pub mod crawl;    // src/crawl/ - the traversal engine and its collaborators
pub mod inspect;  // src/inspect/ - the metadata inspector pipeline

pub use config::CrawlConfig;
pub use errors::{CrawlError, InspectError};
