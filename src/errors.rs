// src/errors.rs
// =============================================================================
// Error types for both pipelines.
//
// None of these are fatal to a run: the crawler and the inspector log them at
// the point where they happen and move on to the next page, image or path.
// The binaries only bail out when the output directory cannot be created.
// =============================================================================

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CrawlError {
    /// Network failure, non-success status, or an empty body
    #[error("Failed to fetch {url}: {reason}")]
    Fetch { url: String, reason: String },

    /// The body parsed into nothing but the implied html/head/body skeleton
    #[error("Failed to parse HTML for {url}")]
    Parse { url: String },

    /// A link or image reference that cannot be turned into an absolute URL
    #[error("Unresolvable reference: {reference}")]
    InvalidReference { reference: String },

    /// Writing one downloaded image to disk failed
    #[error("Failed to write {}: {source}", .path.display())]
    DownloadWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The HTTP client could not be constructed (bad header, TLS backend)
    #[error("Failed to build HTTP client: {0}")]
    Client(String),
}

impl CrawlError {
    pub fn fetch(url: impl Into<String>, reason: impl ToString) -> Self {
        Self::Fetch {
            url: url.into(),
            reason: reason.to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum InspectError {
    /// Neither a file nor a directory, or a file with an unsupported extension
    #[error("Invalid input: {}. Please provide a valid file or folder path.", .path.display())]
    InvalidInput { path: PathBuf },

    #[error("Error reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Error extracting EXIF: {0}")]
    Exif(#[from] exif::Error),
}
