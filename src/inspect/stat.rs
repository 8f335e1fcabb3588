// src/inspect/stat.rs
// =============================================================================
// Filesystem-level metadata, as opposed to what is embedded in the image.
//
// The "Creation Date" is the file's birth time where the platform records
// one, and its last modification time otherwise (many Linux filesystems and
// tmpfs do not expose a birth time).
// =============================================================================

use std::fs;
use std::path::Path;

use chrono::{DateTime, Local};

use crate::errors::InspectError;
use crate::inspect::tags::TagList;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn read_file_stats(path: &Path) -> Result<TagList, InspectError> {
    let io_error = |source| InspectError::Io {
        path: path.to_path_buf(),
        source,
    };

    let metadata = fs::metadata(path).map_err(io_error)?;
    let created = metadata
        .created()
        .or_else(|_| metadata.modified())
        .map_err(io_error)?;

    let timestamp = DateTime::<Local>::from(created)
        .format(TIMESTAMP_FORMAT)
        .to_string();

    Ok(vec![("Creation Date".to_string(), timestamp)])
}
