// src/inspect/mod.rs
// =============================================================================
// This module implements the metadata inspector (the `scorpion` binary).
//
// It is a flat pipeline, run once per input path:
//   walk (file/dir dispatch) -> read EXIF tags -> read file stats -> report
//
// Submodules:
// - walk:   expands inputs into image files
// - tags:   embedded EXIF tags
// - stat:   filesystem timestamps
// - report: the printed block per file
//
// Nothing here is fatal: bad inputs and unreadable files are logged and the
// next one is processed.
// =============================================================================

mod report;
mod stat;
mod tags;
mod walk;

use std::io::Write;
use std::path::{Path, PathBuf};

pub use report::{write_report, MetadataRecord};
pub use stat::read_file_stats;
pub use tags::{read_tags, TagList};
pub use walk::PathWalker;

// Collects both kinds of metadata for one file
//
// Read errors are logged and leave the matching section empty
pub fn inspect_file(path: &Path) -> MetadataRecord {
    let embedded = read_tags(path).unwrap_or_else(|e| {
        tracing::warn!("Error extracting EXIF from {}: {}", path.display(), e);
        TagList::new()
    });
    let filesystem = read_file_stats(path).unwrap_or_else(|e| {
        tracing::warn!("Error extracting metadata from {}: {}", path.display(), e);
        TagList::new()
    });

    MetadataRecord {
        path: path.to_path_buf(),
        embedded,
        filesystem,
    }
}

// Inspects every input and writes one report per image file to `out`
//
// Returns: the number of reports written
pub fn run<W: Write>(inputs: &[PathBuf], out: &mut W) -> usize {
    let walker = PathWalker::default();
    let mut reported = 0;

    for input in inputs {
        let images = match walker.walk(input) {
            Ok(images) => images,
            Err(e) => {
                tracing::warn!("{}", e);
                continue;
            }
        };

        for image in images {
            let record = inspect_file(&image);
            match write_report(out, &record) {
                Ok(()) => reported += 1,
                Err(e) => tracing::warn!("Failed to print report for {}: {}", image.display(), e),
            }
        }
    }

    reported
}
