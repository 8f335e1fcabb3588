// src/inspect/report.rs
// =============================================================================
// Prints one metadata block per file:
//
//   Metadata for photos/cat.jpg:
//   EXIF Data:
//   Make: "Canon"
//   ...
//   File Metadata:
//   Creation Date: 2024-11-20 11:11:11
//
// An empty section is never omitted; it is replaced by an explicit
// "No ... available." line so the reader can tell "none" from "skipped".
// =============================================================================

use std::io::{self, Write};
use std::path::PathBuf;

use crate::inspect::tags::TagList;

#[derive(Debug, Clone, Default)]
pub struct MetadataRecord {
    pub path: PathBuf,
    /// Tags stored inside the image itself (EXIF)
    pub embedded: TagList,
    /// Timestamps from the filesystem
    pub filesystem: TagList,
}

pub fn write_report<W: Write>(out: &mut W, record: &MetadataRecord) -> io::Result<()> {
    writeln!(out, "\nMetadata for {}:", record.path.display())?;

    write_section(out, "EXIF Data:", "No EXIF data available.", &record.embedded)?;
    write_section(
        out,
        "File Metadata:",
        "No file metadata available.",
        &record.filesystem,
    )
}

fn write_section<W: Write>(
    out: &mut W,
    header: &str,
    empty: &str,
    tags: &TagList,
) -> io::Result<()> {
    if tags.is_empty() {
        return writeln!(out, "{empty}");
    }

    writeln!(out, "{header}")?;
    for (name, value) in tags {
        writeln!(out, "{name}: {value}")?;
    }
    Ok(())
}
