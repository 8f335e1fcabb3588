// src/inspect/tags.rs
// =============================================================================
// Reads the EXIF tags embedded in an image file.
//
// We use the `kamadak-exif` crate (imported as `exif`), which finds the EXIF
// block inside JPEG, PNG, TIFF, HEIF and WebP containers and decodes every
// field, including GPS and camera settings.
//
// A file without an EXIF block is not an error: it yields an empty list and
// the report prints "No EXIF data available." instead. GIF and BMP have no
// EXIF container at all, so those files are never handed to the decoder.
// =============================================================================

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::config::has_image_extension;
use crate::errors::InspectError;

/// Ordered (tag name, display value) pairs.
pub type TagList = Vec<(String, String)>;

// Allowed image formats that cannot carry an EXIF block
const WITHOUT_EXIF_CONTAINER: &[&str] = &[".gif", ".bmp"];

pub fn read_tags(path: &Path) -> Result<TagList, InspectError> {
    let file = File::open(path).map_err(|source| InspectError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    if has_image_extension(&path.to_string_lossy(), WITHOUT_EXIF_CONTAINER) {
        return Ok(TagList::new());
    }

    let mut reader = BufReader::new(file);

    let exif = match exif::Reader::new().read_from_container(&mut reader) {
        Ok(exif) => exif,
        Err(exif::Error::NotFound(_)) => return Ok(TagList::new()),
        Err(e) => return Err(e.into()),
    };

    let tags = exif
        .fields()
        .map(|field| {
            (
                field.tag.to_string(),
                field.display_value().with_unit(&exif).to_string(),
            )
        })
        .collect();

    Ok(tags)
}
