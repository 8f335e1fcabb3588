// src/inspect/walk.rs
// =============================================================================
// Expands the user's inputs into the list of image files to inspect.
//
// - a file with an allowed extension  -> itself
// - a directory                       -> every allowed file below it
// - anything else                     -> InspectError::InvalidInput
//
// Directories are walked with `walkdir`, sorted by file name at every level,
// so the reports always come out in the same lexicographic order.
// =============================================================================

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::config::{has_image_extension, IMAGE_EXTENSIONS};
use crate::errors::InspectError;

#[derive(Debug, Clone)]
pub struct PathWalker {
    extensions: Vec<String>,
}

impl Default for PathWalker {
    fn default() -> Self {
        Self {
            extensions: IMAGE_EXTENSIONS.iter().map(|ext| ext.to_string()).collect(),
        }
    }
}

impl PathWalker {
    // Returns the image files an input stands for
    pub fn walk(&self, input: &Path) -> Result<Vec<PathBuf>, InspectError> {
        if input.is_file() {
            if self.is_image(input) {
                return Ok(vec![input.to_path_buf()]);
            }
        } else if input.is_dir() {
            tracing::info!("Processing images in folder: {}", input.display());
            return Ok(self.walk_dir(input));
        }

        Err(InspectError::InvalidInput {
            path: input.to_path_buf(),
        })
    }

    fn walk_dir(&self, dir: &Path) -> Vec<PathBuf> {
        let mut images = Vec::new();

        for entry in WalkDir::new(dir).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!("Skipping unreadable entry under {}: {}", dir.display(), e);
                    continue;
                }
            };

            if entry.file_type().is_file() && self.is_image(entry.path()) {
                images.push(entry.into_path());
            }
        }

        images
    }

    fn is_image(&self, path: &Path) -> bool {
        path.file_name()
            .map(|name| has_image_extension(&name.to_string_lossy(), &self.extensions))
            .unwrap_or(false)
    }
}
