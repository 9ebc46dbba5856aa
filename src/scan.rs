//! Input discovery and validation.
//!
//! Phase 1 of a bake. Lists the JPEG files directly inside the input folder
//! and checks there is exactly one per grid cell.
//!
//! ## Ordering
//!
//! Files are returned sorted by file name (byte-wise), independent of the
//! order the filesystem lists them in. The grid is filled from that list
//! positionally, left to right and top to bottom:
//!
//! ```text
//! img_in/             5x2 grid
//! ├── 01.jpg          ┌────┬────┬────┬────┬────┐
//! ├── 02.jpg          │ 01 │ 02 │ 03 │ 04 │ 05 │
//! ├── ...             ├────┼────┼────┼────┼────┤
//! └── 10.jpg          │ 06 │ 07 │ 08 │ 09 │ 10 │
//!                     └────┴────┴────┴────┴────┘
//! ```
//!
//! Numbering with a fixed width (`01`..`10`, not `1`..`10`) keeps name order
//! and numeric order the same.
//!
//! ## Validation
//!
//! A count that does not match the grid is reported as a [`CountMismatch`]
//! value, not an error: a folder with the wrong number of photos is an
//! everyday mistake and the caller decides how to surface it.

use crate::imaging::rust_backend::is_supported_input;
use crate::types::{GridShape, SourceImage};
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Input directory not found: {0}")]
    MissingInputDir(PathBuf),
    #[error("Failed to list input directory: {0}")]
    Walk(#[from] walkdir::Error),
}

/// The input folder does not hold one image per grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountMismatch {
    pub found: usize,
    pub grid: GridShape,
}

impl CountMismatch {
    pub fn expected(&self) -> usize {
        self.grid.cell_count()
    }
}

impl fmt::Display for CountMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Number of images (={}) does not match tile size (={})",
            self.found, self.grid
        )
    }
}

/// List the JPEG files directly inside `input_dir`, sorted by file name.
///
/// Paths are absolute. Subdirectories, non-JPEG files and hidden files
/// (leading `.`, such as macOS `._01.jpg` companions) are ignored.
pub fn discover(input_dir: &Path) -> Result<Vec<SourceImage>, ScanError> {
    let root = std::path::absolute(input_dir)?;
    if !root.is_dir() {
        return Err(ScanError::MissingInputDir(root));
    }

    let mut sources = Vec::new();
    for entry in WalkDir::new(&root)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e))
    {
        let path = entry?.into_path();
        if path.is_file() && is_supported_input(&path) {
            sources.push(SourceImage::new(path));
        }
    }

    debug!(dir = %root.display(), count = sources.len(), "discovered source images");
    Ok(sources)
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .is_some_and(|name| name.starts_with('.'))
}

/// Check there is exactly one source per grid cell.
pub fn validate_count(sources: &[SourceImage], grid: GridShape) -> Result<(), CountMismatch> {
    if sources.len() == grid.cell_count() {
        Ok(())
    } else {
        Err(CountMismatch {
            found: sources.len(),
            grid,
        })
    }
}
