//! Output file naming.
//!
//! Both files share a date-stamped stem:
//!
//! ```text
//! img_out/
//! ├── 20261017__department_tile.jpg          # full resolution
//! └── 20261017__department_tile--SMALL.jpg   # thumbnail
//! ```
//!
//! The stem carries the day, not the time, so a second bake on the same day
//! produces the same names and replaces the first.

use chrono::NaiveDate;
use std::path::{Path, PathBuf};

/// Marker appended to the thumbnail's stem.
pub const THUMBNAIL_SUFFIX: &str = "--SMALL";

/// Both output paths of one bake.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub high_res: PathBuf,
    pub low_res: PathBuf,
}

/// `YYYYMMDD__<name>`.
pub fn output_stem(date: NaiveDate, name: &str) -> String {
    format!("{}__{}", date.format("%Y%m%d"), name)
}

/// Full-resolution and thumbnail paths inside `output_dir`.
pub fn output_paths(output_dir: &Path, date: NaiveDate, name: &str) -> OutputPaths {
    let stem = output_stem(date, name);
    OutputPaths {
        high_res: output_dir.join(format!("{stem}.jpg")),
        low_res: output_dir.join(format!("{stem}{THUMBNAIL_SUFFIX}.jpg")),
    }
}
