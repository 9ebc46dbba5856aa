//! Shared types passed between the discovery, composition and output stages.

use crate::imaging::Dimensions;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Grid shape of the tile: how many images across and down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GridShape {
    pub columns: u32,
    pub rows: u32,
}

impl GridShape {
    pub fn new(columns: u32, rows: u32) -> Self {
        Self { columns, rows }
    }

    /// Number of source images the grid consumes.
    pub fn cell_count(self) -> usize {
        self.columns as usize * self.rows as usize
    }

    /// All cell positions in row-major order (rows outer, columns inner).
    pub fn positions(self) -> impl Iterator<Item = GridPosition> {
        (0..self.rows).flat_map(move |row| {
            (0..self.columns).map(move |column| GridPosition {
                column,
                row,
                index: (column + row * self.columns) as usize,
            })
        })
    }
}

impl Default for GridShape {
    fn default() -> Self {
        Self {
            columns: 5,
            rows: 2,
        }
    }
}

impl fmt::Display for GridShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.columns, self.rows)
    }
}

/// A cell of the grid, zero-based.
///
/// `index` is the position of the source image in discovery order:
/// `column + row * columns`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridPosition {
    pub column: u32,
    pub row: u32,
    pub index: usize,
}

/// A discovered input photograph. Pixels are loaded only while its cell is
/// being composed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceImage {
    pub path: PathBuf,
}

impl SourceImage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// File name for display; falls back to the full path.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// Outcome of fitting one image into its cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellStatus {
    Ok,
    /// After fitting to the cell height the image is narrower than the cell.
    /// The cell is still filled (padded with blank pixels) and the run goes on.
    RatioMismatch { resized_width: u32, cell_width: u32 },
}

impl CellStatus {
    pub fn is_ok(self) -> bool {
        matches!(self, CellStatus::Ok)
    }
}

/// What happened to one grid cell during composition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellReport {
    pub position: GridPosition,
    pub source: SourceImage,
    /// Size of the source as decoded.
    pub original: Dimensions,
    /// Size after fit-to-height, before cropping.
    pub resized: Dimensions,
    pub status: CellStatus,
}
