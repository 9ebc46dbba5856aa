//! Pure calculation functions for tile geometry.
//!
//! All functions here are pure and testable without any I/O or images.
//! Coordinates that may fall outside an image (crop boxes, paste targets)
//! are signed; sizes are unsigned.

use super::backend::Dimensions;
use crate::types::{CellStatus, GridPosition, GridShape};

/// An axis-aligned pixel rectangle. `x`/`y` may be negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i64,
    pub y: i64,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn new(x: i64, y: i64, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle covering `[left, right) x [top, bottom)`. Inverted edges
    /// give an empty rectangle.
    pub fn from_edges(left: i64, top: i64, right: i64, bottom: i64) -> Self {
        Self {
            x: left,
            y: top,
            width: (right - left).max(0) as u32,
            height: (bottom - top).max(0) as u32,
        }
    }

    /// The full extent of an image of the given size.
    pub fn of_image(dims: Dimensions) -> Self {
        Self::new(0, 0, dims.width, dims.height)
    }

    pub fn right(&self) -> i64 {
        self.x + self.width as i64
    }

    pub fn bottom(&self) -> i64 {
        self.y + self.height as i64
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Overlapping part of two rectangles, or `None` if they do not overlap.
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        let left = self.x.max(other.x);
        let top = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        let r = Rect::from_edges(left, top, right, bottom);
        (!r.is_empty()).then_some(r)
    }
}

/// Pixel size of one grid cell (integer division of the canvas by the grid).
///
/// # Examples
/// ```
/// # use tile_baker::imaging::{Dimensions, calculations::cell_size};
/// # use tile_baker::types::GridShape;
/// let cell = cell_size(Dimensions::new(2800, 1500), GridShape::new(5, 2));
/// assert_eq!(cell, Dimensions::new(560, 750));
/// ```
pub fn cell_size(canvas: Dimensions, grid: GridShape) -> Dimensions {
    Dimensions {
        width: canvas.width / grid.columns,
        height: canvas.height / grid.rows,
    }
}

/// Top-left pixel of a cell on the canvas.
pub fn cell_offset(position: GridPosition, cell: Dimensions) -> (i64, i64) {
    (
        position.column as i64 * cell.width as i64,
        position.row as i64 * cell.height as i64,
    )
}

/// Size of `source` scaled so its height is exactly `target_height`.
///
/// Width is `round(target_height * aspect)`, never below one pixel.
pub fn fit_to_height(source: Dimensions, target_height: u32) -> Dimensions {
    let aspect = source.width as f64 / source.height as f64;
    let width = (target_height as f64 * aspect).round().max(1.0) as u32;
    Dimensions {
        width,
        height: target_height,
    }
}

/// Horizontal center crop of a fitted image down to `cell_width`, widened on
/// the right by `overlap` so neighbouring cells meet without seams.
///
/// Left uses floor division, so when the image is narrower than the cell
/// the box starts left of the image and extends past its right edge.
pub fn center_crop_box(resized: Dimensions, cell_width: u32, overlap: u32) -> Rect {
    let w = resized.width as i64;
    let cw = cell_width as i64;
    let left = (w - cw).div_euclid(2);
    let right = (w + cw).div_euclid(2) + overlap as i64;
    Rect::from_edges(left, 0, right, resized.height as i64)
}

/// Whether a fitted width still covers the cell.
pub fn fit_status(resized_width: u32, cell_width: u32) -> CellStatus {
    if resized_width < cell_width {
        CellStatus::RatioMismatch {
            resized_width,
            cell_width,
        }
    } else {
        CellStatus::Ok
    }
}

/// Thumbnail size: the larger edge shrunk to `max_edge`, aspect preserved.
///
/// Never upscales; an image already within the bound keeps its size.
pub fn thumbnail_dimensions(source: Dimensions, max_edge: u32) -> Dimensions {
    let longer = source.width.max(source.height);
    if longer <= max_edge {
        return source;
    }
    let scale = max_edge as f64 / longer as f64;
    if source.width >= source.height {
        Dimensions {
            width: max_edge,
            height: ((source.height as f64 * scale).round() as u32).max(1),
        }
    } else {
        Dimensions {
            width: ((source.width as f64 * scale).round() as u32).max(1),
            height: max_edge,
        }
    }
}
