//! Grid composition.
//!
//! Phase 2 of a bake. Walks the grid row by row and, for every cell:
//!
//! 1. loads the source at `column + row * columns` in discovery order,
//! 2. converts it to the canvas color model,
//! 3. resizes it so its height equals the cell height (Lanczos3),
//! 4. center-crops it to the cell width plus the overlap margin,
//! 5. pastes it at `(column * cell_width, row * cell_height)`.
//!
//! Each decoded image is dropped before the next is loaded; the canvas is
//! the only buffer that lives across cells. Cells are pasted left to right,
//! so the overlap strip on a cell's right edge is covered by its neighbour
//! and clipped away in the last column.
//!
//! An image too narrow for its cell after fitting is not fatal. It is still
//! pasted (padded with blank pixels) and its [`CellStatus`] says so.

use crate::config::TileConfig;
use crate::imaging::calculations::{cell_offset, fit_status, fit_to_height};
use crate::imaging::{BackendError, Canvas, Dimensions, ImageBackend, fit_to_cell};
use crate::types::{CellReport, CellStatus, SourceImage};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum ComposeError {
    #[error("Image processing failed: {0}")]
    Imaging(#[from] BackendError),
    #[error("Grid needs {expected} source images, got {found}")]
    SourceCount { expected: usize, found: usize },
}

/// A finished canvas and what happened in each cell.
#[derive(Debug)]
pub struct Composition {
    pub canvas: Canvas,
    pub cells: Vec<CellReport>,
}

impl Composition {
    /// Cells whose source did not cover the cell width.
    pub fn warnings(&self) -> impl Iterator<Item = &CellReport> {
        self.cells.iter().filter(|c| !c.status.is_ok())
    }
}

fn check_source_count(config: &TileConfig, sources: &[SourceImage]) -> Result<(), ComposeError> {
    let expected = config.grid.cell_count();
    if sources.len() != expected {
        return Err(ComposeError::SourceCount {
            expected,
            found: sources.len(),
        });
    }
    Ok(())
}

/// Compose `sources` onto a fresh canvas.
///
/// `on_cell` is called once per cell, in row-major order, right after the
/// cell is pasted.
pub fn compose(
    backend: &impl ImageBackend,
    config: &TileConfig,
    sources: &[SourceImage],
    mut on_cell: impl FnMut(&CellReport),
) -> Result<Composition, ComposeError> {
    check_source_count(config, sources)?;

    let cell = config.cell_size();
    let mut canvas = Canvas::new(config.canvas_size(), config.canvas.color_model);
    debug!(
        size = %canvas.dimensions(),
        model = %config.canvas.color_model,
        %cell,
        "created canvas"
    );
    let mut cells = Vec::with_capacity(sources.len());

    for position in config.grid.positions() {
        let source = &sources[position.index];
        let img = backend.load(&source.path)?;
        let original = Dimensions::new(img.width(), img.height());
        let img = canvas.conform(img);

        let fitted = fit_to_cell(&img, cell, config.canvas.overlap);
        let (x, y) = cell_offset(position, cell);
        let written = canvas.paste(&fitted.image, x, y);
        debug!(
            file = %source.file_name(),
            column = position.column,
            row = position.row,
            original = %original,
            resized = %fitted.resized,
            ?written,
            "pasted cell"
        );

        if let CellStatus::RatioMismatch {
            resized_width,
            cell_width,
        } = fitted.status
        {
            warn!(
                file = %source.file_name(),
                resized_width,
                cell_width,
                "image too narrow for its cell after fitting to height"
            );
        }

        let report = CellReport {
            position,
            source: source.clone(),
            original,
            resized: fitted.resized,
            status: fitted.status,
        };
        on_cell(&report);
        cells.push(report);
    }

    Ok(Composition { canvas, cells })
}

/// Predict every cell's fit from image headers alone, without decoding
/// pixels or touching a canvas.
pub fn plan(
    backend: &impl ImageBackend,
    config: &TileConfig,
    sources: &[SourceImage],
) -> Result<Vec<CellReport>, ComposeError> {
    check_source_count(config, sources)?;

    let cell = config.cell_size();
    config
        .grid
        .positions()
        .map(|position| -> Result<CellReport, ComposeError> {
            let source = &sources[position.index];
            let original = backend.identify(&source.path)?;
            let resized = fit_to_height(original, cell.height);
            Ok(CellReport {
                position,
                source: source.clone(),
                original,
                resized,
                status: fit_status(resized.width, cell.width),
            })
        })
        .collect()
}
