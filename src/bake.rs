//! The bake pipeline: discovery → composition → finalization.
//!
//! ```text
//! 1. Discover   img_in/*.jpg       →  sorted sources, count checked against the grid
//! 2. Compose    sources            →  canvas (fit to height, center crop, paste)
//! 3. Finalize   canvas             →  img_out/YYYYMMDD__name.jpg
//!                                      img_out/YYYYMMDD__name--SMALL.jpg
//!                                      + open the full-size file in the viewer
//! ```
//!
//! Everything runs on the calling thread, one image at a time.
//!
//! Progress is reported through [`BakeEvent`]s handed to a callback, so the
//! library never prints. A wrong number of inputs is an ordinary
//! [`BakeOutcome::CountMismatch`]: nothing is written and no error is raised.
//! Failing to open the viewer happens after both files are on disk and is
//! reported as [`BakeError::Launch`].

use crate::compose::{self, ComposeError};
use crate::config::{ConfigError, TileConfig};
use crate::imaging::{self, BackendError, Dimensions, ImageBackend, RustBackend};
use crate::launcher::{FileLauncher, LaunchError};
use crate::naming::{self, OutputPaths};
use crate::scan::{self, CountMismatch, ScanError};
use crate::types::{CellReport, SourceImage};
use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Error, Debug)]
pub enum BakeError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Scan(#[from] ScanError),
    #[error(transparent)]
    Compose(#[from] ComposeError),
    #[error("Image processing failed: {0}")]
    Imaging(#[from] BackendError),
    #[error("Tile saved to {path} but could not be opened: {source}")]
    Launch {
        path: PathBuf,
        #[source]
        source: LaunchError,
    },
}

/// Which of the two output files an event refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    HighRes,
    Thumbnail,
}

/// Progress notifications, in the order they happen.
#[derive(Debug, Clone, PartialEq)]
pub enum BakeEvent {
    Discovered {
        input_dir: PathBuf,
        found: usize,
        expected: usize,
    },
    CellComposed(CellReport),
    Saved {
        variant: Variant,
        path: PathBuf,
        dimensions: Dimensions,
        replaced: bool,
    },
    Opened(PathBuf),
}

/// Result of a completed bake.
#[derive(Debug, Clone, PartialEq)]
pub struct BakeReport {
    pub paths: OutputPaths,
    pub canvas: Dimensions,
    pub thumbnail: Dimensions,
    pub cells: Vec<CellReport>,
    /// Whether the full-resolution file was handed to the viewer.
    pub opened: bool,
}

impl BakeReport {
    /// Cells whose source was too narrow for the cell.
    pub fn warnings(&self) -> impl Iterator<Item = &CellReport> {
        self.cells.iter().filter(|c| !c.status.is_ok())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum BakeOutcome {
    Completed(BakeReport),
    /// The input folder does not hold one image per cell. No files written.
    CountMismatch(CountMismatch),
}

/// Result of a dry run.
#[derive(Debug, Clone, PartialEq)]
pub enum CheckOutcome {
    Ready(Vec<CellReport>),
    CountMismatch(CountMismatch),
}

/// Bake with the `image`-crate backend, stamped with today's local date.
pub fn bake(
    config: &TileConfig,
    launcher: &impl FileLauncher,
    on_event: impl FnMut(&BakeEvent),
) -> Result<BakeOutcome, BakeError> {
    let today = chrono::Local::now().date_naive();
    bake_with_backend(&RustBackend::new(), launcher, config, today, on_event)
}

/// Bake using a specific backend and date (allows testing with mocks).
pub fn bake_with_backend(
    backend: &impl ImageBackend,
    launcher: &impl FileLauncher,
    config: &TileConfig,
    date: NaiveDate,
    mut on_event: impl FnMut(&BakeEvent),
) -> Result<BakeOutcome, BakeError> {
    let sources = match discover_and_validate(config, &mut on_event)? {
        Ok(sources) => sources,
        Err(mismatch) => return Ok(BakeOutcome::CountMismatch(mismatch)),
    };

    let composition = compose::compose(backend, config, &sources, |cell| {
        on_event(&BakeEvent::CellComposed(cell.clone()))
    })?;

    let output_dir = std::path::absolute(&config.output_dir)?;
    std::fs::create_dir_all(&output_dir)?;
    let paths = naming::output_paths(&output_dir, date, &config.output_name);

    let canvas = composition.canvas.dimensions();
    let full = composition.canvas.into_image();
    save(backend, &full, &paths.high_res, config, Variant::HighRes, &mut on_event)?;

    let small = imaging::thumbnail(&full, config.output.thumbnail_max_edge);
    drop(full);
    let thumbnail = save(backend, &small, &paths.low_res, config, Variant::Thumbnail, &mut on_event)?;

    let opened = config.output.open_viewer;
    if opened {
        launcher
            .open(&paths.high_res)
            .map_err(|source| BakeError::Launch {
                path: paths.high_res.clone(),
                source,
            })?;
        on_event(&BakeEvent::Opened(paths.high_res.clone()));
    }

    info!(path = %paths.high_res.display(), "bake finished");
    Ok(BakeOutcome::Completed(BakeReport {
        paths,
        canvas,
        thumbnail,
        cells: composition.cells,
        opened,
    }))
}

/// Discovery and validation plus a header-only fit preview. Writes nothing.
pub fn check_with_backend(
    backend: &impl ImageBackend,
    config: &TileConfig,
) -> Result<CheckOutcome, BakeError> {
    match discover_and_validate(config, &mut |_: &BakeEvent| {})? {
        Ok(sources) => Ok(CheckOutcome::Ready(compose::plan(backend, config, &sources)?)),
        Err(mismatch) => Ok(CheckOutcome::CountMismatch(mismatch)),
    }
}

/// [`check_with_backend`] with the `image`-crate backend.
pub fn check(config: &TileConfig) -> Result<CheckOutcome, BakeError> {
    check_with_backend(&RustBackend::new(), config)
}

/// Phase 1. The outer `Result` carries real failures (invalid config,
/// missing folder, unreadable directory), the inner one the count check.
fn discover_and_validate(
    config: &TileConfig,
    on_event: &mut impl FnMut(&BakeEvent),
) -> Result<Result<Vec<SourceImage>, CountMismatch>, BakeError> {
    config.validate()?;
    let sources = scan::discover(&config.input_dir)?;
    on_event(&BakeEvent::Discovered {
        input_dir: config.input_dir.clone(),
        found: sources.len(),
        expected: config.grid.cell_count(),
    });

    if let Err(mismatch) = scan::validate_count(&sources, config.grid) {
        warn!(found = mismatch.found, grid = %mismatch.grid, "image count does not match grid");
        return Ok(Err(mismatch));
    }
    Ok(Ok(sources))
}

fn save(
    backend: &impl ImageBackend,
    image: &image::DynamicImage,
    path: &Path,
    config: &TileConfig,
    variant: Variant,
    on_event: &mut impl FnMut(&BakeEvent),
) -> Result<Dimensions, BakeError> {
    let replaced = path.exists();
    if replaced {
        warn!(path = %path.display(), "replacing existing output");
    }
    backend.save_jpeg(image, path, config.jpeg_params())?;

    let dimensions = Dimensions::new(image.width(), image.height());
    info!(?variant, path = %path.display(), %dimensions, "saved");
    on_event(&BakeEvent::Saved {
        variant,
        path: path.to_path_buf(),
        dimensions,
        replaced,
    });
    Ok(dimensions)
}
