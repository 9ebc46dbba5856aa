//! Tile configuration.
//!
//! Handles loading, validating, and merging `tile.toml`. Every value has a
//! stock default; the file only needs the keys it wants to change. Command
//! line flags are applied on top by the binary.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! input_dir = "img_in"            # Folder with the source JPEGs
//! output_dir = "img_out"          # Created if missing
//! output_name = "department_tile" # Files become YYYYMMDD__<name>.jpg
//!
//! [grid]
//! columns = 5                     # Images across
//! rows = 2                        # Images down
//!
//! [canvas]
//! width = 2800                    # Output width in pixels
//! height = 1500                   # Output height in pixels
//! color_model = "rgb"             # "rgb", "cmyk" or "grayscale"
//! overlap = 20                    # Extra pixels cropped on each cell's right edge
//!
//! [output]
//! quality = 96                    # JPEG quality (1-100)
//! thumbnail_max_edge = 1000       # Larger edge of the --SMALL variant
//! open_viewer = true              # Open the result in the default viewer
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::imaging::{ColorModel, Dimensions, JpegParams, Quality, calculations};
use crate::types::GridShape;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Config file looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "tile.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Everything one bake needs to know. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TileConfig {
    /// Folder holding the source JPEGs, relative to the working directory.
    pub input_dir: PathBuf,
    /// Folder the tile is written to. Created if missing.
    pub output_dir: PathBuf,
    /// Base name of the output files, after the date stamp.
    pub output_name: String,
    /// Images across and down.
    pub grid: GridShape,
    /// Output canvas settings.
    pub canvas: CanvasConfig,
    /// Encoding and post-processing settings.
    pub output: OutputConfig,
}

impl Default for TileConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("img_in"),
            output_dir: PathBuf::from("img_out"),
            output_name: "department_tile".to_string(),
            grid: GridShape::default(),
            canvas: CanvasConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

/// Output canvas settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CanvasConfig {
    pub width: u32,
    pub height: u32,
    pub color_model: ColorModel,
    /// Pixels added to the right of every crop so adjacent cells overlap
    /// instead of leaving hairline gaps.
    pub overlap: u32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 2800,
            height: 1500,
            color_model: ColorModel::Rgb,
            overlap: 20,
        }
    }
}

/// Encoding and post-processing settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// JPEG quality for both files (1 = worst, 100 = best).
    pub quality: u32,
    /// Larger edge of the thumbnail in pixels.
    pub thumbnail_max_edge: u32,
    /// Open the full-resolution tile in the system viewer when done.
    pub open_viewer: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            quality: Quality::default().value().into(),
            thumbnail_max_edge: 1000,
            open_viewer: true,
        }
    }
}

impl TileConfig {
    pub fn canvas_size(&self) -> Dimensions {
        Dimensions::new(self.canvas.width, self.canvas.height)
    }

    /// Size of one grid cell (integer division of the canvas by the grid).
    pub fn cell_size(&self) -> Dimensions {
        calculations::cell_size(self.canvas_size(), self.grid)
    }

    pub fn quality(&self) -> Quality {
        Quality::new(self.output.quality)
    }

    /// Encoder settings shared by the tile and its thumbnail.
    pub fn jpeg_params(&self) -> JpegParams {
        JpegParams {
            quality: self.quality(),
            color_model: self.canvas.color_model,
        }
    }

    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid.columns == 0 || self.grid.rows == 0 {
            return Err(ConfigError::Validation(
                "grid.columns and grid.rows must be non-zero".into(),
            ));
        }
        if self.canvas.width < self.grid.columns || self.canvas.height < self.grid.rows {
            return Err(ConfigError::Validation(format!(
                "canvas {}x{} is too small for a {} grid",
                self.canvas.width, self.canvas.height, self.grid
            )));
        }
        if !(1..=100).contains(&self.output.quality) {
            return Err(ConfigError::Validation(
                "output.quality must be 1-100".into(),
            ));
        }
        if self.output.thumbnail_max_edge == 0 {
            return Err(ConfigError::Validation(
                "output.thumbnail_max_edge must be non-zero".into(),
            ));
        }
        if self.output_name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "output_name must not be empty".into(),
            ));
        }
        if self.output_name.contains(['/', '\\']) {
            return Err(ConfigError::Validation(
                "output_name must be a file name, not a path".into(),
            ));
        }
        Ok(())
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer user files are merged onto.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    Ok(toml::Value::try_from(TileConfig::default())?)
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Merge an optional overlay onto the stock defaults, then deserialize and
/// validate.
pub fn resolve_config(overlay: Option<toml::Value>) -> Result<TileConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: TileConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load a tile config file.
///
/// A missing file yields the stock defaults. A file that exists but is not
/// valid TOML, has unknown keys, or fails validation is an error.
pub fn load_config(path: &Path) -> Result<TileConfig, ConfigError> {
    if !path.exists() {
        return resolve_config(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    resolve_config(Some(value))
}

/// Returns a fully-commented stock `tile.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Tile Baker Configuration
# ========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys cause an error.

# Folder with the source photographs (relative to the working directory).
# Every .jpg/.jpeg file directly inside is used. Files are placed on the grid
# in file-name order, left to right, top to bottom: name them 01.jpg, 02.jpg,
# ... to control where each photo lands.
input_dir = "img_in"

# Folder the tile is written to. Created if it does not exist.
output_dir = "img_out"

# Output files are named YYYYMMDD__<output_name>.jpg and
# YYYYMMDD__<output_name>--SMALL.jpg. A second run on the same day
# replaces the earlier files.
output_name = "department_tile"

# ---------------------------------------------------------------------------
# Grid
# ---------------------------------------------------------------------------
[grid]
# The input folder must hold exactly columns x rows images.
columns = 5
rows = 2

# ---------------------------------------------------------------------------
# Canvas
# ---------------------------------------------------------------------------
[canvas]
# Output size in pixels. Each cell is width/columns by height/rows.
width = 2800
height = 1500

# "rgb", "cmyk" or "grayscale". A cmyk tile is composed in RGB and
# separated without black generation (C = 255 - R, ..., K = 0) when saved.
color_model = "rgb"

# Extra pixels kept on the right of each cropped photo. The next cell is
# pasted over them, hiding rounding seams between cells.
overlap = 20

# ---------------------------------------------------------------------------
# Output
# ---------------------------------------------------------------------------
[output]
# JPEG quality for both files (1 = worst, 100 = best).
quality = 96

# Larger edge of the --SMALL thumbnail in pixels. Never upscales.
thumbnail_max_edge = 1000

# Open the full-resolution tile in the system's default viewer when done.
open_viewer = true
"##
}
