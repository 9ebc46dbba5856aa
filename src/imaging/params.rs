//! Parameter types for image operations.
//!
//! - [`Quality`]: JPEG encoding quality (1–100, default 96). Clamped on construction.
//! - [`ColorModel`]: pixel layout of the output canvas and files.
//! - [`JpegParams`]: everything the backend needs to encode a tile.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Quality setting for JPEG encoding (1-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(pub u8);

impl Quality {
    pub fn new(value: u32) -> Self {
        Self(value.clamp(1, 100) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(96)
    }
}

/// Color model of the output. Sources are converted to it on paste.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorModel {
    /// 8-bit RGB.
    #[default]
    Rgb,
    /// 8-bit CMYK for print. Composed in RGB, separated when encoded
    /// (C = 255 - R, M = 255 - G, Y = 255 - B, K = 0).
    Cmyk,
    /// 8-bit luma.
    Grayscale,
}

impl fmt::Display for ColorModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorModel::Rgb => f.write_str("rgb"),
            ColorModel::Cmyk => f.write_str("cmyk"),
            ColorModel::Grayscale => f.write_str("grayscale"),
        }
    }
}

/// How a tile is written to disk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JpegParams {
    pub quality: Quality,
    pub color_model: ColorModel,
}
