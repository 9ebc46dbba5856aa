//! Image I/O backend trait and shared types.
//!
//! The [`ImageBackend`] trait covers everything that touches the disk:
//! probing dimensions, decoding a source photograph and encoding a JPEG.
//! Pixel work (resize, crop, paste) happens in memory in
//! [`operations`](super::operations) and does not go through the backend.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend), built on the `image`
//! crate.

use super::params::JpegParams;
use image::DynamicImage;
use std::fmt;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to decode {path}: {message}")]
    Decode { path: String, message: String },
    #[error("Failed to encode {path}: {message}")]
    Encode { path: String, message: String },
}

/// Width and height in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Disk-facing image operations.
pub trait ImageBackend {
    /// Get image dimensions without decoding pixel data.
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError>;

    /// Decode a source image.
    fn load(&self, path: &Path) -> Result<DynamicImage, BackendError>;

    /// Encode `image` as a JPEG at `path`, replacing any existing file.
    /// `params.color_model` picks the JPEG color space written.
    fn save_jpeg(
        &self,
        image: &DynamicImage,
        path: &Path,
        params: JpegParams,
    ) -> Result<(), BackendError>;
}
