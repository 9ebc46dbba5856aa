//! Image processing in pure Rust, built on the `image` crate.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Identify** | `image::image_dimensions` |
//! | **Decode / encode** | `image` JPEG codec, explicit quality |
//! | **CMYK encode** | `jpeg-encoder` with `ColorType::Cmyk` |
//! | **Fit to height** | `resize_exact` with Lanczos3 |
//! | **Crop / paste** | rectangle intersection + `imageops::replace` |
//! | **Thumbnail** | `resize_exact` with Lanczos3, larger edge bounded |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for tile geometry (unit testable)
//! - **Parameters**: [`Quality`], [`ColorModel`], [`JpegParams`]
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`] for disk I/O
//! - **Operations**: In-memory resize, tolerant crop, clipped paste
//! - **Canvas**: The output buffer cells are pasted into

pub mod backend;
pub mod calculations;
pub mod canvas;
pub mod operations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, Dimensions, ImageBackend};
pub use canvas::Canvas;
pub use operations::{FittedCell, fit_to_cell, thumbnail};
pub use params::{ColorModel, JpegParams, Quality};
pub use rust_backend::RustBackend;
