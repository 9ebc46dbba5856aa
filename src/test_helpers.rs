//! Shared test utilities for the tile-baker test suite.
//!
//! Provides synthetic JPEG writers, input-directory fixtures and a small
//! tile configuration that keeps pixel work fast.
//!
//! # Usage
//!
//! ```ignore
//! use crate::test_helpers::*;
//!
//! let tmp = TempDir::new().unwrap();
//! let input = setup_input_dir(tmp.path(), 10, (100, 80));
//! let config = small_config(&input, &tmp.path().join("out"));
//! ```

use crate::config::TileConfig;
use crate::types::GridShape;
use image::{ExtendedColorType, ImageEncoder, Rgb, RgbImage};
use std::path::{Path, PathBuf};

// =========================================================================
// Synthetic JPEGs
// =========================================================================

/// Write a gradient JPEG of the given size.
pub fn create_test_jpeg(path: &Path, width: u32, height: u32) {
    let img = RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    });
    write_jpeg(path, &img);
}

fn write_jpeg(path: &Path, img: &RgbImage) {
    let file = std::fs::File::create(path).unwrap();
    let writer = std::io::BufWriter::new(file);
    image::codecs::jpeg::JpegEncoder::new_with_quality(writer, 95)
        .write_image(img.as_raw(), img.width(), img.height(), ExtendedColorType::Rgb8)
        .unwrap();
}

// =========================================================================
// Fixture setup
// =========================================================================

/// Create `<root>/img_in` holding `count` JPEGs named `001.jpg`, `002.jpg`, ...
pub fn setup_input_dir(root: &Path, count: usize, size: (u32, u32)) -> PathBuf {
    let dir = root.join("img_in");
    std::fs::create_dir_all(&dir).unwrap();
    for i in 1..=count {
        create_test_jpeg(&dir.join(format!("{i:03}.jpg")), size.0, size.1);
    }
    dir
}

/// A 5x2 grid on a 280x150 canvas (cells of 56x75) with a 2 pixel overlap.
pub fn small_config(input: &Path, output: &Path) -> TileConfig {
    let mut config = TileConfig::default();
    config.input_dir = input.to_path_buf();
    config.output_dir = output.to_path_buf();
    config.grid = GridShape::new(5, 2);
    config.canvas.width = 280;
    config.canvas.height = 150;
    config.canvas.overlap = 2;
    config.output.thumbnail_max_edge = 100;
    config
}

/// Assert every channel of `actual` is within `tolerance` of `expected`.
pub fn assert_pixel_near(actual: [u8; 3], expected: [u8; 3], tolerance: u8) {
    for (a, e) in actual.iter().zip(expected.iter()) {
        assert!(
            a.abs_diff(*e) <= tolerance,
            "pixel {actual:?} not within {tolerance} of {expected:?}"
        );
    }
}
