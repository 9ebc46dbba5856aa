//! Pure Rust backend on top of the `image` crate.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Identify | `image::image_dimensions` (header only) |
//! | Decode (JPEG) | `image::ImageReader` |
//! | Encode → JPEG | `image::codecs::jpeg::JpegEncoder` with explicit quality |
//! | Encode → CMYK JPEG | `jpeg_encoder::Encoder` with `ColorType::Cmyk` |

use super::backend::{BackendError, Dimensions, ImageBackend};
use super::operations::rgb_to_cmyk;
use super::params::{ColorModel, JpegParams};
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageReader};
use std::io::BufWriter;
use std::path::Path;
use tracing::debug;

/// Extensions treated as JPEG input, compared case-insensitively.
const JPEG_EXTENSIONS: &[&str] = &["jpg", "jpeg"];

/// Whether `path` ends in `.jpg` or `.jpeg`, in any case.
pub fn is_supported_input(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| JPEG_EXTENSIONS.iter().any(|x| e.eq_ignore_ascii_case(x)))
}

/// Backend using the `image` crate's JPEG codec.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageBackend for RustBackend {
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError> {
        let (width, height) =
            image::image_dimensions(path).map_err(|e| BackendError::Decode {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
        Ok(Dimensions { width, height })
    }

    fn load(&self, path: &Path) -> Result<DynamicImage, BackendError> {
        let img = ImageReader::open(path)?
            .with_guessed_format()?
            .decode()
            .map_err(|e| BackendError::Decode {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
        debug!(path = %path.display(), width = img.width(), height = img.height(), "decoded");
        Ok(img)
    }

    fn save_jpeg(
        &self,
        image: &DynamicImage,
        path: &Path,
        params: JpegParams,
    ) -> Result<(), BackendError> {
        let quality = params.quality.value();
        if params.color_model == ColorModel::Cmyk {
            return save_cmyk_jpeg(image, path, quality);
        }
        let file = std::fs::File::create(path)?;
        let encoder = JpegEncoder::new_with_quality(BufWriter::new(file), quality);
        image
            .write_with_encoder(encoder)
            .map_err(|e| BackendError::Encode {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
        debug!(path = %path.display(), quality, "encoded jpeg");
        Ok(())
    }
}

/// Write `image` as a four-channel CMYK JPEG.
fn save_cmyk_jpeg(image: &DynamicImage, path: &Path, quality: u8) -> Result<(), BackendError> {
    let encode_error = |message: String| BackendError::Encode {
        path: path.display().to_string(),
        message,
    };
    let too_large = |_| {
        encode_error(format!(
            "{}x{} exceeds the JPEG size limit",
            image.width(),
            image.height()
        ))
    };
    let width = u16::try_from(image.width()).map_err(too_large)?;
    let height = u16::try_from(image.height()).map_err(too_large)?;

    let data = rgb_to_cmyk(&image.to_rgb8());
    let file = std::fs::File::create(path)?;
    jpeg_encoder::Encoder::new(BufWriter::new(file), quality)
        .encode(&data, width, height, jpeg_encoder::ColorType::Cmyk)
        .map_err(|e| encode_error(e.to_string()))?;
    debug!(path = %path.display(), quality, "encoded cmyk jpeg");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::Quality;
    use crate::test_helpers::create_test_jpeg;
    use image::{GrayImage, Rgb, RgbImage};

    #[test]
    fn jpeg_extension_match_ignores_case() {
        assert!(is_supported_input(Path::new("a.jpg")));
        assert!(is_supported_input(Path::new("a.JPG")));
        assert!(is_supported_input(Path::new("a.Jpeg")));
        assert!(!is_supported_input(Path::new("a.png")));
        assert!(!is_supported_input(Path::new("jpg")));
    }

    #[test]
    fn identify_synthetic_jpeg() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("test.jpg");
        create_test_jpeg(&path, 200, 150);

        let dims = RustBackend::new().identify(&path).unwrap();
        assert_eq!(dims, Dimensions::new(200, 150));
    }

    #[test]
    fn identify_nonexistent_file_errors() {
        let result = RustBackend::new().identify(Path::new("/nonexistent/image.jpg"));
        assert!(result.is_err());
    }

    #[test]
    fn load_synthetic_jpeg() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("test.jpg");
        create_test_jpeg(&path, 64, 48);

        let img = RustBackend::new().load(&path).unwrap();
        assert_eq!((img.width(), img.height()), (64, 48));
    }

    #[test]
    fn load_garbage_is_decode_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("broken.jpg");
        std::fs::write(&path, b"not a jpeg").unwrap();

        let err = RustBackend::new().load(&path).unwrap_err();
        assert!(matches!(err, BackendError::Decode { .. }), "got {err:?}");
    }

    #[test]
    fn save_rgb_jpeg_round_trips_dimensions() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("out.jpg");
        let img = DynamicImage::ImageRgb8(RgbImage::new(120, 80));

        let backend = RustBackend::new();
        let params = JpegParams {
            quality: Quality::new(96),
            color_model: ColorModel::Rgb,
        };
        backend.save_jpeg(&img, &path, params).unwrap();

        assert_eq!(backend.identify(&path).unwrap(), Dimensions::new(120, 80));
    }

    #[test]
    fn save_grayscale_jpeg() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("gray.jpg");
        let img = DynamicImage::ImageLuma8(GrayImage::new(30, 20));

        let params = JpegParams {
            quality: Quality::new(80),
            color_model: ColorModel::Grayscale,
        };
        RustBackend::new().save_jpeg(&img, &path, params).unwrap();
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }

    #[test]
    fn save_overwrites_existing_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("out.jpg");
        std::fs::write(&path, b"stale").unwrap();

        let img = DynamicImage::ImageRgb8(RgbImage::new(10, 10));
        RustBackend::new()
            .save_jpeg(&img, &path, JpegParams::default())
            .unwrap();

        let dims = RustBackend::new().identify(&path).unwrap();
        assert_eq!(dims, Dimensions::new(10, 10));
    }

    #[test]
    fn save_into_missing_directory_is_io_error() {
        let img = DynamicImage::ImageRgb8(RgbImage::new(10, 10));
        let err = RustBackend::new()
            .save_jpeg(&img, Path::new("/nonexistent/dir/out.jpg"), JpegParams::default())
            .unwrap_err();
        assert!(matches!(err, BackendError::Io(_)));
    }

    #[test]
    fn save_cmyk_jpeg_round_trips_dimensions() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("cmyk.jpg");
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(96, 40, Rgb([200, 100, 10])));
        let params = JpegParams {
            quality: Quality::new(90),
            color_model: ColorModel::Cmyk,
        };

        let backend = RustBackend::new();
        backend.save_jpeg(&img, &path, params).unwrap();

        assert_eq!(backend.identify(&path).unwrap(), Dimensions::new(96, 40));
        let decoded = backend.load(&path).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (96, 40));
    }

    #[test]
    fn save_cmyk_too_wide_is_encode_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("wide.jpg");
        let img = DynamicImage::ImageLuma8(GrayImage::new(70_000, 1));
        let params = JpegParams {
            quality: Quality::default(),
            color_model: ColorModel::Cmyk,
        };

        let err = RustBackend::new().save_jpeg(&img, &path, params).unwrap_err();
        assert!(matches!(err, BackendError::Encode { .. }), "got {err:?}");
        assert!(!path.exists());
    }
}
