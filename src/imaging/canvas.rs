//! The output canvas the grid is composed onto.

use super::backend::Dimensions;
use super::calculations::Rect;
use super::operations::paste_clipped;
use super::params::ColorModel;
use image::{DynamicImage, GrayImage, RgbImage};

/// A blank (black) pixel buffer in the configured color model.
///
/// Sources of any layout are converted to the canvas' model when pasted.
/// A CMYK canvas composes in RGB; the separation happens when it is encoded.
#[derive(Debug, Clone)]
pub struct Canvas {
    pixels: Pixels,
    model: ColorModel,
}

#[derive(Debug, Clone)]
enum Pixels {
    Rgb(RgbImage),
    Grayscale(GrayImage),
}

impl Canvas {
    pub fn new(size: Dimensions, model: ColorModel) -> Self {
        let pixels = match model {
            ColorModel::Rgb | ColorModel::Cmyk => {
                Pixels::Rgb(RgbImage::new(size.width, size.height))
            }
            ColorModel::Grayscale => Pixels::Grayscale(GrayImage::new(size.width, size.height)),
        };
        Self { pixels, model }
    }

    pub fn dimensions(&self) -> Dimensions {
        let (width, height) = match &self.pixels {
            Pixels::Rgb(buf) => buf.dimensions(),
            Pixels::Grayscale(buf) => buf.dimensions(),
        };
        Dimensions { width, height }
    }

    pub fn color_model(&self) -> ColorModel {
        self.model
    }

    /// Convert `img` to this canvas' color model.
    pub fn conform(&self, img: DynamicImage) -> DynamicImage {
        match (&self.pixels, img) {
            (Pixels::Rgb(_), img @ DynamicImage::ImageRgb8(_)) => img,
            (Pixels::Grayscale(_), img @ DynamicImage::ImageLuma8(_)) => img,
            (Pixels::Rgb(_), img) => DynamicImage::ImageRgb8(img.to_rgb8()),
            (Pixels::Grayscale(_), img) => DynamicImage::ImageLuma8(img.to_luma8()),
        }
    }

    /// Paste `img` with its top-left corner at `(x, y)`, clipped to the
    /// canvas. Returns the region written.
    pub fn paste(&mut self, img: &DynamicImage, x: i64, y: i64) -> Option<Rect> {
        match &mut self.pixels {
            Pixels::Rgb(buf) => match img {
                DynamicImage::ImageRgb8(src) => paste_clipped(buf, src, x, y),
                other => paste_clipped(buf, &other.to_rgb8(), x, y),
            },
            Pixels::Grayscale(buf) => match img {
                DynamicImage::ImageLuma8(src) => paste_clipped(buf, src, x, y),
                other => paste_clipped(buf, &other.to_luma8(), x, y),
            },
        }
    }

    /// Hand the pixels over for encoding or resizing.
    pub fn into_image(self) -> DynamicImage {
        match self.pixels {
            Pixels::Rgb(buf) => DynamicImage::ImageRgb8(buf),
            Pixels::Grayscale(buf) => DynamicImage::ImageLuma8(buf),
        }
    }
}
