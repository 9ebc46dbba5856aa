//! In-memory pixel operations.
//!
//! These combine the pure geometry in [`calculations`](super::calculations)
//! with the `image` crate's buffers. Nothing here touches the disk.
//!
//! Crop and paste are tolerant of regions that fall partly or wholly outside
//! an image: both go through [`Rect::intersect`] first and copy only the
//! overlapping pixels. A crop box reaching past the source is padded with
//! blank (zero) pixels; a paste reaching past the destination is clipped.

use super::backend::Dimensions;
use super::calculations::{Rect, center_crop_box, fit_status, fit_to_height, thumbnail_dimensions};
use crate::types::CellStatus;
use image::imageops::{self, FilterType};
use image::{DynamicImage, GenericImageView, ImageBuffer, Pixel, RgbImage};

/// Resampling filter for every resize. Quality over speed: the tool runs
/// once per batch.
pub const RESAMPLE_FILTER: FilterType = FilterType::Lanczos3;

/// A source image fitted to its cell, ready to paste.
#[derive(Debug, Clone)]
pub struct FittedCell {
    pub image: DynamicImage,
    /// Size after fit-to-height, before the crop.
    pub resized: Dimensions,
    pub status: CellStatus,
}

/// Resize `img` so its height equals `height`, keeping the aspect ratio.
pub fn resize_to_height(img: &DynamicImage, height: u32) -> DynamicImage {
    let source = Dimensions::new(img.width(), img.height());
    let target = fit_to_height(source, height);
    if target == source {
        return img.clone();
    }
    img.resize_exact(target.width, target.height, RESAMPLE_FILTER)
}

/// Fit-to-height, then center-crop to the cell width plus `overlap`.
///
/// A too-narrow image is not an error: the crop box runs past the image,
/// the missing columns stay blank and the status says so.
pub fn fit_to_cell(img: &DynamicImage, cell: Dimensions, overlap: u32) -> FittedCell {
    let resized_img = resize_to_height(img, cell.height);
    let resized = Dimensions::new(resized_img.width(), resized_img.height());
    let crop = center_crop_box(resized, cell.width, overlap);
    FittedCell {
        image: crop_padded_dynamic(&resized_img, crop),
        resized,
        status: fit_status(resized.width, cell.width),
    }
}

/// Copy `region` out of `src` into a new buffer of exactly `region`'s size.
/// Parts of `region` outside `src` are left as zeroed pixels.
pub fn crop_padded<P>(
    src: &ImageBuffer<P, Vec<P::Subpixel>>,
    region: Rect,
) -> ImageBuffer<P, Vec<P::Subpixel>>
where
    P: Pixel,
{
    let mut out = ImageBuffer::new(region.width, region.height);
    let bounds = Rect::of_image(Dimensions::new(src.width(), src.height()));
    if let Some(visible) = bounds.intersect(&region) {
        copy_pixels(src, visible, &mut out, visible.x - region.x, visible.y - region.y);
    }
    out
}

/// [`crop_padded`] over the buffer types the tool produces. Other layouts
/// are widened to RGBA8 first.
pub fn crop_padded_dynamic(img: &DynamicImage, region: Rect) -> DynamicImage {
    match img {
        DynamicImage::ImageLuma8(buf) => DynamicImage::ImageLuma8(crop_padded(buf, region)),
        DynamicImage::ImageRgb8(buf) => DynamicImage::ImageRgb8(crop_padded(buf, region)),
        other => DynamicImage::ImageRgba8(crop_padded(&other.to_rgba8(), region)),
    }
}

/// Paste `src` into `dst` with its top-left corner at `(x, y)`.
///
/// Only the part of `src` landing inside `dst` is written. Returns the
/// destination rectangle actually written, if any.
pub fn paste_clipped<P>(
    dst: &mut ImageBuffer<P, Vec<P::Subpixel>>,
    src: &ImageBuffer<P, Vec<P::Subpixel>>,
    x: i64,
    y: i64,
) -> Option<Rect>
where
    P: Pixel,
{
    let target = Rect::new(x, y, src.width(), src.height());
    let bounds = Rect::of_image(Dimensions::new(dst.width(), dst.height()));
    let written = bounds.intersect(&target)?;
    let source_region = Rect::new(written.x - x, written.y - y, written.width, written.height);
    copy_pixels(src, source_region, dst, written.x, written.y);
    Some(written)
}

/// Copy `region` of `src` to `dst` at `(dst_x, dst_y)`. Both rectangles must
/// already be clipped to their images.
fn copy_pixels<P>(
    src: &ImageBuffer<P, Vec<P::Subpixel>>,
    region: Rect,
    dst: &mut ImageBuffer<P, Vec<P::Subpixel>>,
    dst_x: i64,
    dst_y: i64,
) where
    P: Pixel,
{
    let view = src.view(region.x as u32, region.y as u32, region.width, region.height);
    imageops::replace(dst, &*view, dst_x, dst_y);
}

/// Shrink `img` so its larger edge equals `max_edge`. Never upscales.
pub fn thumbnail(img: &DynamicImage, max_edge: u32) -> DynamicImage {
    let source = Dimensions::new(img.width(), img.height());
    let target = thumbnail_dimensions(source, max_edge);
    if target == source {
        return img.clone();
    }
    img.resize_exact(target.width, target.height, RESAMPLE_FILTER)
}

/// Separate RGB into interleaved CMYK bytes with no black generation:
/// each ink is the complement of its channel and K is always 0.
pub fn rgb_to_cmyk(img: &RgbImage) -> Vec<u8> {
    img.pixels()
        .flat_map(|p| {
            let [r, g, b] = p.0;
            [255 - r, 255 - g, 255 - b, 0]
        })
        .collect()
}
