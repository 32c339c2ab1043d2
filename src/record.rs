//! Decoded frame records.
//!
//! A [`FrameRecord`] is the memory-tier representation of one decoded cache
//! file: the tightly-packed pixel bytes plus the dimensions and color mode
//! needed to rebuild an [`image::DynamicImage`] without touching the disk
//! again.

use std::path::Path;

use image::{DynamicImage, GenericImageView, GrayImage, RgbImage, RgbaImage};

use crate::error::PsxFramesError;

/// Color mode of a stored frame record.
///
/// jPSXdec emits RGB PNGs, so [`ColorMode::Rgb8`] is what a normal cache
/// holds; the other modes keep hand-crafted or post-processed cache files
/// working without a lossy round-trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// 8-bit RGB (24 bpp). This is what the decoder produces.
    #[default]
    Rgb8,
    /// 8-bit RGBA (32 bpp).
    Rgba8,
    /// 8-bit grayscale (8 bpp).
    Gray8,
}

/// One decoded frame held in the memory tier.
///
/// Invariant: the record was built from an image file at its cache path, and
/// `data` is exactly `width * height` pixels in `mode`'s layout.
#[derive(Debug, Clone)]
pub struct FrameRecord {
    data: Vec<u8>,
    width: u32,
    height: u32,
    mode: ColorMode,
}

impl FrameRecord {
    /// Read an image file and capture its pixel bytes, size, and mode.
    ///
    /// Images in color types outside [`ColorMode`] are converted to RGB8 on
    /// the way in.
    ///
    /// # Errors
    ///
    /// Returns [`PsxFramesError::ImageError`] if the file cannot be opened
    /// or decoded.
    pub fn from_file(path: &Path) -> Result<Self, PsxFramesError> {
        let image = image::open(path)?;
        let (width, height) = image.dimensions();

        let (mode, data) = match image {
            DynamicImage::ImageRgba8(buffer) => (ColorMode::Rgba8, buffer.into_raw()),
            DynamicImage::ImageLuma8(buffer) => (ColorMode::Gray8, buffer.into_raw()),
            other => (ColorMode::Rgb8, other.into_rgb8().into_raw()),
        };

        Ok(Self {
            data,
            width,
            height,
            mode,
        })
    }

    /// Rebuild a materialized image from the stored bytes.
    ///
    /// # Errors
    ///
    /// Returns [`PsxFramesError::CorruptFrameRecord`] if the byte buffer no
    /// longer matches the recorded dimensions.
    pub fn to_image(&self) -> Result<DynamicImage, PsxFramesError> {
        let data = self.data.clone();
        let image = match self.mode {
            ColorMode::Rgb8 => {
                RgbImage::from_raw(self.width, self.height, data).map(DynamicImage::ImageRgb8)
            }
            ColorMode::Rgba8 => {
                RgbaImage::from_raw(self.width, self.height, data).map(DynamicImage::ImageRgba8)
            }
            ColorMode::Gray8 => {
                GrayImage::from_raw(self.width, self.height, data).map(DynamicImage::ImageLuma8)
            }
        };

        image.ok_or(PsxFramesError::CorruptFrameRecord {
            width: self.width,
            height: self.height,
        })
    }

    /// Frame width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Frame height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Color mode of the stored bytes.
    pub fn mode(&self) -> ColorMode {
        self.mode
    }

    /// The tightly-packed pixel bytes.
    pub fn raw_bytes(&self) -> &[u8] {
        &self.data
    }
}
