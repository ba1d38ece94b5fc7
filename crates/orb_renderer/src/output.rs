//! Presentation sink for finished frames.
//!
//! The renderer hands its packed pixel buffer to an [`OutputImage`] once per
//! frame. [`Image`] is the in-memory implementation used by the viewer and
//! tests; it can also export the last frame through the `image` crate.

use std::path::Path;

use thiserror::Error;

use crate::color::unpack;

/// Errors that can occur when exporting a frame.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Pixel data does not match {width}x{height} (got {len} pixels)")]
    SizeMismatch { width: u32, height: u32, len: usize },
}

pub type ExportResult<T> = Result<T, ExportError>;

/// Destination for rendered frames.
pub trait OutputImage: Send {
    /// Create an image of the given size.
    fn new(width: u32, height: u32) -> Self
    where
        Self: Sized;

    fn width(&self) -> u32;

    fn height(&self) -> u32;

    /// Change the image size. Previous contents need not be kept.
    fn resize(&mut self, width: u32, height: u32);

    /// Replace the image contents with a full frame of packed pixels.
    fn set_data(&mut self, data: &[u32]);
}

/// In-memory RGBA8 image holding the last submitted frame.
#[derive(Debug, Clone)]
pub struct Image {
    width: u32,
    height: u32,
    /// Packed pixels, row-major, row 0 at the top
    pixels: Vec<u32>,
}

impl Image {
    /// Get the packed pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> u32 {
        self.pixels[(y * self.width + x) as usize]
    }

    /// Packed pixels in row-major order.
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// Convert to RGBA bytes (for display or saving).
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 4);
        for &pixel in &self.pixels {
            bytes.extend_from_slice(&unpack(pixel));
        }
        bytes
    }

    /// Save the image. The format is chosen from the file extension.
    pub fn save(&self, path: impl AsRef<Path>) -> ExportResult<()> {
        let len = self.pixels.len();
        let buffer = image::RgbaImage::from_raw(self.width, self.height, self.to_rgba_bytes())
            .ok_or(ExportError::SizeMismatch {
                width: self.width,
                height: self.height,
                len,
            })?;
        buffer.save(path)?;
        Ok(())
    }
}

impl OutputImage for Image {
    fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; (width as usize) * (height as usize)],
        }
    }

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.pixels = vec![0; (width as usize) * (height as usize)];
    }

    fn set_data(&mut self, data: &[u32]) {
        if data.len() != self.pixels.len() {
            log::warn!(
                "Frame has {} pixels, image is {}x{}; copying the overlap",
                data.len(),
                self.width,
                self.height
            );
            let n = data.len().min(self.pixels.len());
            self.pixels[..n].copy_from_slice(&data[..n]);
            return;
        }
        self.pixels.copy_from_slice(data);
    }
}
