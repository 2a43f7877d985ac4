//! Pixel buffer type and the raster operations the crop pipeline needs.
//!
//! Buffers are RGBA8 in row-major order (4 bytes per pixel). Alpha matters
//! here: the circle and rounded-rect outputs carry transparent corners, and
//! the overlay mask is itself a translucent surface.

use crate::error::ClipError;

/// Filter type for the uniform scale step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub enum FilterType {
    /// Nearest neighbor interpolation (fastest, lowest quality).
    Nearest,
    /// Bilinear interpolation (fast, acceptable quality).
    #[default]
    Bilinear,
    /// Lanczos3 interpolation (slower, highest quality).
    Lanczos3,
}

impl FilterType {
    /// Convert to the image crate's FilterType.
    pub fn to_image_filter(self) -> image::imageops::FilterType {
        match self {
            FilterType::Nearest => image::imageops::FilterType::Nearest,
            FilterType::Bilinear => image::imageops::FilterType::Triangle,
            FilterType::Lanczos3 => image::imageops::FilterType::Lanczos3,
        }
    }
}

/// An in-memory image with RGBA pixel data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// RGBA pixel data in row-major order (4 bytes per pixel).
    /// Length should be width * height * 4.
    pub pixels: Vec<u8>,
}

impl PixelBuffer {
    /// Create a new PixelBuffer with the given dimensions and pixel data.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(
            pixels.len(),
            (width as usize) * (height as usize) * 4,
            "Pixel buffer size mismatch"
        );
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Create a fully transparent buffer of the given size.
    pub fn blank(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0u8; (width as usize) * (height as usize) * 4],
        }
    }

    /// Create a PixelBuffer from an image::RgbaImage.
    pub fn from_rgba_image(img: image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        let pixels = img.into_raw();
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Convert to an image::RgbaImage for further processing.
    pub fn to_rgba_image(&self) -> Option<image::RgbaImage> {
        image::RgbaImage::from_raw(self.width, self.height, self.pixels.clone())
    }

    /// Get the total number of pixels.
    pub fn pixel_count(&self) -> u32 {
        self.width * self.height
    }

    /// Get the size of the pixel buffer in bytes.
    pub fn byte_size(&self) -> usize {
        self.pixels.len()
    }

    /// Check if this is an empty/invalid image.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.pixels.is_empty()
    }

    /// Read a single RGBA pixel. Out-of-bounds coordinates return
    /// transparent black.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        if x >= self.width || y >= self.height {
            return [0; 4];
        }
        let idx = ((y as usize * self.width as usize) + x as usize) * 4;
        [
            self.pixels[idx],
            self.pixels[idx + 1],
            self.pixels[idx + 2],
            self.pixels[idx + 3],
        ]
    }

    /// Copy a rectangular region out of the buffer.
    ///
    /// The region is clamped to the buffer bounds, so the output may be
    /// smaller than requested when the rectangle overhangs an edge. The
    /// output is never smaller than 1x1.
    pub fn crop_rect(&self, x: u32, y: u32, width: u32, height: u32) -> PixelBuffer {
        let x = x.min(self.width.saturating_sub(1));
        let y = y.min(self.height.saturating_sub(1));
        let right = (x + width).min(self.width);
        let bottom = (y + height).min(self.height);

        let out_width = right.saturating_sub(x).max(1);
        let out_height = bottom.saturating_sub(y).max(1);

        let mut output = vec![0u8; (out_width as usize) * (out_height as usize) * 4];

        // Copy pixel data row by row for efficiency
        for row in 0..out_height {
            let src_start = (((y + row) as usize * self.width as usize) + x as usize) * 4;
            let src_end = src_start + out_width as usize * 4;
            let dst_start = row as usize * out_width as usize * 4;
            let dst_end = dst_start + out_width as usize * 4;
            output[dst_start..dst_end].copy_from_slice(&self.pixels[src_start..src_end]);
        }

        PixelBuffer {
            width: out_width,
            height: out_height,
            pixels: output,
        }
    }

    /// Resample the buffer uniformly by `factor`.
    ///
    /// Output dimensions are `round(dim * factor)`, with a 1x1 floor.
    ///
    /// # Errors
    ///
    /// Returns `ClipError::EmptySource` for an empty buffer and
    /// `ClipError::InvalidConfig` for a non-positive or non-finite factor.
    pub fn scale_uniform(&self, factor: f32, filter: FilterType) -> Result<PixelBuffer, ClipError> {
        if self.is_empty() {
            return Err(ClipError::EmptySource);
        }
        if !factor.is_finite() || factor <= 0.0 {
            return Err(ClipError::InvalidConfig(format!(
                "scale factor must be finite and positive, got {factor}"
            )));
        }

        let new_width = ((self.width as f32 * factor).round() as u32).max(1);
        let new_height = ((self.height as f32 * factor).round() as u32).max(1);

        // Fast path: nothing to do
        if new_width == self.width && new_height == self.height {
            return Ok(self.clone());
        }

        let rgba = self
            .to_rgba_image()
            .ok_or(ClipError::EmptySource)?;
        let resized =
            image::imageops::resize(&rgba, new_width, new_height, filter.to_image_filter());

        Ok(PixelBuffer::from_rgba_image(resized))
    }
}
