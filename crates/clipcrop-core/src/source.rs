//! Image source decoding.
//!
//! A clip session can be fed from a file path, an encoded byte payload
//! (e.g. a bundled resource), or an already-decoded pixel buffer. Decoding
//! is delegated to the `image` crate; everything downstream works on
//! [`PixelBuffer`] only.

use std::path::PathBuf;

use crate::buffer::PixelBuffer;
use crate::error::ClipError;

/// An image input for the clip view.
#[derive(Debug, Clone)]
pub enum ImageSource {
    /// A file on disk, decoded by format sniffing.
    Path(PathBuf),
    /// An encoded image payload (JPEG or PNG bytes).
    Bytes(Vec<u8>),
    /// An already-decoded pixel buffer.
    Buffer(PixelBuffer),
}

impl ImageSource {
    /// Decode the source into an RGBA pixel buffer.
    ///
    /// # Errors
    ///
    /// Returns `ClipError::Decode` when the path or bytes cannot be read or
    /// decoded, and `ClipError::EmptySource` for a zero-sized buffer. The
    /// caller keeps its prior state on failure; a failed load never clears
    /// an already-loaded image.
    pub fn decode(self) -> Result<PixelBuffer, ClipError> {
        let buffer = match self {
            ImageSource::Path(path) => {
                let img = image::ImageReader::open(&path)
                    .map_err(image::ImageError::IoError)?
                    .decode()?;
                PixelBuffer::from_rgba_image(img.to_rgba8())
            }
            ImageSource::Bytes(bytes) => {
                let img = image::load_from_memory(&bytes)?;
                PixelBuffer::from_rgba_image(img.to_rgba8())
            }
            ImageSource::Buffer(buffer) => buffer,
        };

        if buffer.is_empty() {
            return Err(ClipError::EmptySource);
        }
        Ok(buffer)
    }
}

impl From<PixelBuffer> for ImageSource {
    fn from(buffer: PixelBuffer) -> Self {
        ImageSource::Buffer(buffer)
    }
}

impl From<PathBuf> for ImageSource {
    fn from(path: PathBuf) -> Self {
        ImageSource::Path(path)
    }
}
