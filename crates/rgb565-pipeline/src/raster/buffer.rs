//! Owned RGBA8 raster and the load-time image wrapper.

use super::pixel::Pixel;
use crate::api::PipelineError;

/// Bytes per RGBA8 pixel.
const CHANNELS: usize = 4;

/// An owned, row-major RGBA8 raster.
///
/// Dimensions are fixed at creation and always non-zero. The backing store
/// is exactly `width * height * 4` bytes. Stages that change dimensions
/// (resampling) produce a new buffer; every other stage mutates in place
/// through `&mut`.
///
/// # Example
///
/// ```
/// use rgb565_pipeline::{Pixel, RasterBuffer};
///
/// let buffer = RasterBuffer::filled(2, 1, Pixel::rgb(255, 0, 0)).unwrap();
/// assert_eq!(buffer.as_bytes(), &[255, 0, 0, 255, 255, 0, 0, 255]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterBuffer {
    data: Vec<u8>,
    width: usize,
    height: usize,
}

impl RasterBuffer {
    /// Wrap raw RGBA bytes.
    ///
    /// Fails with [`PipelineError::EmptyImage`] for a zero-area image and
    /// [`PipelineError::BufferLength`] when `data` does not hold exactly
    /// `width * height` pixels.
    pub fn from_rgba(data: Vec<u8>, width: usize, height: usize) -> Result<Self, PipelineError> {
        if width == 0 || height == 0 {
            return Err(PipelineError::EmptyImage { width, height });
        }
        let expected = byte_len(width, height)?;
        if data.len() != expected {
            return Err(PipelineError::BufferLength {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Build a buffer from a row-major pixel slice.
    pub fn from_pixels(pixels: &[Pixel], width: usize, height: usize) -> Result<Self, PipelineError> {
        let data = pixels.iter().flat_map(|p| p.to_bytes()).collect();
        Self::from_rgba(data, width, height)
    }

    /// A buffer with every pixel set to `pixel`.
    pub fn filled(width: usize, height: usize, pixel: Pixel) -> Result<Self, PipelineError> {
        if width == 0 || height == 0 {
            return Err(PipelineError::EmptyImage { width, height });
        }
        byte_len(width, height)?;
        let data = pixel.to_bytes().repeat(width * height);
        Self::from_rgba(data, width, height)
    }

    /// Zeroed buffer for stages that build a new raster.
    pub(crate) fn blank(width: usize, height: usize) -> Result<Self, PipelineError> {
        if width == 0 || height == 0 {
            return Err(PipelineError::EmptyImage { width, height });
        }
        Ok(Self {
            data: vec![0; byte_len(width, height)?],
            width,
            height,
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of pixels (`width * height`).
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width * self.height
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    #[inline]
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    #[inline]
    pub(crate) fn bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    #[inline]
    pub(crate) fn offset(&self, x: usize, y: usize) -> usize {
        (y * self.width + x) * CHANNELS
    }

    /// Pixel at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is outside the buffer.
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> Pixel {
        assert!(x < self.width && y < self.height, "pixel ({x}, {y}) out of bounds");
        let i = self.offset(x, y);
        Pixel::new(self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3])
    }

    /// Overwrite the pixel at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is outside the buffer.
    #[inline]
    pub fn set_pixel(&mut self, x: usize, y: usize, pixel: Pixel) {
        assert!(x < self.width && y < self.height, "pixel ({x}, {y}) out of bounds");
        let i = self.offset(x, y);
        self.data[i..i + CHANNELS].copy_from_slice(&pixel.to_bytes());
    }

    /// Iterate pixels in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = Pixel> + '_ {
        self.data
            .chunks_exact(CHANNELS)
            .map(|c| Pixel::new(c[0], c[1], c[2], c[3]))
    }

    /// Apply a per-pixel transform in place.
    ///
    /// The transform sees `(x, y, pixel)`; the alpha of its result is
    /// ignored and the original alpha is kept.
    pub fn map_pixels(&mut self, mut f: impl FnMut(usize, usize, Pixel) -> Pixel) {
        let width = self.width;
        for (i, chunk) in self.data.chunks_exact_mut(CHANNELS).enumerate() {
            let pixel = Pixel::new(chunk[0], chunk[1], chunk[2], chunk[3]);
            let out = f(i % width, i / width, pixel);
            chunk[0] = out.r;
            chunk[1] = out.g;
            chunk[2] = out.b;
        }
    }
}

/// An image as it was loaded, before any processing.
///
/// Captures the original dimensions and the aspect ratio
/// (`width / height`) used to resolve aspect-locked resize requests.
/// Processing always starts from this buffer, so changing the
/// configuration and processing again never compounds earlier results.
#[derive(Debug, Clone)]
pub struct SourceImage {
    buffer: RasterBuffer,
    aspect_ratio: f64,
}

impl SourceImage {
    pub fn new(buffer: RasterBuffer) -> Self {
        let aspect_ratio = buffer.width() as f64 / buffer.height() as f64;
        Self {
            buffer,
            aspect_ratio,
        }
    }

    #[inline]
    pub fn buffer(&self) -> &RasterBuffer {
        &self.buffer
    }

    #[inline]
    pub fn original_width(&self) -> usize {
        self.buffer.width()
    }

    #[inline]
    pub fn original_height(&self) -> usize {
        self.buffer.height()
    }

    /// `original_width / original_height`.
    #[inline]
    pub fn aspect_ratio(&self) -> f64 {
        self.aspect_ratio
    }

    pub fn into_buffer(self) -> RasterBuffer {
        self.buffer
    }
}

impl From<RasterBuffer> for SourceImage {
    fn from(buffer: RasterBuffer) -> Self {
        Self::new(buffer)
    }
}

/// Bytes needed for `width x height` RGBA pixels.
///
/// Fails with [`PipelineError::TooLarge`] when the size overflows `usize` or
/// exceeds the largest possible allocation (`isize::MAX` bytes).
pub(crate) fn byte_len(width: usize, height: usize) -> Result<usize, PipelineError> {
    width
        .checked_mul(height)
        .and_then(|n| n.checked_mul(CHANNELS))
        .filter(|&n| n <= isize::MAX as usize)
        .ok_or(PipelineError::TooLarge { width, height })
}
