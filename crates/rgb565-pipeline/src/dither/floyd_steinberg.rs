//! Floyd-Steinberg error diffusion to RGB565.

use crate::raster::RasterBuffer;

use super::{diffuse_with_kernel, Dither, FLOYD_STEINBERG};

/// Floyd-Steinberg error diffusion dithering.
///
/// The classic error diffusion algorithm, distributing 100% of each
/// pixel's quantization error to 4 unvisited neighbors:
///
/// ```text
///        X   7
///    3   5   1
/// ```
///
/// Weights: 7/16 right, 3/16 bottom-left, 5/16 bottom, 1/16 bottom-right.
/// Error that would land outside the image is dropped.
pub struct FloydSteinberg;

impl Dither for FloydSteinberg {
    fn dither(&self, buffer: &mut RasterBuffer) {
        diffuse_with_kernel(buffer, &FLOYD_STEINBERG);
    }
}
