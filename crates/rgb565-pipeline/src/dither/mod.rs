//! Dithering to the RGB565 color grid.
//!
//! Three algorithms are available through [`DitherAlgorithm`]:
//!
//! - **Floyd-Steinberg**: error diffusion, 100% propagation to 4 neighbors
//! - **Atkinson**: error diffusion, 75% propagation to 6 neighbors
//! - **Ordered**: 4x4 Bayer threshold perturbation, no error carried
//!
//! # Ordering
//!
//! The two diffusion algorithms visit pixels strictly row-major
//! (top-to-bottom, left-to-right). Every pixel reads values already adjusted
//! by all earlier pixels, so the traversal order is part of the output
//! definition and the loop cannot be split across threads without a
//! wavefront restructuring. Ordered dithering has no cross-pixel dependency.
//!
//! # Example
//!
//! ```
//! use rgb565_pipeline::{Dither, FloydSteinberg, Pixel, RasterBuffer};
//!
//! let mut buffer = RasterBuffer::filled(4, 4, Pixel::rgb(100, 150, 200)).unwrap();
//! FloydSteinberg.dither(&mut buffer);
//! ```

mod atkinson;
mod floyd_steinberg;
mod kernel;
mod ordered;

pub use atkinson::Atkinson;
pub use floyd_steinberg::FloydSteinberg;
pub use kernel::{Kernel, ATKINSON, FLOYD_STEINBERG};
pub use ordered::{bayer_offset, ordered_pixel, Ordered, BAYER_4X4};

use std::fmt;
use std::str::FromStr;

use crate::api::ParseNameError;
use crate::names::normalize;
use crate::quantize::{quantize_buffer, quantize_channels};
use crate::raster::{store_channel, RasterBuffer};

/// Dither algorithm selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DitherAlgorithm {
    /// Floyd-Steinberg error diffusion (100% propagation).
    #[default]
    FloydSteinberg,

    /// 4x4 Bayer ordered dithering.
    Ordered,

    /// Atkinson error diffusion (75% propagation).
    Atkinson,
}

impl DitherAlgorithm {
    pub const ALL: [DitherAlgorithm; 3] = [
        DitherAlgorithm::FloydSteinberg,
        DitherAlgorithm::Ordered,
        DitherAlgorithm::Atkinson,
    ];

    /// Canonical kebab-case name.
    pub fn name(self) -> &'static str {
        match self {
            DitherAlgorithm::FloydSteinberg => "floyd-steinberg",
            DitherAlgorithm::Ordered => "ordered",
            DitherAlgorithm::Atkinson => "atkinson",
        }
    }

    /// Dither `buffer` in place with this algorithm.
    pub fn dither(self, buffer: &mut RasterBuffer) {
        match self {
            DitherAlgorithm::FloydSteinberg => FloydSteinberg.dither(buffer),
            DitherAlgorithm::Ordered => Ordered.dither(buffer),
            DitherAlgorithm::Atkinson => Atkinson.dither(buffer),
        }
    }
}

impl fmt::Display for DitherAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DitherAlgorithm {
    type Err = ParseNameError;

    /// Case-insensitive; `_`, `-` and spaces are interchangeable.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "floyd-steinberg" | "floydsteinberg" | "fs" => Ok(DitherAlgorithm::FloydSteinberg),
            "ordered" | "bayer" => Ok(DitherAlgorithm::Ordered),
            "atkinson" => Ok(DitherAlgorithm::Atkinson),
            _ => Err(ParseNameError::new("dither algorithm", s)),
        }
    }
}

/// Whether to dither, and with which algorithm.
///
/// When disabled, the buffer is quantized pixel by pixel with no error
/// diffusion. Dithering and plain quantization are mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DitherMode {
    pub enabled: bool,
    pub algorithm: DitherAlgorithm,
}

impl DitherMode {
    /// Plain quantization, no dithering.
    pub const fn disabled() -> Self {
        Self {
            enabled: false,
            algorithm: DitherAlgorithm::FloydSteinberg,
        }
    }

    pub const fn enabled(algorithm: DitherAlgorithm) -> Self {
        Self {
            enabled: true,
            algorithm,
        }
    }

    /// Quantize `buffer` in place, dithering if enabled.
    pub fn apply(&self, buffer: &mut RasterBuffer) {
        if self.enabled {
            self.algorithm.dither(buffer);
        } else {
            quantize_buffer(buffer);
        }
    }
}

/// A dithering algorithm that quantizes a buffer to RGB565 in place.
///
/// After `dither` returns, every pixel's color channels are RGB565
/// representable and alpha is unchanged.
pub trait Dither {
    fn dither(&self, buffer: &mut RasterBuffer);
}

/// Shared quantize-then-diffuse loop for error diffusion kernels.
///
/// Each pixel is quantized and written; the per-channel error
/// `original - quantized` is then added to every in-bounds kernel target,
/// with each write rounded and clamped to `0..=255`.
pub(crate) fn diffuse_with_kernel(buffer: &mut RasterBuffer, kernel: &Kernel) {
    let width = buffer.width();
    let height = buffer.height();

    for y in 0..height {
        for x in 0..width {
            let i = buffer.offset(x, y);
            let data = buffer.bytes_mut();

            let old = [data[i], data[i + 1], data[i + 2]];
            let new = quantize_channels(old);
            data[i..i + 3].copy_from_slice(&new);

            let error = [
                old[0] as f32 - new[0] as f32,
                old[1] as f32 - new[1] as f32,
                old[2] as f32 - new[2] as f32,
            ];
            if error == [0.0; 3] {
                continue;
            }

            for (tx, ty, factor) in kernel.targets(x, y, width, height) {
                let j = (ty * width + tx) * 4;
                for c in 0..3 {
                    data[j + c] = store_channel(data[j + c] as f32 + error[c] * factor);
                }
            }
        }
    }
}
