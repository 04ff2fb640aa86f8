//! Resampling to target dimensions.
//!
//! A [`ResizeRequest`] says what the caller asked for (a percentage, or an
//! explicit size with or without a locked aspect ratio). Resolving it against
//! the [`SourceImage`] gives a [`ResizeSpec`] of concrete dimensions, which
//! [`resample`] applies with one of three interpolation policies.

mod kernels;
mod resample;

pub use kernels::{catmull_rom, tent};
pub use resample::resample;

use std::fmt;
use std::str::FromStr;

use crate::api::{ParseNameError, PipelineError};
use crate::names::normalize;
use crate::raster::{byte_len, SourceImage};

/// Interpolation policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ResizeAlgorithm {
    /// Closest source pixel, no smoothing.
    Nearest,
    /// Separable tent filter.
    #[default]
    Bilinear,
    /// Separable Catmull-Rom filter.
    Bicubic,
}

impl ResizeAlgorithm {
    pub const ALL: [ResizeAlgorithm; 3] = [
        ResizeAlgorithm::Nearest,
        ResizeAlgorithm::Bilinear,
        ResizeAlgorithm::Bicubic,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ResizeAlgorithm::Nearest => "nearest",
            ResizeAlgorithm::Bilinear => "bilinear",
            ResizeAlgorithm::Bicubic => "bicubic",
        }
    }
}

impl fmt::Display for ResizeAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ResizeAlgorithm {
    type Err = ParseNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "nearest" | "nearest-neighbor" | "nearest-neighbour" => Ok(ResizeAlgorithm::Nearest),
            "bilinear" | "linear" => Ok(ResizeAlgorithm::Bilinear),
            "bicubic" | "cubic" | "catmull-rom" => Ok(ResizeAlgorithm::Bicubic),
            _ => Err(ParseNameError::new("resample algorithm", s)),
        }
    }
}

/// What the caller asked the image to be resized to.
///
/// # Example
///
/// ```
/// use rgb565_pipeline::{Pixel, RasterBuffer, ResizeAlgorithm, ResizeRequest, SourceImage};
///
/// let source = SourceImage::new(RasterBuffer::filled(200, 100, Pixel::rgb(0, 0, 0)).unwrap());
///
/// let spec = ResizeRequest::Scale { percent: 25.0 }
///     .resolve(&source, ResizeAlgorithm::Nearest)
///     .unwrap();
/// assert_eq!((spec.width(), spec.height()), (50, 25));
///
/// let spec = ResizeRequest::locked_width(64)
///     .resolve(&source, ResizeAlgorithm::Bicubic)
///     .unwrap();
/// assert_eq!((spec.width(), spec.height()), (64, 32));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResizeRequest {
    /// Scale both dimensions by `percent / 100`.
    Scale { percent: f64 },
    /// Explicit size.
    ///
    /// With `aspect_locked`, the width drives and the height follows the
    /// source aspect ratio; a height alone drives the width. Unlocked, both
    /// dimensions are required.
    Size {
        width: Option<usize>,
        height: Option<usize>,
        aspect_locked: bool,
    },
}

impl ResizeRequest {
    /// Width only, height from the aspect ratio.
    pub fn locked_width(width: usize) -> Self {
        ResizeRequest::Size {
            width: Some(width),
            height: None,
            aspect_locked: true,
        }
    }

    /// Exact dimensions, aspect ratio ignored.
    pub fn exact(width: usize, height: usize) -> Self {
        ResizeRequest::Size {
            width: Some(width),
            height: Some(height),
            aspect_locked: false,
        }
    }

    /// Turn the request into concrete dimensions for `source`.
    ///
    /// Fractional results are rounded half away from zero. Fails if the
    /// percentage is not finite and positive, a dimension is missing, or a
    /// dimension comes out below 1.
    pub fn resolve(
        &self,
        source: &SourceImage,
        algorithm: ResizeAlgorithm,
    ) -> Result<ResizeSpec, PipelineError> {
        let (width, height) = match *self {
            ResizeRequest::Scale { percent } => {
                if !percent.is_finite() || percent <= 0.0 {
                    return Err(PipelineError::InvalidScale(percent));
                }
                let factor = percent / 100.0;
                (
                    (source.original_width() as f64 * factor).round(),
                    (source.original_height() as f64 * factor).round(),
                )
            }
            ResizeRequest::Size {
                width,
                height,
                aspect_locked: true,
            } => {
                let aspect = source.aspect_ratio();
                match (width, height) {
                    (Some(w), _) => (w as f64, (w as f64 / aspect).round()),
                    (None, Some(h)) => ((h as f64 * aspect).round(), h as f64),
                    (None, None) => return Err(PipelineError::MissingDimension("width")),
                }
            }
            ResizeRequest::Size {
                width,
                height,
                aspect_locked: false,
            } => {
                let w = width.ok_or(PipelineError::MissingDimension("width"))?;
                let h = height.ok_or(PipelineError::MissingDimension("height"))?;
                (w as f64, h as f64)
            }
        };

        ResizeSpec::checked(
            checked_dimension("width", width)?,
            checked_dimension("height", height)?,
            algorithm,
        )
    }
}

fn checked_dimension(axis: &'static str, value: f64) -> Result<usize, PipelineError> {
    if value.is_finite() && value >= 1.0 && value <= usize::MAX as f64 {
        Ok(value as usize)
    } else {
        Err(PipelineError::InvalidDimension { axis, value })
    }
}

/// Concrete resize target: positive dimensions plus the interpolation policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeSpec {
    width: usize,
    height: usize,
    algorithm: ResizeAlgorithm,
}

impl ResizeSpec {
    pub fn new(
        width: usize,
        height: usize,
        algorithm: ResizeAlgorithm,
    ) -> Result<Self, PipelineError> {
        Self::checked(
            checked_dimension("width", width as f64)?,
            checked_dimension("height", height as f64)?,
            algorithm,
        )
    }

    /// Positive dimensions whose pixel storage fits in memory.
    fn checked(
        width: usize,
        height: usize,
        algorithm: ResizeAlgorithm,
    ) -> Result<Self, PipelineError> {
        byte_len(width, height)?;
        Ok(Self {
            width,
            height,
            algorithm,
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

    #[inline]
    pub fn algorithm(&self) -> ResizeAlgorithm {
        self.algorithm
    }
}
