//! Error types for the rgb565-pipeline public API.
//!
//! [`PipelineError`] covers every way a pipeline call can reject its input.
//! [`ParseNameError`] is returned by the `FromStr` impls of the
//! configuration enums.

use std::fmt;

/// Invalid input to the conversion pipeline.
///
/// A call that fails leaves its input untouched: `process` borrows the
/// source image and only builds new buffers once validation has passed.
///
/// # Example
///
/// ```
/// use rgb565_pipeline::{PipelineError, RasterBuffer};
///
/// let err = RasterBuffer::from_rgba(vec![0; 12], 2, 2).unwrap_err();
/// assert_eq!(err, PipelineError::BufferLength { expected: 16, actual: 12 });
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineError {
    /// Width or height is zero
    EmptyImage {
        /// Requested width
        width: usize,
        /// Requested height
        height: usize,
    },
    /// RGBA data length does not match `width * height * 4`
    BufferLength {
        /// Bytes required by the dimensions
        expected: usize,
        /// Bytes supplied
        actual: usize,
    },
    /// Resize percentage is not a finite positive number
    InvalidScale(f64),
    /// A resize dimension resolved to less than one pixel
    InvalidDimension {
        /// `"width"` or `"height"`
        axis: &'static str,
        /// The resolved (rounded) value
        value: f64,
    },
    /// An unlocked size request is missing a dimension
    MissingDimension(&'static str),
    /// Pixel storage for these dimensions cannot be allocated
    TooLarge {
        /// Requested width
        width: usize,
        /// Requested height
        height: usize,
    },
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::EmptyImage { width, height } => {
                write!(f, "image has zero area ({}x{})", width, height)
            }
            PipelineError::BufferLength { expected, actual } => write!(
                f,
                "buffer length mismatch: expected {} bytes, got {}",
                expected, actual
            ),
            PipelineError::InvalidScale(percent) => {
                write!(f, "invalid scale percentage: {}", percent)
            }
            PipelineError::InvalidDimension { axis, value } => {
                write!(f, "invalid target {}: {} (must be at least 1)", axis, value)
            }
            PipelineError::MissingDimension(axis) => {
                write!(f, "target {} is required when aspect ratio is unlocked", axis)
            }
            PipelineError::TooLarge { width, height } => {
                write!(f, "image too large: {}x{}", width, height)
            }
        }
    }
}

impl std::error::Error for PipelineError {}

/// An unrecognized name for a configuration enum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseNameError {
    kind: &'static str,
    value: String,
}

impl ParseNameError {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }

    /// What was being parsed, e.g. `"filter"`.
    pub fn kind(&self) -> &'static str {
        self.kind
    }

    /// The rejected input, as given.
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for ParseNameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {}: '{}'", self.kind, self.value)
    }
}

impl std::error::Error for ParseNameError {}
