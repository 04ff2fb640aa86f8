//! Pipeline configuration.

use crate::dither::{DitherAlgorithm, DitherMode};
use crate::filter::{FilterKind, FilterParameters};
use crate::resize::{ResizeAlgorithm, ResizeRequest};

/// Everything that controls one run of the pipeline.
///
/// Setters consume and return `self`; a config is never mutated once it has
/// been handed to [`process`](crate::process), which returns it alongside the
/// result.
///
/// # Defaults
///
/// - No resize (bilinear if a resize is later requested)
/// - No filter
/// - Dithering disabled: plain per-pixel quantization
///
/// # Example
///
/// ```
/// use rgb565_pipeline::{DitherAlgorithm, FilterKind, PipelineConfig, ResizeRequest};
///
/// let config = PipelineConfig::new()
///     .resize(ResizeRequest::Scale { percent: 50.0 })
///     .filter(FilterKind::Contrast, 0.4)
///     .dither(DitherAlgorithm::Atkinson);
///
/// assert!(config.dither_settings().enabled);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PipelineConfig {
    dither: DitherMode,
    filter: FilterParameters,
    resize: Option<ResizeRequest>,
    resample: ResizeAlgorithm,
}

impl PipelineConfig {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable dithering with `algorithm`.
    #[inline]
    pub fn dither(mut self, algorithm: DitherAlgorithm) -> Self {
        self.dither = DitherMode::enabled(algorithm);
        self
    }

    /// Set the dither switch and algorithm together.
    #[inline]
    pub fn dither_mode(mut self, mode: DitherMode) -> Self {
        self.dither = mode;
        self
    }

    /// Quantize without dithering.
    #[inline]
    pub fn no_dither(mut self) -> Self {
        self.dither = DitherMode::disabled();
        self
    }

    /// Set the filter; intensity is clamped to `[0, 1]`.
    #[inline]
    pub fn filter(mut self, kind: FilterKind, intensity: f32) -> Self {
        self.filter = FilterParameters::new(kind, intensity);
        self
    }

    #[inline]
    pub fn filter_parameters(mut self, filter: FilterParameters) -> Self {
        self.filter = filter;
        self
    }

    #[inline]
    pub fn resize(mut self, request: ResizeRequest) -> Self {
        self.resize = Some(request);
        self
    }

    #[inline]
    pub fn no_resize(mut self) -> Self {
        self.resize = None;
        self
    }

    /// Interpolation used when a resize is requested.
    #[inline]
    pub fn resample(mut self, algorithm: ResizeAlgorithm) -> Self {
        self.resample = algorithm;
        self
    }

    pub fn dither_settings(&self) -> DitherMode {
        self.dither
    }

    pub fn filter_settings(&self) -> FilterParameters {
        self.filter
    }

    pub fn resize_request(&self) -> Option<ResizeRequest> {
        self.resize
    }

    pub fn resample_algorithm(&self) -> ResizeAlgorithm {
        self.resample
    }
}
