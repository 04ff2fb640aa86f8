//! Tone and color filters applied before quantization.
//!
//! Every filter computes a per-channel target and blends it with the input
//! by the filter intensity:
//!
//! ```text
//! output = input + (target - input) * intensity
//! ```
//!
//! Brightness and contrast fold the intensity into their own parameters
//! instead of blending. Edge enhancement is an unsharp mask over a 5x5
//! Gaussian blur (see [`unsharp_mask`]). Alpha is never touched, and an
//! intensity of 0 leaves every filter an identity.

mod sharpen;
mod tone;

pub use sharpen::{gaussian_blur_5x5, unsharp_mask, GAUSSIAN_5X5};

use std::fmt;
use std::str::FromStr;

use crate::api::ParseNameError;
use crate::names::normalize;
use crate::raster::RasterBuffer;

/// Filter selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FilterKind {
    /// No filter.
    #[default]
    None,
    /// Luma `0.299R + 0.587G + 0.114B` on all channels.
    Grayscale,
    /// Classic sepia matrix.
    Sepia,
    /// `255 - channel`.
    Invert,
    /// Add up to 50 to every channel.
    Brightness,
    /// Stretch around 128 by up to 1.5x.
    Contrast,
    /// Unsharp mask over a 5x5 Gaussian blur.
    EdgeEnhance,
}

impl FilterKind {
    pub const ALL: [FilterKind; 7] = [
        FilterKind::None,
        FilterKind::Grayscale,
        FilterKind::Sepia,
        FilterKind::Invert,
        FilterKind::Brightness,
        FilterKind::Contrast,
        FilterKind::EdgeEnhance,
    ];

    /// Canonical kebab-case name.
    pub fn name(self) -> &'static str {
        match self {
            FilterKind::None => "none",
            FilterKind::Grayscale => "grayscale",
            FilterKind::Sepia => "sepia",
            FilterKind::Invert => "invert",
            FilterKind::Brightness => "brightness",
            FilterKind::Contrast => "contrast",
            FilterKind::EdgeEnhance => "edge-enhance",
        }
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FilterKind {
    type Err = ParseNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "none" | "" => Ok(FilterKind::None),
            "grayscale" | "greyscale" | "gray" | "grey" => Ok(FilterKind::Grayscale),
            "sepia" => Ok(FilterKind::Sepia),
            "invert" => Ok(FilterKind::Invert),
            "brightness" => Ok(FilterKind::Brightness),
            "contrast" => Ok(FilterKind::Contrast),
            "edge-enhance" | "edgeenhance" | "edge" | "sharpen" => Ok(FilterKind::EdgeEnhance),
            _ => Err(ParseNameError::new("filter", s)),
        }
    }
}

/// A filter and its strength.
///
/// Intensity is clamped to `[0, 1]` on construction; NaN becomes 0.
///
/// # Example
///
/// ```
/// use rgb565_pipeline::{FilterKind, FilterParameters};
///
/// let params = FilterParameters::new(FilterKind::Sepia, 1.7);
/// assert_eq!(params.intensity(), 1.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterParameters {
    kind: FilterKind,
    intensity: f32,
}

impl Default for FilterParameters {
    fn default() -> Self {
        Self {
            kind: FilterKind::None,
            intensity: 1.0,
        }
    }
}

impl FilterParameters {
    pub fn new(kind: FilterKind, intensity: f32) -> Self {
        let intensity = if intensity.is_nan() {
            0.0
        } else {
            intensity.clamp(0.0, 1.0)
        };
        Self { kind, intensity }
    }

    /// No filtering.
    pub fn none() -> Self {
        Self::default()
    }

    #[inline]
    pub fn kind(&self) -> FilterKind {
        self.kind
    }

    /// Blend factor in `[0, 1]`.
    #[inline]
    pub fn intensity(&self) -> f32 {
        self.intensity
    }

    /// True when applying these parameters cannot change a buffer.
    pub fn is_identity(&self) -> bool {
        self.kind == FilterKind::None || self.intensity == 0.0
    }

    /// Filter `buffer` in place.
    pub fn apply(&self, buffer: &mut RasterBuffer) {
        apply_filter(buffer, self);
    }
}

/// Apply `params` to `buffer` in place.
pub fn apply_filter(buffer: &mut RasterBuffer, params: &FilterParameters) {
    if params.is_identity() {
        return;
    }
    let t = params.intensity();
    match params.kind() {
        FilterKind::None => {}
        FilterKind::Grayscale => tone::blend_target(buffer, t, tone::grayscale_target),
        FilterKind::Sepia => tone::blend_target(buffer, t, tone::sepia_target),
        FilterKind::Invert => tone::blend_target(buffer, t, tone::invert_target),
        FilterKind::Brightness => tone::brightness(buffer, t),
        FilterKind::Contrast => tone::contrast(buffer, t),
        FilterKind::EdgeEnhance => sharpen::unsharp_mask(buffer, t),
    }
}
