//! Rgb565Converter builder -- the ergonomic entry point for the crate.
//!
//! [`Rgb565Converter`] wraps [`PipelineConfig`] and [`ExportOptions`] behind
//! one fluent builder.

use super::{process, PipelineConfig, PipelineError, Processed};
use crate::dither::{DitherAlgorithm, DitherMode};
use crate::export::{export_c_array, ExportOptions};
use crate::filter::FilterKind;
use crate::raster::{RasterBuffer, SourceImage};
use crate::resize::{ResizeAlgorithm, ResizeRequest};

/// High-level RGB565 conversion builder.
///
/// # Design
///
/// - Configuration methods consume and return `self`
/// - [`convert()`](Self::convert) takes `&self`, so one converter can be
///   reused across images
///
/// # Example
///
/// ```
/// use rgb565_pipeline::{DitherAlgorithm, Pixel, RasterBuffer, Rgb565Converter};
///
/// let converter = Rgb565Converter::new()
///     .dither(DitherAlgorithm::Ordered)
///     .array_name("splash");
///
/// let rgba = Pixel::rgb(12, 200, 90).to_bytes().repeat(6);
/// let buffer = converter.convert_rgba(rgba, 3, 2).unwrap();
/// assert_eq!(buffer.width(), 3);
///
/// let header = converter.export_buffer(&buffer);
/// assert!(header.contains("const uint16_t splash[2][3]"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Rgb565Converter {
    config: PipelineConfig,
    export: ExportOptions,
}

impl Rgb565Converter {
    /// Plain quantization, no filter, no resize.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing configuration.
    pub fn with_config(config: PipelineConfig) -> Self {
        Self {
            config,
            export: ExportOptions::default(),
        }
    }

    #[inline]
    pub fn dither(mut self, algorithm: DitherAlgorithm) -> Self {
        self.config = self.config.dither(algorithm);
        self
    }

    #[inline]
    pub fn dither_mode(mut self, mode: DitherMode) -> Self {
        self.config = self.config.dither_mode(mode);
        self
    }

    #[inline]
    pub fn filter(mut self, kind: FilterKind, intensity: f32) -> Self {
        self.config = self.config.filter(kind, intensity);
        self
    }

    #[inline]
    pub fn resize(mut self, request: ResizeRequest) -> Self {
        self.config = self.config.resize(request);
        self
    }

    #[inline]
    pub fn resample(mut self, algorithm: ResizeAlgorithm) -> Self {
        self.config = self.config.resample(algorithm);
        self
    }

    /// C identifier used by [`export()`](Self::export).
    #[inline]
    pub fn array_name(mut self, name: &str) -> Self {
        self.export = self.export.array_name(name);
        self
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn export_options(&self) -> &ExportOptions {
        &self.export
    }

    /// Run the pipeline on `source`.
    pub fn convert(&self, source: &SourceImage) -> Result<Processed, PipelineError> {
        process(source, &self.config)
    }

    /// Run the pipeline on raw RGBA bytes.
    pub fn convert_rgba(
        &self,
        data: Vec<u8>,
        width: usize,
        height: usize,
    ) -> Result<RasterBuffer, PipelineError> {
        let source = SourceImage::new(RasterBuffer::from_rgba(data, width, height)?);
        Ok(self.convert(&source)?.buffer)
    }

    /// Run the pipeline and serialize the result as a C header.
    pub fn export(&self, source: &SourceImage) -> Result<String, PipelineError> {
        let processed = self.convert(source)?;
        Ok(self.export_buffer(&processed.buffer))
    }

    /// Serialize an already processed buffer.
    pub fn export_buffer(&self, buffer: &RasterBuffer) -> String {
        export_c_array(buffer, &self.export)
    }
}
