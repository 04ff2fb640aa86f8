//! The pure `process` entry point.

use super::{PipelineConfig, PipelineError};
use crate::raster::{RasterBuffer, SourceImage};
use crate::resize::resample;

/// Result of one pipeline run: the quantized buffer and the config that
/// produced it.
#[derive(Debug, Clone)]
pub struct Processed {
    pub buffer: RasterBuffer,
    pub config: PipelineConfig,
}

/// Run the full pipeline on `source`.
///
/// Stages, in order:
/// 1. Resample, if a resize was requested
/// 2. Filter, blended by intensity
/// 3. Dither, or plain quantization when dithering is disabled
///
/// `source` is only read. Calling `process` again with a different config
/// starts from the same original pixels. On error nothing has been computed.
///
/// # Example
///
/// ```
/// use rgb565_pipeline::{process, PipelineConfig, Pixel, RasterBuffer, SourceImage};
///
/// let source = SourceImage::new(RasterBuffer::filled(2, 2, Pixel::rgb(100, 100, 100)).unwrap());
/// let result = process(&source, &PipelineConfig::default()).unwrap();
/// assert!(result.buffer.pixels().all(|p| p == Pixel::rgb(99, 101, 99)));
/// ```
pub fn process(source: &SourceImage, config: &PipelineConfig) -> Result<Processed, PipelineError> {
    let spec = config
        .resize_request()
        .map(|request| request.resolve(source, config.resample_algorithm()))
        .transpose()?;

    let mut buffer = match spec {
        Some(spec) => resample(source.buffer(), &spec)?,
        None => source.buffer().clone(),
    };

    config.filter_settings().apply(&mut buffer);
    config.dither_settings().apply(&mut buffer);

    Ok(Processed {
        buffer,
        config: *config,
    })
}

/// [`process`] for a caller holding a bare buffer.
///
/// The buffer itself is treated as the original image.
pub fn process_buffer(
    buffer: RasterBuffer,
    config: &PipelineConfig,
) -> Result<Processed, PipelineError> {
    process(&SourceImage::new(buffer), config)
}
