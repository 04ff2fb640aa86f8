use rgb565_pipeline::{
    export_c_array, process, ExportOptions, PipelineConfig, RasterBuffer, SourceImage,
};
use sha2::{Digest, Sha256};
use std::sync::Arc;

use crate::error::ConvertError;
use crate::rendering::{decode_png, encode_png};

/// Largest allowed output dimension, per side.
pub const MAX_DIMENSION: usize = 8192;

/// A converted image, encoded as PNG.
#[derive(Debug, Clone)]
pub struct ConvertedImage {
    pub png: Vec<u8>,
    pub width: usize,
    pub height: usize,
    /// Quoted content hash, usable as an HTTP `ETag`.
    pub etag: String,
}

/// Decode, run the pipeline, and re-encode.
///
/// Holds no state besides its limits, so one instance is shared across all
/// requests and CLI invocations.
#[derive(Debug, Clone)]
pub struct ConversionService {
    max_dimension: usize,
}

impl Default for ConversionService {
    fn default() -> Self {
        Self::new()
    }
}

impl ConversionService {
    pub fn new() -> Self {
        Self {
            max_dimension: MAX_DIMENSION,
        }
    }

    /// Override the per-side output limit.
    pub fn with_max_dimension(mut self, max_dimension: usize) -> Self {
        self.max_dimension = max_dimension;
        self
    }

    pub fn max_dimension(&self) -> usize {
        self.max_dimension
    }

    /// Convert PNG bytes to an RGB565-quantized PNG.
    pub fn convert_png(
        &self,
        bytes: &[u8],
        config: &PipelineConfig,
    ) -> Result<ConvertedImage, ConvertError> {
        let buffer = self.process_png(bytes, config)?;
        encode_image(&buffer)
    }

    /// Convert PNG bytes and render the result as a C header.
    pub fn export_png(
        &self,
        bytes: &[u8],
        config: &PipelineConfig,
        options: &ExportOptions,
    ) -> Result<String, ConvertError> {
        let buffer = self.process_png(bytes, config)?;
        tracing::debug!(
            width = buffer.width(),
            height = buffer.height(),
            array = options.name(),
            "Exported C header"
        );
        Ok(export_c_array(&buffer, options))
    }

    /// Decode PNG bytes and run the pipeline, without re-encoding.
    ///
    /// For callers that need both a PNG and a C header from one run.
    pub fn process_png(
        &self,
        bytes: &[u8],
        config: &PipelineConfig,
    ) -> Result<RasterBuffer, ConvertError> {
        let source = SourceImage::new(decode_png(bytes)?);
        self.check_target(&source, config)?;
        Ok(process(&source, config)?.buffer)
    }

    /// [`convert_png`](Self::convert_png) on the blocking thread pool.
    pub async fn convert_png_async(
        self: &Arc<Self>,
        bytes: Vec<u8>,
        config: PipelineConfig,
    ) -> Result<ConvertedImage, ConvertError> {
        let service = self.clone();
        tokio::task::spawn_blocking(move || service.convert_png(&bytes, &config))
            .await
            .map_err(|e| ConvertError::Task(e.to_string()))?
    }

    /// [`export_png`](Self::export_png) on the blocking thread pool.
    pub async fn export_png_async(
        self: &Arc<Self>,
        bytes: Vec<u8>,
        config: PipelineConfig,
        options: ExportOptions,
    ) -> Result<String, ConvertError> {
        let service = self.clone();
        tokio::task::spawn_blocking(move || service.export_png(&bytes, &config, &options))
            .await
            .map_err(|e| ConvertError::Task(e.to_string()))?
    }

    /// Reject resize targets beyond the limit before allocating them.
    fn check_target(
        &self,
        source: &SourceImage,
        config: &PipelineConfig,
    ) -> Result<(), ConvertError> {
        let Some(request) = config.resize_request() else {
            return Ok(());
        };
        let spec = request.resolve(source, config.resample_algorithm())?;
        if spec.width() > self.max_dimension || spec.height() > self.max_dimension {
            return Err(ConvertError::TooLarge {
                width: spec.width(),
                height: spec.height(),
                max: self.max_dimension,
            });
        }
        Ok(())
    }
}

/// Encode a processed buffer as PNG with its ETag.
pub fn encode_image(buffer: &RasterBuffer) -> Result<ConvertedImage, ConvertError> {
    let png = encode_png(buffer)?;
    let etag = compute_etag(&png);

    tracing::debug!(
        width = buffer.width(),
        height = buffer.height(),
        bytes = png.len(),
        "Encoded image"
    );

    Ok(ConvertedImage {
        width: buffer.width(),
        height: buffer.height(),
        png,
        etag,
    })
}

/// Quoted hex of the first 16 bytes of the SHA-256 of `data`.
pub fn compute_etag(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let result = hasher.finalize();
    format!("\"{}\"", hex::encode(&result[..16]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rgb565_pipeline::{DitherAlgorithm, Pixel, ResizeRequest};

    fn sample_png(width: usize, height: usize) -> Vec<u8> {
        let pixels: Vec<Pixel> = (0..width * height)
            .map(|i| Pixel::rgb((i * 37 % 256) as u8, (i * 11 % 256) as u8, 100))
            .collect();
        encode_png(&RasterBuffer::from_pixels(&pixels, width, height).unwrap()).unwrap()
    }

    #[test]
    fn test_convert_keeps_size_without_resize() {
        let service = ConversionService::new();
        let result = service
            .convert_png(&sample_png(7, 5), &PipelineConfig::default())
            .unwrap();
        assert_eq!((result.width, result.height), (7, 5));

        let decoded = decode_png(&result.png).unwrap();
        assert_eq!(decoded.width(), 7);
        assert!(decoded.pixels().all(|p| rgb565_pipeline::quantize(p) == p));
    }

    #[test]
    fn test_convert_with_resize_and_dither() {
        let service = ConversionService::new();
        let config = PipelineConfig::new()
            .dither(DitherAlgorithm::Atkinson)
            .resize(ResizeRequest::Scale { percent: 200.0 });
        let result = service.convert_png(&sample_png(4, 3), &config).unwrap();
        assert_eq!((result.width, result.height), (8, 6));
    }

    #[test]
    fn test_etag_is_stable_and_quoted() {
        let service = ConversionService::new();
        let png = sample_png(3, 3);
        let a = service.convert_png(&png, &PipelineConfig::default()).unwrap();
        let b = service.convert_png(&png, &PipelineConfig::default()).unwrap();
        assert_eq!(a.etag, b.etag);
        assert_eq!(a.etag.len(), 34);
        assert!(a.etag.starts_with('"') && a.etag.ends_with('"'));
    }

    #[test]
    fn test_rejects_oversized_target() {
        let service = ConversionService::new().with_max_dimension(16);
        let config = PipelineConfig::new().resize(ResizeRequest::exact(17, 4));
        let err = service.convert_png(&sample_png(2, 2), &config).unwrap_err();
        assert!(matches!(
            err,
            ConvertError::TooLarge {
                width: 17,
                height: 4,
                max: 16
            }
        ));
    }

    #[test]
    fn test_invalid_resize_is_client_error() {
        let service = ConversionService::new();
        let config = PipelineConfig::new().resize(ResizeRequest::Scale { percent: 0.0 });
        let err = service.convert_png(&sample_png(2, 2), &config).unwrap_err();
        assert!(matches!(err, ConvertError::Pipeline(_)));
        assert!(err.is_client_error());
    }

    #[test]
    fn test_export_produces_header() {
        let service = ConversionService::new();
        let header = service
            .export_png(
                &sample_png(2, 2),
                &PipelineConfig::default(),
                &ExportOptions::new().array_name("logo"),
            )
            .unwrap();
        assert!(header.starts_with("// RGB565 Image Data\n// Size: 2x2 pixels\n"));
        assert!(header.contains("const uint16_t logo[2][2] = {"));
        assert!(header.ends_with("};"));
    }

    #[test]
    fn test_one_run_feeds_png_and_header() {
        let service = ConversionService::new();
        let config = PipelineConfig::new().dither(DitherAlgorithm::FloydSteinberg);
        let png = sample_png(5, 4);

        let buffer = service.process_png(&png, &config).unwrap();
        let image = encode_image(&buffer).unwrap();
        let header = export_c_array(&buffer, &ExportOptions::new().array_name("icon"));

        assert_eq!(decode_png(&image.png).unwrap(), buffer);
        assert_eq!(
            header,
            service
                .export_png(&png, &config, &ExportOptions::new().array_name("icon"))
                .unwrap()
        );
        assert_eq!(image.etag, service.convert_png(&png, &config).unwrap().etag);
    }

    #[tokio::test]
    async fn test_async_wrappers() {
        let service = Arc::new(ConversionService::new());
        let result = service
            .convert_png_async(sample_png(3, 2), PipelineConfig::default())
            .await
            .unwrap();
        assert_eq!(result.width, 3);

        let header = service
            .export_png_async(sample_png(3, 2), PipelineConfig::default(), ExportOptions::new())
            .await
            .unwrap();
        assert!(header.contains("image_data[2][3]"));
    }
}
