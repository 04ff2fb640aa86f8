use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use rgb565_pipeline::{ExportOptions, PipelineConfig};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

use crate::error::ApiError;
use crate::models::{AppConfig, OptionOverrides};
use crate::services::ConversionService;

/// Error response for conversion endpoints
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Status code
    pub status: u16,
    /// Error message
    pub error: String,
}

/// Query parameters shared by the convert and export endpoints.
///
/// Anything left unset comes from the selected preset.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ConvertQuery {
    /// Preset name from the config file (default preset if omitted)
    pub preset: Option<String>,
    /// Dither algorithm ("floyd-steinberg", "ordered", "atkinson") or "none"
    pub dither: Option<String>,
    /// Filter ("none", "grayscale", "sepia", "invert", "brightness", "contrast", "edge-enhance")
    pub filter: Option<String>,
    /// Filter intensity, 0.0 to 1.0
    pub intensity: Option<f32>,
    /// Resize by percentage
    pub scale: Option<f64>,
    /// Target width in pixels
    pub width: Option<usize>,
    /// Target height in pixels
    pub height: Option<usize>,
    /// Preserve the aspect ratio when resizing by size
    pub aspect_lock: Option<bool>,
    /// Resampling algorithm ("nearest", "bilinear", "bicubic")
    pub resample: Option<String>,
    /// C array name for exports
    pub name: Option<String>,
}

impl ConvertQuery {
    pub fn overrides(&self) -> OptionOverrides {
        OptionOverrides {
            dither: self.dither.clone(),
            filter: self.filter.clone(),
            intensity: self.intensity,
            scale: self.scale,
            width: self.width,
            height: self.height,
            aspect_lock: self.aspect_lock,
            resample: self.resample.clone(),
        }
    }

    /// Resolve the preset and layer the query on top of it.
    pub fn pipeline_config(&self, config: &AppConfig) -> Result<PipelineConfig, ApiError> {
        let base = config
            .preset(self.preset.as_deref())
            .ok_or_else(|| ApiError::UnknownPreset(self.preset.clone().unwrap_or_default()))?;
        Ok(self.overrides().apply(base).to_pipeline_config())
    }
}

fn require_body(body: &Bytes) -> Result<(), ApiError> {
    if body.is_empty() {
        return Err(ApiError::BadRequest("Empty request body".to_string()));
    }
    Ok(())
}

/// Convert a PNG to RGB565
///
/// Returns the quantized image as PNG. Every pixel of the result is exactly
/// representable in RGB565.
#[utoipa::path(
    post,
    path = "/api/convert",
    request_body(content = Vec<u8>, content_type = "image/png", description = "Source PNG"),
    responses(
        (status = 200, description = "Converted image", content_type = "image/png"),
        (status = 400, description = "Invalid image or options", body = ErrorResponse),
        (status = 500, description = "Conversion failed", body = ErrorResponse),
    ),
    params(ConvertQuery),
    tag = "Conversion"
)]
pub async fn handle_convert(
    State(config): State<Arc<AppConfig>>,
    State(converter): State<Arc<ConversionService>>,
    Query(query): Query<ConvertQuery>,
    body: Bytes,
) -> Result<Response, ApiError> {
    require_body(&body)?;
    let pipeline = query.pipeline_config(&config)?;

    tracing::info!(
        bytes = body.len(),
        preset = query.preset.as_deref().unwrap_or("(default)"),
        dither = ?pipeline.dither_settings(),
        filter = ?pipeline.filter_settings(),
        resize = ?pipeline.resize_request(),
        "Convert request"
    );

    let image = converter.convert_png_async(body.to_vec(), pipeline).await?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, HeaderValue::from_static("image/png")),
            (header::ETAG, header_value(&image.etag)?),
            (
                header::HeaderName::from_static("x-image-width"),
                HeaderValue::from(image.width),
            ),
            (
                header::HeaderName::from_static("x-image-height"),
                HeaderValue::from(image.height),
            ),
        ],
        image.png,
    )
        .into_response())
}

/// Export a PNG as a C header
///
/// Runs the same conversion as `/api/convert` and returns the RGB565 pixels
/// as a `const uint16_t` array.
#[utoipa::path(
    post,
    path = "/api/export",
    request_body(content = Vec<u8>, content_type = "image/png", description = "Source PNG"),
    responses(
        (status = 200, description = "C header", content_type = "text/plain"),
        (status = 400, description = "Invalid image or options", body = ErrorResponse),
        (status = 500, description = "Conversion failed", body = ErrorResponse),
    ),
    params(ConvertQuery),
    tag = "Conversion"
)]
pub async fn handle_export(
    State(config): State<Arc<AppConfig>>,
    State(converter): State<Arc<ConversionService>>,
    Query(query): Query<ConvertQuery>,
    body: Bytes,
) -> Result<Response, ApiError> {
    require_body(&body)?;
    let pipeline = query.pipeline_config(&config)?;
    let options = match query.name.as_deref() {
        Some(name) => ExportOptions::new().array_name(name),
        None => ExportOptions::new(),
    };
    let disposition = format!("attachment; filename=\"{}_rgb565.h\"", options.name());

    tracing::info!(bytes = body.len(), array = options.name(), "Export request");

    let header_text = converter
        .export_png_async(body.to_vec(), pipeline, options)
        .await?;

    Ok((
        StatusCode::OK,
        [
            (
                header::CONTENT_TYPE,
                HeaderValue::from_static("text/plain; charset=utf-8"),
            ),
            (header::CONTENT_DISPOSITION, header_value(&disposition)?),
        ],
        header_text,
    )
        .into_response())
}

fn header_value(value: &str) -> Result<HeaderValue, ApiError> {
    HeaderValue::from_str(value).map_err(|e| ApiError::Internal(format!("Invalid header: {e}")))
}
