use rgb565_pipeline::{
    DitherAlgorithm, DitherMode, FilterKind, FilterParameters, PipelineConfig, ResizeAlgorithm,
    ResizeRequest,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One named bundle of conversion settings, as stored in a config preset.
///
/// Enum-like fields are kept as strings and parsed leniently when the
/// pipeline config is built: unknown names are logged and skipped instead
/// of failing the request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConversionOptions {
    /// Dither instead of plain quantization
    #[serde(default)]
    pub dither_enabled: bool,

    /// "floyd-steinberg", "ordered" or "atkinson"
    #[serde(default = "default_dither_algorithm")]
    pub dither_algorithm: String,

    /// "none", "grayscale", "sepia", "invert", "brightness", "contrast" or "edge-enhance"
    #[serde(default = "default_filter")]
    pub filter: String,

    /// Filter strength, clamped to 0..1
    #[serde(default = "default_intensity")]
    pub filter_intensity: f32,

    /// Optional resize before filtering
    #[serde(default)]
    pub resize: Option<ResizeOptions>,
}

fn default_dither_algorithm() -> String {
    "floyd-steinberg".to_string()
}

fn default_filter() -> String {
    "none".to_string()
}

fn default_intensity() -> f32 {
    1.0
}

impl Default for ConversionOptions {
    fn default() -> Self {
        Self {
            dither_enabled: false,
            dither_algorithm: default_dither_algorithm(),
            filter: default_filter(),
            filter_intensity: default_intensity(),
            resize: None,
        }
    }
}

/// Resize settings of a [`ConversionOptions`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResizeOptions {
    /// "scale" or "size"
    pub mode: String,

    /// Percentage for "scale" mode
    #[serde(default)]
    pub scale_percent: Option<f64>,

    /// Target width for "size" mode
    #[serde(default)]
    pub width: Option<usize>,

    /// Target height for "size" mode
    #[serde(default)]
    pub height: Option<usize>,

    /// Derive the missing dimension from the source aspect ratio
    #[serde(default = "default_aspect_locked")]
    pub aspect_locked: bool,

    /// "nearest", "bilinear" or "bicubic"
    #[serde(default = "default_resample")]
    pub algorithm: String,
}

fn default_aspect_locked() -> bool {
    true
}

fn default_resample() -> String {
    "bilinear".to_string()
}

impl ResizeOptions {
    fn request(&self) -> Option<ResizeRequest> {
        match self.mode.trim().to_ascii_lowercase().as_str() {
            "scale" => Some(ResizeRequest::Scale {
                percent: self.scale_percent.unwrap_or(100.0),
            }),
            "size" => Some(ResizeRequest::Size {
                width: self.width,
                height: self.height,
                aspect_locked: self.aspect_locked,
            }),
            other => {
                tracing::warn!(mode = other, "Unknown resize mode, skipping resize");
                None
            }
        }
    }
}

/// Per-request overrides from CLI flags or query parameters.
///
/// Every field that is set replaces the corresponding preset value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OptionOverrides {
    /// Algorithm name, or "none"/"off" to disable dithering
    pub dither: Option<String>,
    pub filter: Option<String>,
    pub intensity: Option<f32>,
    pub scale: Option<f64>,
    pub width: Option<usize>,
    pub height: Option<usize>,
    pub aspect_lock: Option<bool>,
    pub resample: Option<String>,
}

impl OptionOverrides {
    /// Layer these overrides on top of `base`.
    pub fn apply(&self, mut base: ConversionOptions) -> ConversionOptions {
        if let Some(dither) = &self.dither {
            match dither.trim().to_ascii_lowercase().as_str() {
                "none" | "off" | "false" => base.dither_enabled = false,
                _ => {
                    base.dither_enabled = true;
                    base.dither_algorithm = dither.clone();
                }
            }
        }
        if let Some(filter) = &self.filter {
            base.filter = filter.clone();
        }
        if let Some(intensity) = self.intensity {
            base.filter_intensity = intensity;
        }

        let algorithm = self
            .resample
            .clone()
            .or_else(|| base.resize.as_ref().map(|r| r.algorithm.clone()))
            .unwrap_or_else(default_resample);

        if let Some(percent) = self.scale {
            base.resize = Some(ResizeOptions {
                mode: "scale".to_string(),
                scale_percent: Some(percent),
                width: None,
                height: None,
                aspect_locked: true,
                algorithm,
            });
        } else if self.width.is_some() || self.height.is_some() {
            // One dimension alone implies a locked aspect ratio.
            let locked = self
                .aspect_lock
                .unwrap_or(self.width.is_none() || self.height.is_none());
            base.resize = Some(ResizeOptions {
                mode: "size".to_string(),
                scale_percent: None,
                width: self.width,
                height: self.height,
                aspect_locked: locked,
                algorithm,
            });
        } else if let Some(resize) = base.resize.as_mut() {
            resize.algorithm = algorithm;
            if let Some(locked) = self.aspect_lock {
                resize.aspect_locked = locked;
            }
        }
        base
    }
}

impl ConversionOptions {
    /// Build the pipeline configuration, skipping anything that does not parse.
    ///
    /// - unknown filter: no filter
    /// - unknown dither algorithm: plain quantization
    /// - unknown resize mode or resample algorithm: no resize
    pub fn to_pipeline_config(&self) -> PipelineConfig {
        let dither = if self.dither_enabled {
            match self.dither_algorithm.parse::<DitherAlgorithm>() {
                Ok(algorithm) => DitherMode::enabled(algorithm),
                Err(e) => {
                    tracing::warn!(%e, "Falling back to plain quantization");
                    DitherMode::disabled()
                }
            }
        } else {
            DitherMode::disabled()
        };

        let filter = match self.filter.parse::<FilterKind>() {
            Ok(kind) => FilterParameters::new(kind, self.filter_intensity),
            Err(e) => {
                tracing::warn!(%e, "Applying no filter");
                FilterParameters::none()
            }
        };

        let mut config = PipelineConfig::new()
            .dither_mode(dither)
            .filter_parameters(filter);

        if let Some(resize) = &self.resize {
            match resize.algorithm.parse::<ResizeAlgorithm>() {
                Ok(algorithm) => {
                    if let Some(request) = resize.request() {
                        config = config.resize(request).resample(algorithm);
                    }
                }
                Err(e) => tracing::warn!(%e, "Skipping resize"),
            }
        }

        config
    }
}
