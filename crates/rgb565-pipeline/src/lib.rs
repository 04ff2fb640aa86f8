//! rgb565-pipeline: RGB565 conversion for embedded displays
//!
//! This library turns RGBA8 rasters into images that a 16-bit RGB565 panel
//! can show exactly, and serializes them as C arrays for firmware.
//!
//! # Quick Start
//!
//! The [`Rgb565Converter`] builder is the primary entry point:
//!
//! ```
//! use rgb565_pipeline::{DitherAlgorithm, Pixel, RasterBuffer, Rgb565Converter, SourceImage};
//!
//! let source = SourceImage::new(RasterBuffer::filled(4, 4, Pixel::rgb(90, 140, 210)).unwrap());
//!
//! let converter = Rgb565Converter::new().dither(DitherAlgorithm::FloydSteinberg);
//! let result = converter.convert(&source).unwrap();
//! let header = converter.export_buffer(&result.buffer);
//!
//! assert!(header.starts_with("// RGB565 Image Data\n"));
//! ```
//!
//! # Pipeline
//!
//! ```text
//! SourceImage             (RGBA8, original dimensions + aspect ratio)
//!     |
//!     v
//! resample                (optional: nearest / bilinear / bicubic)
//!     |
//!     v
//! filter                  (optional: tone/color filter, blended by intensity)
//!     |
//!     v
//! dither | quantize       (exactly one of the two)
//!     |
//!     v
//! RasterBuffer            (every pixel RGB565-representable)
//!     |
//!     v
//! export_c_array          (optional: C header text)
//! ```
//!
//! [`process`] is pure: it borrows the source and the [`PipelineConfig`],
//! and returns a new buffer together with the config that produced it.
//!
//! # Quantization
//!
//! [`Rgb565`] is the single truncate/expand/pack primitive. Red and blue keep
//! their top 5 bits and green its top 6; expansion replicates the high bits
//! into the vacated low bits, so 0 and 255 survive the round trip and
//! quantizing twice changes nothing.
//!
//! # Dithering
//!
//! Three algorithms are available via [`DitherAlgorithm`]:
//!
//! - Floyd-Steinberg (error diffusion, 100% propagation)
//! - Atkinson (error diffusion, 75% propagation, higher contrast)
//! - Ordered (4x4 Bayer, position-dependent, no error carried)
//!
//! Error diffusion is strictly row-major and sequential. Alpha is carried
//! through every stage untouched.

pub mod api;
pub mod dither;
pub mod export;
pub mod filter;
pub mod quantize;
pub mod raster;
pub mod resize;

mod names;


pub use api::{
    process, process_buffer, ParseNameError, PipelineConfig, PipelineError, Processed,
    Rgb565Converter,
};
pub use dither::{Atkinson, Dither, DitherAlgorithm, DitherMode, FloydSteinberg, Ordered};
pub use export::{export_c_array, ExportOptions};
pub use filter::{apply_filter, FilterKind, FilterParameters};
pub use quantize::{quantize, quantize_buffer, Rgb565};
pub use raster::{Pixel, RasterBuffer, SourceImage};
pub use resize::{resample, ResizeAlgorithm, ResizeRequest, ResizeSpec};
