//! Raster storage for the conversion pipeline.
//!
//! [`RasterBuffer`] is the unit of ownership passed between pipeline stages:
//! a row-major, contiguous RGBA8 grid whose dimensions are fixed at creation.
//! [`SourceImage`] wraps the buffer an image was loaded as, together with the
//! dimensions and aspect ratio captured at load time.

mod buffer;
mod pixel;

pub use buffer::{RasterBuffer, SourceImage};
pub(crate) use buffer::byte_len;
pub use pixel::Pixel;
pub(crate) use pixel::store_channel;
