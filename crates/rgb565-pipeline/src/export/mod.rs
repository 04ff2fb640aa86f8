//! C header export of an RGB565 raster.
//!
//! The output is byte-exact:
//!
//! ```text
//! // RGB565 Image Data
//! // Size: 2x2 pixels
//! // Total bytes: 8
//!
//! const uint16_t image_data[2][2] = {
//!     {0xF800, 0x07E0},
//!     {0x001F, 0xFFFF}
//! };
//! ```
//!
//! No newline follows the closing `};`.

use std::fmt::Write;

use crate::quantize::Rgb565;
use crate::raster::RasterBuffer;

/// Default C identifier for the exported array.
pub const DEFAULT_ARRAY_NAME: &str = "image_data";

/// Options for [`export_c_array`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    array_name: String,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            array_name: DEFAULT_ARRAY_NAME.to_string(),
        }
    }
}

impl ExportOptions {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the array identifier.
    ///
    /// Characters that cannot appear in a C identifier become `_`, and a
    /// leading digit is prefixed with `_`. An empty name keeps the default.
    pub fn array_name(mut self, name: &str) -> Self {
        self.array_name = sanitize_identifier(name);
        self
    }

    pub fn name(&self) -> &str {
        &self.array_name
    }
}

fn sanitize_identifier(name: &str) -> String {
    let mut ident: String = name
        .trim()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    if ident.is_empty() {
        return DEFAULT_ARRAY_NAME.to_string();
    }
    if ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert(0, '_');
    }
    ident
}

/// Serialize `buffer` as a C `uint16_t` array of packed RGB565 words.
///
/// Pixels are packed by truncation, so a buffer that has already been
/// quantized or dithered exports exactly the colors it displays.
///
/// # Example
///
/// ```
/// use rgb565_pipeline::{export_c_array, ExportOptions, Pixel, RasterBuffer};
///
/// let buffer = RasterBuffer::filled(1, 1, Pixel::rgb(255, 255, 255)).unwrap();
/// let text = export_c_array(&buffer, &ExportOptions::default());
/// assert!(text.contains("{0xFFFF}"));
/// assert!(text.ends_with("};"));
/// ```
pub fn export_c_array(buffer: &RasterBuffer, options: &ExportOptions) -> String {
    let (width, height) = (buffer.width(), buffer.height());
    // "0xABCD, " per pixel plus row framing
    let mut out = String::with_capacity(128 + height * (width * 8 + 8));

    // Writing to a String cannot fail.
    let _ = write!(
        out,
        "// RGB565 Image Data\n// Size: {width}x{height} pixels\n// Total bytes: {}\n\n",
        width * height * 2
    );
    let _ = writeln!(
        out,
        "const uint16_t {}[{height}][{width}] = {{",
        options.name()
    );

    let bytes = buffer.as_bytes();
    for (y, row) in bytes.chunks_exact(width * 4).enumerate() {
        out.push_str("    {");
        for (x, px) in row.chunks_exact(4).enumerate() {
            if x > 0 {
                out.push_str(", ");
            }
            let word = Rgb565::from_rgb888(px[0], px[1], px[2]).packed();
            let _ = write!(out, "0x{word:04X}");
        }
        out.push('}');
        if y + 1 < height {
            out.push(',');
        }
        out.push('\n');
    }
    out.push_str("};");
    out
}
