//! Single RGBA8 pixel value.

/// An 8-bit-per-channel RGBA pixel.
///
/// Alpha is carried through every transform unchanged; only `r`, `g` and `b`
/// are ever rewritten by the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Pixel {
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Fully opaque pixel.
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    #[inline]
    pub const fn from_bytes(bytes: [u8; 4]) -> Self {
        Self {
            r: bytes[0],
            g: bytes[1],
            b: bytes[2],
            a: bytes[3],
        }
    }

    #[inline]
    pub const fn to_bytes(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// The color channels as `[r, g, b]`.
    #[inline]
    pub const fn channels(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Replace the color channels, keeping alpha.
    #[inline]
    pub const fn with_channels(self, rgb: [u8; 3]) -> Self {
        Self {
            r: rgb[0],
            g: rgb[1],
            b: rgb[2],
            a: self.a,
        }
    }
}

impl From<[u8; 4]> for Pixel {
    fn from(bytes: [u8; 4]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl From<Pixel> for [u8; 4] {
    fn from(pixel: Pixel) -> Self {
        pixel.to_bytes()
    }
}

/// Round a working value to the nearest storable channel value.
///
/// Ties round to even and the result is clamped to `0..=255`, which is how
/// an 8-bit clamped canvas stores fractional writes. NaN stores as 0.
/// Accepts `f32` working values as well as `f64`; widening is exact.
#[inline]
pub(crate) fn store_channel(value: impl Into<f64>) -> u8 {
    let value: f64 = value.into();
    if value.is_nan() {
        return 0;
    }
    value.round_ties_even().clamp(0.0, 255.0) as u8
}
