//! RGB888 → RGB565 → RGB888 quantization.
//!
//! [`Rgb565`] is the single place where channels are truncated to 5/6/5 bits,
//! expanded back to 8 bits, and packed into 16-bit words. The plain quantizer,
//! all dithering algorithms and the exporter go through it, so the round-trip
//! invariant holds everywhere by construction:
//!
//! ```text
//! r8 -> r5 = r8 >> 3        -> (r5 << 3) | (r5 >> 2)
//! g8 -> g6 = g8 >> 2        -> (g6 << 2) | (g6 >> 4)
//! b8 -> b5 = b8 >> 3        -> (b5 << 3) | (b5 >> 2)
//! packed = (r5 << 11) | (g6 << 5) | b5
//! ```

use crate::raster::{Pixel, RasterBuffer};

/// A color truncated to 5 bits red, 6 bits green, 5 bits blue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb565 {
    r5: u8,
    g6: u8,
    b5: u8,
}

impl Rgb565 {
    /// Truncate 8-bit channels.
    #[inline]
    pub const fn from_rgb888(r: u8, g: u8, b: u8) -> Self {
        Self {
            r5: (r >> 3) & 0x1F,
            g6: (g >> 2) & 0x3F,
            b5: (b >> 3) & 0x1F,
        }
    }

    /// Unpack a 16-bit `RRRRRGGGGGGBBBBB` word.
    #[inline]
    pub const fn from_packed(word: u16) -> Self {
        Self {
            r5: ((word >> 11) & 0x1F) as u8,
            g6: ((word >> 5) & 0x3F) as u8,
            b5: (word & 0x1F) as u8,
        }
    }

    #[inline]
    pub const fn r5(self) -> u8 {
        self.r5
    }

    #[inline]
    pub const fn g6(self) -> u8 {
        self.g6
    }

    #[inline]
    pub const fn b5(self) -> u8 {
        self.b5
    }

    /// Pack as `(r5 << 11) | (g6 << 5) | b5`.
    #[inline]
    pub const fn packed(self) -> u16 {
        ((self.r5 as u16) << 11) | ((self.g6 as u16) << 5) | self.b5 as u16
    }

    /// Expand back to 8-bit channels by replicating the high bits into the
    /// vacated low bits.
    #[inline]
    pub const fn to_rgb888(self) -> [u8; 3] {
        [
            expand5(self.r5),
            expand6(self.g6),
            expand5(self.b5),
        ]
    }
}

impl From<Pixel> for Rgb565 {
    fn from(pixel: Pixel) -> Self {
        Self::from_rgb888(pixel.r, pixel.g, pixel.b)
    }
}

#[inline]
const fn expand5(v5: u8) -> u8 {
    (v5 << 3) | (v5 >> 2)
}

#[inline]
const fn expand6(v6: u8) -> u8 {
    (v6 << 2) | (v6 >> 4)
}

/// Quantize color channels to the nearest-below RGB565 representable value.
#[inline]
pub const fn quantize_channels(rgb: [u8; 3]) -> [u8; 3] {
    Rgb565::from_rgb888(rgb[0], rgb[1], rgb[2]).to_rgb888()
}

/// Quantize one pixel. Alpha passes through unchanged.
///
/// # Example
///
/// ```
/// use rgb565_pipeline::{quantize, Pixel};
///
/// assert_eq!(quantize(Pixel::new(255, 255, 255, 9)), Pixel::new(255, 255, 255, 9));
/// assert_eq!(quantize(Pixel::rgb(100, 100, 100)), Pixel::rgb(99, 101, 99));
/// ```
#[inline]
pub fn quantize(pixel: Pixel) -> Pixel {
    pixel.with_channels(quantize_channels(pixel.channels()))
}

/// Quantize every pixel of a buffer in place, with no error diffusion.
pub fn quantize_buffer(buffer: &mut RasterBuffer) {
    for chunk in buffer.bytes_mut().chunks_exact_mut(4) {
        let [r, g, b] = quantize_channels([chunk[0], chunk[1], chunk[2]]);
        chunk[0] = r;
        chunk[1] = g;
        chunk[2] = b;
    }
}

/// True when `rgb` is a fixed point of the round trip.
#[inline]
pub fn is_representable(rgb: [u8; 3]) -> bool {
    quantize_channels(rgb) == rgb
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_extremes() {
        assert_eq!(quantize_channels([0, 0, 0]), [0, 0, 0]);
        assert_eq!(quantize_channels([255, 255, 255]), [255, 255, 255]);
    }

    #[test]
    fn test_bit_replication() {
        // r5 = 0b10000 -> 0b10000_100
        assert_eq!(expand5(0b10000), 0b1000_0100);
        // g6 = 0b100000 -> 0b100000_10
        assert_eq!(expand6(0b10_0000), 0b1000_0010);
        assert_eq!(expand5(0x1F), 255);
        assert_eq!(expand6(0x3F), 255);
    }

    #[test]
    fn test_idempotent_for_all_channel_values() {
        for v in 0..=255u8 {
            let once = quantize_channels([v, v, v]);
            assert_eq!(quantize_channels(once), once, "not idempotent at {v}");
        }
    }

    #[test]
    fn test_output_set_sizes() {
        let reds: HashSet<u8> = (0..=255u8).map(|v| quantize_channels([v, 0, 0])[0]).collect();
        let greens: HashSet<u8> = (0..=255u8).map(|v| quantize_channels([0, v, 0])[1]).collect();
        let blues: HashSet<u8> = (0..=255u8).map(|v| quantize_channels([0, 0, v])[2]).collect();

        assert_eq!(reds.len(), 32);
        assert_eq!(greens.len(), 64);
        assert_eq!(blues.len(), 32);
    }

    #[test]
    fn test_quantize_keeps_alpha() {
        let out = quantize(Pixel::new(13, 200, 77, 3));
        assert_eq!(out.a, 3);
        assert!(is_representable(out.channels()));
    }

    #[test]
    fn test_pack_known_values() {
        assert_eq!(Rgb565::from_rgb888(255, 255, 255).packed(), 0xFFFF);
        assert_eq!(Rgb565::from_rgb888(0, 0, 0).packed(), 0x0000);
        assert_eq!(Rgb565::from_rgb888(255, 0, 0).packed(), 0xF800);
        assert_eq!(Rgb565::from_rgb888(0, 255, 0).packed(), 0x07E0);
        assert_eq!(Rgb565::from_rgb888(0, 0, 255).packed(), 0x001F);
    }

    #[test]
    fn test_unpack_matches_pack() {
        let color = Rgb565::from_rgb888(200, 100, 50);
        assert_eq!(Rgb565::from_packed(color.packed()), color);
    }

    #[test]
    fn test_quantize_buffer() {
        let mut buffer = RasterBuffer::filled(2, 2, Pixel::new(100, 100, 100, 128)).unwrap();
        quantize_buffer(&mut buffer);
        assert!(buffer.pixels().all(|p| p == Pixel::new(99, 101, 99, 128)));
    }
}
