//! Ordered (Bayer) dithering to RGB565.
//!
//! A fixed 4x4 threshold pattern perturbs each channel before quantization.
//! Nothing is carried between pixels, so the result for `(x, y)` depends only
//! on that pixel's value and `(x mod 4, y mod 4)`.

use crate::quantize::quantize_channels;
use crate::raster::{Pixel, RasterBuffer};

use super::Dither;

/// 4x4 Bayer threshold matrix, indexed `[y % 4][x % 4]`.
///
/// ```text
///     0   1   2   3   (x mod 4)
///   ┌───┬───┬───┬───┐
/// 0 │ 0 │ 8 │ 2 │10 │
/// 1 │12 │ 4 │14 │ 6 │
/// 2 │ 3 │11 │ 1 │ 9 │
/// 3 │15 │ 7 │13 │ 5 │
///   └───┴───┴───┴───┘
/// ```
pub const BAYER_4X4: [[u8; 4]; 4] = [
    [0, 8, 2, 10],
    [12, 4, 14, 6],
    [3, 11, 1, 9],
    [15, 7, 13, 5],
];

/// Channel offset for `(x, y)`: `(m / 16 - 0.5) * 32`, i.e. `2m - 16`.
///
/// Ranges over the even values `-16..=14`.
#[inline]
pub fn bayer_offset(x: usize, y: usize) -> i16 {
    let m = BAYER_4X4[y % 4][x % 4] as i16;
    2 * m - 16
}

/// Dither a single pixel at position `(x, y)`.
///
/// The offset is added to each color channel, clamped to `0..=255`, and the
/// result quantized. Alpha is unchanged.
#[inline]
pub fn ordered_pixel(pixel: Pixel, x: usize, y: usize) -> Pixel {
    let offset = bayer_offset(x, y);
    let shifted = pixel
        .channels()
        .map(|c| (c as i16 + offset).clamp(0, 255) as u8);
    pixel.with_channels(quantize_channels(shifted))
}

/// 4x4 Bayer ordered dithering.
pub struct Ordered;

impl Dither for Ordered {
    fn dither(&self, buffer: &mut RasterBuffer) {
        buffer.map_pixels(|x, y, pixel| ordered_pixel(pixel, x, y));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matrix_is_permutation_of_0_to_15() {
        let mut values: Vec<u8> = BAYER_4X4.iter().flatten().copied().collect();
        values.sort_unstable();
        assert_eq!(values, (0..16).collect::<Vec<u8>>());
    }

    #[test]
    fn test_offset_matches_normalized_threshold() {
        for y in 0..4 {
            for x in 0..4 {
                let m = BAYER_4X4[y][x] as f64;
                let expected = (m / 16.0 - 0.5) * 32.0;
                assert_eq!(bayer_offset(x, y) as f64, expected);
            }
        }
        assert_eq!(bayer_offset(0, 0), -16);
        assert_eq!(bayer_offset(0, 3), 14);
    }

    #[test]
    fn test_offset_tiles_every_four_pixels() {
        assert_eq!(bayer_offset(1, 2), bayer_offset(5, 6));
        assert_eq!(bayer_offset(3, 0), bayer_offset(103, 40));
    }

    #[test]
    fn test_clamps_before_quantizing() {
        // (0,0) subtracts 16: black stays black instead of wrapping.
        assert_eq!(ordered_pixel(Pixel::rgb(0, 0, 0), 0, 0), Pixel::rgb(0, 0, 0));
        // (0,3) adds 14: white stays white.
        assert_eq!(
            ordered_pixel(Pixel::rgb(255, 255, 255), 0, 3),
            Pixel::rgb(255, 255, 255)
        );
    }

    #[test]
    fn test_buffer_matches_per_pixel_function() {
        let pixels: Vec<Pixel> = (0..64u8).map(|i| Pixel::new(i * 4, 255 - i * 3, i, i)).collect();
        let mut buffer = RasterBuffer::from_pixels(&pixels, 8, 8).unwrap();
        Ordered.dither(&mut buffer);

        for y in 0..8 {
            for x in 0..8 {
                assert_eq!(buffer.pixel(x, y), ordered_pixel(pixels[y * 8 + x], x, y));
            }
        }
    }
}
