//! Atkinson error diffusion to RGB565.

use crate::raster::RasterBuffer;

use super::{diffuse_with_kernel, Dither, ATKINSON};

/// Atkinson error diffusion dithering.
///
/// Same traversal as Floyd-Steinberg, but only 6/8 of the error is
/// propagated, 1/8 to each of six neighbors:
///
/// ```text
///        X   1   1
///    1   1   1
///        1
/// ```
///
/// The discarded 2/8 keeps highlights and shadows cleaner and produces a
/// higher-contrast result.
pub struct Atkinson;

impl Dither for Atkinson {
    fn dither(&self, buffer: &mut RasterBuffer) {
        diffuse_with_kernel(buffer, &ATKINSON);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dither::FloydSteinberg;
    use crate::raster::Pixel;

    #[test]
    fn test_error_reaches_two_pixels_right() {
        // Red 7 -> 0 with error 7; each neighbor gets 7/8 = 0.875 -> +1.
        let mut buffer = RasterBuffer::filled(3, 1, Pixel::rgb(7, 0, 0)).unwrap();
        Atkinson.dither(&mut buffer);

        // (0,0) 7 -> 0; (1,0) 8 -> 8 err 0; (2,0) 7 + 0.875 = 7.875 -> 8 -> 8.
        assert_eq!(buffer.pixel(0, 0).r, 0);
        assert_eq!(buffer.pixel(1, 0).r, 8);
        assert_eq!(buffer.pixel(2, 0).r, 8);
    }

    #[test]
    fn test_reaches_two_rows_down() {
        // Only the first pixel carries error; (0,2) must receive a share.
        let mut buffer = RasterBuffer::filled(1, 3, Pixel::rgb(0, 0, 0)).unwrap();
        buffer.set_pixel(0, 0, Pixel::rgb(7, 0, 0));
        buffer.set_pixel(0, 2, Pixel::rgb(7, 0, 0));
        Atkinson.dither(&mut buffer);

        // (0,1): 0 + 0.875 -> 1 -> 0 with error 1 -> (0,3) out of bounds
        // (0,2): 7 + 0.875 -> 8, plus 1/8 of 1 = 0.125 -> 8 -> 8
        assert_eq!(buffer.pixel(0, 2).r, 8);
    }

    #[test]
    fn test_darker_than_floyd_steinberg_on_flat_field() {
        // Discarding a quarter of the error means fewer pixels get bumped
        // up to the next level than with full propagation.
        let input = Pixel::rgb(100, 100, 100);
        let mut atkinson = RasterBuffer::filled(32, 32, input).unwrap();
        let mut floyd = atkinson.clone();
        Atkinson.dither(&mut atkinson);
        FloydSteinberg.dither(&mut floyd);

        let sum = |b: &RasterBuffer| b.pixels().map(|p| p.r as u64).sum::<u64>();
        assert!(sum(&atkinson) <= sum(&floyd));
    }
}
