//! Per-pixel tone and color filters.

use crate::raster::{store_channel, Pixel, RasterBuffer};

/// Blend each pixel toward `target(rgb)` by `intensity`.
///
/// Computed in `f64` as `input + (target - input) * t`, the same arithmetic a
/// canvas filter loop performs before the clamped 8-bit store.
pub(super) fn blend_target(
    buffer: &mut RasterBuffer,
    intensity: f32,
    target: impl Fn([f64; 3]) -> [f64; 3],
) {
    let t = f64::from(intensity);
    buffer.map_pixels(|_, _, pixel| {
        let input = pixel.channels().map(f64::from);
        let goal = target(input);
        let mut out = [0u8; 3];
        for c in 0..3 {
            out[c] = store_channel(input[c] + (goal[c] - input[c]) * t);
        }
        pixel.with_channels(out)
    });
}

pub(super) fn grayscale_target([r, g, b]: [f64; 3]) -> [f64; 3] {
    let gray = r * 0.299 + g * 0.587 + b * 0.114;
    [gray; 3]
}

pub(super) fn sepia_target([r, g, b]: [f64; 3]) -> [f64; 3] {
    [
        (r * 0.393 + g * 0.769 + b * 0.189).min(255.0),
        (r * 0.349 + g * 0.686 + b * 0.168).min(255.0),
        (r * 0.272 + g * 0.534 + b * 0.131).min(255.0),
    ]
}

pub(super) fn invert_target(rgb: [f64; 3]) -> [f64; 3] {
    rgb.map(|c| 255.0 - c)
}

/// Add `50 * intensity` to every channel, saturating at 255.
pub(super) fn brightness(buffer: &mut RasterBuffer, intensity: f32) {
    let amount = 50.0 * f64::from(intensity);
    buffer.map_pixels(|_, _, pixel| map_channels(pixel, |c| (c + amount).min(255.0)));
}

/// Scale distance from 128 by `1 + 0.5 * intensity`.
pub(super) fn contrast(buffer: &mut RasterBuffer, intensity: f32) {
    let factor = 1.0 + 0.5 * f64::from(intensity);
    buffer.map_pixels(|_, _, pixel| {
        map_channels(pixel, |c| (factor * (c - 128.0) + 128.0).clamp(0.0, 255.0))
    });
}

#[inline]
fn map_channels(pixel: Pixel, f: impl Fn(f64) -> f64) -> Pixel {
    pixel.with_channels(pixel.channels().map(|c| store_channel(f(f64::from(c)))))
}
