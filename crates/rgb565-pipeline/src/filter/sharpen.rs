//! Edge enhancement: unsharp mask over a 5x5 Gaussian blur.
//!
//! The blur uses the separable binomial kernel `[1, 4, 6, 4, 1]` in both
//! directions (total weight 256). It is only evaluated where the full 5x5
//! window fits, so the 2-pixel border of the image is left as it was, and an
//! image narrower or shorter than 5 pixels is not changed at all.

use crate::raster::{store_channel, RasterBuffer};

/// One axis of the 5x5 Gaussian kernel. The 2D weight at `(dx, dy)` is
/// `GAUSSIAN_5X5[dy] * GAUSSIAN_5X5[dx] / 256`.
pub const GAUSSIAN_5X5: [u8; 5] = [1, 4, 6, 4, 1];

const RADIUS: usize = 2;
const WEIGHT_TOTAL: f32 = 256.0;

/// Unrounded blurred color at an interior pixel.
fn blur_at(buffer: &RasterBuffer, x: usize, y: usize) -> [f32; 3] {
    let data = buffer.as_bytes();
    let mut sum = [0.0f32; 3];
    for (ky, &wy) in GAUSSIAN_5X5.iter().enumerate() {
        for (kx, &wx) in GAUSSIAN_5X5.iter().enumerate() {
            let i = buffer.offset(x + kx - RADIUS, y + ky - RADIUS);
            let w = (wy as u32 * wx as u32) as f32;
            for c in 0..3 {
                sum[c] += data[i + c] as f32 * w;
            }
        }
    }
    sum.map(|s| s / WEIGHT_TOTAL)
}

fn has_interior(buffer: &RasterBuffer) -> bool {
    buffer.width() > 2 * RADIUS && buffer.height() > 2 * RADIUS
}

/// 5x5 Gaussian blur of the interior; border pixels are copied unchanged.
pub fn gaussian_blur_5x5(buffer: &RasterBuffer) -> RasterBuffer {
    let mut out = buffer.clone();
    if !has_interior(buffer) {
        return out;
    }
    for y in RADIUS..buffer.height() - RADIUS {
        for x in RADIUS..buffer.width() - RADIUS {
            let blurred = blur_at(buffer, x, y).map(store_channel);
            let pixel = buffer.pixel(x, y).with_channels(blurred);
            out.set_pixel(x, y, pixel);
        }
    }
    out
}

/// Sharpen `buffer` in place:
/// `orig + (orig - blurred) * intensity * 2`, clamped to `0..=255`.
///
/// The blur is always taken from the unmodified input, never from pixels
/// sharpened earlier in the same pass.
pub fn unsharp_mask(buffer: &mut RasterBuffer, intensity: f32) {
    if !has_interior(buffer) {
        return;
    }
    let source = buffer.clone();
    let amount = intensity * 2.0;
    for y in RADIUS..source.height() - RADIUS {
        for x in RADIUS..source.width() - RADIUS {
            let blurred = blur_at(&source, x, y);
            let orig = source.pixel(x, y);
            let mut out = [0u8; 3];
            for (c, (&o, b)) in orig.channels().iter().zip(blurred).enumerate() {
                let o = o as f32;
                out[c] = store_channel(o + (o - b) * amount);
            }
            buffer.set_pixel(x, y, orig.with_channels(out));
        }
    }
}
