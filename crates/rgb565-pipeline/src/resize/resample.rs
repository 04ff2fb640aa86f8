//! Two-pass separable resampling.

use super::kernels::{axis_weights, nearest_indices, AxisWeights, Filter, BICUBIC, BILINEAR};
use super::{ResizeAlgorithm, ResizeSpec};
use crate::api::PipelineError;
use crate::raster::{byte_len, store_channel, RasterBuffer};

const CHANNELS: usize = 4;

/// Resample `source` to exactly `spec.width() x spec.height()`.
///
/// All four channels use the same weights; alpha is interpolated like color,
/// not composited. Results are rounded and clamped to `0..=255`.
///
/// Fails with [`PipelineError::TooLarge`] when the output or the
/// intermediate horizontal pass cannot be allocated.
pub fn resample(source: &RasterBuffer, spec: &ResizeSpec) -> Result<RasterBuffer, PipelineError> {
    let (dst_w, dst_h) = (spec.width(), spec.height());
    if dst_w == source.width() && dst_h == source.height() {
        return Ok(source.clone());
    }
    match spec.algorithm() {
        ResizeAlgorithm::Nearest => nearest(source, dst_w, dst_h),
        ResizeAlgorithm::Bilinear => separable(source, dst_w, dst_h, BILINEAR),
        ResizeAlgorithm::Bicubic => separable(source, dst_w, dst_h, BICUBIC),
    }
}

fn nearest(
    source: &RasterBuffer,
    dst_w: usize,
    dst_h: usize,
) -> Result<RasterBuffer, PipelineError> {
    let xs = nearest_indices(source.width(), dst_w);
    let ys = nearest_indices(source.height(), dst_h);
    let src = source.as_bytes();

    let mut out = RasterBuffer::blank(dst_w, dst_h)?;
    let data = out.bytes_mut();
    for (dy, &sy) in ys.iter().enumerate() {
        for (dx, &sx) in xs.iter().enumerate() {
            let s = source.offset(sx, sy);
            let d = (dy * dst_w + dx) * CHANNELS;
            data[d..d + CHANNELS].copy_from_slice(&src[s..s + CHANNELS]);
        }
    }
    Ok(out)
}

#[inline]
fn accumulate(weights: &AxisWeights, stride: usize, base: usize, src: &[f32]) -> [f32; CHANNELS] {
    let mut acc = [0.0f32; CHANNELS];
    for (k, &w) in weights.weights.iter().enumerate() {
        let i = base + (weights.start + k) * stride;
        for c in 0..CHANNELS {
            acc[c] += src[i + c] * w;
        }
    }
    acc
}

fn separable(
    source: &RasterBuffer,
    dst_w: usize,
    dst_h: usize,
    filter: Filter,
) -> Result<RasterBuffer, PipelineError> {
    let (src_w, src_h) = (source.width(), source.height());

    // One f32 per byte of a dst_w x src_h raster.
    let intermediate_len = byte_len(dst_w, src_h)?;
    intermediate_len
        .checked_mul(std::mem::size_of::<f32>())
        .filter(|&n| n <= isize::MAX as usize)
        .ok_or(PipelineError::TooLarge {
            width: dst_w,
            height: src_h,
        })?;
    let mut out = RasterBuffer::blank(dst_w, dst_h)?;

    let h_weights = axis_weights(src_w, dst_w, filter);
    let v_weights = axis_weights(src_h, dst_h, filter);

    let input: Vec<f32> = source.as_bytes().iter().map(|&v| v as f32).collect();

    // Horizontal pass: src_h rows of dst_w samples, unclamped.
    let mut horizontal = vec![0.0f32; intermediate_len];
    for y in 0..src_h {
        let row = y * src_w * CHANNELS;
        for (x, weights) in h_weights.iter().enumerate() {
            let acc = accumulate(weights, CHANNELS, row, &input);
            let d = (y * dst_w + x) * CHANNELS;
            horizontal[d..d + CHANNELS].copy_from_slice(&acc);
        }
    }

    // Vertical pass
    let data = out.bytes_mut();
    let stride = dst_w * CHANNELS;
    for (y, weights) in v_weights.iter().enumerate() {
        for x in 0..dst_w {
            let acc = accumulate(weights, stride, x * CHANNELS, &horizontal);
            let d = (y * dst_w + x) * CHANNELS;
            for c in 0..CHANNELS {
                data[d + c] = store_channel(acc[c]);
            }
        }
    }
    Ok(out)
}
