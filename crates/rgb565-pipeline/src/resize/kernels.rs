//! Interpolation kernels and per-axis weight precomputation.
//!
//! Both interpolating filters are separable, so one weight table per axis
//! is computed up front and reused for every row (or column).

/// Triangle (tent) kernel, support `[-1, 1]`.
#[inline]
pub fn tent(x: f32) -> f32 {
    let x = x.abs();
    if x >= 1.0 {
        0.0
    } else {
        1.0 - x
    }
}

/// Catmull-Rom spline (B=0, C=0.5), support `[-2, 2]`.
///
/// Interpolating: 1 at 0, 0 at every other integer.
#[inline]
pub fn catmull_rom(x: f32) -> f32 {
    let x = x.abs();
    if x >= 2.0 {
        0.0
    } else if x >= 1.0 {
        -0.5 * x * x * x + 2.5 * x * x - 4.0 * x + 2.0
    } else {
        1.5 * x * x * x - 2.5 * x * x + 1.0
    }
}

/// Source contributions to one destination sample.
#[derive(Debug, Clone)]
pub(crate) struct AxisWeights {
    /// First source index covered by `weights`.
    pub start: usize,
    /// Normalized weights for `start..start + weights.len()`.
    pub weights: Vec<f32>,
}

/// An interpolation kernel and its support radius in source pixels at scale 1.
#[derive(Clone, Copy)]
pub(crate) struct Filter {
    pub kernel: fn(f32) -> f32,
    pub support: f32,
}

pub(crate) const BILINEAR: Filter = Filter {
    kernel: tent,
    support: 1.0,
};

pub(crate) const BICUBIC: Filter = Filter {
    kernel: catmull_rom,
    support: 2.0,
};

/// Weights mapping `src_len` samples onto `dst_len`.
///
/// Destination centers map to `(i + 0.5) * src_len / dst_len - 0.5` in
/// source coordinates. When downscaling, the kernel is widened by the scale
/// factor so every source pixel contributes.
pub(crate) fn axis_weights(
    src_len: usize,
    dst_len: usize,
    filter: Filter,
) -> Vec<AxisWeights> {
    let Filter { kernel, support } = filter;
    let scale = src_len as f32 / dst_len as f32;
    let filter_scale = scale.max(1.0);
    let radius = (support * filter_scale).ceil() as i64;
    let last = src_len as i64 - 1;

    (0..dst_len)
        .map(|i| {
            let center = (i as f32 + 0.5) * scale - 0.5;
            let c = center.floor() as i64;
            let start = (c - radius + 1).clamp(0, last);
            let end = (c + radius).clamp(0, last);

            let mut weights: Vec<f32> = (start..=end)
                .map(|s| kernel((center - s as f32) / filter_scale))
                .collect();
            let sum: f32 = weights.iter().sum();
            if sum.abs() > 1e-8 {
                weights.iter_mut().for_each(|w| *w /= sum);
            } else {
                // Center fell between samples outside the support: take the nearest.
                let nearest = center.round().clamp(start as f32, end as f32) as usize;
                weights.iter_mut().for_each(|w| *w = 0.0);
                weights[nearest - start as usize] = 1.0;
            }

            AxisWeights {
                start: start as usize,
                weights,
            }
        })
        .collect()
}

/// Nearest source index for every destination index.
pub(crate) fn nearest_indices(src_len: usize, dst_len: usize) -> Vec<usize> {
    let scale = src_len as f64 / dst_len as f64;
    (0..dst_len)
        .map(|i| (((i as f64 + 0.5) * scale) as usize).min(src_len - 1))
        .collect()
}
