//! Error diffusion kernel definitions.
//!
//! Each kernel lists the not-yet-visited neighbors that receive a share of
//! a pixel's quantization error, relative to a strictly row-major,
//! left-to-right traversal.

/// An error diffusion kernel.
///
/// Each entry is `(dx, dy, weight)`; the neighbor at `(x + dx, y + dy)`
/// receives `error * weight / divisor`. The propagated fraction is
/// `sum(weights) / divisor`: 1 for Floyd-Steinberg, 3/4 for Atkinson.
#[derive(Debug, Clone, Copy)]
pub struct Kernel {
    /// `(dx, dy, weight)` entries. `dy` is never negative and `dx` is
    /// positive whenever `dy == 0`, so targets are always unvisited.
    pub entries: &'static [(i32, i32, u8)],

    /// Normalizing divisor for the weights.
    pub divisor: u8,
}

/// Floyd-Steinberg dithering kernel.
///
/// Distributes error to 4 neighbors with 100% total propagation (16/16).
///
/// ```text
///        X   7
///    3   5   1
/// ```
pub const FLOYD_STEINBERG: Kernel = Kernel {
    entries: &[
        (1, 0, 7),  // right
        (-1, 1, 3), // bottom-left
        (0, 1, 5),  // bottom
        (1, 1, 1),  // bottom-right
    ],
    divisor: 16,
};

/// Atkinson dithering kernel.
///
/// Distributes 1/8 of the error to each of 6 neighbors; the remaining
/// 2/8 is dropped, which gives higher-contrast output than Floyd-Steinberg.
///
/// ```text
///        X   1   1
///    1   1   1
///        1
/// ```
pub const ATKINSON: Kernel = Kernel {
    entries: &[
        (1, 0, 1),  // right
        (2, 0, 1),  // two right
        (-1, 1, 1), // bottom-left
        (0, 1, 1),  // bottom
        (1, 1, 1),  // bottom-right
        (0, 2, 1),  // two below
    ],
    divisor: 8,
};

impl Kernel {
    /// Fraction of the error this kernel propagates when no neighbor is clipped.
    pub fn propagation(&self) -> f32 {
        let sum: u32 = self.entries.iter().map(|&(_, _, w)| w as u32).sum();
        sum as f32 / self.divisor as f32
    }

    /// In-bounds targets of the pixel at `(x, y)` as `(tx, ty, factor)`.
    ///
    /// Neighbors outside the image are skipped, never wrapped.
    pub fn targets(
        &self,
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    ) -> impl Iterator<Item = (usize, usize, f32)> + '_ {
        let divisor = self.divisor as f32;
        self.entries.iter().filter_map(move |&(dx, dy, weight)| {
            let tx = x as i64 + dx as i64;
            let ty = y as i64 + dy as i64;
            if tx < 0 || ty < 0 || tx >= width as i64 || ty >= height as i64 {
                return None;
            }
            Some((tx as usize, ty as usize, weight as f32 / divisor))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_floyd_steinberg_full_propagation() {
        let sum: u8 = FLOYD_STEINBERG.entries.iter().map(|(_, _, w)| w).sum();
        assert_eq!(sum, 16);
        assert_eq!(FLOYD_STEINBERG.propagation(), 1.0);
    }

    #[test]
    fn test_atkinson_propagation_75_percent() {
        let sum: u8 = ATKINSON.entries.iter().map(|(_, _, w)| w).sum();
        assert_eq!(sum, 6, "Atkinson should have 6 weight units");
        assert_eq!(ATKINSON.divisor, 8);
        assert!((ATKINSON.propagation() - 0.75).abs() < f32::EPSILON);
    }

    #[test]
    fn test_targets_are_unvisited() {
        for kernel in [FLOYD_STEINBERG, ATKINSON] {
            for &(dx, dy, _) in kernel.entries {
                assert!(dy > 0 || (dy == 0 && dx > 0), "({dx}, {dy}) already visited");
            }
        }
    }

    #[test]
    fn test_targets_interior_sum_to_propagation() {
        let share: f32 = FLOYD_STEINBERG.targets(5, 5, 10, 10).map(|(_, _, f)| f).sum();
        assert!((share - 1.0).abs() < 1e-6);

        let share: f32 = ATKINSON.targets(5, 5, 10, 10).map(|(_, _, f)| f).sum();
        assert!((share - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_targets_clipped_at_edges() {
        // Bottom-right corner: nothing to the right, nothing below.
        assert_eq!(FLOYD_STEINBERG.targets(9, 9, 10, 10).count(), 0);

        // Left edge: bottom-left neighbor dropped, 13/16 remains.
        let share: f32 = FLOYD_STEINBERG.targets(0, 0, 10, 10).map(|(_, _, f)| f).sum();
        assert!((share - 13.0 / 16.0).abs() < 1e-6);

        // Last row: only the right-hand neighbors survive.
        let targets: Vec<_> = ATKINSON.targets(3, 9, 10, 10).collect();
        assert_eq!(targets.len(), 2);
        assert!(targets.iter().all(|&(_, ty, _)| ty == 9));
    }
}
