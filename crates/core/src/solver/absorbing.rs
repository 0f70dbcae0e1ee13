//! Edge taper for absorbing boundaries
//!
//! Over the outermost `ABSORBING_EDGE_CELLS` cells of each side the field is
//! multiplied by a linear ramp from 0 at the wall to 1 at the inner edge of
//! the strip. The four sides are applied independently, so corner cells get
//! the product of both ramps.

use crate::grid::ScalarField;
use crate::grid::tank_grid::usize_to_f32;

/// Width of the absorbing strip in cells
pub const ABSORBING_EDGE_CELLS: usize = 10;

/// Ramp value `k / (ABSORBING_EDGE_CELLS - 1)` for a cell `k` cells from a wall
#[inline]
fn ramp(k: usize) -> f32 {
    usize_to_f32(k) / usize_to_f32(ABSORBING_EDGE_CELLS - 1)
}

/// Combined taper multiplier for index `i` along an axis of length `n`
pub fn taper_factor(i: usize, n: usize) -> f32 {
    let mut factor = 1.0;
    if i < ABSORBING_EDGE_CELLS {
        factor *= ramp(i);
    }
    let from_far_wall = n - 1 - i;
    if from_far_wall < ABSORBING_EDGE_CELLS {
        factor *= ramp(from_far_wall);
    }
    factor
}

/// Apply the taper to the whole field in place
pub fn apply_edge_taper(field: &mut ScalarField) {
    let (width, height) = field.shape();
    let column_factors: Vec<f32> = (0..width).map(|x| taper_factor(x, width)).collect();
    for (y, row) in field.as_mut_slice().chunks_mut(width).enumerate() {
        let row_factor = taper_factor(y, height);
        if row_factor == 1.0 {
            for (cell, &f) in row.iter_mut().zip(&column_factors) {
                *cell *= f;
            }
        } else {
            for (cell, &f) in row.iter_mut().zip(&column_factors) {
                *cell *= row_factor * f;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_ramp_profile() {
        let n = 50;
        assert_eq!(taper_factor(0, n), 0.0);
        assert_abs_diff_eq!(taper_factor(1, n), 1.0 / 9.0, epsilon = 1e-7);
        assert_eq!(taper_factor(9, n), 1.0);
        assert_eq!(taper_factor(25, n), 1.0);
        assert_eq!(taper_factor(40, n), 1.0);
        assert_abs_diff_eq!(taper_factor(48, n), 1.0 / 9.0, epsilon = 1e-7);
        assert_eq!(taper_factor(49, n), 0.0);
    }

    #[test]
    fn test_taper_field() {
        let mut field = ScalarField::with_value(30, 30, 2.0);
        apply_edge_taper(&mut field);

        // Walls are zeroed, the middle is untouched
        for i in 0..30 {
            assert_eq!(field.get(0, i), 0.0);
            assert_eq!(field.get(29, i), 0.0);
            assert_eq!(field.get(i, 0), 0.0);
            assert_eq!(field.get(i, 29), 0.0);
        }
        assert_eq!(field.get(15, 15), 2.0);
        // Corner strip gets both ramps
        assert_abs_diff_eq!(field.get(3, 3), 2.0 * (3.0 / 9.0) * (3.0 / 9.0), epsilon = 1e-6);
        assert_abs_diff_eq!(field.get(3, 15), 2.0 * (3.0 / 9.0), epsilon = 1e-6);
    }
}
