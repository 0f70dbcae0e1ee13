//! Distance-weighted spatial damping
//!
//! Every cell is damped by `1 - (1 - decay_factor) · d`, where `d` is the
//! Euclidean distance to the nearest slit normalized by the largest such
//! distance in the grid. Cells next to an emitter keep their energy, cells far
//! away lose up to `1 - decay_factor` per step.
//!
//! The distance map depends only on slit positions, which never change after
//! construction, so it is rebuilt on construction and reset only. The decay
//! factor is read live at step time.

use crate::core_types::Vec2;
use crate::grid::{GridGeometry, ScalarField};
use rayon::prelude::*;

/// Per-cell normalized distance to the nearest slit, in `[0, 1]`
#[derive(Debug, Clone)]
pub struct DistanceMap {
    normalized: ScalarField,
}

impl DistanceMap {
    /// Build the map for the given slit positions
    ///
    /// With no slits every cell is treated as maximally far (1.0), so damping
    /// is uniform at `decay_factor`.
    pub fn build(geometry: &GridGeometry, slit_positions: &[Vec2]) -> Self {
        let n = geometry.resolution();
        if slit_positions.is_empty() {
            return Self {
                normalized: ScalarField::with_value(n, n, 1.0),
            };
        }

        let mut normalized = ScalarField::new(n, n);
        normalized
            .as_mut_slice()
            .par_chunks_mut(n)
            .enumerate()
            .for_each(|(y, row)| {
                let cell_y = geometry.y_at(y);
                for (x, cell) in row.iter_mut().enumerate() {
                    let cell_x = geometry.x_at(x);
                    *cell = slit_positions
                        .iter()
                        .map(|p| ((cell_x - p.x).powi(2) + (cell_y - p.y).powi(2)).sqrt())
                        .fold(f32::INFINITY, f32::min);
                }
            });

        let max = normalized.as_slice().iter().copied().fold(0.0_f32, f32::max);
        if max > 0.0 && max.is_finite() {
            normalized
                .as_mut_slice()
                .par_iter_mut()
                .for_each(|d| *d /= max);
        } else {
            normalized.fill(0.0);
        }

        Self { normalized }
    }

    pub fn value(&self, x: usize, y: usize) -> f32 {
        self.normalized.get(x, y)
    }

    pub fn as_slice(&self) -> &[f32] {
        self.normalized.as_slice()
    }

    pub fn as_field(&self) -> &ScalarField {
        &self.normalized
    }
}

/// Spatially varying per-step damping keyed on distance to the nearest slit
#[derive(Debug, Clone)]
pub struct DecayProfile {
    distance: DistanceMap,
}

impl DecayProfile {
    pub fn new(geometry: &GridGeometry, slit_positions: &[Vec2]) -> Self {
        Self {
            distance: DistanceMap::build(geometry, slit_positions),
        }
    }

    /// Damping multiplier for a normalized distance
    #[inline]
    pub fn factor(decay_factor: f32, normalized_distance: f32) -> f32 {
        1.0 - (1.0 - decay_factor) * normalized_distance
    }

    /// Damping multiplier at cell `(x, y)`
    pub fn factor_at(&self, x: usize, y: usize, decay_factor: f32) -> f32 {
        Self::factor(decay_factor, self.distance.value(x, y))
    }

    pub fn distance_map(&self) -> &DistanceMap {
        &self.distance
    }

    /// Materialize the full profile for inspection or rendering
    pub fn to_field(&self, decay_factor: f32) -> ScalarField {
        let field = self.distance.as_field();
        let mut out = ScalarField::new(field.width(), field.height());
        for (dst, &d) in out.as_mut_slice().iter_mut().zip(field.as_slice()) {
            *dst = Self::factor(decay_factor, d);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_distance_normalized() {
        let geom = GridGeometry::new(10.0, 10.0, 11);
        let map = DistanceMap::build(&geom, &[Vec2::new(0.0, 0.0)]);
        assert_eq!(map.value(0, 0), 0.0);
        assert_abs_diff_eq!(map.value(10, 10), 1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(map.value(5, 5), 0.5, epsilon = 1e-6);
        assert!(map.as_slice().iter().all(|&d| (0.0..=1.0).contains(&d)));
    }

    #[test]
    fn test_nearest_slit_wins() {
        let geom = GridGeometry::new(10.0, 10.0, 11);
        let map = DistanceMap::build(&geom, &[Vec2::new(0.0, 5.0), Vec2::new(10.0, 5.0)]);
        assert_eq!(map.value(0, 5), 0.0);
        assert_eq!(map.value(10, 5), 0.0);
        assert_abs_diff_eq!(map.value(2, 5), map.value(8, 5), epsilon = 1e-6);
    }

    #[test]
    fn test_no_slits_is_uniform() {
        let geom = GridGeometry::new(10.0, 10.0, 11);
        let profile = DecayProfile::new(&geom, &[]);
        let field = profile.to_field(0.99);
        assert!(field.as_slice().iter().all(|&f| (f - 0.99).abs() < 1e-6));
    }

    #[test]
    fn test_factor_range() {
        let geom = GridGeometry::new(10.0, 10.0, 11);
        let profile = DecayProfile::new(&geom, &[Vec2::new(0.0, 0.0)]);
        assert_eq!(profile.factor_at(0, 0, 0.9), 1.0);
        assert_abs_diff_eq!(profile.factor_at(10, 10, 0.9), 0.9, epsilon = 1e-6);
        let field = profile.to_field(0.9);
        assert!(field.as_slice().iter().all(|&f| (0.9 - 1e-6..=1.0).contains(&f)));
    }

    #[test]
    fn test_lower_decay_factor_damps_more() {
        let geom = GridGeometry::new(10.0, 10.0, 11);
        let profile = DecayProfile::new(&geom, &[Vec2::new(0.0, 5.0)]);
        for y in 1..10 {
            for x in 1..10 {
                assert!(profile.factor_at(x, y, 0.95) < profile.factor_at(x, y, 0.999));
            }
        }
    }
}
