//! Boundary mask derived from the tank walls and circular obstacles
//!
//! The mask is 1.0 where the wave may propagate and 0.0 where it is blocked.
//! The outermost ring is always 0 (hard tank wall); whether the wall is
//! actually enforced depends on the boundary type at step time. Every cell
//! whose distance to an obstacle center is within that obstacle's radius is 0.

use crate::core_types::Vec2;
use crate::grid::field::ScalarField;
use crate::grid::tank_grid::GridGeometry;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Circular region that blocks propagation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Center in domain units
    pub position: Vec2,
    /// Radius in domain units
    pub radius: f32,
}

impl Obstacle {
    pub fn new(position: Vec2, radius: f32) -> Self {
        Self { position, radius }
    }

    /// True if the point lies inside or on the circle
    #[inline]
    pub fn contains(&self, x: f32, y: f32) -> bool {
        let ox = x - self.position.x;
        let oy = y - self.position.y;
        ox * ox + oy * oy <= self.radius * self.radius
    }
}

/// Per-cell permeability mask
#[derive(Debug, Clone)]
pub struct BoundaryMask {
    mask: ScalarField,
}

impl BoundaryMask {
    /// Build the mask for `grid` with the given obstacles
    ///
    /// Cost is O(N² · obstacles); rebuilt only when obstacles change or on reset.
    pub fn build(grid: &GridGeometry, obstacles: &[Obstacle]) -> Self {
        let n = grid.resolution();
        let mut mask = ScalarField::with_value(n, n, 1.0);

        mask.as_mut_slice()
            .par_chunks_mut(n)
            .enumerate()
            .for_each(|(y, row)| {
                let cell_y = grid.y_at(y);
                for (x, cell) in row.iter_mut().enumerate() {
                    if grid.is_wall(x, y) {
                        *cell = 0.0;
                        continue;
                    }
                    let cell_x = grid.x_at(x);
                    if obstacles.iter().any(|o| o.contains(cell_x, cell_y)) {
                        *cell = 0.0;
                    }
                }
            });

        Self { mask }
    }

    /// Mask value at `(x, y)`: 1.0 open, 0.0 blocked
    pub fn value(&self, x: usize, y: usize) -> f32 {
        self.mask.get(x, y)
    }

    pub fn is_blocked(&self, x: usize, y: usize) -> bool {
        self.value(x, y) == 0.0
    }

    pub fn as_field(&self) -> &ScalarField {
        &self.mask
    }

    pub fn as_slice(&self) -> &[f32] {
        self.mask.as_slice()
    }

    /// Number of blocked cells, wall included
    pub fn blocked_count(&self) -> usize {
        self.mask.as_slice().iter().filter(|&&v| v == 0.0).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wall_ring_blocked() {
        let grid = GridGeometry::new(10.0, 10.0, 11);
        let mask = BoundaryMask::build(&grid, &[]);
        for i in 0..11 {
            assert!(mask.is_blocked(i, 0));
            assert!(mask.is_blocked(i, 10));
            assert!(mask.is_blocked(0, i));
            assert!(mask.is_blocked(10, i));
        }
        assert_eq!(mask.value(5, 5), 1.0);
        // 11x11 grid has 40 wall cells
        assert_eq!(mask.blocked_count(), 40);
    }

    #[test]
    fn test_obstacle_blocks_disc() {
        let grid = GridGeometry::new(10.0, 10.0, 11);
        let obstacle = Obstacle::new(Vec2::new(5.0, 5.0), 1.0);
        let mask = BoundaryMask::build(&grid, &[obstacle]);

        // Center plus the four neighbours at distance exactly 1
        assert!(mask.is_blocked(5, 5));
        assert!(mask.is_blocked(4, 5));
        assert!(mask.is_blocked(6, 5));
        assert!(mask.is_blocked(5, 4));
        assert!(mask.is_blocked(5, 6));
        // Diagonal at distance sqrt(2) stays open
        assert!(!mask.is_blocked(6, 6));
        assert_eq!(mask.blocked_count(), 45);
    }

    #[test]
    fn test_covering_obstacle_blocks_everything() {
        let grid = GridGeometry::new(10.0, 10.0, 11);
        let obstacle = Obstacle::new(Vec2::new(5.0, 5.0), 100.0);
        let mask = BoundaryMask::build(&grid, &[obstacle]);
        assert_eq!(mask.blocked_count(), 121);
    }

    #[test]
    fn test_obstacle_outside_domain_has_no_effect() {
        let grid = GridGeometry::new(10.0, 10.0, 11);
        let obstacle = Obstacle::new(Vec2::new(-50.0, 30.0), 2.0);
        let mask = BoundaryMask::build(&grid, &[obstacle]);
        assert_eq!(mask.blocked_count(), 40);
    }
}
