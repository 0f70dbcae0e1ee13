//! Discretized tank domain with the two most recent field snapshots
//!
//! The domain `[0, W] x [0, H]` is sampled at `N x N` points including both
//! end points, so the spacing is `W / (N - 1)` and `H / (N - 1)`. The field
//! snapshots are rotated between steps, never reallocated.

use crate::core_types::Vec2;
use crate::grid::field::ScalarField;

/// Fraction of a cell added before truncating a wall coordinate to an index
pub const EDGE_INDEX_TOLERANCE: f32 = 1e-3;

/// Convert a cell count or index to `f32`
#[inline]
pub(crate) fn usize_to_f32(v: usize) -> f32 {
    v as f32
}

/// Sampling of the physical domain
///
/// Plain `Copy` data so kernels can read coordinates while the field
/// buffers are mutably borrowed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridGeometry {
    width: f32,
    height: f32,
    resolution: usize,
    dx: f32,
    dy: f32,
}

impl GridGeometry {
    /// Sampling of `[0, width] x [0, height]` with `resolution` points per axis
    ///
    /// Callers validate the dimensions; `resolution` must be at least 2.
    pub fn new(width: f32, height: f32, resolution: usize) -> Self {
        let cells = usize_to_f32(resolution - 1);
        Self {
            width,
            height,
            resolution,
            dx: width / cells,
            dy: height / cells,
        }
    }

    /// Physical domain width
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Physical domain height
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Sample points per axis (N)
    pub fn resolution(&self) -> usize {
        self.resolution
    }

    /// Spacing between columns
    pub fn dx(&self) -> f32 {
        self.dx
    }

    /// Spacing between rows
    pub fn dy(&self) -> f32 {
        self.dy
    }

    /// x coordinate of column `i`
    #[inline]
    pub fn x_at(&self, i: usize) -> f32 {
        usize_to_f32(i) * self.dx
    }

    /// y coordinate of row `j`
    #[inline]
    pub fn y_at(&self, j: usize) -> f32 {
        usize_to_f32(j) * self.dy
    }

    /// Nearest grid index along one axis, `None` when it falls outside the grid
    pub fn axis_index(&self, coord: f32, spacing: f32) -> Option<usize> {
        let idx = (coord / spacing).round();
        if idx.is_finite() && idx >= 0.0 && idx <= usize_to_f32(self.resolution - 1) {
            Some(idx as usize)
        } else {
            None
        }
    }

    /// Grid index along one axis truncated toward zero, `None` outside the grid
    ///
    /// A tolerance of [`EDGE_INDEX_TOLERANCE`] cells absorbs f32 rounding, so
    /// a coordinate exactly on the far wall still maps to index `N - 1`.
    pub fn edge_index(&self, coord: f32, spacing: f32) -> Option<usize> {
        let idx = (coord / spacing + EDGE_INDEX_TOLERANCE).trunc();
        if idx.is_finite() && idx >= 0.0 && idx <= usize_to_f32(self.resolution - 1) {
            Some(idx as usize)
        } else {
            None
        }
    }

    /// Nearest grid cell `(x, y)` to a domain position
    pub fn nearest_cell(&self, position: Vec2) -> Option<(usize, usize)> {
        Some((
            self.axis_index(position.x, self.dx)?,
            self.axis_index(position.y, self.dy)?,
        ))
    }

    /// True for cells on the outermost ring (the tank wall)
    #[inline]
    pub fn is_wall(&self, x: usize, y: usize) -> bool {
        let last = self.resolution - 1;
        x == 0 || y == 0 || x == last || y == last
    }
}

/// Discretized tank domain and field storage
#[derive(Debug, Clone)]
pub struct Grid {
    geometry: GridGeometry,
    /// Current field sample
    u: ScalarField,
    /// Snapshot from before the last step
    u_prev: ScalarField,
    /// Receives the next step, then rotates into `u`
    scratch: ScalarField,
}

impl Grid {
    /// Create a zeroed grid over `[0, width] x [0, height]` with
    /// `resolution x resolution` sample points.
    pub fn new(width: f32, height: f32, resolution: usize) -> Self {
        Self {
            geometry: GridGeometry::new(width, height, resolution),
            u: ScalarField::new(resolution, resolution),
            u_prev: ScalarField::new(resolution, resolution),
            scratch: ScalarField::new(resolution, resolution),
        }
    }

    pub fn geometry(&self) -> &GridGeometry {
        &self.geometry
    }

    /// Sample points per axis (N)
    pub fn resolution(&self) -> usize {
        self.geometry.resolution
    }

    /// Current field snapshot
    pub fn current(&self) -> &ScalarField {
        &self.u
    }

    /// Field snapshot from before the most recent step
    pub fn previous(&self) -> &ScalarField {
        &self.u_prev
    }

    /// Field value at cell `(x, y)`
    pub fn value_at(&self, x: usize, y: usize) -> f32 {
        self.u.get(x, y)
    }

    pub(crate) fn current_mut(&mut self) -> &mut ScalarField {
        &mut self.u
    }

    /// Borrow `(u, u_prev, next)` for one integration step
    pub(crate) fn step_buffers(&mut self) -> (&ScalarField, &ScalarField, &mut ScalarField) {
        (&self.u, &self.u_prev, &mut self.scratch)
    }

    /// Rotate snapshots after `next` has been written: the pre-step `u`
    /// becomes `u_prev` and `next` becomes `u`.
    pub(crate) fn commit_step(&mut self) {
        std::mem::swap(&mut self.u_prev, &mut self.u);
        std::mem::swap(&mut self.u, &mut self.scratch);
    }

    /// Zero both snapshots without changing shape
    pub fn reset(&mut self) {
        self.u.fill(0.0);
        self.u_prev.fill(0.0);
        self.scratch.fill(0.0);
    }
}
