//! Explicit leapfrog update of the damped 2D wave equation
//!
//! Interior cells advance by
//! ```text
//! u_next = 2u - u_prev + c²·dt²·∇²u
//! ```
//! with the standard 5-point Laplacian, then get multiplied by the decay
//! profile and by the boundary clip for the active boundary type. The
//! outermost ring is copied through unchanged; it is only ever written by
//! source injection and the absorbing taper.

use crate::core_types::BoundaryType;
use crate::solver::decay::DecayProfile;
use rayon::prelude::*;

/// Scalar parameters for one leapfrog step
#[derive(Debug, Clone, Copy)]
pub struct LeapfrogParams {
    /// `c² · dt²`
    pub c2_dt2: f32,
    /// `1 / dx²`
    pub inv_dx2: f32,
    /// `1 / dy²`
    pub inv_dy2: f32,
    /// Global damping parameter, read live every step
    pub decay_factor: f32,
    pub boundary: BoundaryType,
}

impl LeapfrogParams {
    pub fn new(
        c2_dt2: f32,
        dx: f32,
        dy: f32,
        decay_factor: f32,
        boundary: BoundaryType,
    ) -> Self {
        Self {
            c2_dt2,
            inv_dx2: 1.0 / (dx * dx),
            inv_dy2: 1.0 / (dy * dy),
            decay_factor,
            boundary,
        }
    }
}

/// Read-only per-cell inputs of one step, all `n x n` row-major
#[derive(Debug, Clone, Copy)]
pub struct StepInputs<'a> {
    pub u: &'a [f32],
    pub u_prev: &'a [f32],
    /// Boundary mask: 1 open, 0 blocked
    pub mask: &'a [f32],
    /// Normalized distance to the nearest slit
    pub distance: &'a [f32],
}

/// Boundary clip multiplier for interior cell `(x, y)`
///
/// Absorbing mode ignores the mask on the first interior ring so the tank
/// wall never clips there; obstacles elsewhere still reflect.
#[inline]
fn clip_factor(boundary: BoundaryType, mask: f32, x: usize, y: usize, n: usize) -> f32 {
    match boundary {
        BoundaryType::Reflective => mask,
        BoundaryType::Absorbing if x == 1 || y == 1 || x == n - 2 || y == n - 2 => 1.0,
        BoundaryType::Absorbing => mask,
        BoundaryType::Open => 1.0,
    }
}

/// CPU implementation of the leapfrog step
///
/// Writes the complete next snapshot into `out`: interior cells get the
/// damped, clipped update, wall cells are copied from `inputs.u`.
///
/// # Arguments
///
/// * `inputs` - Current/previous field, mask and distance map
/// * `out` - Output field, same length as the inputs
/// * `n` - Cells per axis
/// * `params` - Step coefficients
pub fn step_leapfrog_cpu(
    inputs: StepInputs<'_>,
    out: &mut [f32],
    n: usize,
    params: LeapfrogParams,
) {
    let StepInputs {
        u,
        u_prev,
        mask,
        distance,
    } = inputs;

    out.par_chunks_mut(n).enumerate().for_each(|(y, row)| {
        let base = y * n;
        if y == 0 || y == n - 1 {
            row.copy_from_slice(&u[base..base + n]);
            return;
        }
        row[0] = u[base];
        row[n - 1] = u[base + n - 1];

        for x in 1..n - 1 {
            let idx = base + x;
            let center = u[idx];
            let laplacian = (u[idx + 1] + u[idx - 1] - 2.0 * center) * params.inv_dx2
                + (u[idx + n] + u[idx - n] - 2.0 * center) * params.inv_dy2;

            let next = 2.0 * center - u_prev[idx] + params.c2_dt2 * laplacian;
            let decay = DecayProfile::factor(params.decay_factor, distance[idx]);
            row[x] = next * decay * clip_factor(params.boundary, mask[idx], x, y, n);
        }
    });
}
