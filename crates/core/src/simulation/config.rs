//! Tank configuration and slit layouts
//!
//! Defaults reproduce the classic setup: a 20 x 20 tank sampled at 200 x 200
//! points, unit depth, decay factor 0.999 and reflective walls.

use crate::core_types::{BoundaryType, Result, Vec2, WaveTankError};
use crate::grid::tank_grid::usize_to_f32;
use crate::sources::{Slit, SlitParams};
use serde::{Deserialize, Serialize};

/// Smallest resolution with at least one interior cell
pub const MIN_RESOLUTION: usize = 3;

/// Construction parameters of a wave tank
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TankConfig {
    /// Domain width
    pub width: f32,
    /// Domain height
    pub height: f32,
    /// Sample points per axis
    pub resolution: usize,
    /// Water depth; wave speed is `10 · sqrt(depth)`
    pub depth: f32,
    /// Global damping parameter, intended range 0.9-1.0
    pub decay_factor: f32,
    pub boundary_type: BoundaryType,
}

impl Default for TankConfig {
    fn default() -> Self {
        Self {
            width: 20.0,
            height: 20.0,
            resolution: 200,
            depth: 1.0,
            decay_factor: 0.999,
            boundary_type: BoundaryType::Reflective,
        }
    }
}

impl TankConfig {
    /// Check the configuration describes a usable tank
    ///
    /// # Errors
    ///
    /// Returns `WaveTankError::InvalidParameter` if width, height or depth is
    /// not finite and positive, if the resolution is below
    /// [`MIN_RESOLUTION`], or if the decay factor is not finite.
    pub fn validate(&self) -> Result<()> {
        WaveTankError::check_positive("width", self.width)?;
        WaveTankError::check_positive("height", self.height)?;
        WaveTankError::check_positive("depth", self.depth)?;
        if self.resolution < MIN_RESOLUTION {
            return Err(WaveTankError::InvalidParameter {
                name: "resolution",
                reason: format!("must be at least {MIN_RESOLUTION}, got {}", self.resolution),
            });
        }
        if !self.decay_factor.is_finite() {
            return Err(WaveTankError::InvalidParameter {
                name: "decay_factor",
                reason: format!("must be finite, got {}", self.decay_factor),
            });
        }
        Ok(())
    }
}

/// Number of evenly spaced slits on each wall
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SlitLayout {
    pub bottom: usize,
    pub top: usize,
    pub left: usize,
    pub right: usize,
}

impl SlitLayout {
    pub fn new(bottom: usize, top: usize, left: usize, right: usize) -> Self {
        Self {
            bottom,
            top,
            left,
            right,
        }
    }

    pub fn total(&self) -> usize {
        self.bottom + self.top + self.left + self.right
    }

    /// Expand the layout into slits on a `width x height` tank
    ///
    /// On a wall with `n` slits the i-th sits at fraction `(i + 1) / (n + 1)`
    /// along the wall. Walls are emitted in the order bottom, top, left,
    /// right, which fixes the [`SlitId`](crate::sources::SlitId) of each slit.
    pub fn slits(&self, width: f32, height: f32, params: SlitParams) -> Vec<Slit> {
        let fraction = |i: usize, n: usize| usize_to_f32(i + 1) / usize_to_f32(n + 1);
        let mut slits = Vec::with_capacity(self.total());

        for i in 0..self.bottom {
            let x = width * fraction(i, self.bottom);
            slits.push(Slit::with_params(Vec2::new(x, 0.0), params));
        }
        for i in 0..self.top {
            let x = width * fraction(i, self.top);
            slits.push(Slit::with_params(Vec2::new(x, height), params));
        }
        for i in 0..self.left {
            let y = height * fraction(i, self.left);
            slits.push(Slit::with_params(Vec2::new(0.0, y), params));
        }
        for i in 0..self.right {
            let y = height * fraction(i, self.right);
            slits.push(Slit::with_params(Vec2::new(width, y), params));
        }
        slits
    }
}
