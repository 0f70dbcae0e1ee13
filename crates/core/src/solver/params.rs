//! Wave speed and CFL-bounded time step

use crate::core_types::{Result, WaveTankError};

/// Wave speed is `WAVE_SPEED_COEFFICIENT · sqrt(depth)`
pub const WAVE_SPEED_COEFFICIENT: f32 = 10.0;

/// Courant number used for the step: `dt = CFL_FACTOR · min(dx, dy) / c`
pub const CFL_FACTOR: f32 = 0.05;

/// Depth-dependent integration parameters
///
/// Wave speed and time step always change together; there is no way to set
/// one without recomputing the other.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveParams {
    depth: f32,
    wave_speed: f32,
    dt: f32,
    min_spacing: f32,
}

impl WaveParams {
    /// Parameters for `depth` on a grid with spacings `dx`, `dy`
    ///
    /// # Errors
    ///
    /// Returns `WaveTankError::InvalidParameter` if `depth` is not finite and
    /// positive.
    pub fn new(depth: f32, dx: f32, dy: f32) -> Result<Self> {
        let mut params = Self {
            depth: 0.0,
            wave_speed: 0.0,
            dt: 0.0,
            min_spacing: dx.min(dy),
        };
        params.set_depth(depth)?;
        Ok(params)
    }

    /// Wave speed for a depth
    pub fn wave_speed_for(depth: f32) -> f32 {
        WAVE_SPEED_COEFFICIENT * depth.sqrt()
    }

    /// Rescale wave speed and time step for a new depth
    ///
    /// # Errors
    ///
    /// Returns `WaveTankError::InvalidParameter` if `depth` is not finite and
    /// positive; the parameters are left unchanged.
    pub fn set_depth(&mut self, depth: f32) -> Result<()> {
        let depth = WaveTankError::check_positive("depth", depth)?;
        self.depth = depth;
        self.wave_speed = Self::wave_speed_for(depth);
        self.dt = CFL_FACTOR * self.min_spacing / self.wave_speed;
        Ok(())
    }

    pub fn depth(&self) -> f32 {
        self.depth
    }

    /// Wave speed `c`
    pub fn wave_speed(&self) -> f32 {
        self.wave_speed
    }

    /// Stable integration step
    pub fn dt(&self) -> f32 {
        self.dt
    }

    /// `c² · dt²`, the Laplacian coefficient of the leapfrog update
    pub fn c2_dt2(&self) -> f32 {
        let c_dt = self.wave_speed * self.dt;
        c_dt * c_dt
    }

    /// Courant number `c · dt / min(dx, dy)`
    pub fn courant_number(&self) -> f32 {
        self.wave_speed * self.dt / self.min_spacing
    }

    /// 2D explicit stability: Courant number at most `1/sqrt(2)`
    pub fn is_stable(&self) -> bool {
        self.courant_number() <= std::f32::consts::FRAC_1_SQRT_2
    }
}
