//! Time integration of the damped wave equation
//!
//! This module holds the numerical pieces the wave field composes each step:
//! - [`WaveParams`]: depth-dependent wave speed and CFL-bounded time step
//! - [`DecayProfile`]: distance-weighted spatial damping
//! - [`step_leapfrog_cpu`]: the explicit FDTD kernel, parallel over rows
//! - [`apply_edge_taper`]: the absorbing-boundary ramp

pub mod absorbing;
pub mod decay;
pub mod leapfrog;
pub mod params;

// Re-exports
pub use absorbing::{apply_edge_taper, taper_factor, ABSORBING_EDGE_CELLS};
pub use decay::{DecayProfile, DistanceMap};
pub use leapfrog::{step_leapfrog_cpu, LeapfrogParams, StepInputs};
pub use params::{WaveParams, CFL_FACTOR, WAVE_SPEED_COEFFICIENT};
