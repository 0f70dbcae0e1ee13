//! C ABI for the wave tank engine.
//!
//! Every entry point returns a `WaveTankErrorCode` (0 = success) and records a
//! per-thread message readable through `wave_tank_get_last_error()`. Results
//! are written through out-pointers.

mod error;
mod helpers;
mod instance;
mod queries;
mod simulation;

pub use error::{wave_tank_get_last_error, wave_tank_get_last_error_code, WaveTankErrorCode};
pub use instance::{
    wave_tank_destroy, wave_tank_new, WaveTankBoundary, WaveTankConfig, WaveTankInstance,
    WaveTankSlit,
};
pub use queries::{
    wave_tank_copy_field, wave_tank_get_boundary, wave_tank_get_dimensions, wave_tank_get_slit,
    wave_tank_get_slit_count, wave_tank_get_stats, WaveTankDimensions, WaveTankStats,
};
pub use simulation::{
    wave_tank_add_interference_point, wave_tank_add_obstacle, wave_tank_add_wave_packet,
    wave_tank_reset, wave_tank_set_boundary, wave_tank_set_boundary_type,
    wave_tank_set_decay_factor, wave_tank_set_depth, wave_tank_set_standing_wave_mode,
    wave_tank_set_time_scale, wave_tank_step, wave_tank_update_slit,
};
