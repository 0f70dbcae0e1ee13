use std::ptr;
use std::sync::RwLock;
use tracing::info;
use wave_tank_core::{
    BoundaryType, Simulation, Slit, SlitParams, TankConfig, Vec2, WaveField,
};

use crate::error::{DefaultFfiError, WaveTankErrorCode};
use crate::helpers::{handle_ffi_result, track_error};

/// Boundary behaviour of the tank walls.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaveTankBoundary {
    /// Walls and obstacles reflect.
    Reflective = 0,
    /// Walls absorb through a 10-cell edge taper; obstacles still reflect.
    Absorbing = 1,
    /// No clipping and no taper.
    Open = 2,
}

impl From<WaveTankBoundary> for BoundaryType {
    fn from(boundary: WaveTankBoundary) -> Self {
        match boundary {
            WaveTankBoundary::Reflective => Self::Reflective,
            WaveTankBoundary::Absorbing => Self::Absorbing,
            WaveTankBoundary::Open => Self::Open,
        }
    }
}

impl From<BoundaryType> for WaveTankBoundary {
    fn from(boundary: BoundaryType) -> Self {
        match boundary {
            BoundaryType::Reflective => Self::Reflective,
            BoundaryType::Absorbing => Self::Absorbing,
            BoundaryType::Open => Self::Open,
        }
    }
}

/// C-compatible tank construction parameters.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct WaveTankConfig {
    /// Domain width.
    pub width: f32,
    /// Domain height.
    pub height: f32,
    /// Sample points per axis (at least 3).
    pub resolution: usize,
    /// Water depth; wave speed is `10 * sqrt(depth)`.
    pub depth: f32,
    /// Global damping parameter, intended range 0.9-1.0.
    pub decay_factor: f32,
    pub boundary_type: WaveTankBoundary,
}

impl From<WaveTankConfig> for TankConfig {
    fn from(config: WaveTankConfig) -> Self {
        Self {
            width: config.width,
            height: config.height,
            resolution: config.resolution,
            depth: config.depth,
            decay_factor: config.decay_factor,
            boundary_type: config.boundary_type.into(),
        }
    }
}

/// C-compatible slit description.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct WaveTankSlit {
    /// Mount position x; 0 or `width` for the left/right walls.
    pub x: f32,
    /// Mount position y; 0 or `height` for the bottom/top walls.
    pub y: f32,
    /// Opening width along the wall.
    pub width: f32,
    pub amplitude: f32,
    pub frequency: f32,
    pub wavelength: f32,
}

impl WaveTankSlit {
    pub(crate) fn params(&self) -> SlitParams {
        SlitParams {
            width: self.width,
            amplitude: self.amplitude,
            frequency: self.frequency,
            wavelength: self.wavelength,
        }
    }
}

impl From<&WaveTankSlit> for Slit {
    fn from(slit: &WaveTankSlit) -> Self {
        Slit::with_params(Vec2::new(slit.x, slit.y), slit.params())
    }
}

/// The wave tank context handed across the FFI boundary.
///
/// # Thread Safety
/// The simulation is protected by an `RwLock`: queries take the read lock,
/// stepping and mutators take the write lock. One instance may be shared
/// between a render thread and a thread that steps it.
pub struct WaveTankInstance {
    pub(crate) sim: RwLock<Simulation>,
}

impl WaveTankInstance {
    /// Builds a simulation from C-side configuration.
    ///
    /// # Errors
    ///
    /// Returns `WaveTankErrorCode::InvalidParameter` if the configuration or
    /// any slit's parameters are invalid.
    pub(crate) fn new(
        config: WaveTankConfig,
        slits: &[WaveTankSlit],
    ) -> Result<Box<Self>, DefaultFfiError> {
        for slit in slits {
            slit.params().validate()?;
        }
        let slits = slits.iter().map(Slit::from).collect();
        let field = WaveField::from_config(&config.into(), slits)?;
        info!("Created wave tank instance");

        Ok(Box::new(Self {
            sim: RwLock::new(Simulation::new(field)),
        }))
    }
}

/// Create a new wave tank and return it via out-parameter.
///
/// Returns
/// - `WaveTankErrorCode::Ok` (0): success, `out_instance` contains a valid pointer
/// - `WaveTankErrorCode::NullPointer`: `out_instance` is null, or `slits` is null while `slit_count > 0`
/// - `WaveTankErrorCode::InvalidParameter`: invalid dimensions, resolution, depth or slit parameters
///
/// On failure `out_instance` is set to null; call `wave_tank_get_last_error()`
/// for a description.
///
/// # Safety
///
/// - `out_instance` must be a valid pointer to writable memory.
/// - `slits` must point to `slit_count` readable `WaveTankSlit` values (it may be
///   null when `slit_count` is 0). The slits are copied.
/// - The caller owns the returned instance and MUST call `wave_tank_destroy`
///   exactly once.
///
/// Example (C++)
/// ```cpp
/// WaveTankSlit slit = {0.0f, 10.0f, 0.5f, 10.0f, 1.0f, 2.0f};
/// WaveTankConfig config = {20.0f, 20.0f, 200, 1.0f, 0.999f, WaveTankBoundary::Reflective};
/// WaveTankInstance* tank = nullptr;
/// if (wave_tank_new(config, &slit, 1, &tank) != WaveTankErrorCode::Ok) {
///     fprintf(stderr, "%s\n", wave_tank_get_last_error());
///     return;
/// }
/// // ... use tank ...
/// wave_tank_destroy(tank);
/// ```
#[no_mangle]
pub unsafe extern "C" fn wave_tank_new(
    config: WaveTankConfig,
    slits: *const WaveTankSlit,
    slit_count: usize,
    out_instance: *mut *mut WaveTankInstance,
) -> WaveTankErrorCode {
    if out_instance.is_null() {
        return track_error(&DefaultFfiError::null_pointer("out_instance"));
    }

    let slits: &[WaveTankSlit] = if slit_count == 0 {
        &[]
    } else if slits.is_null() {
        unsafe {
            *out_instance = ptr::null_mut();
        }
        return track_error(&DefaultFfiError::null_pointer("slits"));
    } else {
        // SAFETY: caller guarantees `slits` points to `slit_count` values.
        unsafe { std::slice::from_raw_parts(slits, slit_count) }
    };

    let mut created = None;
    let code = handle_ffi_result(|| {
        created = Some(WaveTankInstance::new(config, slits)?);
        Ok(())
    });

    unsafe {
        *out_instance = created.map_or(ptr::null_mut(), Box::into_raw);
    }
    code
}

/// Destroys a wave tank previously created by `wave_tank_new`.
///
/// If `ptr` is null, this function is a no-op.
///
/// # Safety
/// - The pointer MUST have been created by `wave_tank_new` and not freed already.
/// - After this call the pointer must not be used again.
#[no_mangle]
pub unsafe extern "C" fn wave_tank_destroy(ptr: *mut WaveTankInstance) {
    if ptr.is_null() {
        return;
    }

    // SAFETY: `ptr` came from `Box::into_raw` in `wave_tank_new` and is still live.
    unsafe {
        drop(Box::from_raw(ptr));
    }
}
