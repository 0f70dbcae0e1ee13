use wave_tank_core::{FieldStats, SlitId};

use crate::error::{DefaultFfiError, WaveTankErrorCode};
use crate::helpers::{handle_ffi_result, instance_from_ptr, with_sim};
use crate::instance::{WaveTankBoundary, WaveTankInstance, WaveTankSlit};

/// Grid and integration parameters of a tank.
/// Keep this layout stable for C/C++/C# consumers.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default)]
pub struct WaveTankDimensions {
    /// Sample points per axis; the field holds `resolution * resolution` values.
    pub resolution: usize,
    pub width: f32,
    pub height: f32,
    pub dx: f32,
    pub dy: f32,
    /// Integration time step.
    pub dt: f32,
    /// Wave speed `10 * sqrt(depth)`.
    pub wave_speed: f32,
}

/// FFI-friendly snapshot of the field statistics and simulation clock.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default)]
pub struct WaveTankStats {
    pub min: f32,
    pub max: f32,
    pub max_abs: f32,
    pub mean_abs: f32,
    /// Sum of squared field values.
    pub energy: f64,
    pub nonzero_cells: usize,
    /// Simulation time.
    pub time: f64,
}

impl WaveTankStats {
    fn new(stats: FieldStats, time: f64) -> Self {
        Self {
            min: stats.min,
            max: stats.max,
            max_abs: stats.max_abs,
            mean_abs: stats.mean_abs,
            energy: stats.energy,
            nonzero_cells: stats.nonzero_cells,
            time,
        }
    }
}

/// Write `value` through a caller-provided out-pointer.
fn write_out<T>(out: *mut T, name: &str, value: T) -> Result<(), DefaultFfiError> {
    // SAFETY: callers of the public entry points guarantee `out` is null or writable.
    let slot = unsafe { out.as_mut() }.ok_or_else(|| DefaultFfiError::null_pointer(name))?;
    *slot = value;
    Ok(())
}

/// Query grid size, spacing, time step and wave speed.
///
/// # Safety
/// - `ptr` must be null or a live pointer returned by `wave_tank_new`.
/// - `out_dimensions` must be valid for writes.
#[no_mangle]
pub unsafe extern "C" fn wave_tank_get_dimensions(
    ptr: *const WaveTankInstance,
    out_dimensions: *mut WaveTankDimensions,
) -> WaveTankErrorCode {
    handle_ffi_result(|| {
        let instance = instance_from_ptr(ptr)?;
        let dimensions = with_sim(instance, |sim| {
            let field = sim.field();
            let geometry = field.geometry();
            WaveTankDimensions {
                resolution: geometry.resolution(),
                width: geometry.width(),
                height: geometry.height(),
                dx: geometry.dx(),
                dy: geometry.dy(),
                dt: field.dt(),
                wave_speed: field.wave_speed(),
            }
        })?;
        write_out(out_dimensions, "out_dimensions", dimensions)
    })
}

/// Copy the current field (row-major, `y * resolution + x`) into `out`.
///
/// Fails with `WaveTankErrorCode::BufferTooSmall` when `len` is smaller than
/// `resolution * resolution`; nothing is written in that case.
///
/// # Safety
/// - `ptr` must be null or a live pointer returned by `wave_tank_new`.
/// - `out` must be null or valid for `len` consecutive `f32` writes.
#[no_mangle]
pub unsafe extern "C" fn wave_tank_copy_field(
    ptr: *const WaveTankInstance,
    out: *mut f32,
    len: usize,
) -> WaveTankErrorCode {
    handle_ffi_result(|| {
        let instance = instance_from_ptr(ptr)?;
        if out.is_null() {
            return Err(DefaultFfiError::null_pointer("out"));
        }
        with_sim(instance, |sim| {
            let values = sim.field().field().as_slice();
            if len < values.len() {
                return Err(DefaultFfiError::buffer_too_small(values.len(), len));
            }
            // SAFETY: `out` is non-null and the caller guarantees `len >= values.len()` slots.
            let dst = unsafe { std::slice::from_raw_parts_mut(out, values.len()) };
            dst.copy_from_slice(values);
            Ok(())
        })?
    })
}

/// Query field statistics and the simulation clock.
///
/// # Safety
/// - `ptr` must be null or a live pointer returned by `wave_tank_new`.
/// - `out_stats` must be valid for writes.
#[no_mangle]
pub unsafe extern "C" fn wave_tank_get_stats(
    ptr: *const WaveTankInstance,
    out_stats: *mut WaveTankStats,
) -> WaveTankErrorCode {
    handle_ffi_result(|| {
        let instance = instance_from_ptr(ptr)?;
        let stats = with_sim(instance, |sim| WaveTankStats::new(sim.field().stats(), sim.time()))?;
        write_out(out_stats, "out_stats", stats)
    })
}

/// Query the active boundary type.
///
/// # Safety
/// - `ptr` must be null or a live pointer returned by `wave_tank_new`.
/// - `out_boundary` must be valid for writes.
#[no_mangle]
pub unsafe extern "C" fn wave_tank_get_boundary(
    ptr: *const WaveTankInstance,
    out_boundary: *mut WaveTankBoundary,
) -> WaveTankErrorCode {
    handle_ffi_result(|| {
        let instance = instance_from_ptr(ptr)?;
        let boundary =
            with_sim(instance, |sim| WaveTankBoundary::from(sim.field().boundary_type()))?;
        write_out(out_boundary, "out_boundary", boundary)
    })
}

/// Number of slits, for overlay markers.
///
/// # Safety
/// - `ptr` must be null or a live pointer returned by `wave_tank_new`.
/// - `out_count` must be valid for writes.
#[no_mangle]
pub unsafe extern "C" fn wave_tank_get_slit_count(
    ptr: *const WaveTankInstance,
    out_count: *mut usize,
) -> WaveTankErrorCode {
    handle_ffi_result(|| {
        let instance = instance_from_ptr(ptr)?;
        let count = with_sim(instance, |sim| sim.field().slits().len())?;
        write_out(out_count, "out_count", count)
    })
}

/// Read slit `index` (construction order) with its current parameters.
///
/// # Safety
/// - `ptr` must be null or a live pointer returned by `wave_tank_new`.
/// - `out_slit` must be valid for writes.
#[no_mangle]
pub unsafe extern "C" fn wave_tank_get_slit(
    ptr: *const WaveTankInstance,
    index: usize,
    out_slit: *mut WaveTankSlit,
) -> WaveTankErrorCode {
    handle_ffi_result(|| {
        let instance = instance_from_ptr(ptr)?;
        let slit = with_sim(instance, |sim| {
            sim.field().slit(SlitId(index)).map(|slit| {
                let position = slit.position();
                WaveTankSlit {
                    x: position.x,
                    y: position.y,
                    width: slit.width,
                    amplitude: slit.amplitude,
                    frequency: slit.frequency,
                    wavelength: slit.wavelength,
                }
            })
        })?
        .ok_or_else(|| DefaultFfiError::from(wave_tank_core::WaveTankError::UnknownSlit(index)))?;
        write_out(out_slit, "out_slit", slit)
    })
}
