use std::ffi::CStr;
use std::os::raw::c_char;
use wave_tank_core::{InterferencePoint, Obstacle, SlitId, Vec2, WavePacket};

use crate::error::{DefaultFfiError, WaveTankErrorCode};
use crate::helpers::{handle_ffi_result, instance_from_ptr, with_sim_mut};
use crate::instance::{WaveTankBoundary, WaveTankInstance, WaveTankSlit};

/// Advance the simulation by `dt` worth of stable integration steps.
///
/// Runs `max(1, floor(dt / step))` steps; the number taken is written to
/// `out_steps` when it is non-null. Thread-safe: takes the write lock.
///
/// # Safety
/// - `ptr` must be null or a live pointer returned by `wave_tank_new`.
/// - `out_steps` must be null or valid for writes.
#[no_mangle]
pub unsafe extern "C" fn wave_tank_step(
    ptr: *const WaveTankInstance,
    dt: f32,
    out_steps: *mut usize,
) -> WaveTankErrorCode {
    handle_ffi_result(|| {
        let instance = instance_from_ptr(ptr)?;
        let steps = with_sim_mut(instance, |sim| sim.step(dt))?;
        // SAFETY: caller guarantees `out_steps` is null or writable.
        if let Some(out) = unsafe { out_steps.as_mut() } {
            *out = steps;
        }
        Ok(())
    })
}

/// Zero the field and clock, drop packets, points and the standing wave.
///
/// Obstacles and slits are kept.
///
/// # Safety
/// `ptr` must be null or a live pointer returned by `wave_tank_new`.
#[no_mangle]
pub unsafe extern "C" fn wave_tank_reset(ptr: *const WaveTankInstance) -> WaveTankErrorCode {
    handle_ffi_result(|| {
        let instance = instance_from_ptr(ptr)?;
        with_sim_mut(instance, wave_tank_core::Simulation::reset)
    })
}

/// Set the rate at which simulation time advances per integration step.
///
/// # Safety
/// `ptr` must be null or a live pointer returned by `wave_tank_new`.
#[no_mangle]
pub unsafe extern "C" fn wave_tank_set_time_scale(
    ptr: *const WaveTankInstance,
    time_scale: f32,
) -> WaveTankErrorCode {
    handle_ffi_result(|| {
        if !time_scale.is_finite() {
            return Err(DefaultFfiError::invalid_parameter(format!(
                "Time scale must be finite, got {time_scale}"
            )));
        }
        let instance = instance_from_ptr(ptr)?;
        with_sim_mut(instance, |sim| sim.set_time_scale(time_scale))
    })
}

/// Select the wall behaviour by name: `reflective`, `absorbing` or `open`.
///
/// Any other name fails with `WaveTankErrorCode::InvalidBoundaryType` and
/// leaves the current boundary type in place.
///
/// # Safety
/// - `ptr` must be null or a live pointer returned by `wave_tank_new`.
/// - `name` must be null or a valid null-terminated C string.
#[no_mangle]
pub unsafe extern "C" fn wave_tank_set_boundary_type(
    ptr: *const WaveTankInstance,
    name: *const c_char,
) -> WaveTankErrorCode {
    handle_ffi_result(|| {
        let instance = instance_from_ptr(ptr)?;
        if name.is_null() {
            return Err(DefaultFfiError::null_pointer("name"));
        }
        // SAFETY: checked non-null; caller guarantees null termination.
        let name = unsafe { CStr::from_ptr(name) }.to_string_lossy();
        with_sim_mut(instance, |sim| sim.field_mut().set_boundary_type_name(&name))??;
        Ok(())
    })
}

/// Select the wall behaviour from the C enum.
///
/// # Safety
/// `ptr` must be null or a live pointer returned by `wave_tank_new`.
#[no_mangle]
pub unsafe extern "C" fn wave_tank_set_boundary(
    ptr: *const WaveTankInstance,
    boundary: WaveTankBoundary,
) -> WaveTankErrorCode {
    handle_ffi_result(|| {
        let instance = instance_from_ptr(ptr)?;
        with_sim_mut(instance, |sim| sim.field_mut().set_boundary_type(boundary.into()))
    })
}

/// Change the water depth; wave speed and time step are rescaled together.
///
/// # Safety
/// `ptr` must be null or a live pointer returned by `wave_tank_new`.
#[no_mangle]
pub unsafe extern "C" fn wave_tank_set_depth(
    ptr: *const WaveTankInstance,
    depth: f32,
) -> WaveTankErrorCode {
    handle_ffi_result(|| {
        let instance = instance_from_ptr(ptr)?;
        with_sim_mut(instance, |sim| sim.field_mut().set_depth(depth))??;
        Ok(())
    })
}

/// Set the global damping parameter.
///
/// # Safety
/// `ptr` must be null or a live pointer returned by `wave_tank_new`.
#[no_mangle]
pub unsafe extern "C" fn wave_tank_set_decay_factor(
    ptr: *const WaveTankInstance,
    decay_factor: f32,
) -> WaveTankErrorCode {
    handle_ffi_result(|| {
        let instance = instance_from_ptr(ptr)?;
        with_sim_mut(instance, |sim| sim.field_mut().set_decay_factor(decay_factor))
    })
}

/// Set the standing-wave harmonic; a negative `mode` disables the overlay.
///
/// # Safety
/// `ptr` must be null or a live pointer returned by `wave_tank_new`.
#[no_mangle]
pub unsafe extern "C" fn wave_tank_set_standing_wave_mode(
    ptr: *const WaveTankInstance,
    mode: i32,
) -> WaveTankErrorCode {
    handle_ffi_result(|| {
        let instance = instance_from_ptr(ptr)?;
        let mode = u32::try_from(mode).ok();
        with_sim_mut(instance, |sim| sim.field_mut().set_standing_wave_mode(mode))
    })
}

/// Add a circular obstacle centred at (`x`, `y`).
///
/// # Safety
/// `ptr` must be null or a live pointer returned by `wave_tank_new`.
#[no_mangle]
pub unsafe extern "C" fn wave_tank_add_obstacle(
    ptr: *const WaveTankInstance,
    x: f32,
    y: f32,
    radius: f32,
) -> WaveTankErrorCode {
    handle_ffi_result(|| {
        let instance = instance_from_ptr(ptr)?;
        let obstacle = Obstacle::new(Vec2::new(x, y), radius);
        with_sim_mut(instance, |sim| sim.field_mut().add_obstacle(obstacle))
    })
}

/// Add a travelling wave packet.
///
/// # Arguments
/// * `x`, `y` - Packet centre
/// * `amplitude`, `frequency`, `wavelength` - Carrier sinusoid
/// * `width` - Gaussian envelope width and half-size of the injection box
/// * `dir_x`, `dir_y` - Propagation direction
///
/// # Safety
/// `ptr` must be null or a live pointer returned by `wave_tank_new`.
#[no_mangle]
#[allow(clippy::too_many_arguments)]
pub unsafe extern "C" fn wave_tank_add_wave_packet(
    ptr: *const WaveTankInstance,
    x: f32,
    y: f32,
    amplitude: f32,
    frequency: f32,
    wavelength: f32,
    width: f32,
    dir_x: f32,
    dir_y: f32,
) -> WaveTankErrorCode {
    handle_ffi_result(|| {
        let instance = instance_from_ptr(ptr)?;
        let packet = WavePacket::new(
            Vec2::new(x, y),
            amplitude,
            frequency,
            wavelength,
            width,
            Vec2::new(dir_x, dir_y),
        );
        with_sim_mut(instance, |sim| sim.field_mut().add_wave_packet(packet))
    })
}

/// Add a stationary point oscillator at (`x`, `y`).
///
/// # Safety
/// `ptr` must be null or a live pointer returned by `wave_tank_new`.
#[no_mangle]
pub unsafe extern "C" fn wave_tank_add_interference_point(
    ptr: *const WaveTankInstance,
    x: f32,
    y: f32,
    amplitude: f32,
    frequency: f32,
) -> WaveTankErrorCode {
    handle_ffi_result(|| {
        let instance = instance_from_ptr(ptr)?;
        let point = InterferencePoint::new(Vec2::new(x, y), amplitude, frequency);
        with_sim_mut(instance, |sim| sim.field_mut().add_interference_point(point))
    })
}

/// Retarget slit `index` (construction order). The slit position in
/// `params` is ignored; slits never move.
///
/// # Safety
/// - `ptr` must be null or a live pointer returned by `wave_tank_new`.
/// - `params` must be null or point to a readable `WaveTankSlit`.
#[no_mangle]
pub unsafe extern "C" fn wave_tank_update_slit(
    ptr: *const WaveTankInstance,
    index: usize,
    params: *const WaveTankSlit,
) -> WaveTankErrorCode {
    handle_ffi_result(|| {
        let instance = instance_from_ptr(ptr)?;
        // SAFETY: caller guarantees `params` is null or readable.
        let params = unsafe { params.as_ref() }
            .ok_or_else(|| DefaultFfiError::null_pointer("params"))?
            .params();
        with_sim_mut(instance, |sim| sim.field_mut().update_slit(SlitId(index), params))??;
        Ok(())
    })
}
