use crate::error::{with_last_error_mut, DefaultFfiError, FfiError, WaveTankErrorCode};
use crate::instance::WaveTankInstance;
use std::ffi::CString;
use wave_tank_core::Simulation;

/// Set the thread-local error message and code.
pub(crate) fn set_last_error(error: &impl FfiError) {
    with_last_error_mut(|(cstring, code)| {
        *cstring = CString::new(error.msg()).ok();
        *code = error.code();
    });
}

/// Track an error by setting it in thread-local storage and returning its code.
#[inline]
pub(crate) fn track_error(error: &impl FfiError) -> WaveTankErrorCode {
    set_last_error(error);
    error.code()
}

/// Clear the thread-local error message and code.
pub(crate) fn clear_last_error() {
    with_last_error_mut(|(cstring, code)| {
        *cstring = None;
        *code = WaveTankErrorCode::Ok;
    });
}

/// Run an FFI body, recording its error or clearing the previous one.
pub(crate) fn handle_ffi_result<F>(body: F) -> WaveTankErrorCode
where
    F: FnOnce() -> Result<(), DefaultFfiError>,
{
    match body() {
        Ok(()) => {
            clear_last_error();
            WaveTankErrorCode::Ok
        }
        Err(error) => track_error(&error),
    }
}

/// Borrow an instance from a raw pointer, rejecting null.
pub(crate) fn instance_from_ptr<'a>(
    ptr: *const WaveTankInstance,
) -> Result<&'a WaveTankInstance, DefaultFfiError> {
    // SAFETY: callers guarantee `ptr` came from `wave_tank_new` and is live;
    // null is checked here.
    unsafe { ptr.as_ref() }.ok_or_else(|| DefaultFfiError::null_pointer("ptr"))
}

/// Run `func` under the instance's read lock.
pub(crate) fn with_sim<F, T>(instance: &WaveTankInstance, func: F) -> Result<T, DefaultFfiError>
where
    F: FnOnce(&Simulation) -> T,
{
    let sim = instance
        .sim
        .read()
        .map_err(|_| DefaultFfiError::lock_poisoned("RwLock"))?;
    Ok(func(&sim))
}

/// Run `func` under the instance's write lock.
pub(crate) fn with_sim_mut<F, T>(instance: &WaveTankInstance, func: F) -> Result<T, DefaultFfiError>
where
    F: FnOnce(&mut Simulation) -> T,
{
    let mut sim = instance
        .sim
        .write()
        .map_err(|_| DefaultFfiError::lock_poisoned("RwLock"))?;
    Ok(func(&mut sim))
}
