use std::cell::RefCell;
use std::ffi::CString;
use std::os::raw::c_char;
use std::ptr;
use wave_tank_core::WaveTankError;

/// Common interface for FFI error types.
///
/// - `code()` - Returns the error code to be passed across FFI boundary
/// - `msg()` - Returns the error message for diagnostic purposes
pub(crate) trait FfiError {
    /// Returns the error code to be returned across the FFI boundary.
    fn code(&self) -> WaveTankErrorCode;

    /// Returns the human-readable error message.
    fn msg(&self) -> &str;
}

/// Default implementation of `FfiError` for common FFI error scenarios.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DefaultFfiError {
    code: WaveTankErrorCode,
    msg: String,
}

impl DefaultFfiError {
    /// Create error for null pointer passed where non-null required.
    ///
    /// # Arguments
    /// * `param_name` - The name of the parameter that was null (e.g., `"out_instance"`, `"ptr"`)
    pub fn null_pointer(param_name: &str) -> Self {
        Self {
            code: WaveTankErrorCode::NullPointer,
            msg: format!("Parameter '{param_name}' cannot be null"),
        }
    }

    /// Create error for poisoned lock.
    pub fn lock_poisoned(lock_name: &str) -> Self {
        Self {
            code: WaveTankErrorCode::LockPoisoned,
            msg: format!("Lock '{lock_name}' was poisoned by a panic in another thread"),
        }
    }

    /// Create error for an out-of-range argument.
    pub fn invalid_parameter(message: String) -> Self {
        Self {
            code: WaveTankErrorCode::InvalidParameter,
            msg: message,
        }
    }

    /// Create error for an output buffer that is too small.
    ///
    /// # Arguments
    /// * `required` - Number of elements the call needs to write
    /// * `provided` - Number of elements the caller supplied
    pub fn buffer_too_small(required: usize, provided: usize) -> Self {
        Self {
            code: WaveTankErrorCode::BufferTooSmall,
            msg: format!("Output buffer holds {provided} values, {required} required"),
        }
    }
}

impl FfiError for DefaultFfiError {
    fn code(&self) -> WaveTankErrorCode {
        self.code
    }

    fn msg(&self) -> &str {
        &self.msg
    }
}

impl From<WaveTankError> for DefaultFfiError {
    fn from(error: WaveTankError) -> Self {
        let code = match error {
            WaveTankError::InvalidBoundaryType(_) => WaveTankErrorCode::InvalidBoundaryType,
            WaveTankError::InvalidParameter { .. } => WaveTankErrorCode::InvalidParameter,
            WaveTankError::UnknownSlit(_) => WaveTankErrorCode::UnknownSlit,
        };
        Self {
            code,
            msg: error.to_string(),
        }
    }
}

/// FFI error codes returned by wave tank functions.
/// Follows standard C convention: 0 = success, non-zero = error.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaveTankErrorCode {
    /// Operation completed successfully.
    Ok = 0,

    /// Invalid pointer: null pointer passed where non-null required.
    NullPointer = 1,

    /// Lock poisoned: internal synchronization primitive was poisoned by a panic.
    LockPoisoned = 2,

    /// Invalid parameter: dimensions, resolution, depth or slit parameters out of range.
    InvalidParameter = 3,

    /// Boundary type name is not `reflective`, `absorbing` or `open`.
    InvalidBoundaryType = 4,

    /// Slit index does not name a configured slit.
    UnknownSlit = 5,

    /// Output buffer is smaller than the data to copy.
    BufferTooSmall = 6,
}

impl From<DefaultFfiError> for WaveTankErrorCode {
    fn from(error: DefaultFfiError) -> Self {
        error.code
    }
}

thread_local! {
    /// Most recent FFI error on this thread (C string, error code).
    static LAST_ERROR: RefCell<(Option<CString>, WaveTankErrorCode)> =
        const { RefCell::new((None, WaveTankErrorCode::Ok)) };
}

/// Internal helper to read `LAST_ERROR` thread-local storage (cstring, code).
pub(crate) fn with_last_error<F, R>(f: F) -> R
where
    F: FnOnce(&(Option<CString>, WaveTankErrorCode)) -> R,
{
    LAST_ERROR.with_borrow(f)
}

/// Internal helper to mutate `LAST_ERROR` thread-local storage (cstring, code).
pub(crate) fn with_last_error_mut<F, R>(f: F) -> R
where
    F: FnOnce(&mut (Option<CString>, WaveTankErrorCode)) -> R,
{
    LAST_ERROR.with_borrow_mut(f)
}

/// Retrieve the most recent FFI error message as a null-terminated C string.
///
/// Returns:
/// - A borrowed pointer to the error message if an error occurred.
/// - `null` if the last call on this thread succeeded.
///
/// # Lifetime
/// The returned pointer is valid until the next FFI call on this thread.
///
/// **DO NOT FREE THIS POINTER** - it is managed internally.
///
/// Example:
/// ```cpp
/// if (wave_tank_set_boundary_type(tank, "sticky") != WaveTankErrorCode::Ok) {
///     const char* error = wave_tank_get_last_error();
///     if (error) {
///         printf("Boundary change failed: %s\n", error);
///     }
/// }
/// ```
#[no_mangle]
pub extern "C" fn wave_tank_get_last_error() -> *const c_char {
    with_last_error(|(cstring, _code)| cstring.as_ref().map_or(ptr::null(), |cs| cs.as_ptr()))
}

/// Retrieve the most recent FFI error code (`Ok` if the last call succeeded).
#[no_mangle]
pub extern "C" fn wave_tank_get_last_error_code() -> WaveTankErrorCode {
    with_last_error(|(_cstring, code)| *code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_errors_map_to_codes() {
        let err = DefaultFfiError::from(WaveTankError::InvalidBoundaryType("x".to_string()));
        assert_eq!(err.code(), WaveTankErrorCode::InvalidBoundaryType);
        assert!(err.msg().contains("'x'"));

        let err = DefaultFfiError::from(WaveTankError::UnknownSlit(7));
        assert_eq!(err.code(), WaveTankErrorCode::UnknownSlit);
        assert_eq!(err.msg(), "Unknown slit id 7");

        let err = DefaultFfiError::from(WaveTankError::not_positive("depth", -1.0));
        assert_eq!(WaveTankErrorCode::from(err), WaveTankErrorCode::InvalidParameter);
    }

    #[test]
    fn test_null_pointer_message() {
        let err = DefaultFfiError::null_pointer("ptr");
        assert_eq!(err.code(), WaveTankErrorCode::NullPointer);
        assert_eq!(err.msg(), "Parameter 'ptr' cannot be null");
    }
}
