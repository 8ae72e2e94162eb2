use flood_sim_core::ConfigError;
use std::cell::RefCell;
use std::ffi::CString;
use std::os::raw::c_char;
use std::ptr;

/// Common interface for FFI error types.
///
/// - `code()` - Returns the error code to be passed across FFI boundary
/// - `msg()` - Returns the error message for diagnostic purposes
pub(crate) trait FloodSimError {
    /// Returns the error code to be returned across the FFI boundary.
    fn code(&self) -> FloodSimErrorCode;

    /// Returns the human-readable error message.
    fn msg(&self) -> &str;
}

/// Default implementation of `FloodSimError` for the FFI failure modes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DefaultFloodSimError {
    code: FloodSimErrorCode,
    msg: String,
}

impl DefaultFloodSimError {
    /// Create error for null pointer passed where non-null required.
    ///
    /// # Arguments
    /// * `param_name` - The name of the parameter that was null (e.g., `"out_stats"`)
    pub fn null_pointer(param_name: &str) -> Self {
        Self {
            code: FloodSimErrorCode::NullPointer,
            msg: format!("Parameter '{param_name}' cannot be null"),
        }
    }

    /// Create error for a caller buffer that cannot hold the result.
    ///
    /// # Arguments
    /// * `param_name` - The output buffer parameter
    /// * `required` - Elements needed
    /// * `capacity` - Elements the caller provided
    pub fn buffer_too_small(param_name: &str, required: usize, capacity: usize) -> Self {
        Self {
            code: FloodSimErrorCode::BufferTooSmall,
            msg: format!("Buffer '{param_name}' holds {capacity} elements, {required} required"),
        }
    }

    /// Create error for a non-finite numeric argument.
    ///
    /// # Arguments
    /// * `param_name` - The invalid parameter (e.g., `"wse"`, `"rainfall_mm_per_hr"`)
    /// * `value` - The invalid value
    pub fn non_finite(param_name: &str, value: f64) -> Self {
        Self {
            code: FloodSimErrorCode::InvalidParameter,
            msg: format!("Parameter '{param_name}' must be finite, got {value}"),
        }
    }

    /// Create error for a C string that is not valid UTF-8.
    pub fn invalid_utf8(param_name: &str) -> Self {
        Self {
            code: FloodSimErrorCode::InvalidParameter,
            msg: format!("Parameter '{param_name}' is not valid UTF-8"),
        }
    }
}

impl From<ConfigError> for DefaultFloodSimError {
    fn from(error: ConfigError) -> Self {
        Self {
            code: FloodSimErrorCode::InvalidConfig,
            msg: error.to_string(),
        }
    }
}

impl FloodSimError for DefaultFloodSimError {
    fn code(&self) -> FloodSimErrorCode {
        self.code
    }

    fn msg(&self) -> &str {
        &self.msg
    }
}

/// FFI error codes returned by flood model functions.
/// Follows standard C convention: 0 = success, non-zero = error.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FloodSimErrorCode {
    /// Operation completed successfully.
    Ok = 0,

    /// Invalid pointer: null pointer passed where non-null required.
    NullPointer = 1,

    /// Output buffer too small; the required length is written to `out_len`.
    BufferTooSmall = 2,

    /// Invalid parameter passed to function (e.g. NaN or infinite input).
    InvalidParameter = 3,

    /// Configuration JSON was malformed or violated a model constraint.
    InvalidConfig = 4,
}

impl From<DefaultFloodSimError> for FloodSimErrorCode {
    fn from(error: DefaultFloodSimError) -> Self {
        error.code
    }
}

/// Last failure on this thread; `None` message means the last call succeeded.
pub(crate) type LastError = (Option<CString>, FloodSimErrorCode);

thread_local! {
    static LAST_ERROR: RefCell<LastError> = const { RefCell::new((None, FloodSimErrorCode::Ok)) };
}

pub(crate) fn with_last_error<R>(f: impl FnOnce(&LastError) -> R) -> R {
    LAST_ERROR.with_borrow(f)
}

pub(crate) fn with_last_error_mut<R>(f: impl FnOnce(&mut LastError) -> R) -> R {
    LAST_ERROR.with_borrow_mut(f)
}

/// Message for the most recent failed call on this thread, or null.
///
/// The string is owned by the library and stays valid until the next
/// `flood_sim_*` call on the same thread. Do not free it.
///
/// ```c
/// FloodStats stats;
/// if (flood_sim_flood_stats(wse, &stats) != Ok) {
///     fprintf(stderr, "flood stats: %s\n", flood_sim_get_last_error());
/// }
/// ```
#[no_mangle]
pub extern "C" fn flood_sim_get_last_error() -> *const c_char {
    with_last_error(|(message, _)| message.as_ref().map_or(ptr::null(), |m| m.as_ptr()))
}

/// Code for the most recent call on this thread; `Ok` after a success.
#[no_mangle]
pub extern "C" fn flood_sim_get_last_error_code() -> FloodSimErrorCode {
    with_last_error(|(_, code)| *code)
}
