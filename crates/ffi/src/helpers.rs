use crate::error::{with_last_error_mut, DefaultFloodSimError, FloodSimError, FloodSimErrorCode};
use std::ffi::CString;

/// Set the thread-local error message and code.
/// Accepts any type implementing `FloodSimError` trait.
pub(crate) fn set_last_error(error: &impl FloodSimError) {
    with_last_error_mut(|(cstring, code)| {
        *cstring = CString::new(error.msg()).ok();
        *code = error.code();
    });
}

/// Track an error by setting it in thread-local storage and returning its code.
#[inline]
pub(crate) fn track_error(error: &impl FloodSimError) -> FloodSimErrorCode {
    set_last_error(error);
    error.code()
}

/// Clear the thread-local error message and code.
pub(crate) fn clear_last_error() {
    with_last_error_mut(|(cstring, code)| {
        *cstring = None;
        *code = FloodSimErrorCode::Ok;
    });
}

/// Run a fallible FFI body, recording the error or clearing the last one.
pub(crate) fn handle_ffi_result_error<F>(f: F) -> FloodSimErrorCode
where
    F: FnOnce() -> Result<(), DefaultFloodSimError>,
{
    match f() {
        Ok(()) => {
            clear_last_error();
            FloodSimErrorCode::Ok
        }
        Err(error) => track_error(&error),
    }
}

/// Reject NaN and infinite inputs.
pub(crate) fn require_finite(param_name: &str, value: f64) -> Result<f64, DefaultFloodSimError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(DefaultFloodSimError::non_finite(param_name, value))
    }
}

/// Copy `items` into a caller buffer of `capacity` elements.
///
/// `out_len` always receives the number of items the result needs, so a
/// caller can size its buffer from a failed first call.
///
/// # Safety
/// `out` must be valid for `capacity` writes of `T` (or null when
/// `capacity` is 0); `out_len` must be valid for one write.
pub(crate) unsafe fn write_buffer<T: Copy>(
    param_name: &str,
    items: &[T],
    out: *mut T,
    capacity: usize,
    out_len: *mut usize,
) -> Result<(), DefaultFloodSimError> {
    unsafe {
        *out_len = items.len();
    }
    if items.len() > capacity {
        return Err(DefaultFloodSimError::buffer_too_small(
            param_name,
            items.len(),
            capacity,
        ));
    }
    if items.is_empty() {
        return Ok(());
    }
    if out.is_null() {
        return Err(DefaultFloodSimError::null_pointer(param_name));
    }
    unsafe {
        std::ptr::copy_nonoverlapping(items.as_ptr(), out, items.len());
    }
    Ok(())
}
