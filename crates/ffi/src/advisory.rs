use flood_sim_core::{
    DischargeRecommendation, FloodModel, FloodModelConfig, MillimetersPerHour, Percent,
};
use std::ffi::CStr;
use std::os::raw::c_char;

use crate::error::{DefaultFloodSimError, FloodSimErrorCode};
use crate::helpers::{handle_ffi_result_error, require_finite, track_error, write_buffer};

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
/// FFI-friendly dam release advisory.
pub struct ReleaseAdvisory {
    /// Recommended outflow (cusecs), clamped to the discharge cap.
    pub cusecs: f64,

    /// Release class (0=safe, 1=caution, 2=emergency).
    pub classification: u8,

    /// Unclamped inflow demand plus storage pressure (cusecs).
    pub demand: f64,

    /// Largest release that keeps every dry site dry (cusecs).
    pub safe_ceiling: f64,

    /// Landmarks flooded by the release that are dry at the no-release level.
    pub newly_flooded: u32,

    /// Loss added on top of the no-release level.
    pub incremental_loss: f64,

    /// Water surface elevation with no release (m MSL).
    pub baseline_wse: f64,

    /// Water surface elevation with the recommended release (m MSL).
    pub recommended_wse: f64,
}

impl From<&DischargeRecommendation> for ReleaseAdvisory {
    fn from(rec: &DischargeRecommendation) -> Self {
        Self {
            cusecs: *rec.cusecs,
            classification: rec.classification.as_u8(),
            demand: *rec.demand,
            safe_ceiling: *rec.safe_ceiling,
            newly_flooded: rec.preview.newly_flooded as u32,
            incremental_loss: rec.preview.incremental_loss,
            baseline_wse: *rec.preview.baseline_wse,
            recommended_wse: *rec.preview.recommended_wse,
        }
    }
}

fn recommendation(
    rainfall_mm_per_hr: f64,
    storage_percent: f64,
) -> Result<DischargeRecommendation, DefaultFloodSimError> {
    let rain = require_finite("rainfall_mm_per_hr", rainfall_mm_per_hr)?;
    let storage = require_finite("storage_percent", storage_percent)?;
    Ok(FloodModel::nashik()
        .recommend_discharge(MillimetersPerHour::new(rain), Percent::new(storage)))
}

#[no_mangle]
/// Fill `out_advisory` with the recommended release for the catchment state.
///
/// Returns
/// - `Ok` (0) on success
/// - `NullPointer` if `out_advisory` is null
/// - `InvalidParameter` if either input is not finite
///
/// # Safety
///
/// `out_advisory` must be a valid, non-null pointer to a `ReleaseAdvisory`.
///
/// # Example Usage (C)
/// ```c
/// ReleaseAdvisory advisory;
/// if (flood_sim_recommend_discharge(12.0, 92.0, &advisory) == Ok) {
///     printf("release %.0f cusecs (class %u)\n", advisory.cusecs, advisory.classification);
/// }
/// ```
pub unsafe extern "C" fn flood_sim_recommend_discharge(
    rainfall_mm_per_hr: f64,
    storage_percent: f64,
    out_advisory: *mut ReleaseAdvisory,
) -> FloodSimErrorCode {
    if out_advisory.is_null() {
        return track_error(&DefaultFloodSimError::null_pointer("out_advisory"));
    }

    handle_ffi_result_error(|| {
        let rec = recommendation(rainfall_mm_per_hr, storage_percent)?;
        unsafe {
            *out_advisory = ReleaseAdvisory::from(&rec);
        }
        Ok(())
    })
}

#[no_mangle]
/// Write the operator-facing reasoning for an advisory as a null-terminated string.
///
/// `out_len` receives the byte length including the terminator, so a first
/// call with `capacity` 0 sizes the buffer.
///
/// Returns
/// - `Ok` (0) on success
/// - `NullPointer` if `out_len` is null
/// - `BufferTooSmall` if the text does not fit
/// - `InvalidParameter` if either input is not finite
///
/// # Safety
///
/// - `out_text` must be valid for `capacity` writes of `c_char`.
/// - `out_len` must be a valid, non-null pointer to a `usize`.
pub unsafe extern "C" fn flood_sim_recommendation_reasoning(
    rainfall_mm_per_hr: f64,
    storage_percent: f64,
    out_text: *mut c_char,
    capacity: usize,
    out_len: *mut usize,
) -> FloodSimErrorCode {
    if out_len.is_null() {
        return track_error(&DefaultFloodSimError::null_pointer("out_len"));
    }

    handle_ffi_result_error(|| {
        let rec = recommendation(rainfall_mm_per_hr, storage_percent)?;
        let text: Vec<c_char> = rec
            .reasoning
            .bytes()
            .filter(|&b| b != 0)
            .chain(std::iter::once(0))
            .map(|b| b as c_char)
            .collect();
        unsafe { write_buffer("out_text", &text, out_text, capacity, out_len) }
    })
}

#[no_mangle]
/// Parse and validate a JSON model configuration.
///
/// Returns
/// - `Ok` (0) if the document is a valid configuration
/// - `NullPointer` if `config_json` is null
/// - `InvalidParameter` if the string is not UTF-8
/// - `InvalidConfig` if parsing or validation fails; see `flood_sim_get_last_error`
///
/// # Safety
///
/// `config_json` must be null or point to a null-terminated C string.
pub unsafe extern "C" fn flood_sim_validate_config(config_json: *const c_char) -> FloodSimErrorCode {
    if config_json.is_null() {
        return track_error(&DefaultFloodSimError::null_pointer("config_json"));
    }

    handle_ffi_result_error(|| {
        let json = unsafe { CStr::from_ptr(config_json) }
            .to_str()
            .map_err(|_| DefaultFloodSimError::invalid_utf8("config_json"))?;
        FloodModelConfig::from_json_str(json)?;
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{flood_sim_get_last_error, flood_sim_get_last_error_code};
    use std::ffi::CString;
    use std::ptr;

    fn advisory(rain: f64, storage: f64) -> ReleaseAdvisory {
        let mut out = ReleaseAdvisory {
            cusecs: 0.0,
            classification: 0,
            demand: 0.0,
            safe_ceiling: 0.0,
            newly_flooded: 0,
            incremental_loss: 0.0,
            baseline_wse: 0.0,
            recommended_wse: 0.0,
        };
        let code = unsafe { flood_sim_recommend_discharge(rain, storage, &mut out) };
        assert_eq!(code, FloodSimErrorCode::Ok);
        out
    }

    #[test]
    fn test_light_rain_is_safe() {
        let out = advisory(1.0, 50.0);
        assert!((out.cusecs - 720.0).abs() < 1e-9);
        assert_eq!(out.classification, 0);
        assert!((out.safe_ceiling - 1_250.0).abs() < 1e-6);
        assert_eq!(out.baseline_wse, 590.0);
    }

    #[test]
    fn test_full_reservoir_is_emergency() {
        let out = advisory(3.0, 92.0);
        assert_eq!(out.classification, 2);
        assert!((out.cusecs - 17_160.0).abs() < 1e-9);
        assert!(out.recommended_wse > out.baseline_wse);
    }

    #[test]
    fn test_non_finite_inputs_rejected() {
        let code = unsafe { flood_sim_recommend_discharge(f64::NAN, 50.0, ptr::null_mut()) };
        assert_eq!(code, FloodSimErrorCode::NullPointer);

        let mut out = advisory(0.0, 0.0);
        let code = unsafe { flood_sim_recommend_discharge(1.0, f64::INFINITY, &mut out) };
        assert_eq!(code, FloodSimErrorCode::InvalidParameter);
        assert!(!flood_sim_get_last_error().is_null());
    }

    #[test]
    fn test_reasoning_text() {
        let mut len = 0usize;
        let code =
            unsafe { flood_sim_recommendation_reasoning(10.0, 50.0, ptr::null_mut(), 0, &mut len) };
        assert_eq!(code, FloodSimErrorCode::BufferTooSmall);
        assert!(len > 1);

        let mut buf: Vec<c_char> = vec![1; len];
        let code = unsafe {
            flood_sim_recommendation_reasoning(10.0, 50.0, buf.as_mut_ptr(), buf.len(), &mut len)
        };
        assert_eq!(code, FloodSimErrorCode::Ok);
        let text = unsafe { CStr::from_ptr(buf.as_ptr()) };
        assert!(!text.to_bytes().is_empty());
        assert_eq!(text.to_bytes().len() + 1, len);
    }

    #[test]
    fn test_validate_config() {
        let valid = CString::new("{}").unwrap();
        assert_eq!(unsafe { flood_sim_validate_config(valid.as_ptr()) }, FloodSimErrorCode::Ok);
        assert_eq!(flood_sim_get_last_error_code(), FloodSimErrorCode::Ok);

        let broken = CString::new(r#"{"thresholds":{"alert":3.0,"severe":2.0,"critical":5.0}}"#)
            .unwrap();
        assert_eq!(
            unsafe { flood_sim_validate_config(broken.as_ptr()) },
            FloodSimErrorCode::InvalidConfig
        );

        let garbage = CString::new("not json").unwrap();
        assert_eq!(
            unsafe { flood_sim_validate_config(garbage.as_ptr()) },
            FloodSimErrorCode::InvalidConfig
        );
        assert_eq!(
            unsafe { flood_sim_validate_config(ptr::null()) },
            FloodSimErrorCode::NullPointer
        );
    }
}
