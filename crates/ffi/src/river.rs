use flood_sim_core::{FloodModel, Meters};

use crate::error::{DefaultFloodSimError, FloodSimErrorCode};
use crate::helpers::{
    clear_last_error, handle_ffi_result_error, require_finite, track_error, write_buffer,
};

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
/// Geographic coordinate in decimal degrees.
pub struct FloodSimCoord {
    pub lon: f64,
    pub lat: f64,
}

#[no_mangle]
/// Full channel width (m) at `wse`.
///
/// Returns `NaN` and records `InvalidParameter` if `wse` is not finite;
/// otherwise clears any earlier error on this thread.
pub extern "C" fn flood_sim_channel_width(wse: f64) -> f64 {
    match require_finite("wse", wse) {
        Ok(wse) => {
            clear_last_error();
            *flood_sim_core::river::channel_width(
                &FloodModel::nashik().config().river,
                Meters::new(wse),
            )
        }
        Err(error) => {
            track_error(&error);
            f64::NAN
        }
    }
}

#[no_mangle]
/// Write the closed river polygon ring at `wse` into `out_coords`.
///
/// The first and last coordinates are equal. Call once with `capacity` 0 to
/// learn the required length from `out_len`.
///
/// Returns
/// - `Ok` (0) with `out_len` set to the number of coordinates written
/// - `NullPointer` if `out_len` is null
/// - `BufferTooSmall` if the ring does not fit; `out_len` holds the ring length
/// - `InvalidParameter` if `wse` is not finite
///
/// # Safety
///
/// - `out_coords` must be valid for `capacity` writes of `FloodSimCoord`.
/// - `out_len` must be a valid, non-null pointer to a `usize`.
pub unsafe extern "C" fn flood_sim_river_polygon(
    wse: f64,
    out_coords: *mut FloodSimCoord,
    capacity: usize,
    out_len: *mut usize,
) -> FloodSimErrorCode {
    if out_len.is_null() {
        return track_error(&DefaultFloodSimError::null_pointer("out_len"));
    }

    handle_ffi_result_error(|| {
        let wse = require_finite("wse", wse)?;
        let extent = FloodModel::nashik().river_polygon(Meters::new(wse));
        let ring: Vec<FloodSimCoord> = extent
            .coordinates()
            .iter()
            .map(|c| FloodSimCoord { lon: c.x, lat: c.y })
            .collect();
        unsafe { write_buffer("out_coords", &ring, out_coords, capacity, out_len) }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::flood_sim_get_last_error_code;
    use std::ptr;

    fn ring_at(wse: f64) -> Vec<FloodSimCoord> {
        let mut len = 0usize;
        let code = unsafe { flood_sim_river_polygon(wse, ptr::null_mut(), 0, &mut len) };
        assert_eq!(code, FloodSimErrorCode::BufferTooSmall);
        assert!(len > 3);

        let mut ring = vec![FloodSimCoord { lon: 0.0, lat: 0.0 }; len];
        let code = unsafe { flood_sim_river_polygon(wse, ring.as_mut_ptr(), ring.len(), &mut len) };
        assert_eq!(code, FloodSimErrorCode::Ok);
        assert_eq!(len, ring.len());
        ring
    }

    #[test]
    fn test_ring_is_closed() {
        let ring = ring_at(592.8);
        assert_eq!(ring.first(), ring.last());
        for c in &ring {
            assert!(c.lon > 73.0 && c.lon < 75.0);
            assert!(c.lat > 19.0 && c.lat < 21.0);
        }
    }

    #[test]
    fn test_channel_width() {
        assert_eq!(flood_sim_channel_width(585.0), 80.0);
        assert!(flood_sim_channel_width(592.8) > 80.0);
        assert!(flood_sim_channel_width(f64::NAN).is_nan());
    }

    #[test]
    fn test_channel_width_clears_stale_error() {
        assert!(flood_sim_channel_width(f64::INFINITY).is_nan());
        assert_eq!(flood_sim_get_last_error_code(), FloodSimErrorCode::InvalidParameter);

        assert_eq!(flood_sim_channel_width(585.0), 80.0);
        assert_eq!(flood_sim_get_last_error_code(), FloodSimErrorCode::Ok);
    }

    #[test]
    fn test_non_finite_wse_rejected() {
        let mut len = 7usize;
        let code = unsafe { flood_sim_river_polygon(f64::NAN, ptr::null_mut(), 0, &mut len) };
        assert_eq!(code, FloodSimErrorCode::InvalidParameter);
        assert_eq!(len, 7);
    }
}
