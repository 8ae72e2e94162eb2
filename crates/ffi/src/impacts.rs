use flood_sim_core::{
    FloodImpact, FloodModel, FloodStatistics, LandmarkCategory, Meters, TacticalStatus,
};

use crate::error::{DefaultFloodSimError, FloodSimErrorCode};
use crate::helpers::{
    clear_last_error, handle_ffi_result_error, require_finite, track_error, write_buffer,
};

/// Number of landmark categories in [`LossBreakdown::by_category`].
pub const FLOOD_SIM_CATEGORY_COUNT: usize = 6;

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
/// FFI-friendly flood impact on one landmark.
pub struct LandmarkImpact {
    /// Index into the landmark registry.
    pub landmark_index: u32,

    /// Landmark category (0=commercial, 1=residential, 2=infrastructure,
    /// 3=sacred-site, 4=cultural, 5=agriculture).
    pub category: u8,

    /// Whether the landmark is under water.
    pub is_flooded: bool,

    /// Water depth above ground (m), rounded to 0.01.
    pub submergence_depth: f64,

    /// Risk tier (0=safe, 1=warning, 2=alert, 3=severe, 4=critical).
    pub risk_level: u8,

    /// Field response (0=dry, 1=evacuate, 2=structural failure risk).
    pub tactical_status: u8,
}

impl LandmarkImpact {
    fn new(index: usize, impact: &FloodImpact<'_>, tactical: TacticalStatus) -> Self {
        Self {
            landmark_index: index as u32,
            category: impact.landmark.category.as_u8(),
            is_flooded: impact.is_flooded,
            submergence_depth: *impact.submergence_depth,
            risk_level: impact.risk_level.as_u8(),
            tactical_status: tactical.as_u8(),
        }
    }
}

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
/// FFI-friendly aggregate flood statistics.
pub struct FloodStats {
    /// Landmarks assessed.
    pub total_landmarks: u32,
    /// Landmarks under water.
    pub flooded_count: u32,
    /// Flooded landmarks in the severe or critical tier.
    pub critical_count: u32,
    /// Flooded share, whole percent.
    pub inundation_percentage: u32,
    /// Deepest submergence (m), 0 when nothing is flooded.
    pub max_submergence_depth: f64,
    /// Flooded residential landmarks.
    pub population_at_risk: u32,
}

impl From<&FloodStatistics<'_>> for FloodStats {
    fn from(stats: &FloodStatistics<'_>) -> Self {
        Self {
            total_landmarks: stats.total_landmarks as u32,
            flooded_count: stats.flooded_count as u32,
            critical_count: stats.critical_count as u32,
            inundation_percentage: stats.inundation_percentage,
            max_submergence_depth: *stats.max_submergence_depth,
            population_at_risk: stats.population_at_risk as u32,
        }
    }
}

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
/// FFI-friendly loss estimate.
pub struct LossBreakdown {
    /// Sum over all contributing landmarks.
    pub total: f64,
    /// Loss per category, indexed by category code.
    pub by_category: [f64; FLOOD_SIM_CATEGORY_COUNT],
}

/// Number of landmarks in the registry.
#[no_mangle]
pub extern "C" fn flood_sim_landmark_count() -> usize {
    clear_last_error();
    FloodModel::nashik().landmarks().len()
}

#[no_mangle]
/// Water surface elevation (m MSL, 0.1 m resolution) for a dam release.
///
/// Discharge is clamped to [0, 100000] cusecs; NaN maps to 0. Never fails,
/// and clears any earlier error on this thread.
pub extern "C" fn flood_sim_calculate_wse(cusecs: f64) -> f64 {
    clear_last_error();
    *FloodModel::nashik().calculate_wse(cusecs.into())
}

#[no_mangle]
/// Assess every landmark at `wse` into a caller-provided buffer.
///
/// Returns
/// - `Ok` (0) with `out_len` set to the number of entries written
/// - `NullPointer` if `out_len` is null, or `out_impacts` is null with a non-empty result
/// - `BufferTooSmall` if `capacity` is below the landmark count; `out_len` holds the count
/// - `InvalidParameter` if `wse` is not finite
///
/// # Safety
///
/// - `out_impacts` must be valid for `capacity` writes of `LandmarkImpact`.
/// - `out_len` must be a valid, non-null pointer to a `usize`.
///
/// # Example Usage (C)
/// ```c
/// LandmarkImpact impacts[16];
/// uintptr_t len = 0;
/// if (flood_sim_assess_impacts(592.8, impacts, 16, &len) == Ok) {
///     for (uintptr_t i = 0; i < len; i++) { /* impacts[i] */ }
/// }
/// ```
pub unsafe extern "C" fn flood_sim_assess_impacts(
    wse: f64,
    out_impacts: *mut LandmarkImpact,
    capacity: usize,
    out_len: *mut usize,
) -> FloodSimErrorCode {
    if out_len.is_null() {
        return track_error(&DefaultFloodSimError::null_pointer("out_len"));
    }

    handle_ffi_result_error(|| {
        let wse = Meters::new(require_finite("wse", wse)?);
        let model = FloodModel::nashik();
        let impacts: Vec<LandmarkImpact> = model
            .assess_flood_impact(wse)
            .iter()
            .zip(model.tactical_assessment(wse))
            .enumerate()
            .map(|(i, (impact, (_, tactical)))| LandmarkImpact::new(i, impact, tactical))
            .collect();
        unsafe { write_buffer("out_impacts", &impacts, out_impacts, capacity, out_len) }
    })
}

#[no_mangle]
/// Fill `out_stats` with aggregate statistics at `wse`.
///
/// Returns
/// - `Ok` (0) on success
/// - `NullPointer` if `out_stats` is null
/// - `InvalidParameter` if `wse` is not finite
///
/// # Safety
///
/// `out_stats` must be a valid, non-null pointer to a `FloodStats`.
pub unsafe extern "C" fn flood_sim_flood_stats(
    wse: f64,
    out_stats: *mut FloodStats,
) -> FloodSimErrorCode {
    if out_stats.is_null() {
        return track_error(&DefaultFloodSimError::null_pointer("out_stats"));
    }

    handle_ffi_result_error(|| {
        let wse = require_finite("wse", wse)?;
        let stats = FloodModel::nashik().calculate_flood_stats(Meters::new(wse));
        unsafe {
            *out_stats = FloodStats::from(&stats);
        }
        Ok(())
    })
}

#[no_mangle]
/// Fill `out_loss` with the economic loss estimate at `wse`.
///
/// Returns
/// - `Ok` (0) on success
/// - `NullPointer` if `out_loss` is null
/// - `InvalidParameter` if `wse` is not finite
///
/// # Safety
///
/// `out_loss` must be a valid, non-null pointer to a `LossBreakdown`.
pub unsafe extern "C" fn flood_sim_estimate_loss(
    wse: f64,
    out_loss: *mut LossBreakdown,
) -> FloodSimErrorCode {
    if out_loss.is_null() {
        return track_error(&DefaultFloodSimError::null_pointer("out_loss"));
    }

    handle_ffi_result_error(|| {
        let wse = require_finite("wse", wse)?;
        let estimate = FloodModel::nashik().estimate_loss(Meters::new(wse));

        let mut by_category = [0.0; FLOOD_SIM_CATEGORY_COUNT];
        for category in LandmarkCategory::ALL {
            by_category[usize::from(category.as_u8())] = estimate.category(category);
        }
        unsafe {
            *out_loss = LossBreakdown {
                total: estimate.total,
                by_category,
            };
        }
        Ok(())
    })
}
