//! Discharge to water-surface-elevation conversion
//!
//! The gauge relationship is linear: every `cusecs_per_step` of dam release
//! raises the river by `rise_per_step` above the no-release base level.
//! Discharge is clamped to `[0, max_discharge]` first, so oversized inputs
//! saturate silently instead of failing.

use crate::config::HydroConfig;
use crate::core_types::units::round_to;
use crate::core_types::{Cusecs, Meters};

/// Water surface elevation for a dam release, rounded to 0.1 m
///
/// # Examples
/// ```
/// use flood_sim_core::config::HydroConfig;
/// use flood_sim_core::core_types::Cusecs;
/// use flood_sim_core::hydro::water_surface_elevation;
///
/// let hydro = HydroConfig::default();
/// assert_eq!(*water_surface_elevation(&hydro, Cusecs::new(35_000.0)), 592.8);
/// ```
pub fn water_surface_elevation(hydro: &HydroConfig, discharge: Cusecs) -> Meters {
    let clamped = discharge.clamp_to(Cusecs::ZERO, hydro.max_discharge);
    let rise = (*clamped / hydro.cusecs_per_step) * *hydro.rise_per_step;
    Meters::new(round_to(*hydro.base_level + rise, 1))
}

/// Discharge at which the river reaches `target`
///
/// Inverse of [`water_surface_elevation`] without its rounding. Targets at
/// or below the base level need no release; targets beyond the discharge
/// cap return the cap.
pub fn discharge_for_elevation(hydro: &HydroConfig, target: Meters) -> Cusecs {
    let rise = *target - *hydro.base_level;
    let cusecs = rise / *hydro.rise_per_step * hydro.cusecs_per_step;
    Cusecs::new(cusecs).clamp_to(Cusecs::ZERO, hydro.max_discharge)
}

/// Highest level the capped discharge can produce
pub fn max_water_surface_elevation(hydro: &HydroConfig) -> Meters {
    water_surface_elevation(hydro, hydro.max_discharge)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn wse(cusecs: f64) -> f64 {
        *water_surface_elevation(&HydroConfig::default(), Cusecs::new(cusecs))
    }

    #[test]
    fn test_reference_points() {
        assert_eq!(wse(0.0), 590.0);
        assert_eq!(wse(10_000.0), 590.8);
        assert_eq!(wse(35_000.0), 592.8);
        assert_eq!(wse(100_000.0), 598.0);
    }

    #[test]
    fn test_discharge_cap_saturates() {
        assert_eq!(wse(150_000.0), wse(100_000.0));
        assert_eq!(wse(f64::INFINITY), 598.0);
    }

    #[test]
    fn test_negative_and_nan_discharge_map_to_base() {
        assert_eq!(wse(-5_000.0), 590.0);
        assert_eq!(wse(f64::NAN), 590.0);
    }

    #[test]
    fn test_rise_is_linear() {
        let step = wse(20_000.0) - wse(10_000.0);
        let later_step = wse(90_000.0) - wse(80_000.0);
        assert_relative_eq!(step, later_step, epsilon = 1e-9);
    }

    #[test]
    fn test_rounded_to_one_decimal() {
        // 1250 cusecs would be a 0.1 m rise; 1000 is 0.08 m and rounds up
        assert_eq!(wse(1_000.0), 590.1);
        assert_eq!(wse(500.0), 590.0);
    }

    #[test]
    fn test_inverse() {
        let hydro = HydroConfig::default();
        assert_relative_eq!(
            *discharge_for_elevation(&hydro, Meters::new(592.8)),
            35_000.0,
            epsilon = 1e-6
        );
        assert_eq!(discharge_for_elevation(&hydro, Meters::new(585.0)), Cusecs::ZERO);
        assert_eq!(*discharge_for_elevation(&hydro, Meters::new(650.0)), 100_000.0);
    }

    #[test]
    fn test_max_level() {
        assert_eq!(*max_water_surface_elevation(&HydroConfig::default()), 598.0);
    }
}
