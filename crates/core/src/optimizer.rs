//! Advisory dam-release recommendation
//!
//! Turns catchment rainfall and reservoir storage into a suggested outflow.
//! The suggestion always tracks inflow demand so the dam is never left to
//! overtop; the classification tells the operator what that release will
//! cost downstream relative to the safe ceiling.

use crate::config::{FloodModelConfig, OptimizerConfig};
use crate::core_types::{Cusecs, Meters, MillimetersPerHour, Percent};
use crate::hydro::{discharge_for_elevation, water_surface_elevation};
use crate::impact::{assess_flood_impact, estimate_loss, FloodStatistics};
use crate::topography::{lowest_dry_elevation, Landmark, Site, Structure};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Downstream consequence of a recommended release
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReleaseClass {
    /// No currently-dry site goes under
    Safe = 0,
    /// Release exceeds the safe ceiling; limited downstream flooding
    Caution = 1,
    /// Reservoir near capacity or demand far above the ceiling
    Emergency = 2,
}

impl ReleaseClass {
    /// Stable identifier matching the serialized form
    pub fn as_str(self) -> &'static str {
        match self {
            ReleaseClass::Safe => "safe",
            ReleaseClass::Caution => "caution",
            ReleaseClass::Emergency => "emergency",
        }
    }

    /// Convert to u8 for FFI
    #[must_use]
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for ReleaseClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Difference between the recommended release and no release at all
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ImpactPreview {
    /// Water level with the dam closed
    pub baseline_wse: Meters,
    /// Water level at the recommended release
    pub recommended_wse: Meters,
    /// Landmarks flooded at the recommended level but dry at baseline
    pub newly_flooded: usize,
    /// Estimated loss added by the release
    pub incremental_loss: f64,
}

/// Output of [`recommend_discharge`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DischargeRecommendation {
    /// Suggested dam outflow, within `[0, max_discharge]`
    pub cusecs: Cusecs,
    /// Downstream consequence tier
    pub classification: ReleaseClass,
    /// Operator-facing explanation
    pub reasoning: String,
    /// Inflow demand before clamping
    pub demand: Cusecs,
    /// Largest release that keeps every currently-dry site dry
    pub safe_ceiling: Cusecs,
    /// Flooding and loss the release adds over baseline
    pub preview: ImpactPreview,
}

/// Extra release required by reservoir storage
///
/// Steps are cumulative: every step whose threshold has been reached adds
/// its allowance.
pub fn storage_pressure(optimizer: &OptimizerConfig, storage: Percent) -> Cusecs {
    optimizer
        .storage_steps
        .iter()
        .filter(|step| storage >= step.threshold)
        .fold(Cusecs::ZERO, |acc, step| acc + step.extra)
}

/// Outflow needed to keep pace with inflow at `rainfall` and `storage`
pub fn inflow_demand(
    optimizer: &OptimizerConfig,
    rainfall: MillimetersPerHour,
    storage: Percent,
) -> Cusecs {
    let rain = rainfall.value().max(0.0);
    let runoff = Cusecs::new(rain * optimizer.runoff_cusecs_per_mm * optimizer.runoff_coefficient);
    runoff + storage_pressure(optimizer, storage)
}

/// Discharge at which the lowest currently-dry site would begin to flood
///
/// "Currently dry" is judged at the zero-release baseline. When every site
/// is already under water at baseline the full discharge range is treated
/// as safe, since no further dry site can be lost.
pub fn safe_ceiling(config: &FloodModelConfig, landmarks: &[Landmark], structures: &[Structure]) -> Cusecs {
    let baseline = water_surface_elevation(&config.hydro, Cusecs::ZERO);
    let sites = landmarks
        .iter()
        .map(Site::Landmark)
        .chain(structures.iter().map(Site::Structure));

    match lowest_dry_elevation(sites, baseline) {
        Some(elevation) => discharge_for_elevation(&config.hydro, elevation),
        None => config.hydro.max_discharge,
    }
}

/// Recommend a dam release for the given catchment and reservoir state
///
/// Pure: the same rainfall and storage always produce the same advice.
pub fn recommend_discharge(
    config: &FloodModelConfig,
    landmarks: &[Landmark],
    structures: &[Structure],
    rainfall: MillimetersPerHour,
    storage: Percent,
) -> DischargeRecommendation {
    let optimizer = &config.optimizer;
    let demand = inflow_demand(optimizer, rainfall, storage);
    let ceiling = safe_ceiling(config, landmarks, structures);

    let (raw, classification) = if *demand <= 0.0 && storage < optimizer.hold_storage {
        (Cusecs::ZERO, ReleaseClass::Safe)
    } else if demand <= ceiling {
        (demand, ReleaseClass::Safe)
    } else if storage >= optimizer.emergency_storage
        || *demand > *ceiling * optimizer.emergency_ceiling_multiple
    {
        (demand, ReleaseClass::Emergency)
    } else {
        (demand, ReleaseClass::Caution)
    };
    let cusecs = raw.clamp_to(Cusecs::ZERO, config.hydro.max_discharge);

    let preview = impact_preview(config, landmarks, cusecs);
    let reasoning = reasoning_text(classification, cusecs, demand, ceiling, storage, &preview);

    debug!(
        "Release advisory: rain={} storage={} demand={} ceiling={:.0} -> {} ({})",
        rainfall, storage, demand, *ceiling, cusecs, classification
    );

    DischargeRecommendation {
        cusecs,
        classification,
        reasoning,
        demand,
        safe_ceiling: ceiling,
        preview,
    }
}

fn impact_preview(config: &FloodModelConfig, landmarks: &[Landmark], cusecs: Cusecs) -> ImpactPreview {
    let baseline_wse = water_surface_elevation(&config.hydro, Cusecs::ZERO);
    let recommended_wse = water_surface_elevation(&config.hydro, cusecs);

    let flooded_at = |wse: Meters| {
        let impacts = assess_flood_impact(landmarks, wse, &config.thresholds);
        FloodStatistics::from_impacts(&impacts).flooded_count
    };
    let loss_at = |wse: Meters| estimate_loss(landmarks, wse, &config.loss_weights).total;

    ImpactPreview {
        baseline_wse,
        recommended_wse,
        newly_flooded: flooded_at(recommended_wse).saturating_sub(flooded_at(baseline_wse)),
        incremental_loss: (loss_at(recommended_wse) - loss_at(baseline_wse)).max(0.0),
    }
}

fn reasoning_text(
    class: ReleaseClass,
    cusecs: Cusecs,
    demand: Cusecs,
    ceiling: Cusecs,
    storage: Percent,
    preview: &ImpactPreview,
) -> String {
    let consequence = match preview.newly_flooded {
        0 => "no additional landmarks flooded".to_string(),
        1 => "1 additional landmark flooded".to_string(),
        n => format!("{n} additional landmarks flooded"),
    };

    match class {
        ReleaseClass::Safe if *cusecs <= 0.0 => format!(
            "No measurable inflow and storage at {storage}; hold gates closed."
        ),
        ReleaseClass::Safe => format!(
            "Release {cusecs} to match inflow; within the safe ceiling of {:.0} cusecs, {consequence}.",
            *ceiling
        ),
        ReleaseClass::Caution => format!(
            "Inflow demand of {demand} exceeds the safe ceiling of {:.0} cusecs. Release {cusecs} to protect the dam; {consequence} (WSE {}).",
            *ceiling, preview.recommended_wse
        ),
        ReleaseClass::Emergency => format!(
            "Emergency release of {cusecs}: storage at {storage} and demand {demand} against a safe ceiling of {:.0} cusecs. Overtopping risk outweighs downstream flooding; {consequence}, WSE {}.",
            *ceiling, preview.recommended_wse
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topography::{BRIDGES, NASHIK_TOPOGRAPHY};
    use approx::assert_relative_eq;

    fn recommend(rain: f64, storage: f64) -> DischargeRecommendation {
        recommend_discharge(
            &FloodModelConfig::default(),
            &NASHIK_TOPOGRAPHY,
            &BRIDGES,
            MillimetersPerHour::new(rain),
            Percent::new(storage),
        )
    }

    #[test]
    fn test_storage_pressure_is_cumulative() {
        let optimizer = OptimizerConfig::default();
        let at = |s: f64| *storage_pressure(&optimizer, Percent::new(s));
        assert_eq!(at(84.9), 0.0);
        assert_eq!(at(85.0), 5_000.0);
        assert_eq!(at(90.0), 15_000.0);
        assert_eq!(at(97.0), 30_000.0);
    }

    #[test]
    fn test_safe_ceiling_from_lowest_dry_site() {
        // Tapovan at 590.1 m is the lowest site still dry at the 590 m baseline
        let ceiling = safe_ceiling(&FloodModelConfig::default(), &NASHIK_TOPOGRAPHY, &BRIDGES);
        assert_relative_eq!(*ceiling, 1_250.0, epsilon = 1e-6);
    }

    #[test]
    fn test_safe_ceiling_without_dry_sites() {
        let config = FloodModelConfig::default();
        let submerged: Vec<Landmark> = NASHIK_TOPOGRAPHY
            .iter()
            .filter(|l| *l.elevation_msl < 590.0)
            .cloned()
            .collect();
        assert_eq!(safe_ceiling(&config, &submerged, &[]), config.hydro.max_discharge);
    }

    #[test]
    fn test_no_inflow_holds_gates() {
        let rec = recommend(0.0, 67.6);
        assert_eq!(rec.cusecs, Cusecs::ZERO);
        assert_eq!(rec.classification, ReleaseClass::Safe);
        assert_eq!(rec.preview.newly_flooded, 0);
        assert_eq!(rec.preview.incremental_loss, 0.0);
    }

    #[test]
    fn test_light_rain_is_safe() {
        let rec = recommend(1.0, 50.0);
        assert_relative_eq!(*rec.cusecs, 720.0, epsilon = 1e-9);
        assert_eq!(rec.classification, ReleaseClass::Safe);
    }

    #[test]
    fn test_moderate_excess_is_caution() {
        let rec = recommend(3.0, 50.0);
        assert_relative_eq!(*rec.cusecs, 2_160.0, epsilon = 1e-9);
        assert_eq!(rec.classification, ReleaseClass::Caution);
    }

    #[test]
    fn test_far_above_ceiling_is_emergency() {
        let rec = recommend(10.0, 50.0);
        assert_relative_eq!(*rec.cusecs, 7_200.0, epsilon = 1e-9);
        assert_eq!(rec.classification, ReleaseClass::Emergency);
        // 590.6 m floods Tapovan on top of the two baseline sites
        assert_eq!(rec.preview.newly_flooded, 1);
        assert!(rec.preview.incremental_loss > 0.0);
    }

    #[test]
    fn test_high_storage_is_emergency() {
        let rec = recommend(3.0, 92.0);
        assert_relative_eq!(*rec.cusecs, 2_160.0 + 15_000.0, epsilon = 1e-9);
        assert_eq!(rec.classification, ReleaseClass::Emergency);
    }

    #[test]
    fn test_release_is_clamped() {
        let rec = recommend(200.0, 96.0);
        assert_eq!(*rec.cusecs, 100_000.0);
        assert!(*rec.demand > 100_000.0);
        assert_eq!(rec.classification, ReleaseClass::Emergency);
    }

    #[test]
    fn test_negative_rain_treated_as_dry() {
        let rec = recommend(-5.0, 40.0);
        assert_eq!(rec.cusecs, Cusecs::ZERO);
        assert_eq!(rec.classification, ReleaseClass::Safe);
    }

    #[test]
    fn test_recommendation_is_pure() {
        assert_eq!(recommend(12.0, 88.0), recommend(12.0, 88.0));
    }

    #[test]
    fn test_reasoning_mentions_release() {
        let rec = recommend(3.0, 50.0);
        assert!(rec.reasoning.contains("safe ceiling"));
        assert!(!rec.reasoning.is_empty());
    }
}
