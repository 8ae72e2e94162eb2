//! Per-landmark submergence and risk classification

use crate::config::RiskThresholds;
use crate::core_types::Meters;
use crate::topography::{Landmark, Submersible};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Risk tier for a single location, ordered from least to most severe
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    /// Dry
    Safe = 0,
    /// Water at the doorstep
    Warning = 1,
    /// Shallow inundation
    Alert = 2,
    /// Deep inundation
    Severe = 3,
    /// Structure fully submerged
    Critical = 4,
}

impl RiskLevel {
    /// Classify a submergence depth (metres)
    ///
    /// Uses strict `>` at every boundary, so a depth sitting exactly on a
    /// threshold falls into the lower tier.
    pub fn from_depth(depth: f64, thresholds: &RiskThresholds) -> Self {
        match depth {
            d if d > thresholds.critical => RiskLevel::Critical,
            d if d > thresholds.severe => RiskLevel::Severe,
            d if d > thresholds.alert => RiskLevel::Alert,
            d if d > 0.0 => RiskLevel::Warning,
            _ => RiskLevel::Safe,
        }
    }

    /// Severe and critical tiers count toward critical assets
    pub fn is_critical_tier(self) -> bool {
        matches!(self, RiskLevel::Severe | RiskLevel::Critical)
    }

    /// Stable identifier matching the serialized form
    pub fn as_str(self) -> &'static str {
        match self {
            RiskLevel::Safe => "safe",
            RiskLevel::Warning => "warning",
            RiskLevel::Alert => "alert",
            RiskLevel::Severe => "severe",
            RiskLevel::Critical => "critical",
        }
    }

    /// Convert to u8 for FFI
    #[must_use]
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Flood impact on one landmark at a given water level
///
/// Recomputed from scratch whenever the level changes; never mutated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FloodImpact<'a> {
    /// Registry entry this impact refers to
    pub landmark: &'a Landmark,
    /// Whether the landmark is under water
    pub is_flooded: bool,
    /// Water depth above ground, rounded to 0.01 m
    pub submergence_depth: Meters,
    /// Risk tier for the unrounded depth
    pub risk_level: RiskLevel,
}

impl<'a> FloodImpact<'a> {
    /// Assess a single landmark
    ///
    /// The flood flag and tier come from the exact depth; only the reported
    /// `submergence_depth` is rounded. Water less than half a centimetre
    /// deep is therefore flooded with a reported depth of 0.00 m.
    pub fn assess(landmark: &'a Landmark, wse: Meters, thresholds: &RiskThresholds) -> Self {
        let depth = landmark.submergence(wse);
        Self {
            landmark,
            is_flooded: *depth > 0.0,
            submergence_depth: depth.round_to(2),
            risk_level: RiskLevel::from_depth(*depth, thresholds),
        }
    }
}

/// Assess every landmark at `wse`, preserving registry order
pub fn assess_flood_impact<'a>(
    landmarks: &'a [Landmark],
    wse: Meters,
    thresholds: &RiskThresholds,
) -> Vec<FloodImpact<'a>> {
    landmarks
        .iter()
        .map(|landmark| FloodImpact::assess(landmark, wse, thresholds))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topography::{landmark_by_id, NASHIK_TOPOGRAPHY};

    fn level_at(depth: f64) -> RiskLevel {
        RiskLevel::from_depth(depth, &RiskThresholds::default())
    }

    #[test]
    fn test_tier_boundaries_use_strict_inequality() {
        assert_eq!(level_at(0.0), RiskLevel::Safe);
        assert_eq!(level_at(0.01), RiskLevel::Warning);
        assert_eq!(level_at(0.5), RiskLevel::Warning);
        assert_eq!(level_at(0.51), RiskLevel::Alert);
        assert_eq!(level_at(2.0), RiskLevel::Alert);
        assert_eq!(level_at(2.01), RiskLevel::Severe);
        assert_eq!(level_at(5.0), RiskLevel::Severe);
        assert_eq!(level_at(5.01), RiskLevel::Critical);
    }

    #[test]
    fn test_tiers_are_ordered() {
        assert!(RiskLevel::Safe < RiskLevel::Warning);
        assert!(RiskLevel::Severe < RiskLevel::Critical);
        assert!(RiskLevel::Severe.is_critical_tier());
        assert!(!RiskLevel::Alert.is_critical_tier());
    }

    #[test]
    fn test_preserves_registry_order() {
        let impacts =
            assess_flood_impact(&NASHIK_TOPOGRAPHY, Meters::new(592.8), &RiskThresholds::default());
        assert_eq!(impacts.len(), NASHIK_TOPOGRAPHY.len());
        for (impact, landmark) in impacts.iter().zip(NASHIK_TOPOGRAPHY.iter()) {
            assert_eq!(impact.landmark.id, landmark.id);
        }
    }

    #[test]
    fn test_flood_flag_matches_depth() {
        for wse in [585.0, 590.0, 590.1, 592.8, 598.0, 611.0] {
            let impacts =
                assess_flood_impact(&NASHIK_TOPOGRAPHY, Meters::new(wse), &RiskThresholds::default());
            for impact in impacts {
                assert_eq!(impact.is_flooded, *impact.submergence_depth > 0.0);
                assert_eq!(impact.is_flooded, wse > *impact.landmark.elevation_msl);
                assert_eq!(impact.risk_level == RiskLevel::Safe, !impact.is_flooded);
            }
        }
    }

    #[test]
    fn test_off_grid_levels_follow_exact_depth() {
        let thresholds = RiskThresholds::default();
        let mut wse = 585.004;
        while wse < 612.0 {
            for impact in assess_flood_impact(&NASHIK_TOPOGRAPHY, Meters::new(wse), &thresholds) {
                assert_eq!(impact.is_flooded, wse > *impact.landmark.elevation_msl);
                assert_eq!(impact.risk_level == RiskLevel::Safe, !impact.is_flooded);
            }
            wse += 0.333;
        }
    }

    #[test]
    fn test_sub_centimetre_water_is_flooded() {
        let bridge = landmark_by_id("godavari-bridge").unwrap();
        let impact = FloodImpact::assess(bridge, Meters::new(588.004), &RiskThresholds::default());
        assert!(impact.is_flooded);
        assert_eq!(*impact.submergence_depth, 0.0);
        assert_eq!(impact.risk_level, RiskLevel::Warning);
    }

    #[test]
    fn test_tier_uses_unrounded_depth() {
        // 2.004 m reports as 2.00 but is past the severe boundary
        let bridge = landmark_by_id("godavari-bridge").unwrap();
        let impact = FloodImpact::assess(bridge, Meters::new(590.004), &RiskThresholds::default());
        assert_eq!(*impact.submergence_depth, 2.0);
        assert_eq!(impact.risk_level, RiskLevel::Severe);
    }

    #[test]
    fn test_depth_rounded_to_centimetres() {
        let bridge = landmark_by_id("godavari-bridge").unwrap();
        let impact = FloodImpact::assess(bridge, Meters::new(592.8), &RiskThresholds::default());
        assert_eq!(*impact.submergence_depth, 4.8);
        assert_eq!(impact.risk_level, RiskLevel::Severe);
    }

    #[test]
    fn test_exact_boundary_on_real_landmark() {
        let bridge = landmark_by_id("godavari-bridge").unwrap();
        let thresholds = RiskThresholds::default();
        assert_eq!(
            FloodImpact::assess(bridge, Meters::new(593.0), &thresholds).risk_level,
            RiskLevel::Severe
        );
        assert_eq!(
            FloodImpact::assess(bridge, Meters::new(593.01), &thresholds).risk_level,
            RiskLevel::Critical
        );
    }
}
