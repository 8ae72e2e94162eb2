//! Depth-weighted economic loss estimate
//!
//! Each submerged landmark contributes `category_weight * depth * risk_factor`.
//! The weights rank exposure between categories; the totals are an estimate
//! for comparing scenarios, not a valuation.

use crate::config::LossWeights;
use crate::core_types::Meters;
use crate::topography::{Landmark, LandmarkCategory, Submersible};
use serde::Serialize;
use std::collections::BTreeMap;

/// Loss attributed to a single landmark
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LandmarkLoss<'a> {
    /// Contributing landmark
    pub landmark: &'a Landmark,
    /// Submergence depth used for the estimate, rounded to 0.01 m
    pub depth: Meters,
    /// Estimated loss
    pub loss: f64,
}

/// Aggregate loss estimate at one water level
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LossEstimate<'a> {
    /// Sum over all contributing landmarks
    pub total: f64,
    /// Loss per category; every category is present, zero when unaffected
    pub by_category: BTreeMap<LandmarkCategory, f64>,
    /// Contributing landmarks in registry order
    pub contributions: Vec<LandmarkLoss<'a>>,
}

impl LossEstimate<'_> {
    /// Loss recorded for `category`
    pub fn category(&self, category: LandmarkCategory) -> f64 {
        self.by_category.get(&category).copied().unwrap_or(0.0)
    }
}

/// Estimate loss across `landmarks` at `wse`
///
/// Only landmarks strictly below the water surface contribute.
pub fn estimate_loss<'a>(
    landmarks: &'a [Landmark],
    wse: Meters,
    weights: &LossWeights,
) -> LossEstimate<'a> {
    let contributions: Vec<LandmarkLoss<'a>> = landmarks
        .iter()
        .filter(|l| wse > l.elevation_msl)
        .map(|landmark| {
            let depth = landmark.submergence(wse).round_to(2);
            let loss = weights.weight(landmark.category) * *depth * landmark.risk_factor;
            LandmarkLoss {
                landmark,
                depth,
                loss,
            }
        })
        .collect();

    let mut by_category: BTreeMap<LandmarkCategory, f64> =
        LandmarkCategory::ALL.iter().map(|&c| (c, 0.0)).collect();
    for c in &contributions {
        *by_category.entry(c.landmark.category).or_insert(0.0) += c.loss;
    }

    LossEstimate {
        total: contributions.iter().map(|c| c.loss).sum(),
        by_category,
        contributions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topography::NASHIK_TOPOGRAPHY;
    use approx::assert_relative_eq;

    #[test]
    fn test_nothing_flooded_is_zero() {
        let estimate = estimate_loss(&NASHIK_TOPOGRAPHY, Meters::new(585.0), &LossWeights::default());
        assert_eq!(estimate.total, 0.0);
        assert!(estimate.contributions.is_empty());
        assert_eq!(estimate.by_category.len(), LandmarkCategory::ALL.len());
        assert!(estimate.by_category.values().all(|&v| v == 0.0));
    }

    #[test]
    fn test_base_level_loss() {
        // Godavari Bridge: 800k * 2.0 * 1.0, Gangapur Settlement: 220k * 2.5 * 1.0
        let estimate = estimate_loss(&NASHIK_TOPOGRAPHY, Meters::new(590.0), &LossWeights::default());
        assert_relative_eq!(estimate.total, 1_600_000.0 + 550_000.0, epsilon = 1e-6);
        assert_relative_eq!(
            estimate.category(LandmarkCategory::Infrastructure),
            1_600_000.0,
            epsilon = 1e-6
        );
        assert_relative_eq!(
            estimate.category(LandmarkCategory::Residential),
            550_000.0,
            epsilon = 1e-6
        );
        assert_eq!(estimate.category(LandmarkCategory::Agriculture), 0.0);
    }

    #[test]
    fn test_zero_risk_factor_contributes_nothing() {
        // Trimbak Road has risk factor 0 and sits at 610.5 m
        let estimate = estimate_loss(&NASHIK_TOPOGRAPHY, Meters::new(620.0), &LossWeights::default());
        let trimbak = estimate
            .contributions
            .iter()
            .find(|c| c.landmark.id == "trimbak-road")
            .unwrap();
        assert_eq!(*trimbak.depth, 9.5);
        assert_eq!(trimbak.loss, 0.0);
    }

    #[test]
    fn test_category_breakdown_sums_to_total() {
        let estimate = estimate_loss(&NASHIK_TOPOGRAPHY, Meters::new(598.0), &LossWeights::default());
        let sum: f64 = estimate.by_category.values().sum();
        assert_relative_eq!(sum, estimate.total, epsilon = 1e-6);
    }

    #[test]
    fn test_unmapped_category_uses_default_weight() {
        let farm = [Landmark {
            id: "farm",
            name: "Riverside Farm",
            coordinates: crate::core_types::lon_lat(73.8, 20.0),
            elevation_msl: Meters::new(589.0),
            category: LandmarkCategory::Agriculture,
            risk_factor: 0.5,
        }];
        let estimate = estimate_loss(&farm, Meters::new(590.0), &LossWeights::default());
        assert_relative_eq!(estimate.total, 250_000.0 * 1.0 * 0.5, epsilon = 1e-6);
        assert_relative_eq!(
            estimate.category(LandmarkCategory::Agriculture),
            125_000.0,
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_loss_never_decreases_with_level() {
        let weights = LossWeights::default();
        let mut previous = 0.0;
        for step in 0..=40 {
            let wse = 585.0 + f64::from(step) * 0.5;
            let total = estimate_loss(&NASHIK_TOPOGRAPHY, Meters::new(wse), &weights).total;
            assert!(total >= previous, "loss dropped at {wse}");
            previous = total;
        }
    }
}
