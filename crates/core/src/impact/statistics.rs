//! Aggregate flood statistics over a set of impacts

use super::assessor::FloodImpact;
use crate::core_types::Meters;
use crate::topography::LandmarkCategory;
use serde::Serialize;

/// Region-wide summary of a flood assessment
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FloodStatistics<'a> {
    /// Number of assessed landmarks
    pub total_landmarks: usize,
    /// Landmarks under water
    pub flooded_count: usize,
    /// Flooded landmarks in the severe or critical tier
    pub critical_count: usize,
    /// `flooded_count / total_landmarks` as a whole percentage (0 when nothing is tracked)
    pub inundation_percentage: u32,
    /// Deepest submergence among flooded landmarks (0 when nothing is flooded)
    pub max_submergence_depth: Meters,
    /// Flooded residential landmarks
    pub population_at_risk: usize,
    /// Names of flooded landmarks, in registry order
    pub affected_areas: Vec<&'a str>,
    /// Names of severe/critical landmarks, in registry order
    pub critical_assets: Vec<&'a str>,
}

impl<'a> FloodStatistics<'a> {
    /// Summarize a list of impacts
    pub fn from_impacts(impacts: &[FloodImpact<'a>]) -> Self {
        let total_landmarks = impacts.len();
        let flooded: Vec<&FloodImpact<'a>> = impacts.iter().filter(|i| i.is_flooded).collect();
        let critical: Vec<&FloodImpact<'a>> = flooded
            .iter()
            .copied()
            .filter(|i| i.risk_level.is_critical_tier())
            .collect();

        let max_submergence_depth = flooded
            .iter()
            .map(|i| i.submergence_depth)
            .max()
            .unwrap_or(Meters::ZERO);

        Self {
            total_landmarks,
            flooded_count: flooded.len(),
            critical_count: critical.len(),
            inundation_percentage: percentage(flooded.len(), total_landmarks),
            max_submergence_depth,
            population_at_risk: flooded
                .iter()
                .filter(|i| i.landmark.category == LandmarkCategory::Residential)
                .count(),
            affected_areas: flooded.iter().map(|i| i.landmark.name).collect(),
            critical_assets: critical.iter().map(|i| i.landmark.name).collect(),
        }
    }
}

/// Whole-number share of `part` in `total`; an empty total yields 0
fn percentage(part: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (part as f64 / total as f64 * 100.0).round() as u32
}
