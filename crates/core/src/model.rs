//! Configured model bundling constants and static registries
//!
//! Every method is a pure derivation from its arguments plus the bundled
//! configuration, so a `FloodModel` can be shared freely between threads.

use crate::catchment::CatchmentSnapshot;
use crate::config::{ConfigError, FloodModelConfig};
use crate::core_types::{Cusecs, LonLat, Meters, MillimetersPerHour, Percent};
use crate::dams::{primary_dam, Dam, DAM_REGISTRY};
use crate::hydro::water_surface_elevation;
use crate::hydrograph::Hydrograph;
use crate::impact::{
    assess_flood_impact, estimate_loss, tactical_assessment, FloodImpact, FloodStatistics,
    LossEstimate, TacticalStatus,
};
use crate::optimizer::{recommend_discharge, safe_ceiling, DischargeRecommendation};
use crate::river::{flood_zones, river_polygon, FloodZone, RiverPolygon, GODAVARI_RIVER_PATH};
use crate::sitrep::{SitrepContext, SituationReport};
use crate::topography::{
    bridge_statuses, closed_bridges, reachable_shelters, BridgeStatus, Landmark, Structure,
    BRIDGES, NASHIK_TOPOGRAPHY, SAFE_SHELTERS,
};
use std::sync::OnceLock;

/// Hydrological impact model for one river reach
#[derive(Debug, Clone)]
pub struct FloodModel {
    config: FloodModelConfig,
    landmarks: &'static [Landmark],
    bridges: &'static [Structure],
    shelters: &'static [Structure],
    river_path: &'static [LonLat],
    dams: &'static [Dam],
}

impl Default for FloodModel {
    fn default() -> Self {
        Self::with_registries(
            FloodModelConfig::default(),
            &NASHIK_TOPOGRAPHY,
            &BRIDGES,
            &SAFE_SHELTERS,
            &GODAVARI_RIVER_PATH,
            &DAM_REGISTRY,
        )
    }
}

impl FloodModel {
    /// Shared model with reference constants and the Nashik registries
    pub fn nashik() -> &'static FloodModel {
        static MODEL: OnceLock<FloodModel> = OnceLock::new();
        MODEL.get_or_init(FloodModel::default)
    }

    /// Nashik registries with a custom configuration
    ///
    /// # Errors
    /// Returns [`ConfigError::Invalid`] if `config` breaks a model constraint.
    pub fn new(config: FloodModelConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::default()
        })
    }

    /// Model over arbitrary registries; `config` is used as given
    pub fn with_registries(
        config: FloodModelConfig,
        landmarks: &'static [Landmark],
        bridges: &'static [Structure],
        shelters: &'static [Structure],
        river_path: &'static [LonLat],
        dams: &'static [Dam],
    ) -> Self {
        Self {
            config,
            landmarks,
            bridges,
            shelters,
            river_path,
            dams,
        }
    }

    /// Active configuration
    pub fn config(&self) -> &FloodModelConfig {
        &self.config
    }

    /// Landmark registry
    pub fn landmarks(&self) -> &'static [Landmark] {
        self.landmarks
    }

    /// Bridge registry
    pub fn bridges(&self) -> &'static [Structure] {
        self.bridges
    }

    /// Dam registry
    pub fn dams(&self) -> &'static [Dam] {
        self.dams
    }

    /// Dam whose release drives the river
    pub fn primary_dam(&self) -> Option<&'static Dam> {
        primary_dam(self.dams)
    }

    /// Water surface elevation for a dam release
    pub fn calculate_wse(&self, discharge: Cusecs) -> Meters {
        water_surface_elevation(&self.config.hydro, discharge)
    }

    /// Per-landmark impact, in registry order
    pub fn assess_flood_impact(&self, wse: Meters) -> Vec<FloodImpact<'static>> {
        assess_flood_impact(self.landmarks, wse, &self.config.thresholds)
    }

    /// Region-wide statistics
    pub fn calculate_flood_stats(&self, wse: Meters) -> FloodStatistics<'static> {
        FloodStatistics::from_impacts(&self.assess_flood_impact(wse))
    }

    /// Economic loss estimate
    pub fn estimate_loss(&self, wse: Meters) -> LossEstimate<'static> {
        estimate_loss(self.landmarks, wse, &self.config.loss_weights)
    }

    /// River extent polygon
    pub fn river_polygon(&self, wse: Meters) -> RiverPolygon {
        river_polygon(&self.config.river, self.river_path, wse)
    }

    /// Concentric flood-zone bands, lowest first
    pub fn flood_zones(&self, wse: Meters) -> Vec<FloodZone> {
        flood_zones(&self.config.river, self.river_path, wse)
    }

    /// Bridges with water over the deck
    pub fn closed_bridges(&self, wse: Meters) -> Vec<&'static Structure> {
        closed_bridges(self.bridges, wse)
    }

    /// Every bridge with its open/danger/closed status
    pub fn bridge_statuses(&self, wse: Meters) -> Vec<(&'static Structure, BridgeStatus)> {
        bridge_statuses(self.bridges, wse, self.config.tactical.bridge_danger_margin_m)
    }

    /// Shelters still above water
    pub fn reachable_shelters(&self, wse: Meters) -> Vec<&'static Structure> {
        reachable_shelters(self.shelters, wse)
    }

    /// Field-response status of every landmark, in registry order
    pub fn tactical_assessment(&self, wse: Meters) -> Vec<(&'static Landmark, TacticalStatus)> {
        tactical_assessment(self.landmarks, wse, &self.config.tactical)
    }

    /// Largest release that keeps every currently-dry site dry
    pub fn safe_ceiling(&self) -> Cusecs {
        safe_ceiling(&self.config, self.landmarks, self.bridges)
    }

    /// Advisory release for the catchment and reservoir state
    pub fn recommend_discharge(
        &self,
        rainfall: MillimetersPerHour,
        storage: Percent,
    ) -> DischargeRecommendation {
        recommend_discharge(&self.config, self.landmarks, self.bridges, rainfall, storage)
    }

    /// Inflow/outflow series for a catchment snapshot
    pub fn hydrograph(&self, catchment: &CatchmentSnapshot, discharge: Cusecs) -> Hydrograph {
        Hydrograph::from_snapshot(catchment, discharge)
    }

    /// Situation report for a snapshot
    pub fn sitrep(&self, context: &SitrepContext) -> SituationReport<'static> {
        SituationReport::compile(&self.config, self.landmarks, self.bridges, context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RiskThresholds;
    use crate::impact::RiskLevel;

    #[test]
    fn test_shared_model_uses_reference_constants() {
        let model = FloodModel::nashik();
        assert_eq!(model.config(), &FloodModelConfig::default());
        assert_eq!(model.landmarks().len(), 10);
        assert_eq!(model.primary_dam().map(|d| d.id), Some("gangapur"));
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let mut config = FloodModelConfig::default();
        config.thresholds = RiskThresholds {
            alert: 2.0,
            severe: 1.0,
            critical: 5.0,
        };
        assert!(FloodModel::new(config).is_err());
    }

    #[test]
    fn test_custom_thresholds_flow_through() {
        let mut config = FloodModelConfig::default();
        config.thresholds.critical = 4.0;
        let model = FloodModel::new(config).unwrap();

        // Godavari Bridge at 4.8 m is severe by default, critical here
        let wse = model.calculate_wse(Cusecs::new(35_000.0));
        let bridge = model
            .assess_flood_impact(wse)
            .into_iter()
            .find(|i| i.landmark.id == "godavari-bridge")
            .unwrap();
        assert_eq!(bridge.risk_level, RiskLevel::Critical);
    }

    #[test]
    fn test_structures_at_surge() {
        let model = FloodModel::nashik();
        let wse = model.calculate_wse(Cusecs::new(100_000.0));
        assert_eq!(*wse, 598.0);
        assert_eq!(model.closed_bridges(wse).len(), 2);
        assert_eq!(model.reachable_shelters(wse).len(), 3);
    }

    #[test]
    fn test_bridge_margin_from_config() {
        let mut config = FloodModelConfig::default();
        config.tactical.bridge_danger_margin_m = 0.0;
        let model = FloodModel::new(config).unwrap();
        let wse = Meters::new(591.8);

        let victoria = |statuses: Vec<(&Structure, BridgeStatus)>| {
            statuses.into_iter().find(|(b, _)| b.id == "victoria").map(|(_, s)| s)
        };
        assert_eq!(victoria(FloodModel::nashik().bridge_statuses(wse)), Some(BridgeStatus::Danger));
        assert_eq!(victoria(model.bridge_statuses(wse)), Some(BridgeStatus::Open));
    }

    #[test]
    fn test_tactical_follows_registry_order() {
        let model = FloodModel::nashik();
        let statuses = model.tactical_assessment(Meters::new(590.0));
        assert_eq!(statuses.len(), model.landmarks().len());
        // Godavari Bridge 2.0 m deep, Gangapur 2.5 m deep
        assert_eq!(statuses[4].1, TacticalStatus::StructuralFailureRisk);
        assert_eq!(statuses[6].1, TacticalStatus::StructuralFailureRisk);
        assert_eq!(statuses[2].1, TacticalStatus::Dry);
    }
}
