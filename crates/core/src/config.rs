//! Model configuration
//!
//! Every tunable constant of the hydrological model lives here so it can be
//! adjusted without touching the formulas. `Default` reproduces the
//! reference calibration for the Nashik gauge exactly; JSON documents only
//! need to name the fields they override.
//!
//! ```
//! use flood_sim_core::config::FloodModelConfig;
//!
//! let config = FloodModelConfig::from_json_str(r#"{ "river": { "normal_width_m": 150.0 } }"#).unwrap();
//! assert_eq!(config.river.normal_width_m, 150.0);
//! assert_eq!(*config.hydro.base_level, 590.0);
//! ```

use crate::core_types::{Cusecs, Meters, Percent};
use crate::topography::LandmarkCategory;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Discharge to water-surface-elevation conversion at the city gauge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HydroConfig {
    /// River level at the gauge with no dam release (m MSL)
    pub base_level: Meters,
    /// Discharge increment that produces one `rise_per_step`
    pub cusecs_per_step: f64,
    /// Rise in level per `cusecs_per_step` of discharge
    pub rise_per_step: Meters,
    /// Discharge cap; larger inputs saturate here
    pub max_discharge: Cusecs,
}

impl Default for HydroConfig {
    fn default() -> Self {
        Self {
            base_level: Meters::new(590.0),
            cusecs_per_step: 10_000.0,
            rise_per_step: Meters::new(0.8),
            max_discharge: Cusecs::new(100_000.0),
        }
    }
}

/// Submergence depths separating the risk tiers
///
/// A depth strictly greater than a threshold enters that tier, so a depth
/// sitting exactly on a boundary stays in the lower tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskThresholds {
    /// Lower bound of `Alert` (m)
    pub alert: f64,
    /// Lower bound of `Severe` (m)
    pub severe: f64,
    /// Lower bound of `Critical` (m)
    pub critical: f64,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            alert: 0.5,
            severe: 2.0,
            critical: 5.0,
        }
    }
}

/// Field-response margins for bridges and structures
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TacticalConfig {
    /// Freeboard at or below which an open bridge is flagged as dangerous (m)
    pub bridge_danger_margin_m: f64,
    /// Submergence beyond which a flooded site risks structural failure (m)
    pub structural_failure_depth_m: f64,
}

impl Default for TacticalConfig {
    fn default() -> Self {
        Self {
            bridge_danger_margin_m: 0.5,
            structural_failure_depth_m: 1.5,
        }
    }
}

/// Channel geometry used to draw the river extent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiverConfig {
    /// Channel width at or below riverbed level (m)
    pub normal_width_m: f64,
    /// Channel width once the rise saturates (m)
    pub max_flood_width_m: f64,
    /// Riverbed elevation (m MSL)
    pub riverbed_elevation: Meters,
    /// Rise above the riverbed at which width stops growing (m)
    pub saturation_depth_m: f64,
    /// Exponent of the width growth curve
    pub width_exponent: f64,
    /// Number of concentric flood-zone bands
    pub zone_count: usize,
    /// Arc segments used for each rounded end cap (0 = flat caps)
    pub cap_segments: usize,
    /// Maximum miter length as a multiple of the half-width before a join is bevelled
    pub miter_limit: f64,
}

impl Default for RiverConfig {
    fn default() -> Self {
        Self {
            normal_width_m: 80.0,
            max_flood_width_m: 1200.0,
            riverbed_elevation: Meters::new(585.0),
            saturation_depth_m: 15.0,
            width_exponent: 1.5,
            zone_count: 5,
            cap_segments: 8,
            miter_limit: 4.0,
        }
    }
}

/// Per-category loss weight table
///
/// Weights are a relative ranking signal, not calibrated rupee values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LossWeights {
    /// Weight per metre of submergence for each mapped category
    pub weights: FxHashMap<LandmarkCategory, f64>,
    /// Weight for categories missing from `weights`
    pub default_weight: f64,
}

impl LossWeights {
    /// Weight for `category`, falling back to the default
    pub fn weight(&self, category: LandmarkCategory) -> f64 {
        self.weights
            .get(&category)
            .copied()
            .unwrap_or(self.default_weight)
    }
}

impl Default for LossWeights {
    fn default() -> Self {
        let mut weights = FxHashMap::default();
        weights.insert(LandmarkCategory::Commercial, 550_000.0);
        weights.insert(LandmarkCategory::Residential, 220_000.0);
        weights.insert(LandmarkCategory::Infrastructure, 800_000.0);
        weights.insert(LandmarkCategory::SacredSite, 350_000.0);
        weights.insert(LandmarkCategory::Cultural, 300_000.0);
        Self {
            weights,
            default_weight: 250_000.0,
        }
    }
}

/// Extra release allowance once reservoir storage crosses a threshold
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StorageStep {
    /// Storage level that activates this step
    pub threshold: Percent,
    /// Additional cusecs added on top of lower steps
    pub extra: Cusecs,
}

/// Tuning for the discharge advisory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizerConfig {
    /// Cusecs generated per mm/hr of catchment rainfall before losses
    pub runoff_cusecs_per_mm: f64,
    /// Fraction of rainfall that reaches the reservoir as inflow
    pub runoff_coefficient: f64,
    /// Cumulative storage-pressure steps, ascending by threshold
    pub storage_steps: Vec<StorageStep>,
    /// Below this storage a zero-demand advisory holds the gates shut
    pub hold_storage: Percent,
    /// At or above this storage an over-ceiling release is an emergency
    pub emergency_storage: Percent,
    /// Demand above this multiple of the safe ceiling is an emergency
    pub emergency_ceiling_multiple: f64,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            runoff_cusecs_per_mm: 1200.0,
            runoff_coefficient: 0.6,
            storage_steps: vec![
                StorageStep {
                    threshold: Percent::new(85.0),
                    extra: Cusecs::new(5_000.0),
                },
                StorageStep {
                    threshold: Percent::new(90.0),
                    extra: Cusecs::new(10_000.0),
                },
                StorageStep {
                    threshold: Percent::new(95.0),
                    extra: Cusecs::new(15_000.0),
                },
            ],
            hold_storage: Percent::new(80.0),
            emergency_storage: Percent::new(90.0),
            emergency_ceiling_multiple: 3.0,
        }
    }
}

/// Complete model configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FloodModelConfig {
    /// Discharge to elevation conversion
    pub hydro: HydroConfig,
    /// Risk tier boundaries
    pub thresholds: RiskThresholds,
    /// River channel geometry
    pub river: RiverConfig,
    /// Economic loss weights
    pub loss_weights: LossWeights,
    /// Discharge advisory tuning
    pub optimizer: OptimizerConfig,
    /// Bridge and structure response margins
    pub tactical: TacticalConfig,
}

impl FloodModelConfig {
    /// Parse and validate a JSON configuration document
    ///
    /// # Errors
    /// Returns [`ConfigError::Parse`] for malformed JSON and
    /// [`ConfigError::Invalid`] when a value breaks a model constraint.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        debug!("Loaded flood model configuration");
        Ok(config)
    }

    /// Serialize to pretty-printed JSON
    ///
    /// # Errors
    /// Returns [`ConfigError::Serialize`] if serialization fails.
    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))
    }

    /// Check the constraints the formulas rely on
    ///
    /// # Errors
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let h = &self.hydro;
        if !positive(h.cusecs_per_step) {
            return Err(ConfigError::invalid("hydro.cusecs_per_step", "must be finite and positive"));
        }
        if !positive(*h.rise_per_step) {
            return Err(ConfigError::invalid("hydro.rise_per_step", "must be finite and positive"));
        }
        if !non_negative(*h.max_discharge) {
            return Err(ConfigError::invalid("hydro.max_discharge", "must be finite and non-negative"));
        }

        let t = &self.thresholds;
        if !(positive(t.alert) && t.alert < t.severe && t.severe < t.critical) {
            return Err(ConfigError::invalid(
                "thresholds",
                "must satisfy 0 < alert < severe < critical",
            ));
        }

        let r = &self.river;
        if !(positive(r.normal_width_m) && r.normal_width_m <= r.max_flood_width_m) {
            return Err(ConfigError::invalid(
                "river.normal_width_m",
                "must be positive and no wider than max_flood_width_m",
            ));
        }
        if !positive(r.saturation_depth_m) {
            return Err(ConfigError::invalid("river.saturation_depth_m", "must be positive"));
        }
        if !positive(r.width_exponent) {
            return Err(ConfigError::invalid("river.width_exponent", "must be positive"));
        }
        if r.zone_count == 0 {
            return Err(ConfigError::invalid("river.zone_count", "must be at least 1"));
        }
        if !at_least_one(r.miter_limit) {
            return Err(ConfigError::invalid("river.miter_limit", "must be at least 1"));
        }

        let w = &self.loss_weights;
        if !non_negative(w.default_weight) || w.weights.values().any(|&v| !non_negative(v)) {
            return Err(ConfigError::invalid("loss_weights", "weights must be non-negative"));
        }

        let tc = &self.tactical;
        if !non_negative(tc.bridge_danger_margin_m) {
            return Err(ConfigError::invalid(
                "tactical.bridge_danger_margin_m",
                "must be finite and non-negative",
            ));
        }
        if !positive(tc.structural_failure_depth_m) {
            return Err(ConfigError::invalid(
                "tactical.structural_failure_depth_m",
                "must be finite and positive",
            ));
        }

        let o = &self.optimizer;
        if o.storage_steps
            .windows(2)
            .any(|pair| pair[0].threshold >= pair[1].threshold)
        {
            return Err(ConfigError::invalid(
                "optimizer.storage_steps",
                "thresholds must be strictly ascending",
            ));
        }
        if !at_least_one(o.emergency_ceiling_multiple) {
            return Err(ConfigError::invalid(
                "optimizer.emergency_ceiling_multiple",
                "must be at least 1",
            ));
        }

        Ok(())
    }
}

fn positive(v: f64) -> bool {
    v.is_finite() && v > 0.0
}

fn non_negative(v: f64) -> bool {
    v.is_finite() && v >= 0.0
}

fn at_least_one(v: f64) -> bool {
    v.is_finite() && v >= 1.0
}

/// Errors raised while loading configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Document is not valid JSON for the schema
    Parse(String),
    /// Configuration could not be serialized
    Serialize(String),
    /// A value violates a model constraint
    Invalid {
        /// Dotted path of the offending field
        field: &'static str,
        /// What the constraint is
        reason: String,
    },
}

impl ConfigError {
    fn invalid(field: &'static str, reason: &str) -> Self {
        ConfigError::Invalid {
            field,
            reason: reason.to_string(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Parse(msg) => write!(f, "Failed to parse configuration: {msg}"),
            ConfigError::Serialize(msg) => write!(f, "Failed to serialize configuration: {msg}"),
            ConfigError::Invalid { field, reason } => {
                write!(f, "Invalid configuration value {field}: {reason}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert_eq!(FloodModelConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_partial_document_keeps_defaults() {
        let config =
            FloodModelConfig::from_json_str(r#"{ "thresholds": { "critical": 6.0 } }"#).unwrap();
        assert_eq!(config.thresholds.critical, 6.0);
        assert_eq!(config.thresholds.severe, 2.0);
        assert_eq!(config.river, RiverConfig::default());
    }

    #[test]
    fn test_loss_weights_from_json() {
        let config = FloodModelConfig::from_json_str(
            r#"{ "loss_weights": { "weights": { "agriculture": 90000.0 }, "default_weight": 1.0 } }"#,
        )
        .unwrap();
        let w = &config.loss_weights;
        assert_eq!(w.weight(LandmarkCategory::Agriculture), 90_000.0);
        // Unmapped categories fall back to the default
        assert_eq!(w.weight(LandmarkCategory::Commercial), 1.0);
    }

    #[test]
    fn test_default_weight_table() {
        let w = LossWeights::default();
        assert_eq!(w.weight(LandmarkCategory::Infrastructure), 800_000.0);
        assert_eq!(w.weight(LandmarkCategory::Agriculture), 250_000.0);
    }

    #[test]
    fn test_rejects_unordered_thresholds() {
        let err = FloodModelConfig::from_json_str(r#"{ "thresholds": { "severe": 6.0 } }"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "thresholds", .. }));
    }

    #[test]
    fn test_rejects_inverted_widths() {
        let mut config = FloodModelConfig::default();
        config.river.normal_width_m = 2000.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { field: "river.normal_width_m", .. })
        ));
    }

    #[test]
    fn test_parse_error_message() {
        let err = FloodModelConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().starts_with("Failed to parse configuration"));
    }

    #[test]
    fn test_json_round_trip_preserves_config() {
        let config = FloodModelConfig::default();
        let json = config.to_json_string().unwrap();
        assert_eq!(FloodModelConfig::from_json_str(&json).unwrap(), config);
    }

    #[test]
    fn test_tactical_section() {
        let config = FloodModelConfig::from_json_str(
            r#"{ "tactical": { "bridge_danger_margin_m": 1.0 } }"#,
        )
        .unwrap();
        assert_eq!(config.tactical.bridge_danger_margin_m, 1.0);
        assert_eq!(config.tactical.structural_failure_depth_m, 1.5);

        let err = FloodModelConfig::from_json_str(
            r#"{ "tactical": { "structural_failure_depth_m": 0.0 } }"#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid { field: "tactical.structural_failure_depth_m", .. }
        ));
    }
}
