//! Plain-text situation report
//!
//! Summarises one snapshot of the model for the district authority: the
//! hydrological picture, closed infrastructure, shelter status and an
//! advisory tier. Time stamps and incident numbers are supplied by the
//! caller so the report stays a pure function of its inputs.

use crate::config::FloodModelConfig;
use crate::core_types::{Cusecs, Meters, MillimetersPerHour};
use crate::hydro::water_surface_elevation;
use crate::impact::{estimate_loss, TacticalStatus};
use crate::scenario::RiskPosture;
use crate::topography::{bridge_statuses, BridgeStatus, Landmark, LandmarkCategory, Structure};
use serde::Serialize;
use std::fmt;

/// Level at which the upstream situation is treated as critical
pub const UPSTREAM_CRITICAL_WSE: Meters = Meters::new(596.0);

/// Level at which traffic metering and vendor alerts begin
pub const ELEVATED_WSE: Meters = Meters::new(594.0);

/// Recommended response tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Advisory {
    /// Watch and prepare
    Monitor,
    /// Local precautions near the ghats
    Elevated,
    /// Evacuate low-lying zones
    Evacuate,
}

impl Advisory {
    /// Tier for a water level and posture
    pub fn for_conditions(wse: Meters, posture: RiskPosture) -> Self {
        if posture == RiskPosture::Critical || wse >= UPSTREAM_CRITICAL_WSE {
            Advisory::Evacuate
        } else if wse >= ELEVATED_WSE {
            Advisory::Elevated
        } else {
            Advisory::Monitor
        }
    }

    /// Operator instruction text
    pub fn instruction(self) -> &'static str {
        match self {
            Advisory::Evacuate => {
                "Immediate evacuation of low-lying zones. Enforce bridge closures and pre-position NDRF boats."
            }
            Advisory::Elevated => {
                "Maintain traffic metering at Holkar; alert Ram Kund vendors; keep pumps on standby."
            }
            Advisory::Monitor => {
                "Maintain monitoring posture; keep upstream gates under watch; ready public address systems."
            }
        }
    }
}

/// Caller-supplied context for a report
#[derive(Debug, Clone, PartialEq)]
pub struct SitrepContext {
    /// Incident reference printed in the header
    pub incident_id: String,
    /// Local time string printed in the header
    pub timestamp: String,
    /// Primary dam outflow
    pub discharge: Cusecs,
    /// Catchment rainfall
    pub rainfall: MillimetersPerHour,
    /// Dashboard posture
    pub posture: RiskPosture,
    /// Unresolved SOS signals
    pub active_sos: usize,
}

/// Compiled situation report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SituationReport<'a> {
    /// Incident reference
    pub incident_id: String,
    /// Local time string
    pub timestamp: String,
    /// Catchment rainfall
    pub rainfall: MillimetersPerHour,
    /// Water surface elevation
    pub wse: Meters,
    /// Primary dam outflow
    pub discharge: Cusecs,
    /// Posture is critical or the river is at the upstream-critical level
    pub upstream_critical: bool,
    /// Bridges with water over the deck
    pub closed_bridges: Vec<&'a str>,
    /// Open bridges within the danger margin
    pub danger_bridges: Vec<&'a str>,
    /// Landmarks under water
    pub submerged_landmarks: Vec<&'a str>,
    /// Flooded sites deep enough to risk structural failure
    pub structural_risk_sites: Vec<&'a str>,
    /// Flooded residential landmarks
    pub population_at_risk: usize,
    /// Unresolved SOS signals
    pub active_sos: usize,
    /// Estimated loss at this level
    pub estimated_loss: f64,
    /// Response tier
    pub advisory: Advisory,
}

impl<'a> SituationReport<'a> {
    /// Compile a report for one snapshot
    pub fn compile(
        config: &FloodModelConfig,
        landmarks: &'a [Landmark],
        bridges: &'a [Structure],
        context: &SitrepContext,
    ) -> Self {
        let wse = water_surface_elevation(&config.hydro, context.discharge);
        let advisory = Advisory::for_conditions(wse, context.posture);
        let statuses = bridge_statuses(bridges, wse, config.tactical.bridge_danger_margin_m);
        let submerged: Vec<&'a Landmark> =
            landmarks.iter().filter(|l| wse > l.elevation_msl).collect();

        Self {
            incident_id: context.incident_id.clone(),
            timestamp: context.timestamp.clone(),
            rainfall: context.rainfall,
            wse,
            discharge: context.discharge,
            upstream_critical: advisory == Advisory::Evacuate,
            closed_bridges: names_with(&statuses, BridgeStatus::Closed),
            danger_bridges: names_with(&statuses, BridgeStatus::Danger),
            submerged_landmarks: submerged.iter().map(|l| l.name).collect(),
            structural_risk_sites: submerged
                .iter()
                .filter(|l| {
                    TacticalStatus::for_site(**l, wse, &config.tactical)
                        == TacticalStatus::StructuralFailureRisk
                })
                .map(|l| l.name)
                .collect(),
            population_at_risk: submerged
                .iter()
                .filter(|l| l.category == LandmarkCategory::Residential)
                .count(),
            active_sos: context.active_sos,
            estimated_loss: estimate_loss(landmarks, wse, &config.loss_weights).total,
            advisory,
        }
    }

    /// Report body, one entry per line
    pub fn lines(&self) -> Vec<String> {
        let join_or_none = |names: &[&str]| {
            if names.is_empty() {
                "None".to_string()
            } else {
                names.join(", ")
            }
        };
        let shelters = if self.submerged_landmarks.is_empty() {
            "Standby"
        } else {
            "Tapovan + Panchvati Schools"
        };

        vec![
            "GOVERNMENT OF MAHARASHTRA | NASHIK DISTRICT DISASTER MANAGEMENT AUTHORITY".to_string(),
            "OFFICIAL SITUATION REPORT (SITREP)".to_string(),
            format!("Incident ID: {}", self.incident_id),
            format!("Timestamp (IST): {}", self.timestamp),
            String::new(),
            "I. HYDROLOGICAL SUMMARY".to_string(),
            format!("- Rainfall: {}", self.rainfall),
            format!("- Water Surface Elevation: {:.2} m MSL", *self.wse),
            format!("- Discharge (Official): {}", self.discharge),
            format!(
                "- Upstream Critical: {}",
                if self.upstream_critical { "YES" } else { "NO" }
            ),
            String::new(),
            "II. INFRASTRUCTURE IMPACT".to_string(),
            format!(
                "- Closed Bridges ({}): {}",
                self.closed_bridges.len(),
                join_or_none(&self.closed_bridges)
            ),
            format!(
                "- Bridges at Danger ({}): {}",
                self.danger_bridges.len(),
                join_or_none(&self.danger_bridges)
            ),
            format!(
                "- Submerged Landmarks ({}): {}",
                self.submerged_landmarks.len(),
                join_or_none(&self.submerged_landmarks)
            ),
            format!(
                "- Structural Failure Risk: {}",
                join_or_none(&self.structural_risk_sites)
            ),
            format!("- Estimated Loss: Rs {:.0}", self.estimated_loss),
            String::new(),
            "III. PUBLIC SAFETY & RESCUE".to_string(),
            format!("- Active SOS Signals: {}", self.active_sos),
            format!("- Evacuation Zones: {}", self.submerged_landmarks.len()),
            format!("- Population at Risk (residential sites): {}", self.population_at_risk),
            format!("- Shelter Activation: {shelters}"),
            String::new(),
            "IV. STRATEGIC ADVISORY".to_string(),
            format!("- {}", self.advisory.instruction()),
        ]
    }
}

fn names_with<'a>(statuses: &[(&'a Structure, BridgeStatus)], status: BridgeStatus) -> Vec<&'a str> {
    statuses
        .iter()
        .filter(|(_, s)| *s == status)
        .map(|(b, _)| b.name)
        .collect()
}

impl fmt::Display for SituationReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.lines().join("\n"))
    }
}
