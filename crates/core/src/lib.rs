//! Flood Simulation Core Library
//!
//! Hydrological impact model for the Godavari at Nashik. A dam release in
//! cusecs is converted to a water surface elevation, and that elevation to
//! per-landmark submergence, risk tiers, aggregate statistics, an economic
//! loss estimate and river-extent polygons for map layers.
//!
//! ## Model pipeline
//!
//! - `hydro`: discharge to water surface elevation (linear gauge relationship)
//! - `impact`: submergence, risk classification, statistics and loss
//! - `river`: channel width and buffered river polygons
//! - `optimizer`: advisory dam release from rainfall and storage
//!
//! Supporting modules cover the static registries (`topography`, `dams`),
//! catchment rainfall snapshots and the predictive hydrograph, the
//! fast-forward scenario state, and situation reports.
//!
//! Every derivation is a pure function of its inputs. Session state lives in
//! [`scenario::DashboardState`], owned by the caller.
//!
//! ```
//! use flood_sim_core::{Cusecs, FloodModel, RiskLevel};
//!
//! let model = FloodModel::nashik();
//! let wse = model.calculate_wse(Cusecs::new(35_000.0));
//! assert_eq!(*wse, 592.8);
//!
//! let stats = model.calculate_flood_stats(wse);
//! assert!(stats.flooded_count > 0);
//! let bridge = &model.assess_flood_impact(wse)[4];
//! assert_eq!(bridge.risk_level, RiskLevel::Severe);
//! ```

// Core types and configuration
pub mod config;
pub mod core_types;

// Static registries
pub mod dams;
pub mod topography;

// Hydrological impact model
pub mod hydro;
pub mod impact;
pub mod optimizer;
pub mod river;

// Catchment, forecasting and reporting
pub mod catchment;
pub mod hydrograph;
pub mod model;
pub mod scenario;
pub mod sitrep;

// Re-export core types
pub use config::{ConfigError, FloodModelConfig};
pub use core_types::{Cusecs, LonLat, Meters, MillimetersPerHour, Percent};

// Re-export model types
pub use impact::{FloodImpact, FloodStatistics, LossEstimate, RiskLevel, TacticalStatus};
pub use model::FloodModel;
pub use optimizer::{DischargeRecommendation, ReleaseClass};
pub use river::{FloodZone, RiverPolygon};
pub use topography::{BridgeStatus, Landmark, LandmarkCategory, Structure, Submersible};

// Re-export orchestration types
pub use catchment::{CatchmentSnapshot, FallbackReason};
pub use hydrograph::Hydrograph;
pub use scenario::{DashboardState, ScenarioError, ScenarioEvent};
pub use sitrep::{SitrepContext, SituationReport};
