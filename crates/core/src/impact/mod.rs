//! Flood impact assessment
//!
//! Converts a water surface elevation into per-landmark submergence and risk
//! tiers, region-wide statistics, and a depth-weighted loss estimate.
//!
//! # Risk tiers
//!
//! | Submergence depth | Tier       |
//! |-------------------|------------|
//! | 0                 | `Safe`     |
//! | (0, 0.5]          | `Warning`  |
//! | (0.5, 2]          | `Alert`    |
//! | (2, 5]            | `Severe`   |
//! | > 5               | `Critical` |
//!
//! Tiers and the flood flag are decided on the exact depth; reported depths
//! are rounded to centimetres. The `tactical` module adds the field-response
//! view (evacuate, structural failure risk) over any submersible site.

pub mod assessor;
pub mod loss;
pub mod statistics;
pub mod tactical;

pub use assessor::{assess_flood_impact, FloodImpact, RiskLevel};
pub use loss::{estimate_loss, LandmarkLoss, LossEstimate};
pub use statistics::FloodStatistics;
pub use tactical::{tactical_assessment, TacticalStatus};
