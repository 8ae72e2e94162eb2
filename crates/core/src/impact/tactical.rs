//! Field-response status for submerged sites

use crate::config::TacticalConfig;
use crate::core_types::Meters;
use crate::topography::Submersible;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Response a site needs at the current water level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TacticalStatus {
    /// Above water
    Dry = 0,
    /// Under water; clear the site
    Evacuate = 1,
    /// Deep enough that the structure may fail
    StructuralFailureRisk = 2,
}

impl TacticalStatus {
    /// Status for an exact submergence depth (m)
    pub fn from_depth(depth: f64, config: &TacticalConfig) -> Self {
        if depth > config.structural_failure_depth_m {
            TacticalStatus::StructuralFailureRisk
        } else if depth > 0.0 {
            TacticalStatus::Evacuate
        } else {
            TacticalStatus::Dry
        }
    }

    /// Status of any tracked site at `wse`
    pub fn for_site(site: &impl Submersible, wse: Meters, config: &TacticalConfig) -> Self {
        Self::from_depth(*site.submergence(wse), config)
    }

    /// Stable identifier matching the serialized form
    pub fn as_str(self) -> &'static str {
        match self {
            TacticalStatus::Dry => "dry",
            TacticalStatus::Evacuate => "evacuate",
            TacticalStatus::StructuralFailureRisk => "structural-failure-risk",
        }
    }

    /// Convert to u8 for FFI
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for TacticalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pair every site with its status, preserving order
pub fn tactical_assessment<'a, S: Submersible>(
    sites: &'a [S],
    wse: Meters,
    config: &TacticalConfig,
) -> Vec<(&'a S, TacticalStatus)> {
    sites
        .iter()
        .map(|site| (site, TacticalStatus::for_site(site, wse, config)))
        .collect()
}
