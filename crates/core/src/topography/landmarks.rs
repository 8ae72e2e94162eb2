//! Landmark registry for the Nashik reach of the Godavari
//!
//! Ground elevations are surveyed heights above mean sea level. Risk
//! factors describe intrinsic vulnerability independent of water depth
//! (a ghat built into the bank is more exposed than a temple on a plinth at
//! the same height).

use crate::core_types::{lon_lat, LonLat, Meters};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Land-use category of a landmark
///
/// Drives the loss weight used by the economic estimator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LandmarkCategory {
    /// Markets and business districts
    Commercial,
    /// Housing and settlements
    Residential,
    /// Roads, bridges, utilities
    Infrastructure,
    /// Temples, kunds and other places of worship
    SacredSite,
    /// Ghats and heritage assets
    Cultural,
    /// Farmland on the floodplain
    Agriculture,
}

impl LandmarkCategory {
    /// Every category in reporting order
    pub const ALL: [LandmarkCategory; 6] = [
        LandmarkCategory::Commercial,
        LandmarkCategory::Residential,
        LandmarkCategory::Infrastructure,
        LandmarkCategory::SacredSite,
        LandmarkCategory::Cultural,
        LandmarkCategory::Agriculture,
    ];

    /// Stable identifier matching the serialized form
    pub fn as_str(self) -> &'static str {
        match self {
            LandmarkCategory::Commercial => "commercial",
            LandmarkCategory::Residential => "residential",
            LandmarkCategory::Infrastructure => "infrastructure",
            LandmarkCategory::SacredSite => "sacred-site",
            LandmarkCategory::Cultural => "cultural",
            LandmarkCategory::Agriculture => "agriculture",
        }
    }

    /// Human-readable label for report rows
    pub fn label(self) -> &'static str {
        match self {
            LandmarkCategory::Commercial => "Commercial / Markets",
            LandmarkCategory::Residential => "Housing & Property",
            LandmarkCategory::Infrastructure => "Roads & Infrastructure",
            LandmarkCategory::SacredSite => "Heritage & Ghats",
            LandmarkCategory::Cultural => "Cultural Assets",
            LandmarkCategory::Agriculture => "Agriculture",
        }
    }

    /// Convert from u8 for FFI
    #[must_use]
    pub fn from_u8(value: u8) -> Option<Self> {
        Self::ALL.get(usize::from(value)).copied()
    }

    /// Convert to u8 for FFI
    #[must_use]
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for LandmarkCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A static, read-only registry entry with a surveyed ground elevation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Landmark {
    /// Unique key
    pub id: &'static str,
    /// Display name
    pub name: &'static str,
    /// Location as (longitude, latitude)
    pub coordinates: LonLat,
    /// Ground elevation above mean sea level
    pub elevation_msl: Meters,
    /// Land-use category
    pub category: LandmarkCategory,
    /// Intrinsic vulnerability multiplier in [0, 1]
    pub risk_factor: f64,
}

impl Landmark {
    const fn new(
        id: &'static str,
        name: &'static str,
        lon: f64,
        lat: f64,
        elevation_msl: f64,
        category: LandmarkCategory,
        risk_factor: f64,
    ) -> Self {
        Self {
            id,
            name,
            coordinates: lon_lat(lon, lat),
            elevation_msl: Meters::new(elevation_msl),
            category,
            risk_factor,
        }
    }
}

/// Surveyed landmarks along the river through Nashik, in display order
pub static NASHIK_TOPOGRAPHY: [Landmark; 10] = [
    Landmark::new("ram-kund", "Ram Kund", 73.8297, 19.9982, 592.5, LandmarkCategory::SacredSite, 0.95),
    Landmark::new("kalaram-temple", "Kalarama Temple", 73.8276, 19.9988, 598.2, LandmarkCategory::SacredSite, 0.75),
    Landmark::new("tapovan", "Tapovan Area", 73.8190, 20.0010, 590.1, LandmarkCategory::Residential, 0.98),
    Landmark::new("nashik-city-center", "Nashik City Center", 73.7900, 19.9975, 602.3, LandmarkCategory::Commercial, 0.45),
    Landmark::new("godavari-bridge", "Godavari Bridge", 73.8050, 19.9965, 588.0, LandmarkCategory::Infrastructure, 1.0),
    Landmark::new("sundarnarayan-temple", "Sundarnarayan Temple", 73.8320, 20.0005, 605.8, LandmarkCategory::SacredSite, 0.15),
    Landmark::new("gangapur-settlement", "Gangapur Settlement", 73.8140, 19.9950, 587.5, LandmarkCategory::Residential, 1.0),
    Landmark::new("nashik-ghats", "Nashik Ghats (Stepped Banks)", 73.8250, 19.9990, 591.0, LandmarkCategory::Cultural, 0.9),
    Landmark::new("trimbak-road", "Trimbak Road Elevation", 73.7750, 19.9850, 610.5, LandmarkCategory::Infrastructure, 0.0),
    Landmark::new("panchvati-area", "Panchvati (Five Trees)", 73.8160, 20.0025, 595.3, LandmarkCategory::Residential, 0.8),
];

/// Look up a landmark by id
pub fn landmark_by_id(id: &str) -> Option<&'static Landmark> {
    NASHIK_TOPOGRAPHY.iter().find(|l| l.id == id)
}
