//! Bridges and safe shelters
//!
//! Structures are tracked separately from landmarks: they carry no land-use
//! category and no loss weight, only an elevation that decides whether they
//! are passable (bridges) or still reachable (shelters).

use crate::core_types::{lon_lat, LonLat, Meters};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of tracked structure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StructureKind {
    /// River crossing; closed once the deck is overtopped
    Bridge,
    /// High-ground evacuation point
    Shelter,
}

/// Passability of a bridge at a water level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BridgeStatus {
    /// Deck well above water
    Open = 0,
    /// Deck dry but within the danger margin
    Danger = 1,
    /// Water over the deck
    Closed = 2,
}

impl BridgeStatus {
    /// Status for a deck at `deck` with water at `wse`
    ///
    /// Water strictly above the deck closes the bridge; a freeboard of at
    /// most `danger_margin` metres (including zero) is dangerous.
    pub fn classify(deck: Meters, wse: Meters, danger_margin: f64) -> Self {
        if wse > deck {
            BridgeStatus::Closed
        } else if *deck - *wse <= danger_margin {
            BridgeStatus::Danger
        } else {
            BridgeStatus::Open
        }
    }

    /// Stable identifier matching the serialized form
    pub fn as_str(self) -> &'static str {
        match self {
            BridgeStatus::Open => "open",
            BridgeStatus::Danger => "danger",
            BridgeStatus::Closed => "closed",
        }
    }

    /// Convert to u8 for FFI
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for BridgeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A bridge deck or shelter floor with a fixed elevation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Structure {
    /// Unique key within its kind
    pub id: &'static str,
    /// Display name
    pub name: &'static str,
    /// Location as (longitude, latitude)
    pub coordinates: LonLat,
    /// Deck or floor elevation above mean sea level
    pub elevation_msl: Meters,
    /// Bridge or shelter
    pub kind: StructureKind,
}

impl Structure {
    const fn new(
        id: &'static str,
        name: &'static str,
        elevation_msl: f64,
        lon: f64,
        lat: f64,
        kind: StructureKind,
    ) -> Self {
        Self {
            id,
            name,
            coordinates: lon_lat(lon, lat),
            elevation_msl: Meters::new(elevation_msl),
            kind,
        }
    }

    /// Whether water at `wse` stands above this structure
    #[inline]
    pub fn is_submerged(&self, wse: Meters) -> bool {
        wse > self.elevation_msl
    }

    /// Bridge passability at `wse` with the given freeboard margin (m)
    pub fn bridge_status(&self, wse: Meters, danger_margin: f64) -> BridgeStatus {
        BridgeStatus::classify(self.elevation_msl, wse, danger_margin)
    }
}

/// Bridges across the Godavari in the city reach
pub static BRIDGES: [Structure; 5] = [
    Structure::new("holkar", "Holkar Bridge", 594.5, 73.8048, 20.0038, StructureKind::Bridge),
    Structure::new("victoria", "Victoria Bridge", 592.0, 73.7998, 20.0053, StructureKind::Bridge),
    Structure::new("amrutdham", "Amrutdham Bridge", 598.0, 73.7870, 20.0062, StructureKind::Bridge),
    Structure::new("nashik-road", "Nashik Road Overpass", 601.5, 73.8100, 20.0010, StructureKind::Bridge),
    Structure::new("dwarka", "Dwarka Flyover", 600.0, 73.7900, 20.0100, StructureKind::Bridge),
];

/// Designated evacuation shelters on high ground
pub static SAFE_SHELTERS: [Structure; 3] = [
    Structure::new("mhasrul", "Mhasrul Shelter", 612.0, 73.7900, 20.0150, StructureKind::Shelter),
    Structure::new("amrutdham", "Amrutdham High Ground", 608.0, 73.7870, 20.0090, StructureKind::Shelter),
    Structure::new("pathardi", "Pathardi Command Post", 615.0, 73.8300, 19.9930, StructureKind::Shelter),
];

/// Bridges whose deck is under water at `wse`, in registry order
pub fn closed_bridges(bridges: &[Structure], wse: Meters) -> Vec<&Structure> {
    bridges.iter().filter(|b| b.is_submerged(wse)).collect()
}

/// Shelters that are still dry at `wse`, in registry order
pub fn reachable_shelters(shelters: &[Structure], wse: Meters) -> Vec<&Structure> {
    shelters.iter().filter(|s| !s.is_submerged(wse)).collect()
}

/// Every bridge paired with its status at `wse`, in registry order
pub fn bridge_statuses(
    bridges: &[Structure],
    wse: Meters,
    danger_margin: f64,
) -> Vec<(&Structure, BridgeStatus)> {
    bridges
        .iter()
        .map(|b| (b, b.bridge_status(wse, danger_margin)))
        .collect()
}
