//! Concentric flood-zone bands for visual layering
//!
//! The rise between the riverbed and the current level is split into equal
//! bands; each band is drawn as the river extent at its own level and
//! coloured by how far up the rise it sits.

use super::geometry::{river_polygon, RiverPolygon};
use crate::config::RiverConfig;
use crate::core_types::{LonLat, Meters};
use serde_json::{json, Value};

/// Severity colour of a band
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneColor {
    /// Lowest quarter of the rise
    Emerald,
    /// Second quarter
    Blue,
    /// Third quarter
    Amber,
    /// Upper quarter
    Red,
}

impl ZoneColor {
    /// Colour for a severity factor in [0, 1]
    pub fn from_factor(factor: f64) -> Self {
        if factor < 0.25 {
            ZoneColor::Emerald
        } else if factor < 0.5 {
            ZoneColor::Blue
        } else if factor < 0.75 {
            ZoneColor::Amber
        } else {
            ZoneColor::Red
        }
    }

    /// CSS hex string
    pub fn hex(self) -> &'static str {
        match self {
            ZoneColor::Emerald => "#10b981",
            ZoneColor::Blue => "#3b82f6",
            ZoneColor::Amber => "#f59e0b",
            ZoneColor::Red => "#ef4444",
        }
    }
}

/// One band of the flood extent
#[derive(Debug, Clone, PartialEq)]
pub struct FloodZone {
    /// Water level the band is drawn at
    pub level: Meters,
    /// River extent at `level`
    pub extent: RiverPolygon,
    /// Band colour
    pub color: ZoneColor,
    /// Fill opacity in [0.3, 0.7]
    pub opacity: f64,
}

/// Split the rise above the riverbed into `zone_count` bands, lowest first
pub fn flood_zones(river: &RiverConfig, path: &[LonLat], wse: Meters) -> Vec<FloodZone> {
    let depth = (wse - river.riverbed_elevation).non_negative();
    let count = river.zone_count;

    (0..count)
        .map(|i| {
            let factor = (i + 1) as f64 / count as f64;
            let level = river.riverbed_elevation + depth * factor;
            FloodZone {
                level,
                extent: river_polygon(river, path, level),
                color: ZoneColor::from_factor(factor),
                opacity: 0.3 + factor * 0.4,
            }
        })
        .collect()
}

/// GeoJSON `FeatureCollection` of the bands, lowest first
pub fn zones_to_geojson(zones: &[FloodZone]) -> Value {
    let features: Vec<Value> = zones
        .iter()
        .map(|zone| {
            let mut feature = zone.extent.to_geojson();
            feature["properties"]["level_m"] = json!(*zone.level);
            feature["properties"]["color"] = json!(zone.color.hex());
            feature["properties"]["opacity"] = json!(zone.opacity);
            feature
        })
        .collect();
    json!({ "type": "FeatureCollection", "features": features })
}
