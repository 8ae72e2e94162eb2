//! River extent for a given water level

use super::buffer::{buffer_polyline, BufferParams};
use crate::config::RiverConfig;
use crate::core_types::{LonLat, Meters};
use geo::Polygon;
use serde_json::{json, Value};

/// Channel width at `wse`
///
/// Rise above the riverbed is normalised against the saturation depth and
/// pushed through a convex curve, so the channel widens slowly at first and
/// faster as it approaches `max_flood_width_m`. At or below the riverbed the
/// width is `normal_width_m`; beyond the saturation depth it stops growing.
pub fn channel_width(river: &RiverConfig, wse: Meters) -> Meters {
    let depth = (wse - river.riverbed_elevation).non_negative();
    let width_factor = (*depth / river.saturation_depth_m).min(1.0);
    let growth = width_factor.powf(river.width_exponent);
    Meters::new(river.normal_width_m + (river.max_flood_width_m - river.normal_width_m) * growth)
}

/// Closed polygon covering the river at one water level
#[derive(Debug, Clone, PartialEq)]
pub struct RiverPolygon {
    /// Water surface elevation this extent was drawn for
    pub wse: Meters,
    /// Full channel width
    pub width: Meters,
    /// Closed ring of (longitude, latitude) coordinates
    pub polygon: Polygon<f64>,
}

impl RiverPolygon {
    /// Exterior ring coordinates, first equal to last
    pub fn coordinates(&self) -> &[LonLat] {
        &self.polygon.exterior().0
    }

    /// GeoJSON `Feature` for map layers
    pub fn to_geojson(&self) -> Value {
        json!({
            "type": "Feature",
            "properties": {
                "wse_m": *self.wse,
                "width_m": *self.width,
            },
            "geometry": {
                "type": "Polygon",
                "coordinates": [ring_to_json(self.coordinates())],
            },
        })
    }
}

pub(crate) fn ring_to_json(ring: &[LonLat]) -> Vec<[f64; 2]> {
    ring.iter().map(|c| [c.x, c.y]).collect()
}

/// Buffer the centerline by half the channel width at `wse`
pub fn river_polygon(river: &RiverConfig, path: &[LonLat], wse: Meters) -> RiverPolygon {
    let width = channel_width(river, wse);
    let params = BufferParams {
        half_width_m: *width / 2.0,
        cap_segments: river.cap_segments,
        miter_limit: river.miter_limit,
    };
    RiverPolygon {
        wse,
        width,
        polygon: buffer_polyline(path, &params),
    }
}
