//! River geometry for map rendering
//!
//! Independent of the impact assessment: the polygons here only visualise
//! how far the channel spreads at a given level.

pub mod buffer;
pub mod geometry;
pub mod path;
pub mod zones;

pub use buffer::{buffer_polyline, BufferParams};
pub use geometry::{channel_width, river_polygon, RiverPolygon};
pub use path::GODAVARI_RIVER_PATH;
pub use zones::{flood_zones, zones_to_geojson, FloodZone, ZoneColor};
