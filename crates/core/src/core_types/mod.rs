//! Core types and utilities

pub mod units;

pub use units::*;

/// Geographic coordinate as (longitude, latitude) in degrees.
pub type LonLat = geo::Coord<f64>;

/// Build a [`LonLat`] from a `[lon, lat]` pair.
#[inline]
pub const fn lon_lat(lon: f64, lat: f64) -> LonLat {
    geo::Coord { x: lon, y: lat }
}
