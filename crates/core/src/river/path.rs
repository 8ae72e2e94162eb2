//! Godavari centerline through Nashik
//!
//! Traced west to east from Gangapur Dam, past the ghats and Ram Kund, to
//! the downstream reach. Coordinates are (longitude, latitude).

use crate::core_types::{lon_lat, LonLat};

/// River centerline, upstream first
pub static GODAVARI_RIVER_PATH: [LonLat; 11] = [
    // Gangapur Dam
    lon_lat(73.72, 20.01),
    lon_lat(73.74, 20.005),
    lon_lat(73.76, 20.000),
    // Western edge of the city
    lon_lat(73.775, 19.996),
    lon_lat(73.785, 19.994),
    // Ram Kund and Panchvati
    lon_lat(73.7895, 19.9975),
    // Ghats and bridges
    lon_lat(73.805, 19.9965),
    lon_lat(73.82, 19.995),
    lon_lat(73.85, 19.993),
    // Downstream
    lon_lat(73.88, 19.991),
    lon_lat(73.92, 19.989),
];
