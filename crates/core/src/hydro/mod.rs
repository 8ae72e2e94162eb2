//! Hydro-elevation model for the city gauge

pub mod elevation;

pub use elevation::{discharge_for_elevation, max_water_surface_elevation, water_surface_elevation};
