//! Static topography registries
//!
//! Everything here is loaded once and never mutated: landmarks with their
//! surveyed elevations, bridges and shelters, and the capability trait that
//! lets the assessor and optimizer treat them uniformly.

pub mod landmarks;
pub mod site;
pub mod structures;

pub use landmarks::{landmark_by_id, Landmark, LandmarkCategory, NASHIK_TOPOGRAPHY};
pub use site::{lowest_dry_elevation, Site, Submersible};
pub use structures::{
    bridge_statuses, closed_bridges, reachable_shelters, BridgeStatus, Structure, StructureKind,
    BRIDGES, SAFE_SHELTERS,
};
