//! C ABI for the Nashik flood model
//!
//! Every entry point is a pure query over the built-in Nashik registries and
//! default configuration; there is no handle to create or destroy. Functions
//! that can fail return a [`FloodSimErrorCode`] and record a message that
//! `flood_sim_get_last_error` exposes until the next call on the same thread.
//!
//! Variable-length results (landmark impacts, river rings, text) are written
//! into caller buffers. The required length is always reported through
//! `out_len`, so callers can size a buffer from a first call with capacity 0.

mod advisory;
mod error;
mod helpers;
mod impacts;
mod river;

pub use advisory::{
    flood_sim_recommend_discharge, flood_sim_recommendation_reasoning, flood_sim_validate_config,
    ReleaseAdvisory,
};
pub use error::{flood_sim_get_last_error, flood_sim_get_last_error_code, FloodSimErrorCode};
pub use impacts::{
    flood_sim_assess_impacts, flood_sim_calculate_wse, flood_sim_estimate_loss,
    flood_sim_flood_stats, flood_sim_landmark_count, FloodStats, LandmarkImpact, LossBreakdown,
    FLOOD_SIM_CATEGORY_COUNT,
};
pub use river::{flood_sim_channel_width, flood_sim_river_polygon, FloodSimCoord};
