//! End-to-end flood scenarios over the Nashik registries
//!
//! These tests drive the full pipeline (discharge, elevation, impact,
//! statistics, loss, river geometry, advisory) the way a dashboard would.

use approx::assert_relative_eq;
use flood_sim_core::config::LossWeights;
use flood_sim_core::impact::estimate_loss;
use flood_sim_core::river::channel_width;
use flood_sim_core::scenario::RunState;
use flood_sim_core::topography::{Landmark, LandmarkCategory};
use flood_sim_core::{
    CatchmentSnapshot, Cusecs, DashboardState, FloodModel, LonLat, Meters, MillimetersPerHour,
    Percent, ReleaseClass, RiskLevel, ScenarioEvent,
};
use geo::Area;

#[ctor::ctor]
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn impact_for(model: &FloodModel, wse: Meters, id: &str) -> flood_sim_core::FloodImpact<'static> {
    model
        .assess_flood_impact(wse)
        .into_iter()
        .find(|i| i.landmark.id == id)
        .expect("landmark present in registry")
}

#[test]
fn test_godavari_bridge_at_35000_cusecs() {
    let model = FloodModel::nashik();
    let wse = model.calculate_wse(Cusecs::new(35_000.0));
    assert_eq!(*wse, 592.8);

    let bridge = impact_for(model, wse, "godavari-bridge");
    assert!(bridge.is_flooded);
    assert_relative_eq!(*bridge.submergence_depth, 4.8, epsilon = 1e-9);
    assert_eq!(bridge.risk_level, RiskLevel::Severe);
}

#[test]
fn test_trimbak_road_dry_at_zero_discharge() {
    let model = FloodModel::nashik();
    let wse = model.calculate_wse(Cusecs::ZERO);
    assert_eq!(*wse, 590.0);

    let road = impact_for(model, wse, "trimbak-road");
    assert!(!road.is_flooded);
    assert_eq!(road.submergence_depth, Meters::ZERO);
    assert_eq!(road.risk_level, RiskLevel::Safe);
}

#[test]
fn test_gauge_reference_points() {
    let model = FloodModel::nashik();
    let wse = |c: f64| *model.calculate_wse(Cusecs::new(c));
    assert_eq!(wse(0.0), 590.0);
    assert_eq!(wse(10_000.0), 590.8);
    assert_eq!(wse(100_000.0), 598.0);
    assert_eq!(wse(150_000.0), wse(100_000.0));
}

#[test]
fn test_impacts_and_loss_agree_just_above_ground() {
    let model = FloodModel::nashik();
    for wse in [588.004, 590.104, 591.003, 595.301] {
        let wse = Meters::new(wse);
        let flooded: Vec<&str> = model
            .assess_flood_impact(wse)
            .iter()
            .filter(|i| i.is_flooded)
            .map(|i| i.landmark.id)
            .collect();
        let contributors: Vec<&str> = model
            .estimate_loss(wse)
            .contributions
            .iter()
            .map(|c| c.landmark.id)
            .collect();
        assert_eq!(flooded, contributors);
        assert_eq!(model.calculate_flood_stats(wse).flooded_count, flooded.len());
    }
}

#[test]
fn test_flooded_matches_elevation_for_every_landmark() {
    let model = FloodModel::nashik();
    for step in 0..=120 {
        let wse = Meters::new(585.0 + f64::from(step) * 0.25);
        for impact in model.assess_flood_impact(wse) {
            assert_eq!(impact.is_flooded, wse > impact.landmark.elevation_msl);
            assert_eq!(impact.is_flooded, *impact.submergence_depth > 0.0);
            assert_eq!(impact.risk_level == RiskLevel::Safe, !impact.is_flooded);
        }
    }
}

#[test]
fn test_flooded_count_is_monotonic() {
    let model = FloodModel::nashik();
    let mut previous = 0;
    for cusecs in (0..=100_000).step_by(2_500) {
        let wse = model.calculate_wse(Cusecs::new(f64::from(cusecs)));
        let stats = model.calculate_flood_stats(wse);
        assert!(stats.flooded_count >= previous);
        assert!(stats.flooded_count <= stats.total_landmarks);
        previous = stats.flooded_count;
    }
}

#[test]
fn test_risk_boundaries_fall_to_lower_tier() {
    let model = FloodModel::nashik();
    // Ram Kund sits at 592.5 m
    let tier = |wse: f64| impact_for(model, Meters::new(wse), "ram-kund").risk_level;
    assert_eq!(tier(593.0), RiskLevel::Warning);
    assert_eq!(tier(593.01), RiskLevel::Alert);
    assert_eq!(tier(594.5), RiskLevel::Alert);
    assert_eq!(tier(594.51), RiskLevel::Severe);
    assert_eq!(tier(597.5), RiskLevel::Severe);
    assert_eq!(tier(597.51), RiskLevel::Critical);
}

#[test]
fn test_assessment_is_idempotent() {
    let model = FloodModel::nashik();
    let wse = Meters::new(594.3);
    assert_eq!(model.assess_flood_impact(wse), model.assess_flood_impact(wse));
    assert_eq!(model.estimate_loss(wse), model.estimate_loss(wse));
}

#[test]
fn test_zero_risk_factor_never_costs() {
    static EXPOSED: [Landmark; 1] = [Landmark {
        id: "embankment",
        name: "Embankment",
        coordinates: LonLat { x: 73.8, y: 20.0 },
        elevation_msl: Meters::new(580.0),
        category: LandmarkCategory::Infrastructure,
        risk_factor: 0.0,
    }];
    for wse in [581.0, 590.0, 598.0] {
        let loss = estimate_loss(&EXPOSED, Meters::new(wse), &LossWeights::default());
        assert_eq!(loss.total, 0.0);
    }
}

#[test]
fn test_loss_breakdown_lists_every_category() {
    let model = FloodModel::nashik();
    let loss = model.estimate_loss(Meters::new(596.0));
    assert_eq!(loss.by_category.len(), LandmarkCategory::ALL.len());
    assert_eq!(loss.category(LandmarkCategory::Agriculture), 0.0);
    let sum: f64 = loss.by_category.values().sum();
    assert_relative_eq!(sum, loss.total, epsilon = 1e-6);
}

#[test]
fn test_river_polygon_width_response() {
    let model = FloodModel::nashik();
    let river = &model.config().river;

    let bed = model.river_polygon(Meters::new(585.0));
    let below = model.river_polygon(Meters::new(575.0));
    assert_eq!(bed.polygon, below.polygon);
    assert_eq!(*channel_width(river, Meters::new(575.0)), river.normal_width_m);

    let saturated = model.river_polygon(Meters::new(600.0));
    let beyond = model.river_polygon(Meters::new(605.0));
    assert_eq!(saturated.polygon, beyond.polygon);

    let mid = model.river_polygon(Meters::new(592.8));
    assert!(mid.polygon.unsigned_area() > bed.polygon.unsigned_area());
    assert!(saturated.polygon.unsigned_area() > mid.polygon.unsigned_area());

    let ring = mid.coordinates();
    assert_eq!(ring.first(), ring.last());
}

#[test]
fn test_advisory_preview_tracks_flooding() {
    let model = FloodModel::nashik();
    let rec = model.recommend_discharge(MillimetersPerHour::new(40.0), Percent::new(96.0));
    assert_eq!(rec.classification, ReleaseClass::Emergency);
    assert!(rec.preview.newly_flooded > 0);
    assert!(rec.preview.recommended_wse > rec.preview.baseline_wse);

    let calm = model.recommend_discharge(MillimetersPerHour::ZERO, Percent::new(60.0));
    assert_eq!(calm.cusecs, Cusecs::ZERO);
    assert_eq!(calm.classification, ReleaseClass::Safe);
}

#[test]
fn test_monsoon_fast_forward_session() {
    let model = FloodModel::nashik();
    let live = CatchmentSnapshot::default();
    let mut state = DashboardState::default();
    state.start();

    let mut bridge_closed_at = None;
    while state.run_state == RunState::Running {
        for event in state.tick().expect("running") {
            if let ScenarioEvent::BridgeClosed { discharge, .. } = event {
                bridge_closed_at = Some(discharge);
            }
        }
        // The core is re-evaluated on each snapshot
        let wse = model.calculate_wse(state.discharge);
        let stats = model.calculate_flood_stats(wse);
        assert!(stats.inundation_percentage <= 100);
    }

    let closed_at = bridge_closed_at.expect("bridge threshold fires");
    assert!(*closed_at > 60_000.0);

    let wse = model.calculate_wse(state.discharge);
    assert_eq!(*wse, 596.8);
    assert!(model.closed_bridges(wse).iter().any(|b| b.id == "victoria"));

    let catchment = state.catchment(&live);
    assert_eq!(*catchment.current_rainfall, 45.0);
    let rec = model.recommend_discharge(catchment.current_rainfall, Percent::new(67.6));
    assert_eq!(rec.classification, ReleaseClass::Emergency);

    let graph = model.hydrograph(&catchment, state.discharge);
    assert_eq!(graph.points.len(), 24);
}
