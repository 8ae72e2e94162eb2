use clap::Parser;
use flood_sim_core::dams::stressed_dams;
use flood_sim_core::hydrograph::countdown;
use flood_sim_core::river::zones_to_geojson;
use flood_sim_core::scenario::{RunState, SimulationSpeed, SIMULATED_SOS_REPORTS};
use flood_sim_core::{
    CatchmentSnapshot, Cusecs, DashboardState, FloodModel, FloodModelConfig, Meters,
    MillimetersPerHour, Percent, SitrepContext,
};
use std::error::Error;
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Flood impact dashboard in the terminal
#[derive(Parser, Debug)]
#[command(name = "flood-sim-demo")]
#[command(about = "Godavari flood impact model for Nashik", long_about = None)]
struct Args {
    /// Dam release in cusecs for a single snapshot
    #[arg(short, long, default_value_t = 35_000.0)]
    discharge: f64,

    /// Catchment rainfall in mm/hr
    #[arg(short, long, default_value_t = 4.2)]
    rain: f64,

    /// Reservoir storage in % (defaults to the primary dam)
    #[arg(short, long)]
    storage: Option<f64>,

    /// Run the monsoon fast-forward instead of a single snapshot
    #[arg(short, long)]
    fast_forward: bool,

    /// Fast-forward speed multiplier (1, 2 or 5)
    #[arg(long, default_value_t = 1)]
    speed: u8,

    /// Print a table row every N ticks during fast-forward
    #[arg(long, default_value_t = 5)]
    report_interval: usize,

    /// JSON model configuration (defaults to the built-in calibration)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the flood zones as a GeoJSON FeatureCollection
    #[arg(long)]
    geojson: bool,

    /// Incident identifier for the situation report
    #[arg(long, default_value = "NSK-FLOOD-01")]
    incident: String,

    /// Timestamp printed on the situation report
    #[arg(long, default_value = "00:00 IST")]
    timestamp: String,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    if let Err(e) = run(&args) {
        error!("{e}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let loaded;
    let model = match &args.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)?;
            loaded = FloodModel::new(FloodModelConfig::from_json_str(&json)?)?;
            info!("Loaded configuration from {}", path.display());
            &loaded
        }
        None => FloodModel::nashik(),
    };

    println!("=== Godavari Flood Impact Model ===\n");

    let storage = match args.storage {
        Some(s) => Percent::new(s),
        None => model.primary_dam().map_or(Percent::new(0.0), |d| d.storage),
    };
    if let Some(dam) = model.primary_dam() {
        println!(
            "Primary dam: {} (storage {}, release {}, {})",
            dam.name,
            dam.storage,
            dam.discharge,
            dam.risk()
        );
    }
    for dam in stressed_dams(model.dams()) {
        println!("  {} at {} ({})", dam.name, dam.storage, dam.risk());
    }
    println!("Safe ceiling: {}\n", model.safe_ceiling());

    let live = CatchmentSnapshot::from_observation(args.rain, "Observed catchment rainfall", &[]);

    let mut state = DashboardState::new(model.config().hydro.max_discharge);
    if args.fast_forward {
        state.set_speed(SimulationSpeed::from_multiplier(args.speed)?);
        run_fast_forward(model, &mut state, args.report_interval.max(1))?;
    } else {
        state.set_discharge(Cusecs::new(args.discharge));
    }

    let catchment = state.catchment(&live);
    print_impact(model, state.discharge);
    print_advisory(model, catchment.current_rainfall, storage);
    print_hydrograph(model, &catchment, state.discharge);

    let context = SitrepContext {
        incident_id: args.incident.clone(),
        timestamp: args.timestamp.clone(),
        discharge: state.discharge,
        rainfall: catchment.current_rainfall,
        posture: state.risk_posture,
        active_sos: if state.triggers.sos { SIMULATED_SOS_REPORTS } else { 0 },
    };
    println!("\n--- Situation Report ---");
    println!("{}", model.sitrep(&context));

    if args.geojson {
        let wse = model.calculate_wse(state.discharge);
        println!("\n{}", serde_json::to_string_pretty(&zones_to_geojson(&model.flood_zones(wse)))?);
    }

    Ok(())
}

fn run_fast_forward(
    model: &FloodModel,
    state: &mut DashboardState,
    report_interval: usize,
) -> Result<(), Box<dyn Error>> {
    println!("Running monsoon fast-forward at {}x...\n", state.speed.multiplier());
    println!("Tick | Discharge(cusecs) | WSE(m) | Flooded | Critical | Loss");
    println!("-----|-------------------|--------|---------|----------|-------------");

    state.start();
    let mut tick = 0usize;
    while state.run_state == RunState::Running {
        let events = state.tick()?;
        tick += 1;

        if tick % report_interval == 0 || !events.is_empty() {
            let wse = model.calculate_wse(state.discharge);
            let stats = model.calculate_flood_stats(wse);
            let loss = model.estimate_loss(wse);
            println!(
                "{:4} | {:17.0} | {:6.1} | {:7} | {:8} | {:12.0}",
                tick, *state.discharge, *wse, stats.flooded_count, stats.critical_count, loss.total
            );
        }
        for event in events {
            println!("     >> {event}");
        }
    }

    println!("\nFast-forward finished after {tick} ticks ({:.0}% of target)", state.progress());
    println!("Status: {}, posture: {}\n", state.system_status, state.risk_posture);
    Ok(())
}

fn print_impact(model: &FloodModel, discharge: Cusecs) {
    let wse = model.calculate_wse(discharge);
    let stats = model.calculate_flood_stats(wse);
    let loss = model.estimate_loss(wse);

    println!("--- Impact at {discharge} ---");
    println!("Water surface: {wse} MSL");
    println!(
        "Flooded: {}/{} ({}%), critical: {}, max depth: {}",
        stats.flooded_count,
        stats.total_landmarks,
        stats.inundation_percentage,
        stats.critical_count,
        stats.max_submergence_depth
    );
    println!(
        "Evacuation zones: {}, population at risk: {} residential sites",
        stats.flooded_count, stats.population_at_risk
    );

    let impacts = model.assess_flood_impact(wse);
    for (impact, (_, tactical)) in impacts
        .iter()
        .zip(model.tactical_assessment(wse))
        .filter(|(i, _)| i.is_flooded)
    {
        println!(
            "  {:<30} {:>8} {:<9} {}",
            impact.landmark.name, impact.submergence_depth, impact.risk_level, tactical
        );
    }

    println!("Estimated loss: {:.0}", loss.total);
    for (category, value) in &loss.by_category {
        if *value > 0.0 {
            println!("  {category:<15} {value:>14.0}");
        }
    }

    println!("Bridges:");
    for (bridge, status) in model.bridge_statuses(wse) {
        println!("  {:<24} {:>10} {}", bridge.name, bridge.elevation_msl, status);
    }
    let shelters: Vec<&str> = model.reachable_shelters(wse).iter().map(|s| s.name).collect();
    println!("Reachable shelters: {}", list_or_none(&shelters));
    println!("River width: {}\n", model.river_polygon(wse).width);
}

fn print_advisory(model: &FloodModel, rainfall: MillimetersPerHour, storage: Percent) {
    let rec = model.recommend_discharge(rainfall, storage);
    println!("--- Release Advisory ({rainfall}, storage {storage}) ---");
    println!("Recommended: {} [{}]", rec.cusecs, rec.classification);
    println!("Demand: {}, safe ceiling: {}", rec.demand, rec.safe_ceiling);
    println!(
        "Preview: {} -> {}, {} newly flooded, +{:.0} loss",
        rec.preview.baseline_wse,
        rec.preview.recommended_wse,
        rec.preview.newly_flooded,
        rec.preview.incremental_loss
    );
    println!("{}\n", rec.reasoning);
}

fn print_hydrograph(model: &FloodModel, catchment: &CatchmentSnapshot, discharge: Cusecs) {
    let graph = model.hydrograph(catchment, discharge);
    println!("--- Hydrograph ({}) ---", catchment.description);
    if let Some(reason) = catchment.fallback {
        println!("Using fallback rainfall: {reason}");
    }
    for (name, point) in [
        ("Peak", graph.peak()),
        ("Intersection", graph.intersection()),
        ("Recession", graph.recession()),
    ] {
        let at = point.map_or_else(|| "-".to_string(), |p| format!("{} ({})", p.label(), p.inflow));
        println!("{name:<13} {at:<24} {}", countdown(point));
    }
    if graph.exceeds_capacity() {
        println!("Inflow exceeds river capacity within the window");
    }
    let peak_wse: Meters = graph
        .peak()
        .map_or(Meters::new(0.0), |p| model.calculate_wse(p.inflow));
    println!("Peak inflow would raise the river to {peak_wse}");
}

fn list_or_none(names: &[&str]) -> String {
    if names.is_empty() {
        "none".to_string()
    } else {
        names.join(", ")
    }
}
