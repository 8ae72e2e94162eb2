//! Dashboard state and the monsoon fast-forward scenario
//!
//! The model functions are pure; everything that changes over a session
//! (operator discharge, simulation flags, status badges) lives in
//! [`DashboardState`], owned by whoever drives the model. Each tick of the
//! fast-forward raises discharge and rainfall toward a surge target and
//! reports the threshold crossings it caused.

use crate::catchment::CatchmentSnapshot;
use crate::core_types::{Cusecs, MillimetersPerHour};
use serde::Serialize;
use std::fmt;
use tracing::info;

/// Discharge the fast-forward climbs to
pub const TARGET_CUSECS: Cusecs = Cusecs::new(85_000.0);
/// Rainfall the fast-forward climbs to (mm/hr)
pub const TARGET_RAIN: f64 = 45.0;
/// Discharge added per tick at 1x
pub const STEP_CUSECS: f64 = 1_500.0;
/// Rainfall added per tick at 1x (mm/hr)
pub const STEP_RAIN: f64 = 1.0;

/// Crossing this raises the alert
pub const ALERT_TRIGGER: Cusecs = Cusecs::new(30_000.0);
/// Crossing this closes the bridge and goes critical
pub const BRIDGE_TRIGGER: Cusecs = Cusecs::new(60_000.0);
/// Crossing this injects high-priority SOS reports
pub const SOS_TRIGGER: Cusecs = Cusecs::new(75_000.0);

/// Bridge announced closed by the bridge trigger
pub const SIMULATED_BRIDGE_CLOSURE: &str = "Victoria Bridge";
/// Reports injected by the SOS trigger
pub const SIMULATED_SOS_REPORTS: usize = 3;

/// Header badge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SystemStatus {
    /// Live telemetry
    Live,
    /// Scenario running
    Simulation,
    /// Alert threshold crossed
    Alert,
    /// Critical threshold crossed or target reached
    Critical,
}

impl SystemStatus {
    /// Badge text
    pub fn as_str(self) -> &'static str {
        match self {
            SystemStatus::Live => "LIVE",
            SystemStatus::Simulation => "SIMULATION",
            SystemStatus::Alert => "ALERT",
            SystemStatus::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for SystemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Operational posture driving the dashboard theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskPosture {
    /// Routine monitoring
    Active,
    /// Heightened watch
    Alert,
    /// Emergency operations
    Critical,
}

impl RiskPosture {
    /// Stable identifier matching the serialized form
    pub fn as_str(self) -> &'static str {
        match self {
            RiskPosture::Active => "active",
            RiskPosture::Alert => "alert",
            RiskPosture::Critical => "critical",
        }
    }
}

impl fmt::Display for RiskPosture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fast-forward multiplier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum SimulationSpeed {
    /// One step per tick
    #[default]
    X1 = 1,
    /// Two steps per tick
    X2 = 2,
    /// Five steps per tick
    X5 = 5,
}

impl SimulationSpeed {
    /// All selectable speeds
    pub const ALL: [SimulationSpeed; 3] = [SimulationSpeed::X1, SimulationSpeed::X2, SimulationSpeed::X5];

    /// Parse a multiplier
    ///
    /// # Errors
    /// Returns [`ScenarioError::InvalidSpeed`] for anything but 1, 2 or 5.
    pub fn from_multiplier(value: u8) -> Result<Self, ScenarioError> {
        match value {
            1 => Ok(SimulationSpeed::X1),
            2 => Ok(SimulationSpeed::X2),
            5 => Ok(SimulationSpeed::X5),
            other => Err(ScenarioError::InvalidSpeed(other)),
        }
    }

    /// Multiplier applied to each step
    pub fn multiplier(self) -> f64 {
        f64::from(self as u8)
    }
}

/// Where the fast-forward stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RunState {
    /// Not simulating; live data drives the model
    #[default]
    Idle,
    /// Ticking
    Running,
    /// Simulating but frozen; simulated catchment data stays in effect
    Paused,
}

/// Threshold crossing or milestone produced by a tick
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ScenarioEvent {
    /// Discharge passed [`ALERT_TRIGGER`]
    AlertRaised {
        /// Discharge after the tick
        discharge: Cusecs,
    },
    /// Discharge passed [`BRIDGE_TRIGGER`]
    BridgeClosed {
        /// Discharge after the tick
        discharge: Cusecs,
        /// Closed bridge
        bridge: &'static str,
    },
    /// Discharge passed [`SOS_TRIGGER`]
    SosInjected {
        /// Discharge after the tick
        discharge: Cusecs,
        /// Reports added
        reports: usize,
    },
    /// Discharge reached [`TARGET_CUSECS`]; the run pauses
    TargetReached {
        /// Discharge after the tick
        discharge: Cusecs,
    },
}

impl fmt::Display for ScenarioEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScenarioEvent::AlertRaised { discharge } => {
                write!(f, "Simulation threshold: {discharge} > 30,000 (alert)")
            }
            ScenarioEvent::BridgeClosed { bridge, .. } => {
                write!(f, "Bridge closure: {bridge} submerged")
            }
            ScenarioEvent::SosInjected { reports, .. } => {
                write!(f, "Critical SOS injection: {reports} high-priority SOS triggered")
            }
            ScenarioEvent::TargetReached { discharge } => {
                write!(f, "Surge target reached at {discharge}")
            }
        }
    }
}

/// Errors from driving the scenario
#[derive(Debug, Clone, PartialEq)]
pub enum ScenarioError {
    /// Speed other than 1, 2 or 5
    InvalidSpeed(u8),
    /// Tick requested while the run is idle or paused
    NotRunning(RunState),
}

impl fmt::Display for ScenarioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScenarioError::InvalidSpeed(v) => {
                write!(f, "Invalid simulation speed {v}x (expected 1, 2 or 5)")
            }
            ScenarioError::NotRunning(state) => {
                write!(f, "Cannot tick: simulation is {state:?}")
            }
        }
    }
}

impl std::error::Error for ScenarioError {}

/// Which one-shot thresholds have fired in the current run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Triggers {
    /// Alert fired
    pub alert: bool,
    /// Bridge closure fired
    pub bridge: bool,
    /// SOS injection fired
    pub sos: bool,
}

/// Session state owned by the orchestrator
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardState {
    /// Primary dam outflow driving the river model
    pub discharge: Cusecs,
    /// Fast-forward progress
    pub run_state: RunState,
    /// Fast-forward multiplier
    pub speed: SimulationSpeed,
    /// Header badge
    pub system_status: SystemStatus,
    /// Dashboard theme posture
    pub risk_posture: RiskPosture,
    /// Rainfall injected by the scenario, `None` when not simulating
    pub simulated_rainfall: Option<MillimetersPerHour>,
    /// One-shot thresholds already fired
    pub triggers: Triggers,
    max_discharge: Cusecs,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new(Cusecs::new(100_000.0))
    }
}

impl DashboardState {
    /// Baseline state: gates closed, live telemetry, alert posture
    pub fn new(max_discharge: Cusecs) -> Self {
        Self {
            discharge: Cusecs::ZERO,
            run_state: RunState::Idle,
            speed: SimulationSpeed::X1,
            system_status: SystemStatus::Live,
            risk_posture: RiskPosture::Alert,
            simulated_rainfall: None,
            triggers: Triggers::default(),
            max_discharge,
        }
    }

    /// True from start until reset, including while paused
    pub fn is_simulating(&self) -> bool {
        self.run_state != RunState::Idle
    }

    /// Operator-set discharge, clamped to the gauge range
    pub fn set_discharge(&mut self, discharge: Cusecs) {
        self.discharge = discharge.clamp_to(Cusecs::ZERO, self.max_discharge);
    }

    /// Change the fast-forward multiplier; takes effect on the next tick
    pub fn set_speed(&mut self, speed: SimulationSpeed) {
        self.speed = speed;
    }

    /// Start a fresh run, or resume a paused one
    pub fn start(&mut self) {
        match self.run_state {
            RunState::Idle => {
                self.triggers = Triggers::default();
                self.system_status = SystemStatus::Simulation;
                self.simulated_rainfall = Some(MillimetersPerHour::ZERO);
                info!("Simulation started at {}x", self.speed as u8);
            }
            RunState::Paused => {
                info!("Simulation resumed at {}", self.discharge);
            }
            RunState::Running => return,
        }
        self.run_state = RunState::Running;
    }

    /// Freeze the run; simulated rainfall stays in effect
    pub fn pause(&mut self) {
        if self.run_state == RunState::Running {
            self.run_state = RunState::Paused;
            info!("Simulation paused at {}", self.discharge);
        }
    }

    /// Restore the baseline
    pub fn reset(&mut self) {
        *self = Self::new(self.max_discharge);
        info!("Simulation reset to baseline");
    }

    /// Share of the surge target reached, 0 to 100
    pub fn progress(&self) -> f64 {
        (*self.discharge / *TARGET_CUSECS * 100.0).min(100.0)
    }

    /// Advance the fast-forward by one step
    ///
    /// Each threshold fires at most once per run. Reaching the target pauses
    /// the run with critical status.
    ///
    /// # Errors
    /// Returns [`ScenarioError::NotRunning`] unless the run is active.
    pub fn tick(&mut self) -> Result<Vec<ScenarioEvent>, ScenarioError> {
        if self.run_state != RunState::Running {
            return Err(ScenarioError::NotRunning(self.run_state));
        }

        let step = self.speed.multiplier();
        let next = (self.discharge + Cusecs::new(STEP_CUSECS * step)).min(TARGET_CUSECS);
        self.discharge = next;

        let rain = self.simulated_rainfall.map_or(0.0, |r| *r);
        self.simulated_rainfall = Some(MillimetersPerHour::new((rain + STEP_RAIN * step).min(TARGET_RAIN)));

        let mut events = Vec::new();
        if !self.triggers.alert && next > ALERT_TRIGGER {
            self.triggers.alert = true;
            self.risk_posture = RiskPosture::Alert;
            self.system_status = SystemStatus::Alert;
            events.push(ScenarioEvent::AlertRaised { discharge: next });
        }
        if !self.triggers.bridge && next > BRIDGE_TRIGGER {
            self.triggers.bridge = true;
            self.risk_posture = RiskPosture::Critical;
            self.system_status = SystemStatus::Critical;
            events.push(ScenarioEvent::BridgeClosed {
                discharge: next,
                bridge: SIMULATED_BRIDGE_CLOSURE,
            });
        }
        if !self.triggers.sos && next > SOS_TRIGGER {
            self.triggers.sos = true;
            events.push(ScenarioEvent::SosInjected {
                discharge: next,
                reports: SIMULATED_SOS_REPORTS,
            });
        }
        if next >= TARGET_CUSECS {
            self.run_state = RunState::Paused;
            self.system_status = SystemStatus::Critical;
            events.push(ScenarioEvent::TargetReached { discharge: next });
        }

        for event in &events {
            info!("{}", event);
        }
        Ok(events)
    }

    /// Catchment data the model should see
    ///
    /// While simulating, the live snapshot's current reading is replaced by
    /// the scenario rainfall.
    pub fn catchment(&self, live: &CatchmentSnapshot) -> CatchmentSnapshot {
        match self.simulated_rainfall {
            Some(rain) if self.is_simulating() => live.with_simulated_rainfall(rain),
            _ => live.clone(),
        }
    }
}
