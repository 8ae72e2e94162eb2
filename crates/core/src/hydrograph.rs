//! Predictive inflow/outflow hydrograph
//!
//! A 24-hour window from six hours back to seventeen ahead. Past rainfall is
//! reconstructed by decaying the current reading; the future follows the
//! forecast and then tails off from its last value.

use crate::catchment::CatchmentSnapshot;
use crate::core_types::{Cusecs, MillimetersPerHour};
use serde::Serialize;

/// Hours of history in the window
pub const HOURS_BACK: i32 = 6;

/// Points in the window
pub const TOTAL_POINTS: usize = 24;

/// Cusecs of inflow per mm/hr of rain on the hydrograph
pub const INFLOW_FACTOR: f64 = 1500.0;

/// Channel capacity above which inflow is shown as a caution band
pub const RIVER_CAPACITY: Cusecs = Cusecs::new(18_000.0);

const PAST_DECAY: f64 = 0.82;
const TAIL_DECAY: f64 = 0.85;
const NO_FORECAST_TAIL: f64 = 0.7;

/// One hour on the hydrograph
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HydrographPoint {
    /// Hours relative to now
    pub offset: i32,
    /// Rainfall assumed for this hour
    pub rain: MillimetersPerHour,
    /// Reservoir inflow, whole cusecs
    pub inflow: Cusecs,
    /// Dam outflow, whole cusecs
    pub outflow: Cusecs,
}

impl HydrographPoint {
    /// Inflow outpaces outflow, so storage is rising
    pub fn is_danger(&self) -> bool {
        self.inflow > self.outflow
    }

    /// Strictly in the future
    pub fn is_future(&self) -> bool {
        self.offset > 0
    }

    /// Axis label: `NOW`, `T-3`, `T+5`
    pub fn label(&self) -> String {
        match self.offset {
            0 => "NOW".to_string(),
            o if o < 0 => format!("T{o}"),
            o => format!("T+{o}"),
        }
    }
}

/// Full series with its landmarks
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Hydrograph {
    /// Points from `-HOURS_BACK` onward, one per hour
    pub points: Vec<HydrographPoint>,
}

/// Build the series from rainfall readings and the current dam release
pub fn build_hydrograph(
    current_rainfall: MillimetersPerHour,
    forecast: &[MillimetersPerHour],
    discharge: Cusecs,
) -> Hydrograph {
    let current = *current_rainfall;
    let tail = forecast
        .last()
        .map_or((current * NO_FORECAST_TAIL).max(0.0), |r| **r);
    let outflow = Cusecs::new(discharge.round().max(0.0));

    let points = (0..TOTAL_POINTS as i32)
        .map(|idx| {
            let offset = idx - HOURS_BACK;
            let raw = if offset < 0 {
                current * PAST_DECAY.powi(offset.abs())
            } else if let Some(r) = forecast.get(offset as usize) {
                **r
            } else {
                let hours_past_forecast = offset - forecast.len() as i32 + 1;
                tail * TAIL_DECAY.powi(hours_past_forecast)
            };
            let rain = raw.max(0.0);

            HydrographPoint {
                offset,
                rain: MillimetersPerHour::new(rain),
                inflow: Cusecs::new((rain * INFLOW_FACTOR).round()),
                outflow,
            }
        })
        .collect();

    Hydrograph { points }
}

impl Hydrograph {
    /// Series for a catchment snapshot
    pub fn from_snapshot(snapshot: &CatchmentSnapshot, discharge: Cusecs) -> Self {
        build_hydrograph(snapshot.current_rainfall, &snapshot.forecast_rain(), discharge)
    }

    /// First point with the highest inflow
    pub fn peak(&self) -> Option<&HydrographPoint> {
        self.points
            .iter()
            .fold(None, |best: Option<&HydrographPoint>, p| match best {
                Some(b) if p.inflow <= b.inflow => Some(b),
                _ => Some(p),
            })
    }

    /// First point where inflow exceeds outflow
    pub fn intersection(&self) -> Option<&HydrographPoint> {
        self.points.iter().find(|p| p.is_danger())
    }

    /// First point after the peak where outflow catches up with inflow
    pub fn recession(&self) -> Option<&HydrographPoint> {
        let peak = self.peak()?.offset;
        self.points
            .iter()
            .find(|p| p.offset > peak && !p.is_danger())
    }

    /// Any point whose inflow exceeds the channel capacity
    pub fn exceeds_capacity(&self) -> bool {
        self.points.iter().any(|p| p.inflow > RIVER_CAPACITY)
    }
}

/// Relative time label for a point: `now`, `3h`, `2h ago`, `1.5 days`
pub fn countdown(point: Option<&HydrographPoint>) -> String {
    let Some(point) = point else {
        return "-".to_string();
    };
    if point.offset == 0 {
        return "now".to_string();
    }
    let hours = point.offset.unsigned_abs();
    let label = if hours >= 24 {
        format!("{:.1} days", f64::from(hours) / 24.0)
    } else {
        format!("{hours}h")
    };
    if point.offset > 0 {
        label
    } else {
        format!("{label} ago")
    }
}
