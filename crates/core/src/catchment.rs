//! Catchment rainfall snapshots
//!
//! The weather feed itself lives outside the model. This module only shapes
//! what the feed delivers (or a fallback when it cannot) into the numbers the
//! optimizer and hydrograph consume, so a feed failure never reaches the core
//! as a missing value.

use crate::core_types::{Cusecs, MillimetersPerHour};
use serde::Serialize;
use std::fmt;
use tracing::warn;

/// Historical monsoon average used when no live reading exists (mm/hr)
pub const FALLBACK_RAIN_MM_PER_HR: f64 = 4.2;

/// Hourly forecast entries kept per snapshot
pub const FORECAST_HOURS: usize = 6;

/// Cusecs of predicted inflow per mm/hr of rain, after runoff losses
const INFLOW_PER_MM: f64 = 1200.0 * 0.6;

/// Forecast decline per hour in the fallback series (mm/hr)
const FALLBACK_HOURLY_DECLINE: f64 = 0.3;

/// Why a snapshot is not built from live observations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FallbackReason {
    /// No credentials for the weather feed
    MissingApiKey,
    /// The feed was reachable but the request failed
    RequestFailed,
    /// No reading has arrived yet
    Initializing,
}

impl FallbackReason {
    /// Stable identifier matching the serialized form
    pub fn as_str(self) -> &'static str {
        match self {
            FallbackReason::MissingApiKey => "missing-api-key",
            FallbackReason::RequestFailed => "request-failed",
            FallbackReason::Initializing => "initializing",
        }
    }
}

impl fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One hour of forecast rainfall
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastHour {
    /// Label such as `+1h` or a feed timestamp
    pub label: String,
    /// Expected rainfall intensity
    pub rain: MillimetersPerHour,
}

/// Rainfall state of the catchment at one moment
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatchmentSnapshot {
    /// Current rainfall intensity
    pub current_rainfall: MillimetersPerHour,
    /// Reservoir inflow implied by `current_rainfall`
    pub predicted_inflow: Cusecs,
    /// Up to six hours of forecast, nearest first
    pub hourly_forecast: Vec<ForecastHour>,
    /// Free-text conditions
    pub description: String,
    /// Set when the snapshot is not from live data
    pub fallback: Option<FallbackReason>,
}

/// Reservoir inflow predicted from a rainfall intensity
pub fn predicted_inflow(rain: MillimetersPerHour) -> Cusecs {
    Cusecs::new(*rain * INFLOW_PER_MM)
}

impl CatchmentSnapshot {
    /// Snapshot from live observations
    ///
    /// `forecast_3h` holds 3-hour accumulations (mm) from the feed; each is
    /// converted to an hourly intensity and only the first six are kept.
    pub fn from_observation(
        rain_1h: f64,
        description: impl Into<String>,
        forecast_3h: &[(String, f64)],
    ) -> Self {
        let current_rainfall = MillimetersPerHour::new(rain_1h.max(0.0));
        let hourly_forecast = forecast_3h
            .iter()
            .take(FORECAST_HOURS)
            .map(|(label, accumulation)| ForecastHour {
                label: label.clone(),
                rain: MillimetersPerHour::new((accumulation / 3.0).max(0.0)),
            })
            .collect();

        Self {
            current_rainfall,
            predicted_inflow: predicted_inflow(current_rainfall),
            hourly_forecast,
            description: description.into(),
            fallback: None,
        }
    }

    /// Snapshot built from the historical average
    pub fn fallback(reason: FallbackReason) -> Self {
        warn!("Catchment feed unavailable ({}), using historical average", reason);
        let current_rainfall = MillimetersPerHour::new(FALLBACK_RAIN_MM_PER_HR);
        Self {
            current_rainfall,
            predicted_inflow: predicted_inflow(current_rainfall),
            hourly_forecast: hourly_labels(|i| {
                (FALLBACK_RAIN_MM_PER_HR - FALLBACK_HOURLY_DECLINE * i as f64).max(0.0)
            }),
            description: "Historical monsoon average (fallback)".to_string(),
            fallback: Some(reason),
        }
    }

    /// Snapshot driven by the fast-forward scenario with no live baseline
    pub fn simulated(rain: MillimetersPerHour) -> Self {
        Self {
            current_rainfall: MillimetersPerHour::ZERO,
            predicted_inflow: Cusecs::ZERO,
            hourly_forecast: Vec::new(),
            description: String::new(),
            fallback: None,
        }
        .with_simulated_rainfall(rain)
    }

    /// Copy of this snapshot with the current reading replaced by a
    /// simulated one; the forecast is kept
    pub fn with_simulated_rainfall(&self, rain: MillimetersPerHour) -> Self {
        let current_rainfall = MillimetersPerHour::new(rain.value().max(0.0));
        Self {
            current_rainfall,
            predicted_inflow: predicted_inflow(current_rainfall),
            hourly_forecast: self.hourly_forecast.clone(),
            description: "Monsoon fast-forward simulation".to_string(),
            fallback: None,
        }
    }

    /// True when built from the fallback average
    pub fn is_fallback(&self) -> bool {
        self.fallback.is_some()
    }

    /// Forecast intensities in order
    pub fn forecast_rain(&self) -> Vec<MillimetersPerHour> {
        self.hourly_forecast.iter().map(|h| h.rain).collect()
    }
}

impl Default for CatchmentSnapshot {
    fn default() -> Self {
        Self::fallback(FallbackReason::Initializing)
    }
}

fn hourly_labels(rain_at: impl Fn(usize) -> f64) -> Vec<ForecastHour> {
    (0..FORECAST_HOURS)
        .map(|i| ForecastHour {
            label: format!("+{}h", i + 1),
            rain: MillimetersPerHour::new(rain_at(i)),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_fallback_series() {
        let snapshot = CatchmentSnapshot::fallback(FallbackReason::MissingApiKey);
        assert!(snapshot.is_fallback());
        assert_eq!(*snapshot.current_rainfall, 4.2);
        assert_relative_eq!(*snapshot.predicted_inflow, 3_024.0, epsilon = 1e-9);

        let rain: Vec<f64> = snapshot.forecast_rain().iter().map(|r| **r).collect();
        let expected = [4.2, 3.9, 3.6, 3.3, 3.0, 2.7];
        assert_eq!(rain.len(), expected.len());
        for (got, want) in rain.iter().zip(expected) {
            assert_relative_eq!(*got, want, epsilon = 1e-9);
        }
        assert_eq!(snapshot.hourly_forecast[0].label, "+1h");
    }

    #[test]
    fn test_default_is_initializing() {
        let snapshot = CatchmentSnapshot::default();
        assert_eq!(snapshot.fallback, Some(FallbackReason::Initializing));
    }

    #[test]
    fn test_observation_converts_accumulations() {
        let forecast: Vec<(String, f64)> = (0..8).map(|i| (format!("t{i}"), 6.0)).collect();
        let snapshot = CatchmentSnapshot::from_observation(2.5, "moderate rain", &forecast);
        assert!(!snapshot.is_fallback());
        assert_eq!(snapshot.hourly_forecast.len(), FORECAST_HOURS);
        assert_eq!(*snapshot.hourly_forecast[0].rain, 2.0);
        assert_relative_eq!(*snapshot.predicted_inflow, 1_800.0, epsilon = 1e-9);
    }

    #[test]
    fn test_simulated_floors_rain() {
        let snapshot = CatchmentSnapshot::simulated(MillimetersPerHour::new(-3.0));
        assert_eq!(snapshot.current_rainfall, MillimetersPerHour::ZERO);
        assert_eq!(snapshot.predicted_inflow, Cusecs::ZERO);
        assert!(snapshot.hourly_forecast.is_empty());

        let heavy = CatchmentSnapshot::simulated(MillimetersPerHour::new(45.0));
        assert_relative_eq!(*heavy.predicted_inflow, 32_400.0, epsilon = 1e-9);
    }

    #[test]
    fn test_simulated_keeps_live_forecast() {
        let live = CatchmentSnapshot::fallback(FallbackReason::RequestFailed);
        let surge = live.with_simulated_rainfall(MillimetersPerHour::new(20.0));
        assert!(!surge.is_fallback());
        assert_eq!(*surge.current_rainfall, 20.0);
        assert_eq!(surge.hourly_forecast, live.hourly_forecast);
        assert_eq!(surge.description, "Monsoon fast-forward simulation");
    }

    #[test]
    fn test_reason_identifiers() {
        assert_eq!(FallbackReason::RequestFailed.to_string(), "request-failed");
    }
}
