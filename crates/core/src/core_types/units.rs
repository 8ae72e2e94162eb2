//! Semantic unit types for hydrological quantities
//!
//! Newtype wrappers that keep discharge rates, elevations, rainfall
//! intensities and storage percentages from being mixed up at call sites.
//!
//! # Design Philosophy
//! - All quantities are f64: elevations sit around 600 m MSL and are rounded
//!   to centimetres, so f32 would lose the digits that matter
//! - Total ordering via `total_cmp` (NaN sorts above every value)
//! - `Deref` to the raw value for arithmetic-heavy formulas
//! - Serde support so configuration and snapshots serialize as plain numbers
//!
//! # Usage
//! ```
//! use flood_sim_core::core_types::units::{Cusecs, Meters};
//!
//! let release = Cusecs::new(35_000.0);
//! let crest = Meters::new(592.8);
//! assert!(*release > 30_000.0);
//! assert_eq!(crest.max(Meters::new(590.0)), crest);
//! ```

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Deref, Mul, Sub};

// ============================================================================
// DISCHARGE
// ============================================================================

/// Volumetric flow rate in cubic feet per second
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Cusecs(f64);

impl Cusecs {
    /// No release
    pub const ZERO: Cusecs = Cusecs(0.0);

    /// Create a discharge rate
    #[inline]
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Cusecs(value)
    }

    /// Raw value in cusecs
    #[inline]
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Clamp into `[min, max]`, mapping NaN to `min`
    #[inline]
    #[must_use]
    pub fn clamp_to(self, min: Cusecs, max: Cusecs) -> Self {
        if self.0.is_nan() {
            return min;
        }
        Cusecs(self.0.clamp(min.0, max.0))
    }
}

impl Eq for Cusecs {}

impl PartialOrd for Cusecs {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Cusecs {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl Deref for Cusecs {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl From<f64> for Cusecs {
    fn from(v: f64) -> Self {
        Cusecs(v)
    }
}

impl From<Cusecs> for f64 {
    fn from(c: Cusecs) -> f64 {
        c.0
    }
}

impl Add for Cusecs {
    type Output = Cusecs;
    fn add(self, rhs: Cusecs) -> Cusecs {
        Cusecs(self.0 + rhs.0)
    }
}

impl Sub for Cusecs {
    type Output = Cusecs;
    fn sub(self, rhs: Cusecs) -> Cusecs {
        Cusecs(self.0 - rhs.0)
    }
}

impl Mul<f64> for Cusecs {
    type Output = Cusecs;
    fn mul(self, rhs: f64) -> Cusecs {
        Cusecs(self.0 * rhs)
    }
}

impl fmt::Display for Cusecs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.0} cusecs", self.0)
    }
}

// ============================================================================
// LENGTH / ELEVATION
// ============================================================================

/// Length in meters
///
/// Used both for absolute elevations above mean sea level and for relative
/// quantities such as submergence depth or channel width.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Meters(f64);

impl Meters {
    /// Zero length
    pub const ZERO: Meters = Meters(0.0);

    /// Create a length
    #[inline]
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Meters(value)
    }

    /// Raw value in meters
    #[inline]
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Round to a fixed number of decimal places
    #[inline]
    #[must_use]
    pub fn round_to(self, decimals: i32) -> Self {
        Meters(round_to(self.0, decimals))
    }

    /// Clamp negative values to zero
    #[inline]
    #[must_use]
    pub fn non_negative(self) -> Self {
        Meters(self.0.max(0.0))
    }
}

impl Eq for Meters {}

impl PartialOrd for Meters {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Meters {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl Deref for Meters {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl From<f64> for Meters {
    fn from(v: f64) -> Self {
        Meters(v)
    }
}

impl From<Meters> for f64 {
    fn from(m: Meters) -> f64 {
        m.0
    }
}

impl Add for Meters {
    type Output = Meters;
    fn add(self, rhs: Meters) -> Meters {
        Meters(self.0 + rhs.0)
    }
}

impl Sub for Meters {
    type Output = Meters;
    fn sub(self, rhs: Meters) -> Meters {
        Meters(self.0 - rhs.0)
    }
}

impl Mul<f64> for Meters {
    type Output = Meters;
    fn mul(self, rhs: f64) -> Meters {
        Meters(self.0 * rhs)
    }
}

impl fmt::Display for Meters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} m", self.0)
    }
}

// ============================================================================
// RAINFALL INTENSITY
// ============================================================================

/// Rainfall intensity in millimetres per hour
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct MillimetersPerHour(f64);

impl MillimetersPerHour {
    /// Dry conditions
    pub const ZERO: MillimetersPerHour = MillimetersPerHour(0.0);

    /// Create a rainfall intensity
    #[inline]
    #[must_use]
    pub const fn new(value: f64) -> Self {
        MillimetersPerHour(value)
    }

    /// Raw value in mm/hr
    #[inline]
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl Eq for MillimetersPerHour {}

impl PartialOrd for MillimetersPerHour {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for MillimetersPerHour {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl Deref for MillimetersPerHour {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl From<f64> for MillimetersPerHour {
    fn from(v: f64) -> Self {
        MillimetersPerHour(v)
    }
}

impl fmt::Display for MillimetersPerHour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1} mm/hr", self.0)
    }
}

// ============================================================================
// PERCENTAGE
// ============================================================================

/// Percentage value (0-100 scale)
///
/// Reservoir storage and inundation share are reported on this scale.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
#[repr(transparent)]
pub struct Percent(f64);

impl Percent {
    /// Create a percentage
    #[inline]
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Percent(value)
    }

    /// Raw value on the 0-100 scale
    #[inline]
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Convert to a 0-1 fraction
    #[inline]
    #[must_use]
    pub fn to_fraction(self) -> f64 {
        self.0 / 100.0
    }
}

impl Eq for Percent {}

impl PartialOrd for Percent {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Percent {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl Deref for Percent {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl From<f64> for Percent {
    fn from(v: f64) -> Self {
        Percent(v)
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}%", self.0)
    }
}

// ============================================================================
// HELPERS
// ============================================================================

/// Round half away from zero to `decimals` places.
///
/// Every reported figure in the model goes through this so that repeated
/// calls produce bitwise-identical output.
#[inline]
#[must_use]
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}
