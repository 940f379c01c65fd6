use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

use crate::length::Length;

/// Speed of light in cm/ns
pub const SPEED_OF_LIGHT_CM_PER_NS: f64 = 29.979_245_8;

pub const NS_PER_SECOND: f64 = 1e9;
pub const NS_PER_PS: f64 = 1e-3;

/// A physical time quantity using f64 precision.
///
/// The `Time` struct represents time with nanoseconds as the base unit,
/// the natural scale for particles crossing a tracker volume.
///
/// Generator records and trajectory code often carry time as a path length
/// (`c·t`); [`Time::from_path_length`] and [`Time::to_path_length`] convert
/// between the two.
///
/// # Examples
///
/// ```rust
/// use units::{Length, Time};
///
/// let bunch_spacing = Time::from_ns(25.0);
/// let flight = Time::from_path_length(Length::from_cm(29.9792458));
///
/// assert!((flight.to_ns() - 1.0).abs() < 1e-12);
/// assert!(flight < bunch_spacing);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Time(f64); // Base unit: ns

impl Time {
    /// Creates a zero time value
    pub fn zero() -> Self {
        Self(0.0)
    }

    /// Creates a new `Time` from a value in nanoseconds.
    pub fn from_ns(value: f64) -> Self {
        Self(value)
    }

    /// Creates a new `Time` from a value in picoseconds.
    pub fn from_ps(value: f64) -> Self {
        Self(value * NS_PER_PS)
    }

    /// Creates a new `Time` from a value in seconds.
    pub fn from_seconds(value: f64) -> Self {
        Self(value * NS_PER_SECOND)
    }

    /// Creates the time light needs to travel the given path length.
    pub fn from_path_length(length: Length) -> Self {
        Self(length.to_cm() / SPEED_OF_LIGHT_CM_PER_NS)
    }

    /// Returns the time in nanoseconds.
    pub fn to_ns(&self) -> f64 {
        self.0
    }

    /// Converts the time to picoseconds.
    pub fn to_ps(&self) -> f64 {
        self.0 / NS_PER_PS
    }

    /// Converts the time to seconds.
    pub fn to_seconds(&self) -> f64 {
        self.0 / NS_PER_SECOND
    }

    /// Path length travelled by light in this time (`c·t`).
    pub fn to_path_length(&self) -> Length {
        Length::from_cm(self.0 * SPEED_OF_LIGHT_CM_PER_NS)
    }
}

impl Add for Time {
    type Output = Time;

    fn add(self, rhs: Time) -> Time {
        Time(self.0 + rhs.0)
    }
}

impl Sub for Time {
    type Output = Time;

    fn sub(self, rhs: Time) -> Time {
        Time(self.0 - rhs.0)
    }
}

impl Mul<f64> for Time {
    type Output = Time;

    fn mul(self, rhs: f64) -> Time {
        Time(self.0 * rhs)
    }
}

impl Div<f64> for Time {
    type Output = Time;

    fn div(self, rhs: f64) -> Time {
        Time(self.0 / rhs)
    }
}
