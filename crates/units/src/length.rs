use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Neg, Sub};

pub const MM_TO_CM: f64 = 0.1;
pub const M_TO_CM: f64 = 100.0;
pub const MICRON_TO_CM: f64 = 1e-4;

/// A physical length quantity using f64 precision.
///
/// The `Length` struct represents length values with centimeters as the base unit,
/// which is the natural unit for tracker layer radii and positions.
///
/// # Examples
///
/// ```rust
/// use units::Length;
///
/// let beam_pipe = Length::from_cm(3.0);
/// let pixel_pitch = Length::from_microns(100.0);
/// let outer_barrel = Length::from_m(1.1);
///
/// assert!((beam_pipe.to_mm() - 30.0).abs() < 1e-12);
/// assert!(pixel_pitch < beam_pipe);
/// assert!((outer_barrel.to_cm() - 110.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Length(f64); // Base unit: cm

impl Length {
    /// Creates a zero length value
    pub fn zero() -> Self {
        Self(0.0)
    }

    /// Creates a new `Length` from a value in centimeters.
    pub fn from_cm(value: f64) -> Self {
        Self(value)
    }

    /// Creates a new `Length` from a value in millimeters.
    pub fn from_mm(value: f64) -> Self {
        Self(value * MM_TO_CM)
    }

    /// Creates a new `Length` from a value in meters.
    pub fn from_m(value: f64) -> Self {
        Self(value * M_TO_CM)
    }

    /// Creates a new `Length` from a value in microns.
    pub fn from_microns(value: f64) -> Self {
        Self(value * MICRON_TO_CM)
    }

    /// Returns the length in centimeters.
    pub fn to_cm(&self) -> f64 {
        self.0
    }

    /// Converts the length to millimeters.
    pub fn to_mm(&self) -> f64 {
        self.0 / MM_TO_CM
    }

    /// Converts the length to meters.
    pub fn to_m(&self) -> f64 {
        self.0 / M_TO_CM
    }

    /// Converts the length to microns.
    pub fn to_microns(&self) -> f64 {
        self.0 / MICRON_TO_CM
    }
}

impl Add for Length {
    type Output = Length;

    fn add(self, rhs: Length) -> Length {
        Length(self.0 + rhs.0)
    }
}

impl Sub for Length {
    type Output = Length;

    fn sub(self, rhs: Length) -> Length {
        Length(self.0 - rhs.0)
    }
}

impl Neg for Length {
    type Output = Length;

    fn neg(self) -> Length {
        Length(-self.0)
    }
}

impl Mul<f64> for Length {
    type Output = Length;

    fn mul(self, rhs: f64) -> Length {
        Length(self.0 * rhs)
    }
}

impl Div<f64> for Length {
    type Output = Length;

    fn div(self, rhs: f64) -> Length {
        Length(self.0 / rhs)
    }
}

/// Division of Length by Length returns a dimensionless ratio
impl Div for Length {
    type Output = f64;

    fn div(self, rhs: Self) -> f64 {
        self.0 / rhs.0
    }
}

/// Allow f64 * Length (commutative multiplication)
impl Mul<Length> for f64 {
    type Output = Length;

    fn mul(self, rhs: Length) -> Length {
        rhs * self
    }
}
