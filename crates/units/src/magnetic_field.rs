use serde::{Deserialize, Serialize};
use std::ops::{Mul, Neg};

pub const KILOGAUSS_TO_TESLA: f64 = 0.1;
pub const GAUSS_TO_TESLA: f64 = 1e-4;

/// Magnetic flux density.
///
/// Base unit is tesla. Signed: positive values point along +z when used as
/// an axial field component.
///
/// # Examples
///
/// ```rust
/// use units::MagneticField;
///
/// let solenoid = MagneticField::from_tesla(3.8);
/// assert!((solenoid.to_kilogauss() - 38.0).abs() < 1e-12);
/// assert!((-solenoid).to_tesla() < 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MagneticField(f64); // Base unit: T

impl MagneticField {
    /// Creates a field-free value
    pub fn zero() -> Self {
        Self(0.0)
    }

    /// Creates a new `MagneticField` from a value in tesla.
    pub fn from_tesla(value: f64) -> Self {
        Self(value)
    }

    /// Creates a new `MagneticField` from a value in kilogauss.
    pub fn from_kilogauss(value: f64) -> Self {
        Self(value * KILOGAUSS_TO_TESLA)
    }

    /// Creates a new `MagneticField` from a value in gauss.
    pub fn from_gauss(value: f64) -> Self {
        Self(value * GAUSS_TO_TESLA)
    }

    /// Returns the field in tesla.
    pub fn to_tesla(&self) -> f64 {
        self.0
    }

    /// Converts the field to kilogauss.
    pub fn to_kilogauss(&self) -> f64 {
        self.0 / KILOGAUSS_TO_TESLA
    }

    /// Converts the field to gauss.
    pub fn to_gauss(&self) -> f64 {
        self.0 / GAUSS_TO_TESLA
    }

    /// True when the field vanishes exactly.
    pub fn is_zero(&self) -> bool {
        self.0 == 0.0
    }
}

impl Neg for MagneticField {
    type Output = MagneticField;

    fn neg(self) -> MagneticField {
        MagneticField(-self.0)
    }
}

impl Mul<f64> for MagneticField {
    type Output = MagneticField;

    fn mul(self, rhs: f64) -> MagneticField {
        MagneticField(self.0 * rhs)
    }
}
