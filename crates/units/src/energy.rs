use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

pub const MEV_TO_GEV: f64 = 1e-3;
pub const KEV_TO_GEV: f64 = 1e-6;
pub const TEV_TO_GEV: f64 = 1e3;

/// An energy (or momentum, or mass in natural units) quantity.
///
/// Base unit is GeV. Momenta are stored as GeV/c and masses as GeV/c², so the
/// same type serves all three with `c = 1`.
///
/// # Examples
///
/// ```rust
/// use units::Energy;
///
/// let cut = Energy::from_mev(100.0);
/// assert!((cut.to_gev() - 0.1).abs() < 1e-15);
/// assert!(Energy::from_kev(50.0) < cut);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Energy(f64); // Base unit: GeV

impl Energy {
    /// Creates a zero energy value
    pub fn zero() -> Self {
        Self(0.0)
    }

    /// Creates a new `Energy` from a value in GeV.
    pub fn from_gev(value: f64) -> Self {
        Self(value)
    }

    /// Creates a new `Energy` from a value in MeV.
    pub fn from_mev(value: f64) -> Self {
        Self(value * MEV_TO_GEV)
    }

    /// Creates a new `Energy` from a value in keV.
    pub fn from_kev(value: f64) -> Self {
        Self(value * KEV_TO_GEV)
    }

    /// Creates a new `Energy` from a value in TeV.
    pub fn from_tev(value: f64) -> Self {
        Self(value * TEV_TO_GEV)
    }

    /// Returns the energy in GeV.
    pub fn to_gev(&self) -> f64 {
        self.0
    }

    /// Converts the energy to MeV.
    pub fn to_mev(&self) -> f64 {
        self.0 / MEV_TO_GEV
    }

    /// Converts the energy to keV.
    pub fn to_kev(&self) -> f64 {
        self.0 / KEV_TO_GEV
    }
}

impl Add for Energy {
    type Output = Energy;

    fn add(self, rhs: Energy) -> Energy {
        Energy(self.0 + rhs.0)
    }
}

impl Sub for Energy {
    type Output = Energy;

    fn sub(self, rhs: Energy) -> Energy {
        Energy(self.0 - rhs.0)
    }
}

impl Mul<f64> for Energy {
    type Output = Energy;

    fn mul(self, rhs: f64) -> Energy {
        Energy(self.0 * rhs)
    }
}
