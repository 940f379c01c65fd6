//! Numerical constants shared by the geometry, trajectory and navigation code.
//!
//! Lengths are in cm, momenta and energies in GeV, times in ns, fields in T.

pub use units::SPEED_OF_LIGHT_CM_PER_NS as SPEED_OF_LIGHT;

/// Distance within which a position counts as lying on a layer surface (cm).
pub const ON_SURFACE_TOLERANCE: f64 = 1.0e-7;

/// Maximal distance between a reconstructed helix intersection and the target
/// cylinder for the intersection to be accepted (cm).
pub const ROOT_TOLERANCE: f64 = 1.0e-3;

/// Converts `q·B` (e·T) into a curvature in GeV/cm: `r = p_T / (c·1e-4·q·B)`.
pub const FIELD_CURVATURE_FACTOR: f64 = SPEED_OF_LIGHT * 1.0e-4;

/// Number of bins used when sampling a field map along a layer surface.
pub const FIELD_SAMPLING_BINS: usize = 100;
