//! Axial magnetic field sources and per-layer field profiles.

use std::fmt;

use nalgebra::Point3;
use units::MagneticField;

use crate::constants::FIELD_SAMPLING_BINS;

/// A magnetic field map reduced to its z component.
///
/// Any `Fn(&Point3<f64>) -> f64` returning tesla implements it.
///
/// # Examples
///
/// ```
/// use fastsim::geometry::AxialField;
/// use nalgebra::Point3;
///
/// // field falling off linearly beyond |z| = 100 cm
/// let map = |p: &Point3<f64>| if p.z.abs() < 100.0 { 3.8 } else { 3.8 * (200.0 - p.z.abs()).max(0.0) / 100.0 };
/// assert_eq!(map.field_z(&Point3::new(0.0, 0.0, 50.0)), 3.8);
/// ```
pub trait AxialField: Send + Sync {
    /// Axial field component in tesla at the given position (cm)
    fn field_z(&self, position: &Point3<f64>) -> f64;
}

impl<F> AxialField for F
where
    F: Fn(&Point3<f64>) -> f64 + Send + Sync,
{
    fn field_z(&self, position: &Point3<f64>) -> f64 {
        self(position)
    }
}

/// Where a [`Geometry`](super::Geometry) takes its magnetic field from.
///
/// The choice is fixed for the lifetime of a geometry: either every query
/// goes to the map, or every query returns the uniform value.
pub enum FieldSource {
    Uniform(MagneticField),
    Map(Box<dyn AxialField>),
}

impl FieldSource {
    /// Axial field in tesla at the given position
    pub fn field_z(&self, position: &Point3<f64>) -> f64 {
        match self {
            FieldSource::Uniform(field) => field.to_tesla(),
            FieldSource::Map(map) => map.field_z(position),
        }
    }

    pub fn is_uniform(&self) -> bool {
        matches!(self, FieldSource::Uniform(_))
    }
}

impl Default for FieldSource {
    fn default() -> Self {
        FieldSource::Uniform(MagneticField::zero())
    }
}

impl fmt::Debug for FieldSource {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FieldSource::Uniform(field) => f.debug_tuple("Uniform").field(field).finish(),
            FieldSource::Map(_) => f.write_str("Map(..)"),
        }
    }
}

/// Axial field along a layer surface, fixed when the geometry is built.
///
/// Sampled profiles hold the field at the bin centres of `[0, upper_limit)`
/// along the layer's local coordinate; coordinates beyond the last bin take
/// the last bin's value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldProfile {
    Uniform(f64),
    Sampled { upper_limit: f64, bins: Vec<f64> },
}

impl FieldProfile {
    /// Samples `source` at the bin centres of `[0, upper_limit)`.
    ///
    /// `point_at` maps the local coordinate to a global position on the layer.
    pub fn sample(
        source: &FieldSource,
        upper_limit: f64,
        point_at: impl Fn(f64) -> Point3<f64>,
    ) -> Self {
        match source {
            FieldSource::Uniform(field) => FieldProfile::Uniform(field.to_tesla()),
            FieldSource::Map(_) if upper_limit <= 0.0 => {
                FieldProfile::Uniform(source.field_z(&point_at(0.0)))
            }
            FieldSource::Map(_) => {
                let width = upper_limit / FIELD_SAMPLING_BINS as f64;
                let bins = (0..FIELD_SAMPLING_BINS)
                    .map(|i| source.field_z(&point_at((i as f64 + 0.5) * width)))
                    .collect();
                FieldProfile::Sampled { upper_limit, bins }
            }
        }
    }

    /// Field in tesla at the given local coordinate
    pub fn at(&self, coordinate: f64) -> f64 {
        match self {
            FieldProfile::Uniform(value) => *value,
            FieldProfile::Sampled { upper_limit, bins } => {
                let fraction = coordinate.abs() / upper_limit;
                let bin = ((fraction * bins.len() as f64) as usize).min(bins.len() - 1);
                bins[bin]
            }
        }
    }
}

impl Default for FieldProfile {
    fn default() -> Self {
        FieldProfile::Uniform(0.0)
    }
}
