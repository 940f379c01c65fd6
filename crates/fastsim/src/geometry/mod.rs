//! Ordered barrel and forward layers plus the magnetic field they sit in.

pub mod config;
pub mod field;
pub mod layer;
pub mod thickness;

#[cfg(test)]
mod thickness_test;

pub use config::{
    BarrelLayerConfig, ForwardLayerConfig, GeometryConfig, LayerMaterialConfig,
};
pub use field::{AxialField, FieldProfile, FieldSource};
pub use layer::{BarrelLayer, ForwardLayer, Layer, LayerId, LayerKind};
pub use thickness::ThicknessProfile;

use nalgebra::Point3;

use crate::error::{FastSimError, Result};

/// The tracker as two ordered layer sets.
///
/// Barrel layers are sorted by increasing radius. Forward layers are sorted
/// by increasing z: the negative side first (descending `|z|`), then the
/// positive side (ascending `|z|`), with indices contiguous across the join.
/// A geometry is read-only once built and can be shared by any number of
/// sequential navigation sessions.
///
/// # Examples
///
/// ```
/// use fastsim::geometry::{BarrelLayer, FieldSource, ForwardLayer, Geometry, ThicknessProfile};
/// use units::MagneticField;
///
/// let geometry = Geometry::new(
///     vec![
///         BarrelLayer::new(10.0, ThicknessProfile::uniform(100.0, 0.02)),
///         BarrelLayer::new(50.0, ThicknessProfile::uniform(100.0, 0.02)),
///     ],
///     vec![
///         ForwardLayer::new(-100.0, ThicknessProfile::empty()),
///         ForwardLayer::new(100.0, ThicknessProfile::empty()),
///     ],
///     FieldSource::Uniform(MagneticField::from_tesla(3.8)),
/// )
/// .unwrap();
///
/// let inner = &geometry.barrel_layers()[0];
/// assert_eq!(geometry.next_barrel_layer(inner).map(|l| l.radius()), Some(50.0));
/// assert_eq!(geometry.previous_barrel_layer(None).map(|l| l.radius()), Some(50.0));
/// ```
#[derive(Debug)]
pub struct Geometry {
    barrel_layers: Vec<BarrelLayer>,
    forward_layers: Vec<ForwardLayer>,
    field: FieldSource,
}

impl Geometry {
    /// Builds a geometry from already ordered layer lists.
    ///
    /// Fails if a barrel radius is not positive or if radii (barrel) or z
    /// positions (forward) are not strictly increasing. Indices are assigned
    /// from list order.
    pub fn new(
        mut barrel_layers: Vec<BarrelLayer>,
        mut forward_layers: Vec<ForwardLayer>,
        field: FieldSource,
    ) -> Result<Self> {
        let mut previous: Option<f64> = None;
        for (index, layer) in barrel_layers.iter_mut().enumerate() {
            let radius = layer.radius();
            if radius <= 0.0 {
                return Err(FastSimError::BarrelRadius { index, radius });
            }
            if let Some(previous) = previous.filter(|&previous| radius <= previous) {
                return Err(FastSimError::BarrelOrder {
                    index,
                    radius,
                    previous,
                });
            }
            previous = Some(radius);
            layer.set_index(index);
        }

        let mut previous: Option<f64> = None;
        for (index, layer) in forward_layers.iter_mut().enumerate() {
            let z = layer.z();
            if let Some(previous) = previous.filter(|&previous| z <= previous) {
                return Err(FastSimError::ForwardOrder { index, z, previous });
            }
            previous = Some(z);
            layer.set_index(index);
        }

        let mut geometry = Self {
            barrel_layers,
            forward_layers,
            field,
        };
        geometry.sample_field();
        Ok(geometry)
    }

    /// Replaces the field source and re-samples every layer's field profile.
    pub fn with_field(mut self, field: FieldSource) -> Self {
        self.field = field;
        self.sample_field();
        self
    }

    fn sample_field(&mut self) {
        let max_abs_z = self
            .forward_layers
            .iter()
            .map(|layer| layer.z().abs())
            .fold(0.0, f64::max);
        let max_radius = self.barrel_layers.last().map_or(0.0, BarrelLayer::radius);

        for layer in &mut self.barrel_layers {
            let radius = layer.radius();
            let profile =
                FieldProfile::sample(&self.field, max_abs_z, |z| Point3::new(radius, 0.0, z));
            layer.set_field(profile);
        }
        for layer in &mut self.forward_layers {
            let z = layer.z();
            let profile = FieldProfile::sample(&self.field, max_radius, |r| Point3::new(r, 0.0, z));
            layer.set_field(profile);
        }
    }

    pub fn barrel_layers(&self) -> &[BarrelLayer] {
        &self.barrel_layers
    }

    pub fn forward_layers(&self) -> &[ForwardLayer] {
        &self.forward_layers
    }

    /// Looks up a layer of either shape by id.
    pub fn layer(&self, id: LayerId) -> Option<Layer<'_>> {
        match id.kind {
            LayerKind::Barrel => self.barrel_layers.get(id.index).map(Layer::Barrel),
            LayerKind::Forward => self.forward_layers.get(id.index).map(Layer::Forward),
        }
    }

    /// Every layer, barrel layers first.
    pub fn layers(&self) -> impl Iterator<Item = Layer<'_>> {
        self.barrel_layers
            .iter()
            .map(Layer::Barrel)
            .chain(self.forward_layers.iter().map(Layer::Forward))
    }

    /// The barrel layer just outside `layer`, if any.
    pub fn next_barrel_layer(&self, layer: &BarrelLayer) -> Option<&BarrelLayer> {
        self.barrel_layers.get(layer.index() + 1)
    }

    /// The barrel layer just inside `layer`.
    ///
    /// `None` stands for "beyond the outermost layer" and yields the last layer.
    pub fn previous_barrel_layer(&self, layer: Option<&BarrelLayer>) -> Option<&BarrelLayer> {
        match layer {
            Some(layer) => layer
                .index()
                .checked_sub(1)
                .and_then(|index| self.barrel_layers.get(index)),
            None => self.barrel_layers.last(),
        }
    }

    /// The forward layer at the next larger z, if any.
    pub fn next_forward_layer(&self, layer: &ForwardLayer) -> Option<&ForwardLayer> {
        self.forward_layers.get(layer.index() + 1)
    }

    /// The forward layer at the next smaller z.
    ///
    /// `None` stands for "beyond the last layer" and yields the last layer.
    pub fn previous_forward_layer(&self, layer: Option<&ForwardLayer>) -> Option<&ForwardLayer> {
        match layer {
            Some(layer) => layer
                .index()
                .checked_sub(1)
                .and_then(|index| self.forward_layers.get(index)),
            None => self.forward_layers.last(),
        }
    }

    pub fn field_source(&self) -> &FieldSource {
        &self.field
    }

    /// Axial field in tesla at `position`.
    ///
    /// Either always the map or always the uniform value, never a mixture.
    pub fn magnetic_field_z(&self, position: &Point3<f64>) -> f64 {
        self.field.field_z(position)
    }
}
