//! Barrel (cylinder) and forward (plane) detector layers.

use std::fmt;

use nalgebra::{Point3, Vector3};

use super::field::FieldProfile;
use super::thickness::ThicknessProfile;
use crate::constants::ON_SURFACE_TOLERANCE;
use crate::interaction::ModelId;

/// Which ordered set a layer belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerKind {
    Barrel,
    Forward,
}

/// Identifies a layer by its set and its ordinal within that set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayerId {
    pub kind: LayerKind,
    pub index: usize,
}

impl LayerId {
    pub fn barrel(index: usize) -> Self {
        Self {
            kind: LayerKind::Barrel,
            index,
        }
    }

    pub fn forward(index: usize) -> Self {
        Self {
            kind: LayerKind::Forward,
            index,
        }
    }
}

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.kind {
            LayerKind::Barrel => write!(f, "barrel layer {}", self.index),
            LayerKind::Forward => write!(f, "forward layer {}", self.index),
        }
    }
}

/// Properties shared by both layer shapes.
#[derive(Debug, Clone, Default)]
struct LayerAttributes {
    index: usize,
    thickness: ThicknessProfile,
    field: FieldProfile,
    interaction_models: Vec<ModelId>,
    nuclear_interaction_thickness_factor: f64,
    active_layer: Option<String>,
}

impl LayerAttributes {
    fn new(thickness: ThicknessProfile) -> Self {
        Self {
            thickness,
            nuclear_interaction_thickness_factor: 1.0,
            ..Self::default()
        }
    }
}

/// Traversed thickness: the nominal thickness divided by the cosine of the
/// angle between the direction of flight and the surface normal.
fn projected_thickness(nominal: f64, momentum: &Vector3<f64>, normal: &Vector3<f64>) -> f64 {
    if nominal == 0.0 {
        return 0.0;
    }
    let p = momentum.magnitude();
    let cos_theta = if p > 0.0 { momentum.dot(normal).abs() / p } else { 0.0 };
    if cos_theta > 0.0 {
        nominal / cos_theta
    } else {
        f64::INFINITY
    }
}

/// An infinitely long cylinder of fixed radius around the beam axis.
///
/// Material sits at `|z| < material_max_abs_z()`.
#[derive(Debug, Clone)]
pub struct BarrelLayer {
    radius: f64,
    attributes: LayerAttributes,
}

impl BarrelLayer {
    /// Creates a barrel layer of the given radius (cm).
    ///
    /// The index is assigned when the layer joins a [`Geometry`](super::Geometry).
    pub fn new(radius: f64, thickness: ThicknessProfile) -> Self {
        Self {
            radius,
            attributes: LayerAttributes::new(thickness),
        }
    }

    /// Attaches an interaction model; models run in attachment order.
    pub fn with_interaction_model(mut self, model: ModelId) -> Self {
        self.attributes.interaction_models.push(model);
        self
    }

    /// Names the sensitive detector layer this material layer represents.
    pub fn with_active_layer(mut self, name: impl Into<String>) -> Self {
        self.attributes.active_layer = Some(name.into());
        self
    }

    pub fn with_nuclear_interaction_thickness_factor(mut self, factor: f64) -> Self {
        self.attributes.nuclear_interaction_thickness_factor = factor;
        self
    }

    pub(crate) fn set_index(&mut self, index: usize) {
        self.attributes.index = index;
    }

    pub(crate) fn set_field(&mut self, field: FieldProfile) {
        self.attributes.field = field;
    }

    pub fn id(&self) -> LayerId {
        LayerId::barrel(self.attributes.index)
    }

    pub fn index(&self) -> usize {
        self.attributes.index
    }

    /// Radius in cm
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Largest `|z|` at which the layer holds material
    pub fn material_max_abs_z(&self) -> f64 {
        self.attributes.thickness.material_max()
    }

    /// Radiation lengths traversed by a particle at `position` moving along `momentum`.
    pub fn thickness(&self, position: &Point3<f64>, momentum: &Vector3<f64>) -> f64 {
        let nominal = self.attributes.thickness.at(position.z.abs());
        let r = position.x.hypot(position.y);
        if r == 0.0 {
            return nominal;
        }
        let normal = Vector3::new(position.x / r, position.y / r, 0.0);
        projected_thickness(nominal, momentum, &normal)
    }

    /// Axial field (T) on the layer at the height of `position`
    pub fn magnetic_field_z(&self, position: &Point3<f64>) -> f64 {
        self.attributes.field.at(position.z.abs())
    }

    pub fn distance_to_surface(&self, position: &Point3<f64>) -> f64 {
        (self.radius - position.x.hypot(position.y)).abs()
    }

    pub fn is_on_surface(&self, position: &Point3<f64>) -> bool {
        self.distance_to_surface(position) < ON_SURFACE_TOLERANCE
    }
}

/// An infinite plane perpendicular to the beam axis at fixed z.
///
/// Material sits between `material_min_r()` and `material_max_r()`.
#[derive(Debug, Clone)]
pub struct ForwardLayer {
    z: f64,
    attributes: LayerAttributes,
}

impl ForwardLayer {
    /// Creates a forward layer at the given z (cm).
    pub fn new(z: f64, thickness: ThicknessProfile) -> Self {
        Self {
            z,
            attributes: LayerAttributes::new(thickness),
        }
    }

    /// Attaches an interaction model; models run in attachment order.
    pub fn with_interaction_model(mut self, model: ModelId) -> Self {
        self.attributes.interaction_models.push(model);
        self
    }

    pub fn with_active_layer(mut self, name: impl Into<String>) -> Self {
        self.attributes.active_layer = Some(name.into());
        self
    }

    pub fn with_nuclear_interaction_thickness_factor(mut self, factor: f64) -> Self {
        self.attributes.nuclear_interaction_thickness_factor = factor;
        self
    }

    pub(crate) fn set_index(&mut self, index: usize) {
        self.attributes.index = index;
    }

    pub(crate) fn set_field(&mut self, field: FieldProfile) {
        self.attributes.field = field;
    }

    pub fn id(&self) -> LayerId {
        LayerId::forward(self.attributes.index)
    }

    pub fn index(&self) -> usize {
        self.attributes.index
    }

    /// Position along the beam axis in cm
    pub fn z(&self) -> f64 {
        self.z
    }

    pub fn material_min_r(&self) -> f64 {
        self.attributes.thickness.material_min()
    }

    pub fn material_max_r(&self) -> f64 {
        self.attributes.thickness.material_max()
    }

    /// Radiation lengths traversed by a particle at `position` moving along `momentum`.
    pub fn thickness(&self, position: &Point3<f64>, momentum: &Vector3<f64>) -> f64 {
        let nominal = self.attributes.thickness.at(position.x.hypot(position.y));
        projected_thickness(nominal, momentum, &Vector3::z())
    }

    /// Axial field (T) on the layer at the radius of `position`
    pub fn magnetic_field_z(&self, position: &Point3<f64>) -> f64 {
        self.attributes.field.at(position.x.hypot(position.y))
    }

    pub fn distance_to_surface(&self, position: &Point3<f64>) -> f64 {
        (self.z - position.z).abs()
    }

    pub fn is_on_surface(&self, position: &Point3<f64>) -> bool {
        self.distance_to_surface(position) < ON_SURFACE_TOLERANCE
    }
}

/// A borrowed layer of either shape.
///
/// Trajectories and the navigator dispatch on this instead of virtual calls.
#[derive(Debug, Clone, Copy)]
pub enum Layer<'a> {
    Barrel(&'a BarrelLayer),
    Forward(&'a ForwardLayer),
}

impl<'a> Layer<'a> {
    fn attributes(&self) -> &'a LayerAttributes {
        match self {
            Layer::Barrel(layer) => &layer.attributes,
            Layer::Forward(layer) => &layer.attributes,
        }
    }

    pub fn id(&self) -> LayerId {
        match self {
            Layer::Barrel(layer) => layer.id(),
            Layer::Forward(layer) => layer.id(),
        }
    }

    pub fn index(&self) -> usize {
        self.attributes().index
    }

    pub fn kind(&self) -> LayerKind {
        self.id().kind
    }

    pub fn is_forward(&self) -> bool {
        matches!(self, Layer::Forward(_))
    }

    /// Radius for barrel layers, z for forward layers (cm)
    pub fn position(&self) -> f64 {
        match self {
            Layer::Barrel(layer) => layer.radius(),
            Layer::Forward(layer) => layer.z(),
        }
    }

    pub fn thickness(&self, position: &Point3<f64>, momentum: &Vector3<f64>) -> f64 {
        match self {
            Layer::Barrel(layer) => layer.thickness(position, momentum),
            Layer::Forward(layer) => layer.thickness(position, momentum),
        }
    }

    pub fn thickness_profile(&self) -> &'a ThicknessProfile {
        &self.attributes().thickness
    }

    pub fn magnetic_field_z(&self, position: &Point3<f64>) -> f64 {
        match self {
            Layer::Barrel(layer) => layer.magnetic_field_z(position),
            Layer::Forward(layer) => layer.magnetic_field_z(position),
        }
    }

    pub fn distance_to_surface(&self, position: &Point3<f64>) -> f64 {
        match self {
            Layer::Barrel(layer) => layer.distance_to_surface(position),
            Layer::Forward(layer) => layer.distance_to_surface(position),
        }
    }

    pub fn is_on_surface(&self, position: &Point3<f64>) -> bool {
        self.distance_to_surface(position) < ON_SURFACE_TOLERANCE
    }

    /// Interaction models attached to this layer, in invocation order
    pub fn interaction_models(&self) -> &'a [ModelId] {
        &self.attributes().interaction_models
    }

    pub fn nuclear_interaction_thickness_factor(&self) -> f64 {
        self.attributes().nuclear_interaction_thickness_factor
    }

    pub fn active_layer(&self) -> Option<&'a str> {
        self.attributes().active_layer.as_deref()
    }
}

impl PartialEq for Layer<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl fmt::Display for Layer<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Layer::Barrel(layer) => {
                write!(f, "BarrelLayer index={} radius={}", layer.index(), layer.radius())
            }
            Layer::Forward(layer) => {
                write!(f, "ForwardLayer index={} z={}", layer.index(), layer.z())
            }
        }
    }
}
