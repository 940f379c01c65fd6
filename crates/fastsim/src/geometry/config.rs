//! Serde description of a tracker geometry and the builder that validates it.

use serde::{Deserialize, Serialize};
use units::{Length, MagneticField};

use super::{BarrelLayer, FieldSource, ForwardLayer, Geometry, ThicknessProfile};
use crate::error::{FastSimError, Result};
use crate::interaction::{InteractionModels, ModelId};

fn default_thickness_factor() -> f64 {
    1.0
}

fn default_magnetic_field() -> MagneticField {
    MagneticField::from_tesla(3.8)
}

/// Material and model attachments common to barrel and forward layers.
///
/// `limits` holds `N` bin edges and `thickness` the `N - 1` thickness values
/// (radiation lengths) between them; both empty means no material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerMaterialConfig {
    #[serde(default)]
    pub limits: Vec<f64>,
    #[serde(default)]
    pub thickness: Vec<f64>,
    #[serde(default)]
    pub active_layer: Option<String>,
    #[serde(default = "default_thickness_factor")]
    pub nuclear_interaction_thickness_factor: f64,
    /// Model names, invoked in this order after each crossing
    #[serde(default)]
    pub interaction_models: Vec<String>,
}

impl Default for LayerMaterialConfig {
    fn default() -> Self {
        Self {
            limits: Vec::new(),
            thickness: Vec::new(),
            active_layer: None,
            nuclear_interaction_thickness_factor: default_thickness_factor(),
            interaction_models: Vec::new(),
        }
    }
}

impl LayerMaterialConfig {
    fn profile(&self) -> Result<ThicknessProfile> {
        ThicknessProfile::new(self.limits.clone(), self.thickness.clone())
    }

    fn model_ids(&self, models: &InteractionModels) -> Result<Vec<ModelId>> {
        self.interaction_models
            .iter()
            .map(|name| {
                models
                    .id_of(name)
                    .ok_or_else(|| FastSimError::UnknownModel(name.clone()))
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BarrelLayerConfig {
    pub radius: Length,
    #[serde(flatten)]
    pub material: LayerMaterialConfig,
}

/// A forward layer pair: one plane at `+z` and its mirror at `-z`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForwardLayerConfig {
    pub z: Length,
    #[serde(flatten)]
    pub material: LayerMaterialConfig,
}

/// The tracker layout as read from configuration.
///
/// # Examples
///
/// ```
/// use fastsim::geometry::{Geometry, GeometryConfig};
/// use fastsim::interaction::InteractionModels;
///
/// let config: GeometryConfig = serde_json::from_str(
///     r#"{
///         "barrelLayers": [
///             { "radius": 10.0, "limits": [0.0, 100.0], "thickness": [0.02] },
///             { "radius": 50.0, "limits": [0.0, 100.0], "thickness": [0.02] }
///         ],
///         "forwardLayers": [ { "z": 120.0 } ],
///         "magneticField": 3.8
///     }"#,
/// )
/// .unwrap();
///
/// let geometry = Geometry::from_config(&config, &InteractionModels::new()).unwrap();
/// assert_eq!(geometry.barrel_layers().len(), 2);
/// assert_eq!(geometry.forward_layers()[0].z(), -120.0);
/// assert_eq!(geometry.forward_layers()[1].z(), 120.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeometryConfig {
    #[serde(default)]
    pub barrel_layers: Vec<BarrelLayerConfig>,
    /// Positive-z side only, in increasing z
    #[serde(default)]
    pub forward_layers: Vec<ForwardLayerConfig>,
    #[serde(default = "default_magnetic_field")]
    pub magnetic_field: MagneticField,
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            barrel_layers: Vec::new(),
            forward_layers: Vec::new(),
            magnetic_field: default_magnetic_field(),
        }
    }
}

impl Geometry {
    /// Builds and validates a geometry, resolving model names in `models`.
    ///
    /// Forward layers are mirrored to negative z. The field is uniform at
    /// `config.magnetic_field`; use [`Geometry::with_field`] to switch to a map.
    pub fn from_config(config: &GeometryConfig, models: &InteractionModels) -> Result<Self> {
        let barrel_layers = config
            .barrel_layers
            .iter()
            .map(|layer| {
                let built = BarrelLayer::new(layer.radius.to_cm(), layer.material.profile()?);
                apply_material(built, &layer.material, models)
            })
            .collect::<Result<Vec<_>>>()?;

        let mut previous: Option<f64> = None;
        for (index, layer) in config.forward_layers.iter().enumerate() {
            let z = layer.z.to_cm();
            if z <= 0.0 {
                return Err(FastSimError::ForwardPosition { index, z });
            }
            if let Some(previous) = previous.filter(|&previous| z <= previous) {
                return Err(FastSimError::ForwardOrder { index, z, previous });
            }
            previous = Some(z);
        }

        let negative = config.forward_layers.iter().rev().map(|layer| (-1.0, layer));
        let positive = config.forward_layers.iter().map(|layer| (1.0, layer));
        let forward_layers = negative
            .chain(positive)
            .map(|(side, layer)| {
                let built = ForwardLayer::new(side * layer.z.to_cm(), layer.material.profile()?);
                apply_material(built, &layer.material, models)
            })
            .collect::<Result<Vec<_>>>()?;

        log::debug!(
            "building geometry: {} barrel layers, {} forward layers, {} T",
            barrel_layers.len(),
            forward_layers.len(),
            config.magnetic_field.to_tesla()
        );

        Geometry::new(
            barrel_layers,
            forward_layers,
            FieldSource::Uniform(config.magnetic_field),
        )
    }
}

/// Shared builder steps for both layer shapes.
trait MaterialTarget: Sized {
    fn with_interaction_model(self, model: ModelId) -> Self;
    fn with_active_layer(self, name: String) -> Self;
    fn with_nuclear_interaction_thickness_factor(self, factor: f64) -> Self;
}

impl MaterialTarget for BarrelLayer {
    fn with_interaction_model(self, model: ModelId) -> Self {
        BarrelLayer::with_interaction_model(self, model)
    }
    fn with_active_layer(self, name: String) -> Self {
        BarrelLayer::with_active_layer(self, name)
    }
    fn with_nuclear_interaction_thickness_factor(self, factor: f64) -> Self {
        BarrelLayer::with_nuclear_interaction_thickness_factor(self, factor)
    }
}

impl MaterialTarget for ForwardLayer {
    fn with_interaction_model(self, model: ModelId) -> Self {
        ForwardLayer::with_interaction_model(self, model)
    }
    fn with_active_layer(self, name: String) -> Self {
        ForwardLayer::with_active_layer(self, name)
    }
    fn with_nuclear_interaction_thickness_factor(self, factor: f64) -> Self {
        ForwardLayer::with_nuclear_interaction_thickness_factor(self, factor)
    }
}

fn apply_material<L: MaterialTarget>(
    layer: L,
    material: &LayerMaterialConfig,
    models: &InteractionModels,
) -> Result<L> {
    let mut layer =
        layer.with_nuclear_interaction_thickness_factor(material.nuclear_interaction_thickness_factor);
    if let Some(name) = &material.active_layer {
        layer = layer.with_active_layer(name.clone());
    }
    for id in material.model_ids(models)? {
        layer = layer.with_interaction_model(id);
    }
    Ok(layer)
}
