//! Interaction models invoked after a particle crosses a layer.
//!
//! Models live in an [`InteractionModels`] registry owned by the simulation.
//! Layers only store [`ModelId`]s, so a geometry never owns the models
//! attached to it.

use std::collections::HashMap;

use rand_chacha::ChaChaRng;
use serde::{Deserialize, Serialize};

use crate::error::{FastSimError, Result};
use crate::geometry::Layer;
use crate::particle::Particle;
use crate::record::EventRecord;

pub mod hit_producer;
pub mod killer;

#[cfg(test)]
mod killer_test;

pub use hit_producer::SimpleLayerHitProducer;
pub use killer::ParticleKiller;

/// A physics process acting on a particle on a layer
///
/// # Examples
///
/// ```
/// use fastsim::geometry::Layer;
/// use fastsim::interaction::{InteractionModel, InteractionModels};
/// use fastsim::particle::Particle;
/// use rand_chacha::ChaChaRng;
///
/// /// Removes a fixed amount of energy at every crossing.
/// struct ConstantLoss(f64);
///
/// impl InteractionModel for ConstantLoss {
///     fn name(&self) -> &str {
///         "constantLoss"
///     }
///
///     fn interact(
///         &mut self,
///         particle: &mut Particle,
///         _layer: Layer<'_>,
///         _secondaries: &mut Vec<Particle>,
///         _rng: &mut ChaChaRng,
///     ) {
///         let mass = particle.mass();
///         let energy = (particle.energy - self.0).max(mass);
///         let p = (energy * energy - mass * mass).sqrt();
///         particle.momentum = particle.momentum.normalize() * p;
///         particle.energy = energy;
///     }
/// }
///
/// let mut models = InteractionModels::new();
/// let id = models.register(ConstantLoss(0.01)).unwrap();
/// assert_eq!(models.id_of("constantLoss"), Some(id));
/// ```
pub trait InteractionModel {
    /// Unique name layers refer to
    fn name(&self) -> &str;

    /// Acts on `particle`, which has just crossed `layer`
    ///
    /// # Arguments
    ///
    /// * `particle` - The particle, mutable in place (energy loss, stopping)
    /// * `layer` - The layer just crossed
    /// * `secondaries` - Newly produced particles are pushed here
    /// * `rng` - The event's random number stream
    fn interact(
        &mut self,
        particle: &mut Particle,
        layer: Layer<'_>,
        secondaries: &mut Vec<Particle>,
        rng: &mut ChaChaRng,
    );

    /// Moves whatever the model accumulated during the event into `record`
    ///
    /// Default implementation stores nothing.
    fn store_products(&mut self, _record: &mut EventRecord) {}
}

/// Index of a model in an [`InteractionModels`] registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ModelId(usize);

impl ModelId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// One entry of the `interactionModels` configuration list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractionModelConfig {
    pub name: String,
    pub class_name: String,
}

/// Arena of interaction models addressed by [`ModelId`]
#[derive(Default)]
pub struct InteractionModels {
    models: Vec<Box<dyn InteractionModel>>,
    ids: HashMap<String, ModelId>,
}

impl InteractionModels {
    pub fn new() -> Self {
        Self::default()
    }

    /// Instantiates every configured model by class name.
    ///
    /// Known classes are `SimpleLayerHitProducer` and `ParticleKiller`.
    pub fn from_config(configs: &[InteractionModelConfig]) -> Result<Self> {
        let mut models = Self::new();
        for config in configs {
            let name = config.name.clone();
            match config.class_name.as_str() {
                "SimpleLayerHitProducer" => models.register(SimpleLayerHitProducer::new(name))?,
                "ParticleKiller" => models.register(ParticleKiller::new(name))?,
                other => return Err(FastSimError::UnknownModelClass(other.to_string())),
            };
        }
        Ok(models)
    }

    /// Adds a model; its name must not be taken yet.
    pub fn register<M: InteractionModel + 'static>(&mut self, model: M) -> Result<ModelId> {
        let name = model.name().to_string();
        if self.ids.contains_key(&name) {
            return Err(FastSimError::DuplicateModel(name));
        }
        let id = ModelId(self.models.len());
        self.models.push(Box::new(model));
        self.ids.insert(name, id);
        Ok(id)
    }

    pub fn id_of(&self, name: &str) -> Option<ModelId> {
        self.ids.get(name).copied()
    }

    pub fn get_mut(&mut self, id: ModelId) -> Option<&mut (dyn InteractionModel + 'static)> {
        self.models.get_mut(id.0).map(|model| model.as_mut())
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// Runs the models attached to `layer`, in attachment order.
    ///
    /// Stops early once a model has stopped the particle.
    pub fn interact(
        &mut self,
        particle: &mut Particle,
        layer: Layer<'_>,
        secondaries: &mut Vec<Particle>,
        rng: &mut ChaChaRng,
    ) {
        for &id in layer.interaction_models() {
            if let Some(model) = self.models.get_mut(id.0) {
                model.interact(particle, layer, secondaries, rng);
            }
            if particle.is_at_rest() {
                break;
            }
        }
    }

    /// Collects every model's products into `record`.
    pub fn store_products(&mut self, record: &mut EventRecord) {
        for model in &mut self.models {
            model.store_products(record);
        }
    }
}

impl std::fmt::Debug for InteractionModels {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_list()
            .entries(self.models.iter().map(|model| model.name()))
            .finish()
    }
}
