use rand_chacha::ChaChaRng;

use super::InteractionModel;
use crate::geometry::Layer;
use crate::particle::Particle;
use crate::record::{EventRecord, LayerHit};

/// Records a [`LayerHit`] whenever the particle sits on the surface of the
/// layer it is invoked for.
#[derive(Debug, Clone)]
pub struct SimpleLayerHitProducer {
    name: String,
    hits: Vec<LayerHit>,
}

impl SimpleLayerHitProducer {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hits: Vec::new(),
        }
    }

    /// Hits collected since the last [`InteractionModel::store_products`]
    pub fn hits(&self) -> &[LayerHit] {
        &self.hits
    }
}

impl InteractionModel for SimpleLayerHitProducer {
    fn name(&self) -> &str {
        &self.name
    }

    fn interact(
        &mut self,
        particle: &mut Particle,
        layer: Layer<'_>,
        _secondaries: &mut Vec<Particle>,
        _rng: &mut ChaChaRng,
    ) {
        if !layer.is_on_surface(&particle.position) {
            return;
        }
        self.hits.push(LayerHit {
            layer: layer.id(),
            active_layer: layer.active_layer().map(str::to_string),
            position: particle.position,
            time: particle.time,
            momentum: particle.momentum,
            energy: particle.energy,
            pdg_id: particle.pdg_id,
            sim_track: particle.sim_track,
        });
    }

    fn store_products(&mut self, record: &mut EventRecord) {
        record.layer_hits.append(&mut self.hits);
    }
}
