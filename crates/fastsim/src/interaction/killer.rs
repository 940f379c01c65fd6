use rand_chacha::ChaChaRng;

use super::InteractionModel;
use crate::geometry::Layer;
use crate::particle::Particle;

/// Stops every particle reaching a layer it is attached to.
///
/// Useful as an absorber at the outer edge of the tracker.
#[derive(Debug, Clone)]
pub struct ParticleKiller {
    name: String,
}

impl ParticleKiller {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl InteractionModel for ParticleKiller {
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
        log::debug!("{} stops particle {} on {}", self.name, particle.pdg_id, layer);
        particle.stop();
    }
}
