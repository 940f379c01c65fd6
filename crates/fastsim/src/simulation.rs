//! Event loop tying the looper, the navigator and the interaction models together.

use nalgebra::{Point3, Vector3};
use rand::SeedableRng;
use rand_chacha::ChaChaRng;

use crate::config::SimulationConfig;
use crate::error::Result;
use crate::event::GenEvent;
use crate::geometry::{FieldSource, Geometry, LayerId};
use crate::interaction::InteractionModels;
use crate::looper::ParticleLooper;
use crate::navigator::LayerNavigator;
use crate::particle::Particle;
use crate::particle_data::ParticleDataTable;
use crate::record::EventRecord;

/// One step of a traced particle, taken right after a layer crossing.
#[derive(Debug, Clone, PartialEq)]
pub struct Crossing {
    pub layer: LayerId,
    /// Position (cm)
    pub position: Point3<f64>,
    /// Lab time (ns)
    pub time: f64,
    pub momentum: Vector3<f64>,
    pub energy: f64,
}

impl Crossing {
    fn of(layer: LayerId, particle: &Particle) -> Self {
        Self {
            layer,
            position: particle.position,
            time: particle.time,
            momentum: particle.momentum,
            energy: particle.energy,
        }
    }
}

/// Limits ending a particle's walk early
#[derive(Debug, Clone, Copy, PartialEq)]
struct Cuts {
    time_cut: f64,
    min_energy: f64,
    max_crossings: usize,
}

impl Cuts {
    /// Why `particle` must stop after `crossings` crossings, if it must.
    fn violated(&self, particle: &Particle, crossings: usize) -> Option<&'static str> {
        if particle.time > self.time_cut {
            Some("time cut")
        } else if crossings >= self.max_crossings {
            Some("crossing limit")
        } else {
            None
        }
    }
}

/// A detector ready to simulate events
pub struct Simulation {
    geometry: Geometry,
    models: InteractionModels,
    particle_data: ParticleDataTable,
    beam_pipe_radius: f64,
    cuts: Cuts,
    rng: ChaChaRng,
}

impl Simulation {
    /// Builds models and geometry from `config` and seeds the random stream.
    pub fn from_config(config: &SimulationConfig) -> Result<Self> {
        let models = InteractionModels::from_config(&config.interaction_models)?;
        let geometry = Geometry::from_config(&config.geometry, &models)?;
        Ok(Self {
            geometry,
            models,
            particle_data: ParticleDataTable::standard(),
            beam_pipe_radius: config.beam_pipe_radius.to_cm(),
            cuts: Cuts {
                time_cut: config.time_cut.to_ns(),
                min_energy: config.min_energy.to_gev(),
                max_crossings: config.max_crossings,
            },
            rng: ChaChaRng::seed_from_u64(config.seed),
        })
    }

    /// Replaces the particle data table used for generator particles.
    pub fn with_particle_data(mut self, particle_data: ParticleDataTable) -> Self {
        self.particle_data = particle_data;
        self
    }

    /// Switches the geometry to another field source.
    pub fn with_field(mut self, field: FieldSource) -> Self {
        self.geometry = self.geometry.with_field(field);
        self
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn models(&self) -> &InteractionModels {
        &self.models
    }

    pub fn models_mut(&mut self) -> &mut InteractionModels {
        &mut self.models
    }

    pub fn particle_data(&self) -> &ParticleDataTable {
        &self.particle_data
    }

    /// Simulates every particle of `event` and its secondaries.
    pub fn simulate_event(&mut self, event: &GenEvent) -> Result<EventRecord> {
        let mut looper = ParticleLooper::new(event, &self.particle_data, self.beam_pipe_radius);
        let mut secondaries = Vec::new();
        let mut simulated = 0;

        while let Some(mut particle) = looper.next_particle(&mut self.rng)? {
            simulated += 1;
            let mut navigator = LayerNavigator::new(&self.geometry);
            let mut crossings = 0;

            while let Some(layer) = navigator.move_to_next_layer(&mut particle)? {
                crossings += 1;
                self.models
                    .interact(&mut particle, layer, &mut secondaries, &mut self.rng);
                if !secondaries.is_empty() {
                    looper.add_secondaries(
                        particle.sim_track,
                        particle.position,
                        particle.time,
                        std::mem::take(&mut secondaries),
                        &mut self.rng,
                    )?;
                }

                if particle.energy < self.cuts.min_energy {
                    log::debug!("particle {} fell below the energy cut", particle.pdg_id);
                    break;
                }
                if let Some(cut) = self.cuts.violated(&particle, crossings) {
                    log::warn!(
                        "abandoning particle {} after {} crossings: {}",
                        particle.pdg_id,
                        crossings,
                        cut
                    );
                    break;
                }
            }
        }

        let mut record = looper.into_record();
        self.models.store_products(&mut record);
        log::info!(
            "simulated event: {} particles, {} tracks, {} vertices, {} hits",
            simulated,
            record.sim_tracks.len(),
            record.sim_vertices.len(),
            record.layer_hits.len()
        );
        Ok(record)
    }

    /// Navigates `particle` through the geometry without running any model.
    pub fn trace(&self, mut particle: Particle) -> Result<Vec<Crossing>> {
        let mut navigator = LayerNavigator::new(&self.geometry);
        let mut crossings = Vec::new();
        while let Some(layer) = navigator.move_to_next_layer(&mut particle)? {
            crossings.push(Crossing::of(layer.id(), &particle));
            if let Some(cut) = self.cuts.violated(&particle, crossings.len()) {
                log::warn!("stopping trace of particle {}: {}", particle.pdg_id, cut);
                break;
            }
        }
        Ok(crossings)
    }
}
