//! Feeds the particles of one generator event, and their secondaries, to
//! the simulation while recording simulated tracks and vertices.

use nalgebra::{Point3, Vector3};
use rand::Rng;
use rand_chacha::ChaChaRng;

use crate::error::{FastSimError, Result};
use crate::event::{GenEvent, GenParticle};
use crate::particle::Particle;
use crate::particle_data::ParticleDataTable;
use crate::record::{EventRecord, SimTrack, SimVertex};

/// Draws a proper decay length `c·τ` from an exponential with mean `ctau`.
pub fn sample_proper_lifetime_c(ctau: f64, rng: &mut ChaChaRng) -> f64 {
    let u: f64 = rng.random();
    -ctau * (1.0 - u).ln()
}

/// Iterates generator particles, then buffered secondaries.
///
/// Secondaries are handed out before any further generator particle, most
/// recently added first.
pub struct ParticleLooper<'e> {
    event: &'e GenEvent,
    particle_data: &'e ParticleDataTable,
    beam_pipe_radius: f64,
    next_gen_particle: usize,
    buffer: Vec<Particle>,
    record: EventRecord,
}

impl<'e> ParticleLooper<'e> {
    /// Starts looping over `event`; its first vertex becomes the first
    /// simulated vertex.
    ///
    /// `beam_pipe_radius` is in cm.
    pub fn new(
        event: &'e GenEvent,
        particle_data: &'e ParticleDataTable,
        beam_pipe_radius: f64,
    ) -> Self {
        let mut looper = Self {
            event,
            particle_data,
            beam_pipe_radius,
            next_gen_particle: 0,
            buffer: Vec::new(),
            record: EventRecord::new(),
        };
        if let Some(vertex) = event.vertices.first() {
            let (position, time) = event.vertex_position(vertex);
            looper.add_sim_vertex(position, time.to_ns(), None);
        }
        looper
    }

    /// Next particle to simulate, or `None` once the event is done.
    ///
    /// # Errors
    ///
    /// [`FastSimError::UnknownParticle`] for a PDG id missing from the table,
    /// [`FastSimError::MissingVertex`] for a dangling vertex reference.
    pub fn next_particle(&mut self, rng: &mut ChaChaRng) -> Result<Option<Particle>> {
        if let Some(particle) = self.buffer.pop() {
            return Ok(Some(particle));
        }
        self.next_gen_particle(rng)
    }

    fn next_gen_particle(&mut self, rng: &mut ChaChaRng) -> Result<Option<Particle>> {
        let event = self.event;
        while let Some(gen_particle) = event.particles.get(self.next_gen_particle) {
            let index = self.next_gen_particle;
            self.next_gen_particle += 1;

            let production = event
                .vertices
                .get(gen_particle.production_vertex)
                .ok_or(FastSimError::MissingVertex {
                    particle: index,
                    vertex: gen_particle.production_vertex,
                })?;
            let end = gen_particle
                .end_vertex
                .map(|vertex| {
                    event.vertices.get(vertex).ok_or(FastSimError::MissingVertex {
                        particle: index,
                        vertex,
                    })
                })
                .transpose()?;

            // produced inside the beam pipe, and not decayed before reaching it
            if event.vertex_radius(production).to_cm() > self.beam_pipe_radius {
                continue;
            }
            if end.is_some_and(|end| event.vertex_radius(end).to_cm() < self.beam_pipe_radius) {
                continue;
            }

            let data = self.particle_data.get(gen_particle.pdg_id)?;
            let (position, time) = event.vertex_position(production);
            let (momentum, energy) = self.convert_momentum(gen_particle);

            let mut particle = Particle::new(
                gen_particle.pdg_id,
                data.charge,
                position,
                time.to_ns(),
                momentum,
                energy,
            );
            particle.remaining_proper_lifetime_c = match (end, data.ctau) {
                (Some(end), _) if particle.mass() > 0.0 => {
                    let (_, end_time) = event.vertex_position(end);
                    let lab_time_c = (end_time - time).to_path_length().to_cm();
                    Some(lab_time_c / particle.gamma())
                }
                (_, Some(ctau)) => Some(sample_proper_lifetime_c(ctau, rng)),
                _ => None,
            };

            let track = self.add_sim_track(&particle, 0, Some(index));
            particle.sim_track = Some(track);
            return Ok(Some(particle));
        }
        Ok(None)
    }

    fn convert_momentum(&self, gen_particle: &GenParticle) -> (Vector3<f64>, f64) {
        let unit = self.event.momentum_unit;
        let [px, py, pz, e] = gen_particle.momentum.map(|value| unit.energy(value).to_gev());
        (Vector3::new(px, py, pz), e)
    }

    /// Queues particles produced by `parent_track` at `position` (cm), `time` (ns).
    ///
    /// Secondaries of unstable species without a lifetime get one drawn from
    /// the particle data table.
    pub fn add_secondaries(
        &mut self,
        parent_track: Option<usize>,
        position: Point3<f64>,
        time: f64,
        secondaries: Vec<Particle>,
        rng: &mut ChaChaRng,
    ) -> Result<()> {
        if secondaries.is_empty() {
            return Ok(());
        }
        let vertex = self.add_sim_vertex(position, time, parent_track);
        for mut secondary in secondaries {
            if secondary.remaining_proper_lifetime_c.is_none() {
                if let Some(ctau) = self.particle_data.get(secondary.pdg_id)?.ctau {
                    secondary.remaining_proper_lifetime_c =
                        Some(sample_proper_lifetime_c(ctau, rng));
                }
            }
            let track = self.add_sim_track(&secondary, vertex, None);
            secondary.sim_track = Some(track);
            self.buffer.push(secondary);
        }
        Ok(())
    }

    fn add_sim_vertex(
        &mut self,
        position: Point3<f64>,
        time: f64,
        parent_track: Option<usize>,
    ) -> usize {
        self.record.sim_vertices.push(SimVertex {
            position,
            time,
            parent_track,
        });
        self.record.sim_vertices.len() - 1
    }

    fn add_sim_track(
        &mut self,
        particle: &Particle,
        vertex: usize,
        gen_particle: Option<usize>,
    ) -> usize {
        self.record.sim_tracks.push(SimTrack {
            pdg_id: particle.pdg_id,
            charge: particle.charge,
            momentum: particle.momentum,
            energy: particle.energy,
            vertex,
            gen_particle,
        });
        self.record.sim_tracks.len() - 1
    }

    /// Tracks and vertices recorded so far
    pub fn record(&self) -> &EventRecord {
        &self.record
    }

    pub fn into_record(self) -> EventRecord {
        self.record
    }
}
