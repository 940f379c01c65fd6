//! Incremental search for the next layer a particle crosses
//!
//! A [`LayerNavigator`] keeps two cursors into the [`Geometry`]: the next
//! barrel layer outside the particle and the next forward layer above it in
//! z. Together with their predecessors they bracket the particle, so every
//! step only has to test a handful of candidate layers.

use std::fmt;

use crate::error::{FastSimError, Result};
use crate::geometry::{BarrelLayer, ForwardLayer, Geometry, Layer};
use crate::particle::Particle;
use crate::trajectory::Trajectory;

/// Where a navigation session stands
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NavigatorState<'g> {
    /// No step taken yet; the cursors are seeded on the first call
    Uninitialized,
    /// Cursors seeded, looking for the next crossing
    Searching,
    /// The particle sits on this layer after the last step
    OnLayer(Layer<'g>),
    /// No further crossing exists
    Exhausted,
    /// The particle's proper lifetime ran out before the next crossing
    Decayed,
}

impl fmt::Display for NavigatorState<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            NavigatorState::Uninitialized => write!(f, "uninitialized"),
            NavigatorState::Searching => write!(f, "searching"),
            NavigatorState::OnLayer(layer) => write!(f, "on {layer}"),
            NavigatorState::Exhausted => write!(f, "exhausted"),
            NavigatorState::Decayed => write!(f, "decayed"),
        }
    }
}

/// Per-particle navigation session over a shared geometry
///
/// # Examples
///
/// ```
/// use fastsim::geometry::{BarrelLayer, FieldSource, Geometry, ThicknessProfile};
/// use fastsim::navigator::LayerNavigator;
/// use fastsim::particle::Particle;
/// use nalgebra::{Point3, Vector3};
///
/// let geometry = Geometry::new(
///     [1.0, 5.0, 10.0]
///         .into_iter()
///         .map(|radius| BarrelLayer::new(radius, ThicknessProfile::empty()))
///         .collect(),
///     Vec::new(),
///     FieldSource::default(),
/// )
/// .unwrap();
///
/// let mut photon = Particle::new(22, 0.0, Point3::origin(), 0.0, Vector3::new(1.0, 0.0, 0.0), 1.0);
/// let mut navigator = LayerNavigator::new(&geometry);
///
/// let mut radii = Vec::new();
/// while let Some(layer) = navigator.move_to_next_layer(&mut photon).unwrap() {
///     radii.push(layer.position());
/// }
/// assert_eq!(radii, vec![1.0, 5.0, 10.0]);
/// ```
#[derive(Debug)]
pub struct LayerNavigator<'g> {
    geometry: &'g Geometry,
    next_barrel: Option<&'g BarrelLayer>,
    next_forward: Option<&'g ForwardLayer>,
    state: NavigatorState<'g>,
}

impl<'g> LayerNavigator<'g> {
    pub fn new(geometry: &'g Geometry) -> Self {
        Self {
            geometry,
            next_barrel: None,
            next_forward: None,
            state: NavigatorState::Uninitialized,
        }
    }

    pub fn state(&self) -> NavigatorState<'g> {
        self.state
    }

    /// The layer the particle sits on after the last successful step
    pub fn current_layer(&self) -> Option<Layer<'g>> {
        match self.state {
            NavigatorState::OnLayer(layer) => Some(layer),
            _ => None,
        }
    }

    /// Innermost barrel layer still ahead of the particle in radius
    pub fn next_barrel_layer(&self) -> Option<&'g BarrelLayer> {
        self.next_barrel
    }

    /// Forward layer with the smallest z still ahead of the particle
    pub fn next_forward_layer(&self) -> Option<&'g ForwardLayer> {
        self.next_forward
    }

    /// Places the cursors just beyond the particle.
    ///
    /// A layer the particle sits on only counts as ahead when the particle
    /// moves towards smaller radius (barrel) or smaller z (forward).
    fn seed(&mut self, particle: &Particle) {
        let position = &particle.position;
        let radius = particle.radius();
        let moves_inward = particle.moves_inward();
        self.next_barrel = self.geometry.barrel_layers().iter().find(|layer| {
            if layer.is_on_surface(position) {
                moves_inward
            } else {
                layer.radius() > radius
            }
        });

        let moves_backward = particle.momentum.z < 0.0;
        self.next_forward = self.geometry.forward_layers().iter().find(|layer| {
            if layer.is_on_surface(position) {
                moves_backward
            } else {
                layer.z() > position.z
            }
        });

        log::debug!(
            "seeded navigator at r={:.4} z={:.4}: next barrel {:?}, next forward {:?}",
            radius,
            position.z,
            self.next_barrel.map(BarrelLayer::radius),
            self.next_forward.map(ForwardLayer::z),
        );
        self.state = NavigatorState::Searching;
    }

    /// The layers bracketing the particle: the barrel cursor, its
    /// predecessor, and the forward layer in the direction of `p_z`.
    fn candidates(&self, particle: &Particle) -> Vec<Layer<'g>> {
        let mut candidates = Vec::with_capacity(3);
        if let Some(layer) = self.next_barrel {
            candidates.push(Layer::Barrel(layer));
        }
        if let Some(layer) = self.geometry.previous_barrel_layer(self.next_barrel) {
            candidates.push(Layer::Barrel(layer));
        }

        let forward = if particle.momentum.z > 0.0 {
            self.next_forward
        } else if particle.momentum.z < 0.0 {
            self.geometry.previous_forward_layer(self.next_forward)
        } else {
            None
        };
        if let Some(layer) = forward {
            candidates.push(Layer::Forward(layer));
        }
        candidates
    }

    /// Moves `particle` to the next layer it crosses.
    ///
    /// Returns the crossed layer, or `Ok(None)` once no further crossing
    /// exists or the particle's proper lifetime has run out; in the latter
    /// case the particle is left at its decay point.
    ///
    /// The field for the step comes from the geometry's source while the
    /// particle is not on a layer (the first step), and from the sampled
    /// profile of the layer it sits on afterwards. Both are read from the
    /// same source, so a field map never mixes with a uniform value.
    ///
    /// # Errors
    ///
    /// * [`FastSimError::NotOnLayer`] if the particle was moved off the layer
    ///   of the previous step by anything other than this navigator.
    /// * [`FastSimError::RootSelection`] if a helix intersection cannot be
    ///   validated.
    pub fn move_to_next_layer(&mut self, particle: &mut Particle) -> Result<Option<Layer<'g>>> {
        let current = match self.state {
            NavigatorState::Exhausted | NavigatorState::Decayed => return Ok(None),
            NavigatorState::Uninitialized => {
                self.seed(particle);
                None
            }
            NavigatorState::Searching => None,
            NavigatorState::OnLayer(layer) => {
                if !layer.is_on_surface(&particle.position) {
                    return Err(FastSimError::NotOnLayer {
                        layer: layer.id(),
                        distance: layer.distance_to_surface(&particle.position),
                    });
                }
                Some(layer)
            }
        };

        if particle.has_decayed() {
            self.state = NavigatorState::Decayed;
            return Ok(None);
        }
        if particle.is_at_rest() {
            log::debug!("particle {} is at rest", particle.pdg_id);
            self.state = NavigatorState::Exhausted;
            return Ok(None);
        }

        let magnetic_field_z = match current {
            Some(layer) => layer.magnetic_field_z(&particle.position),
            None => self.geometry.magnetic_field_z(&particle.position),
        };
        let mut trajectory = Trajectory::new(particle, magnetic_field_z);

        let mut next: Option<(Layer<'g>, f64)> = None;
        for candidate in self.candidates(particle) {
            let on_layer = current == Some(candidate) || candidate.is_on_surface(&particle.position);
            let Some(time_c) = trajectory.next_crossing_time_c(candidate, on_layer)? else {
                continue;
            };
            if next.is_none_or(|(_, best)| time_c < best) {
                next = Some((candidate, time_c));
            }
        }

        if let Some(remaining) = particle.remaining_proper_lifetime_c {
            let decay_time_c = remaining * particle.gamma();
            if decay_time_c.is_finite() && next.is_none_or(|(_, time_c)| time_c > decay_time_c) {
                trajectory.advance(decay_time_c);
                trajectory.apply_to(particle);
                particle.remaining_proper_lifetime_c = Some(0.0);
                log::debug!("particle {} decayed at {:?}", particle.pdg_id, particle.position);
                self.state = NavigatorState::Decayed;
                return Ok(None);
            }
        }

        let Some((layer, time_c)) = next else {
            log::debug!("no further crossing for particle {}", particle.pdg_id);
            self.state = NavigatorState::Exhausted;
            return Ok(None);
        };

        trajectory.advance(time_c);
        trajectory.apply_to(particle);
        particle.reduce_remaining_proper_lifetime_c(time_c / particle.gamma());

        match layer {
            Layer::Barrel(barrel) => {
                self.next_barrel = if particle.moves_inward() {
                    Some(barrel)
                } else {
                    self.geometry.next_barrel_layer(barrel)
                };
            }
            Layer::Forward(forward) => {
                self.next_forward = if particle.momentum.z < 0.0 {
                    Some(forward)
                } else {
                    self.geometry.next_forward_layer(forward)
                };
            }
        }

        log::debug!(
            "particle {} crossed {} after timeC {:.6} at ({:.4}, {:.4}, {:.4})",
            particle.pdg_id,
            layer,
            time_c,
            particle.position.x,
            particle.position.y,
            particle.position.z,
        );
        self.state = NavigatorState::OnLayer(layer);
        Ok(Some(layer))
    }
}
