//! Analytic particle trajectories and their intersections with layers
//!
//! Time along a trajectory is carried as `timeC = t·c` (cm), so that a
//! position advances by `momentum / energy · Δ(timeC)` without any further
//! unit conversion.

use nalgebra::{Point3, Vector3};

use crate::constants::SPEED_OF_LIGHT;
use crate::error::Result;
use crate::geometry::{BarrelLayer, ForwardLayer, Layer};
use crate::particle::Particle;

pub mod helix;
pub mod straight;

#[cfg(test)]
mod helix_test;

pub use helix::HelixTrajectory;
pub use straight::StraightTrajectory;

/// Position, time and four-momentum snapshot a trajectory starts from and
/// advances in place.
#[derive(Debug, Clone, PartialEq)]
pub struct KinematicState {
    /// Position (cm)
    pub position: Point3<f64>,
    /// Lab time (ns)
    pub time: f64,
    /// Momentum (GeV/c)
    pub momentum: Vector3<f64>,
    /// Energy (GeV)
    pub energy: f64,
}

impl KinematicState {
    pub fn of(particle: &Particle) -> Self {
        Self {
            position: particle.position,
            time: particle.time,
            momentum: particle.momentum,
            energy: particle.energy,
        }
    }

    /// Transverse momentum (GeV/c)
    pub fn pt(&self) -> f64 {
        self.momentum.x.hypot(self.momentum.y)
    }

    /// Distance from the beam axis (cm)
    pub fn radius(&self) -> f64 {
        self.position.x.hypot(self.position.y)
    }

    fn advance_time(&mut self, delta_time_c: f64) {
        self.time += delta_time_c / SPEED_OF_LIGHT;
    }
}

/// A particle's path through a uniform axial field
///
/// # Examples
///
/// ```
/// use fastsim::geometry::{BarrelLayer, Layer, ThicknessProfile};
/// use fastsim::particle::Particle;
/// use fastsim::trajectory::Trajectory;
/// use nalgebra::{Point3, Vector3};
///
/// let photon = Particle::new(22, 0.0, Point3::origin(), 0.0, Vector3::new(1.0, 0.0, 0.0), 1.0);
/// let layer = BarrelLayer::new(5.0, ThicknessProfile::empty());
///
/// let mut trajectory = Trajectory::new(&photon, 3.8);
/// let time_c = trajectory.next_crossing_time_c(Layer::Barrel(&layer), false).unwrap();
/// assert_eq!(time_c, Some(5.0));
///
/// trajectory.advance(5.0);
/// assert!(layer.is_on_surface(&trajectory.state().position));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Trajectory {
    Straight(StraightTrajectory),
    Helix(HelixTrajectory),
}

impl Trajectory {
    /// Picks the trajectory variant for `particle` in an axial field (T).
    ///
    /// Neutral particles, a vanishing field and particles without transverse
    /// momentum all move on straight lines.
    pub fn new(particle: &Particle, magnetic_field_z: f64) -> Self {
        let state = KinematicState::of(particle);
        if particle.charge == 0.0 || magnetic_field_z == 0.0 || state.pt() == 0.0 {
            Trajectory::Straight(StraightTrajectory::new(state))
        } else {
            Trajectory::Helix(HelixTrajectory::new(
                state,
                particle.charge,
                magnetic_field_z,
            ))
        }
    }

    pub fn state(&self) -> &KinematicState {
        match self {
            Trajectory::Straight(straight) => straight.state(),
            Trajectory::Helix(helix) => helix.state(),
        }
    }

    pub fn is_helix(&self) -> bool {
        matches!(self, Trajectory::Helix(_))
    }

    /// True if the trajectory ever reaches the layer's radius.
    pub fn crosses_barrel(&self, layer: &BarrelLayer) -> bool {
        match self {
            Trajectory::Straight(straight) => straight.crosses_radius(layer.radius()),
            Trajectory::Helix(helix) => helix.crosses_radius(layer.radius()),
        }
    }

    /// True if the trajectory's radial band overlaps the layer's material.
    pub fn crosses_forward_material(&self, layer: &ForwardLayer) -> bool {
        if layer.material_max_r() <= layer.material_min_r() {
            return false;
        }
        let (min_r, max_r) = match self {
            Trajectory::Straight(straight) => straight.radial_band(),
            Trajectory::Helix(helix) => (helix.min_radius(), helix.max_radius()),
        };
        min_r <= layer.material_max_r() && max_r >= layer.material_min_r()
    }

    /// `timeC` until the next crossing of `layer`, if the trajectory ever
    /// reaches it.
    ///
    /// `on_layer` tells the solver the particle currently sits on `layer`, so
    /// the trivial solution at the current position is discarded.
    ///
    /// # Errors
    ///
    /// [`FastSimError::RootSelection`](crate::error::FastSimError::RootSelection)
    /// if a helix intersection cannot be validated.
    pub fn next_crossing_time_c(&self, layer: Layer<'_>, on_layer: bool) -> Result<Option<f64>> {
        match (self, layer) {
            (_, Layer::Forward(forward)) => {
                Ok(forward_crossing_time_c(self.state(), forward.z(), on_layer))
            }
            (Trajectory::Straight(straight), Layer::Barrel(barrel)) => {
                Ok(straight.barrel_crossing_time_c(barrel.radius(), on_layer))
            }
            (Trajectory::Helix(helix), Layer::Barrel(barrel)) => {
                helix.barrel_crossing_time_c(barrel.radius(), on_layer)
            }
        }
    }

    /// Moves the state `delta_time_c` (cm) ahead along the trajectory.
    pub fn advance(&mut self, delta_time_c: f64) {
        match self {
            Trajectory::Straight(straight) => straight.advance(delta_time_c),
            Trajectory::Helix(helix) => helix.advance(delta_time_c),
        }
    }

    /// Copies position, time and momentum back onto `particle`.
    pub fn apply_to(&self, particle: &mut Particle) {
        let state = self.state();
        particle.position = state.position;
        particle.time = state.time;
        particle.momentum = state.momentum;
    }
}

/// Crossing of the plane `z = layer_z`: linear in time for both variants.
fn forward_crossing_time_c(state: &KinematicState, layer_z: f64, on_layer: bool) -> Option<f64> {
    // a plane is crossed at most once
    if on_layer || state.momentum.z == 0.0 {
        return None;
    }
    let delta_time_c = (layer_z - state.position.z) / state.momentum.z * state.energy;
    (delta_time_c > 0.0).then_some(delta_time_c)
}
