//! Fast detector simulation: particle navigation through a layered tracker
//!
//! A [`Geometry`](geometry::Geometry) describes the tracker as ordered barrel
//! (cylinder) and forward (plane) layers in an axial magnetic field. A
//! [`LayerNavigator`](navigator::LayerNavigator) moves a particle from one
//! layer crossing to the next along an analytic
//! [`Trajectory`](trajectory::Trajectory), and the
//! [`Simulation`](simulation::Simulation) runs interaction models after every
//! crossing.

pub mod config;
pub mod constants;
pub mod error;
pub mod event;
pub mod geometry;
pub mod interaction;
pub mod looper;
pub mod navigator;
pub mod particle;
pub mod particle_data;
pub mod record;
pub mod simulation;
pub mod trajectory;

#[cfg(test)]
mod config_test;
#[cfg(test)]
mod navigator_test;

pub use error::{FastSimError, Result};
pub use geometry::{Geometry, Layer};
pub use navigator::LayerNavigator;
pub use particle::Particle;
pub use simulation::Simulation;
