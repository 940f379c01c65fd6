//! Generator-level event description, as produced by an event generator.

use nalgebra::Point3;
use serde::{Deserialize, Serialize};
use units::{Energy, Length, Time};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LengthUnit {
    #[default]
    Mm,
    Cm,
}

impl LengthUnit {
    pub fn length(self, value: f64) -> Length {
        match self {
            LengthUnit::Mm => Length::from_mm(value),
            LengthUnit::Cm => Length::from_cm(value),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MomentumUnit {
    Mev,
    #[default]
    Gev,
}

impl MomentumUnit {
    pub fn energy(self, value: f64) -> Energy {
        match self {
            MomentumUnit::Mev => Energy::from_mev(value),
            MomentumUnit::Gev => Energy::from_gev(value),
        }
    }
}

/// A generator vertex: `(x, y, z, c·t)` in the event's length unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenVertex {
    pub position: [f64; 4],
}

impl GenVertex {
    pub fn at(x: f64, y: f64, z: f64, ct: f64) -> Self {
        Self {
            position: [x, y, z, ct],
        }
    }
}

/// A generator particle: `(px, py, pz, E)` in the event's momentum unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenParticle {
    pub pdg_id: i32,
    pub momentum: [f64; 4],
    /// Index into [`GenEvent::vertices`]
    pub production_vertex: usize,
    #[serde(default)]
    pub end_vertex: Option<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenEvent {
    #[serde(default)]
    pub length_unit: LengthUnit,
    #[serde(default)]
    pub momentum_unit: MomentumUnit,
    /// The first vertex is the signal vertex
    #[serde(default)]
    pub vertices: Vec<GenVertex>,
    #[serde(default)]
    pub particles: Vec<GenParticle>,
}

impl GenEvent {
    /// Transverse distance of a vertex from the beam axis
    pub fn vertex_radius(&self, vertex: &GenVertex) -> Length {
        self.length_unit
            .length(vertex.position[0].hypot(vertex.position[1]))
    }

    /// Vertex position in cm and time in ns
    pub fn vertex_position(&self, vertex: &GenVertex) -> (Point3<f64>, Time) {
        let [x, y, z, ct] = vertex.position;
        let unit = self.length_unit;
        (
            Point3::new(
                unit.length(x).to_cm(),
                unit.length(y).to_cm(),
                unit.length(z).to_cm(),
            ),
            Time::from_path_length(unit.length(ct)),
        )
    }
}
