//! Per-event output: simulated tracks, vertices and layer hits.

use nalgebra::{Point3, Vector3};

use crate::geometry::LayerId;

/// A point where simulated tracks begin or end (cm, ns).
#[derive(Debug, Clone, PartialEq)]
pub struct SimVertex {
    pub position: Point3<f64>,
    pub time: f64,
    /// Track that ended here, if any (primary vertices have none)
    pub parent_track: Option<usize>,
}

/// One simulated particle, from its production vertex onwards.
#[derive(Debug, Clone, PartialEq)]
pub struct SimTrack {
    pub pdg_id: i32,
    pub charge: f64,
    /// Momentum at production (GeV/c)
    pub momentum: Vector3<f64>,
    /// Energy at production (GeV)
    pub energy: f64,
    pub vertex: usize,
    /// Index of the generator particle, for primaries
    pub gen_particle: Option<usize>,
}

/// A particle crossing registered on a layer surface.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerHit {
    pub layer: LayerId,
    pub active_layer: Option<String>,
    pub position: Point3<f64>,
    pub time: f64,
    pub momentum: Vector3<f64>,
    pub energy: f64,
    pub pdg_id: i32,
    pub sim_track: Option<usize>,
}

/// Everything produced while simulating one event.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventRecord {
    pub sim_tracks: Vec<SimTrack>,
    pub sim_vertices: Vec<SimVertex>,
    pub layer_hits: Vec<LayerHit>,
}

impl EventRecord {
    pub fn new() -> Self {
        Self::default()
    }
}
