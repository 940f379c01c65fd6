//! WASM bindings for the fast detector simulation.
//!
//! This crate exposes the fastsim crate to JavaScript/TypeScript so that a
//! browser can display a tracker and the paths of particles through it.
//!
//! # Architecture
//!
//! Detectors are stored in thread-local storage (WASM is single-threaded).
//! Functions return opaque IDs for referencing them, and serializable
//! snapshots for reading results.
//!
//! # Example Usage (JavaScript)
//!
//! ```javascript
//! // Build a detector from a configuration object
//! const detectorId = detector_create({
//!   geometry: {
//!     barrelLayers: [{ radius: 10.0, limits: [0.0, 50.0], thickness: [0.02] }],
//!     forwardLayers: [{ z: 60.0, limits: [0.0, 10.0], thickness: [0.02] }],
//!     magneticField: 3.8
//!   }
//! });
//!
//! // Trace a positive pion from the origin
//! const crossings = detector_trace(detectorId, {
//!   pdgId: 211,
//!   charge: 1.0,
//!   position: [0.0, 0.0, 0.0, 0.0],
//!   momentum: [1.0, 0.0, 0.5, 1.127]
//! });
//!
//! detector_delete(detectorId);
//! ```

use std::cell::RefCell;
use std::collections::HashMap;

use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

use fastsim::config::SimulationConfig;
use fastsim::event::GenEvent;
use fastsim::geometry::{LayerId, LayerKind};
use fastsim::record::{EventRecord, LayerHit};
use fastsim::simulation::Crossing;
use fastsim::{Layer, Particle, Simulation};

// =============================================================================
// Serialization helpers
// =============================================================================

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsError> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsError::new(&e.to_string()))
}

fn from_js<T: serde::de::DeserializeOwned>(value: JsValue) -> Result<T, JsError> {
    serde_wasm_bindgen::from_value(value).map_err(|e| JsError::new(&e.to_string()))
}

fn to_js_error(err: fastsim::FastSimError) -> JsError {
    JsError::new(&err.to_string())
}

// =============================================================================
// Thread-local storage for detectors
// =============================================================================

thread_local! {
    static DETECTORS: RefCell<HashMap<u32, Simulation>> = RefCell::new(HashMap::new());
    static NEXT_DETECTOR_ID: RefCell<u32> = const { RefCell::new(0) };
}

fn store(simulation: Simulation) -> u32 {
    let id = NEXT_DETECTOR_ID.with(|next_id| {
        let mut id = next_id.borrow_mut();
        let current = *id;
        *id += 1;
        current
    });

    DETECTORS.with(|detectors| {
        detectors.borrow_mut().insert(id, simulation);
    });

    id
}

fn not_found(detector_id: u32) -> JsError {
    JsError::new(&format!("Detector {} not found", detector_id))
}

// =============================================================================
// Serializable types for JavaScript interop
// =============================================================================

fn kind_name(kind: LayerKind) -> &'static str {
    match kind {
        LayerKind::Barrel => "barrel",
        LayerKind::Forward => "forward",
    }
}

fn four_vector(spatial: &Vector3<f64>, fourth: f64) -> [f64; 4] {
    [spatial.x, spatial.y, spatial.z, fourth]
}

/// Particle to trace
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticleInput {
    pub pdg_id: i32,
    /// Charge in units of e
    pub charge: f64,
    /// Position [x, y, z, t] in cm and ns
    pub position: [f64; 4],
    /// Momentum [px, py, pz, E] in GeV
    pub momentum: [f64; 4],
    /// Remaining proper lifetime c·τ in cm, stable when omitted
    #[serde(default)]
    pub proper_lifetime_c: Option<f64>,
}

impl ParticleInput {
    fn into_particle(self) -> Particle {
        let [x, y, z, t] = self.position;
        let [px, py, pz, e] = self.momentum;
        let particle = Particle::new(
            self.pdg_id,
            self.charge,
            Point3::new(x, y, z),
            t,
            Vector3::new(px, py, pz),
            e,
        );
        match self.proper_lifetime_c {
            Some(lifetime) => particle.with_proper_lifetime_c(lifetime),
            None => particle,
        }
    }
}

/// Layer description for JavaScript
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerSnapshot {
    /// "barrel" or "forward"
    pub kind: &'static str,
    pub index: usize,
    /// Radius of a barrel layer or z of a forward layer, in cm
    pub position: f64,
    /// Extent covered by material (|z| for barrels, r for forward layers)
    pub material_min: f64,
    pub material_max: f64,
    pub active_layer: Option<String>,
    /// Field at the first material point, in T
    pub magnetic_field: f64,
}

impl From<Layer<'_>> for LayerSnapshot {
    fn from(layer: Layer<'_>) -> Self {
        let profile = layer.thickness_profile();
        let probe = match layer {
            Layer::Barrel(barrel) => Point3::new(barrel.radius(), 0.0, profile.material_min()),
            Layer::Forward(forward) => Point3::new(profile.material_min(), 0.0, forward.z()),
        };
        Self {
            kind: kind_name(layer.kind()),
            index: layer.index(),
            position: layer.position(),
            material_min: profile.material_min(),
            material_max: profile.material_max(),
            active_layer: layer.active_layer().map(str::to_string),
            magnetic_field: layer.magnetic_field_z(&probe),
        }
    }
}

/// Reference to a layer inside crossing and hit snapshots
#[derive(Clone, Copy, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerRef {
    pub kind: &'static str,
    pub index: usize,
}

impl From<LayerId> for LayerRef {
    fn from(id: LayerId) -> Self {
        Self {
            kind: kind_name(id.kind),
            index: id.index,
        }
    }
}

/// Particle state on a layer surface
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CrossingSnapshot {
    pub layer: LayerRef,
    /// Position [x, y, z, t] in cm and ns
    pub position: [f64; 4],
    /// Momentum [px, py, pz, E] in GeV
    pub momentum: [f64; 4],
}

impl From<&Crossing> for CrossingSnapshot {
    fn from(crossing: &Crossing) -> Self {
        Self {
            layer: crossing.layer.into(),
            position: four_vector(&crossing.position.coords, crossing.time),
            momentum: four_vector(&crossing.momentum, crossing.energy),
        }
    }
}

/// Hit recorded by a hit-producing model
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HitSnapshot {
    pub layer: LayerRef,
    pub active_layer: Option<String>,
    pub pdg_id: i32,
    pub sim_track: Option<usize>,
    pub position: [f64; 4],
    pub momentum: [f64; 4],
}

impl From<&LayerHit> for HitSnapshot {
    fn from(hit: &LayerHit) -> Self {
        Self {
            layer: hit.layer.into(),
            active_layer: hit.active_layer.clone(),
            pdg_id: hit.pdg_id,
            sim_track: hit.sim_track,
            position: four_vector(&hit.position.coords, hit.time),
            momentum: four_vector(&hit.momentum, hit.energy),
        }
    }
}

/// Simulated track for JavaScript
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackSnapshot {
    pub pdg_id: i32,
    pub charge: f64,
    pub vertex: usize,
    pub gen_particle: Option<usize>,
    /// Momentum at production [px, py, pz, E] in GeV
    pub momentum: [f64; 4],
}

/// Complete event result
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventSnapshot {
    pub tracks: Vec<TrackSnapshot>,
    /// Vertex positions [x, y, z, t] in cm and ns
    pub vertices: Vec<[f64; 4]>,
    pub hits: Vec<HitSnapshot>,
}

impl From<&EventRecord> for EventSnapshot {
    fn from(record: &EventRecord) -> Self {
        Self {
            tracks: record
                .sim_tracks
                .iter()
                .map(|track| TrackSnapshot {
                    pdg_id: track.pdg_id,
                    charge: track.charge,
                    vertex: track.vertex,
                    gen_particle: track.gen_particle,
                    momentum: four_vector(&track.momentum, track.energy),
                })
                .collect(),
            vertices: record
                .sim_vertices
                .iter()
                .map(|vertex| four_vector(&vertex.position.coords, vertex.time))
                .collect(),
            hits: record.layer_hits.iter().map(HitSnapshot::from).collect(),
        }
    }
}

// =============================================================================
// Detector management functions
// =============================================================================

/// Create a detector from a configuration object.
///
/// Returns a detector ID for use with other functions.
///
/// # Arguments
/// * `config` - Simulation configuration (geometry, interactionModels, cuts, seed)
#[wasm_bindgen]
pub fn detector_create(config: JsValue) -> Result<u32, JsError> {
    let config: SimulationConfig = from_js(config)?;
    let simulation = Simulation::from_config(&config).map_err(to_js_error)?;
    Ok(store(simulation))
}

/// Create a detector from a JSON configuration string.
#[wasm_bindgen]
pub fn detector_create_from_json(json: &str) -> Result<u32, JsError> {
    let config = SimulationConfig::from_json(json).map_err(to_js_error)?;
    let simulation = Simulation::from_config(&config).map_err(to_js_error)?;
    Ok(store(simulation))
}

/// Delete a detector to free memory.
#[wasm_bindgen]
pub fn detector_delete(detector_id: u32) {
    DETECTORS.with(|detectors| {
        detectors.borrow_mut().remove(&detector_id);
    });
}

// =============================================================================
// Queries
// =============================================================================

/// Get all layers, barrel layers first, each group ordered by index.
#[wasm_bindgen]
pub fn detector_layers(detector_id: u32) -> Result<JsValue, JsError> {
    DETECTORS.with(|detectors| {
        let detectors = detectors.borrow();
        let simulation = detectors
            .get(&detector_id)
            .ok_or_else(|| not_found(detector_id))?;

        let layers: Vec<LayerSnapshot> = simulation
            .geometry()
            .layers()
            .map(LayerSnapshot::from)
            .collect();

        to_js(&layers)
    })
}

/// Trace one particle through the detector without running any interaction model.
///
/// # Arguments
/// * `detector_id` - Detector ID
/// * `particle` - Particle (pdgId, charge, position, momentum, properLifetimeC)
///
/// # Returns
/// The ordered list of layer crossings
#[wasm_bindgen]
pub fn detector_trace(detector_id: u32, particle: JsValue) -> Result<JsValue, JsError> {
    let particle: ParticleInput = from_js(particle)?;

    DETECTORS.with(|detectors| {
        let detectors = detectors.borrow();
        let simulation = detectors
            .get(&detector_id)
            .ok_or_else(|| not_found(detector_id))?;

        let crossings = simulation
            .trace(particle.into_particle())
            .map_err(to_js_error)?;
        let snapshots: Vec<CrossingSnapshot> = crossings.iter().map(CrossingSnapshot::from).collect();

        to_js(&snapshots)
    })
}

/// Simulate a generator event through the detector.
///
/// # Arguments
/// * `detector_id` - Detector ID
/// * `event` - Generator event (lengthUnit, momentumUnit, vertices, particles)
#[wasm_bindgen]
pub fn detector_simulate_event(detector_id: u32, event: JsValue) -> Result<JsValue, JsError> {
    let event: GenEvent = from_js(event)?;

    DETECTORS.with(|detectors| {
        let mut detectors = detectors.borrow_mut();
        let simulation = detectors
            .get_mut(&detector_id)
            .ok_or_else(|| not_found(detector_id))?;

        let record = simulation.simulate_event(&event).map_err(to_js_error)?;

        to_js(&EventSnapshot::from(&record))
    })
}

/// Number of detectors currently alive.
#[wasm_bindgen]
pub fn detector_count() -> usize {
    DETECTORS.with(|detectors| detectors.borrow().len())
}
