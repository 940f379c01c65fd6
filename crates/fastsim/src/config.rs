//! Top-level simulation configuration, read from JSON.

use serde::{Deserialize, Serialize};
use units::{Energy, Length, Time};

use crate::error::Result;
use crate::geometry::GeometryConfig;
use crate::interaction::InteractionModelConfig;

fn default_beam_pipe_radius() -> Length {
    Length::from_cm(3.0)
}

fn default_time_cut() -> Time {
    Time::from_ns(300.0)
}

fn default_min_energy() -> Energy {
    Energy::from_gev(0.1)
}

fn default_max_crossings() -> usize {
    1000
}

/// Everything needed to set up a [`Simulation`](crate::simulation::Simulation).
///
/// # Examples
///
/// ```
/// use fastsim::config::SimulationConfig;
///
/// let config = SimulationConfig::from_json(
///     r#"{
///         "geometry": {
///             "barrelLayers": [ { "radius": 4.4, "interactionModels": ["hits"] } ]
///         },
///         "interactionModels": [ { "name": "hits", "className": "SimpleLayerHitProducer" } ],
///         "seed": 7
///     }"#,
/// )
/// .unwrap();
///
/// assert_eq!(config.max_crossings, 1000);
/// assert_eq!(config.beam_pipe_radius.to_cm(), 3.0);
/// assert_eq!(config.geometry.magnetic_field.to_tesla(), 3.8);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationConfig {
    #[serde(default)]
    pub geometry: GeometryConfig,
    #[serde(default)]
    pub interaction_models: Vec<InteractionModelConfig>,
    /// Only particles produced inside this radius are simulated
    #[serde(default = "default_beam_pipe_radius")]
    pub beam_pipe_radius: Length,
    /// A particle is dropped once its lab time exceeds this
    #[serde(default = "default_time_cut")]
    pub time_cut: Time,
    /// A particle is dropped once its energy falls below this
    #[serde(default = "default_min_energy")]
    pub min_energy: Energy,
    /// Upper bound on layer crossings per particle
    #[serde(default = "default_max_crossings")]
    pub max_crossings: usize,
    #[serde(default)]
    pub seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            geometry: GeometryConfig::default(),
            interaction_models: Vec::new(),
            beam_pipe_radius: default_beam_pipe_radius(),
            time_cut: default_time_cut(),
            min_energy: default_min_energy(),
            max_crossings: default_max_crossings(),
            seed: 0,
        }
    }
}

impl SimulationConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
