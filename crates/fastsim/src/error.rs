//! Error types for the fast simulation.

use thiserror::Error;

use crate::geometry::LayerId;

#[derive(Debug, Error)]
pub enum FastSimError {
    #[error("malformed thickness profile: {limits} limits and {thickness} thickness values (need N >= 2 limits and N-1 values)")]
    ThicknessTableSize { limits: usize, thickness: usize },

    #[error("thickness limits must be in increasing order: {previous} > {next}")]
    ThicknessLimitsOrder { previous: f64, next: f64 },

    #[error("barrel layer {index} has radius {radius} cm, not larger than the previous layer ({previous} cm)")]
    BarrelOrder {
        index: usize,
        radius: f64,
        previous: f64,
    },

    #[error("forward layer {index} has |z| {z} cm, not larger than the previous layer ({previous} cm)")]
    ForwardOrder { index: usize, z: f64, previous: f64 },

    #[error("forward layer {index} must be configured at positive z, got {z} cm")]
    ForwardPosition { index: usize, z: f64 },

    #[error("barrel layer {index} has non-positive radius {radius} cm")]
    BarrelRadius { index: usize, radius: f64 },

    #[error("unknown interaction model class '{0}'")]
    UnknownModelClass(String),

    #[error("layer refers to unknown interaction model '{0}'")]
    UnknownModel(String),

    #[error("duplicate interaction model name '{0}'")]
    DuplicateModel(String),

    #[error("unknown pdg id {0}")]
    UnknownParticle(i32),

    #[error("generator particle {particle} refers to missing vertex {vertex}")]
    MissingVertex { particle: usize, vertex: usize },

    #[error("particle is not on {layer}: distance to surface {distance:e} cm")]
    NotOnLayer { layer: LayerId, distance: f64 },

    #[error("helix intersection with barrel layer at r = {radius} cm failed validation (residual {residual:e} cm)")]
    RootSelection { radius: f64, residual: f64 },

    #[error("configuration error: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, FastSimError>;
