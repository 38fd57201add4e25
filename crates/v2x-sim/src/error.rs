use std::path::PathBuf;

use thiserror::Error;
use v2x_core::{CoreError, NodeId};
use v2x_mobility::MobilityError;
use v2x_spatial::SpatialError;

use crate::SimState;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(#[from] CoreError),

    #[error("obstacle error: {0}")]
    Spatial(#[from] SpatialError),

    #[error("cannot {action} a simulation that is {from}")]
    InvalidTransition {
        from:   SimState,
        action: &'static str,
    },

    #[error("node id {0} is used by both a vehicle and the base station")]
    StationIdClash(NodeId),
}

pub type SimResult<T> = Result<T, SimError>;

/// Failures while reading or validating a scene file.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("failed to read scene {path}: {source}")]
    Io {
        path:   PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse scene JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid scene configuration: {0}")]
    Config(#[from] CoreError),

    #[error("invalid obstacle: {0}")]
    Spatial(#[from] SpatialError),

    #[error("invalid vehicle: {0}")]
    Mobility(#[from] MobilityError),

    #[error("invalid scene: {0}")]
    Invalid(String),
}

pub type SceneResult<T> = Result<T, SceneError>;
