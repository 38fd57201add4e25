//! Spatial-subsystem error type.

use thiserror::Error;

/// Errors produced by `v2x-spatial`.
#[derive(Debug, Error, PartialEq)]
pub enum SpatialError {
    #[error("obstacle has a non-finite coordinate or size: {0}")]
    NonFiniteObstacle(String),
}

pub type SpatialResult<T> = Result<T, SpatialError>;
