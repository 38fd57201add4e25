use thiserror::Error;
use v2x_core::NodeId;

#[derive(Debug, Error, PartialEq)]
pub enum MobilityError {
    #[error("vehicle id {0} appears more than once")]
    DuplicateVehicle(NodeId),

    #[error("vehicle {id} has invalid speed {speed}")]
    InvalidSpeed { id: NodeId, speed: f64 },

    #[error("vehicle {0} has a non-finite lane or position")]
    NonFinite(NodeId),

    #[error("cannot spawn vehicles without any lanes")]
    NoLanes,

    #[error("empty speed range {min}..{max}")]
    EmptySpeedRange { min: f64, max: f64 },
}

pub type MobilityResult<T> = Result<T, MobilityError>;
