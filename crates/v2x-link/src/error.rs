use thiserror::Error;
use v2x_core::NodeId;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum LinkError {
    /// The relay search was asked about a node that is not a vehicle in the
    /// current fleet.
    #[error("vehicle {0} not found")]
    UnknownVehicle(NodeId),
}

pub type LinkResult<T> = Result<T, LinkError>;
