//! City construction errors.

use thiserror::Error;

use ogb_core::{NodeId, PathId, WayId};
use ogb_spatial::SpatialError;

/// Errors produced by the city construction API.
#[derive(Debug, Error)]
pub enum CityError {
    #[error("map type {0:?} already added to this city")]
    DuplicateMap(String),

    #[error("path type {0:?} already added to this city")]
    DuplicatePath(String),

    #[error("path {0} does not belong to this city")]
    PathNotFound(PathId),

    #[error("node {0} does not belong to the given path")]
    NodeNotFound(NodeId),

    #[error("way {0} does not belong to the given path")]
    WayNotFound(WayId),

    #[error(transparent)]
    Spatial(#[from] SpatialError),
}

pub type CityResult<T> = Result<T, CityError>;
