//! Spatial-subsystem error type.

use thiserror::Error;

use ogb_core::{NodeId, WayId};

/// Errors produced by `ogb-spatial`.
#[derive(Debug, Error)]
pub enum SpatialError {
    #[error("node {0} not found in path")]
    NodeNotFound(NodeId),

    #[error("way {0} not found in path")]
    WayNotFound(WayId),

    #[error("way endpoints must differ, got {0} twice")]
    SelfLoop(NodeId),

    #[error("split parameter {0} outside the open interval (0, 1)")]
    InvalidSplit(f32),
}

pub type SpatialResult<T> = Result<T, SpatialError>;
