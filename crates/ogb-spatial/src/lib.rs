//! `ogb-spatial` — path graph and shortest-path search.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                  |
//! |--------------|-----------------------------------------------------------|
//! | [`path`]     | `Path` (node/way arena), `PathType`, `WayType`, splitting |
//! | [`dijkstra`] | `nearest_accepting` predicate-terminated search           |
//! | [`error`]    | `SpatialError`, `SpatialResult<T>`                        |
//!
//! Nodes and ways are arena records addressed by typed ids; cross-references
//! are ids, never pointers, so splitting ways and attaching units cannot
//! create ownership cycles.

pub mod dijkstra;
pub mod error;
pub mod path;


pub use dijkstra::{SearchResult, nearest_accepting};
pub use error::{SpatialError, SpatialResult};
pub use path::{Node, Path, PathType, Way, WayType};
