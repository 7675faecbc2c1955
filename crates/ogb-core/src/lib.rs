//! `ogb-core` — foundational types for the openglassbox simulation engine.
//!
//! This crate is a dependency of every other `ogb-*` crate.  It intentionally
//! has no `ogb-*` dependencies and minimal external ones (only `rand`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module       | Contents                                               |
//! |--------------|--------------------------------------------------------|
//! | [`ids`]      | `NodeId`, `WayId`, `PathId`, `MapId`, `UnitId`, `AgentId` |
//! | [`math`]     | `Vec3` world-space vector math                         |
//! | [`color`]    | `Color` (0xRRGGBB display metadata)                    |
//! | [`resource`] | `ResourceBag` ordered resource multiset                |
//! | [`rng`]      | `SimRng` (per-simulation deterministic stream)         |
//! | [`time`]     | tick constants, `TickAccumulator`                      |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public data types.   |

pub mod color;
pub mod ids;
pub mod math;
pub mod resource;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use color::Color;
pub use ids::{AgentId, MapId, NodeId, PathId, UnitId, WayId};
pub use math::Vec3;
pub use resource::{ResourceBag, ResourceSlot};
pub use rng::SimRng;
pub use time::{
    MAX_TICKS_PER_UPDATE, TICK_INTERVAL_SECS, TICKS_PER_SECOND, TickAccumulator,
};
