//! Simulation type-registry entries.
//!
//! Types are assembled once — by the script parser or by hand in tests —
//! and are immutable thereafter.  They are shared via `Arc`: every map,
//! unit, and agent instance holds a handle to its type.

use std::sync::Arc;

use ogb_core::{Color, ResourceBag};

use crate::rule::{MapRule, UnitRule};

/// Type of a resource map: per-cell capacity plus the rules that run on it.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapType {
    pub name: String,
    pub color: Color,
    /// Upper bound of every cell value.
    pub capacity: u32,
    pub rules: Vec<Arc<MapRule>>,
}

/// Type of a mobile agent.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentType {
    pub name: String,
    pub color: Color,
    /// Travel speed in world units per simulated second.
    pub speed: f32,
}

/// Type of a stationary unit.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitType {
    pub name: String,
    pub color: Color,
    /// Chebyshev radius used by map-valued commands fired from this unit.
    pub map_radius: u32,
    /// Target names agent searches match against.
    pub targets: Vec<String>,
    /// Capacity template: types and capacities, zero amounts.
    pub caps: ResourceBag,
    /// Starting amounts.  Every type listed here also appears in `caps`
    /// (the parser enforces it).
    pub resources: ResourceBag,
    pub rules: Vec<Arc<UnitRule>>,
}

impl UnitType {
    /// Build the initial inventory of a new unit of this type: the capacity
    /// template filled with the starting amounts (saturating).
    pub fn starting_bag(&self) -> ResourceBag {
        let mut bag = self.caps.clone();
        for slot in self.resources.iter() {
            bag.add(&slot.name, slot.amount);
        }
        bag
    }
}
