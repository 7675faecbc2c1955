//! The mutable state a firing rule may touch, assembled per execution site.

use std::sync::Arc;

use ogb_core::{ResourceBag, UnitId};
use ogb_map::MapIndex;

use crate::types::AgentType;

/// A deferred agent-spawn request emitted by a `SpawnAgent` command.
///
/// The city drains the spawn queue after the rule pass, runs the target
/// search, and creates the agent — commands themselves never see the city.
#[derive(Clone, Debug)]
pub struct AgentSpawn {
    /// The unit whose rule requested the spawn (the agent's origin node).
    pub unit: UnitId,
    pub agent: Arc<AgentType>,
    /// Target name the agent searches for (matched against unit targets).
    pub target: String,
    pub payload: ResourceBag,
}

/// Borrowed execution state for one rule firing.
///
/// Map rules fire with `locals = None`, `unit = None`, `radius = 0` and
/// `(u, v)` set to the cell under consideration.  Unit rules fire with the
/// unit's bag, id, node cell, and configured map radius.
pub struct RuleContext<'a> {
    /// The owning unit's resource bag, absent for map rules.
    pub locals: Option<&'a mut ResourceBag>,
    /// The city's global resource bag.
    pub globals: &'a mut ResourceBag,
    /// All maps of the city, for `RuleValue::Map` targets.
    pub maps: &'a mut MapIndex,
    /// The owning unit, absent for map rules.
    pub unit: Option<UnitId>,
    /// Whether the owning unit's node has at least one incident way.
    pub has_ways: bool,
    /// Grid cell the rule is acting on.
    pub u: u32,
    pub v: u32,
    /// Chebyshev radius for map-valued targets (0 = single cell).
    pub radius: u32,
    /// Deferred agent spawns, drained by the city after the rule pass.
    pub spawns: &'a mut Vec<AgentSpawn>,
}
