//! Observable city events.
//!
//! Cities never call listeners directly: events accumulate in the owning
//! city's queue and are drained by the simulation driver at defined points
//! (construction events at the next update boundary, runtime events right
//! after the owning city's tick pass).  Delivery order is deterministic.

use ogb_core::{AgentId, UnitId};

/// Non-fatal conditions surfaced to the listener.  Warnings never halt the
/// tick; rule-validation failure is ordinary control flow and only warrants
/// a warning when there is no fallback to absorb it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RuntimeWarning {
    /// An agent was spawned but no reachable unit accepts its target and
    /// payload; it is destroyed on its first update.
    NoReachableTarget { agent: AgentId, target: String },

    /// A unit rule with no `on_fail` fallback aborted validation.
    RuleAborted { unit: UnitId, rule: String },
}

/// One observable lifecycle event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SimEvent {
    /// Queued by every new city on construction, so the callback reaches
    /// the listener through the same drain as every other event.
    CityAdded { name: String },
    UnitAdded { unit: UnitId, type_name: String },
    AgentAdded { agent: AgentId, type_name: String },
    AgentRemoved { agent: AgentId },
    Warning(RuntimeWarning),
}
