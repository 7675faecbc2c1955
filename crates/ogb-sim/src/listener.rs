//! Listener callbacks for front ends.

use ogb_city::RuntimeWarning;
use ogb_core::{AgentId, UnitId};

/// The single callback sink a front end registers on a
/// [`Simulation`][crate::Simulation].
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.  Callbacks fire on the simulation
/// thread, in deterministic order: construction events at the next `update`
/// boundary, runtime events right after the owning city's tick pass.
///
/// # Example — agent census
///
/// ```rust,ignore
/// struct Census { alive: i64 }
///
/// impl SimListener for Census {
///     fn on_agent_added(&mut self, _c: &str, _a: AgentId, _ty: &str) { self.alive += 1; }
///     fn on_agent_removed(&mut self, _c: &str, _a: AgentId) { self.alive -= 1; }
/// }
/// ```
pub trait SimListener {
    /// A city was added to the simulation.
    fn on_city_added(&mut self, _city: &str) {}

    /// A unit was placed in `city`.
    fn on_unit_added(&mut self, _city: &str, _unit: UnitId, _unit_type: &str) {}

    /// An agent was spawned in `city` (by a rule or the construction API).
    fn on_agent_added(&mut self, _city: &str, _agent: AgentId, _agent_type: &str) {}

    /// An agent delivered its payload (or was stranded) and is destroyed.
    fn on_agent_removed(&mut self, _city: &str, _agent: AgentId) {}

    /// A non-fatal runtime condition worth surfacing (never halts the tick).
    fn on_warning(&mut self, _city: &str, _warning: &RuntimeWarning) {}
}

/// A [`SimListener`] that does nothing.  Installed by default.
pub struct NoopListener;

impl SimListener for NoopListener {}
