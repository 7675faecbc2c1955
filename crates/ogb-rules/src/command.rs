//! Rule commands: the closed set of operations a rule body may contain.

use std::sync::Arc;

use ogb_core::ResourceBag;

use crate::context::{AgentSpawn, RuleContext};
use crate::types::AgentType;
use crate::value::RuleValue;

/// Comparison operator for `Test` commands.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Comparison {
    Equal,
    Greater,
    Less,
}

impl Comparison {
    #[inline]
    pub fn holds(self, lhs: u32, rhs: u32) -> bool {
        match self {
            Comparison::Equal => lhs == rhs,
            Comparison::Greater => lhs > rhs,
            Comparison::Less => lhs < rhs,
        }
    }
}

/// One command of a rule body.
///
/// `validate` must be pure: the whole rule aborts if any command fails, and
/// an aborted rule must leave no trace.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RuleCommand {
    /// Add `amount` at `target`.
    Add { target: RuleValue, amount: u32 },
    /// Remove `amount` from `target`.
    Remove { target: RuleValue, amount: u32 },
    /// Pure predicate gating the batch; executes as a no-op.
    Test {
        target: RuleValue,
        comparison: Comparison,
        amount: u32,
    },
    /// Spawn an agent of type `agent` searching for a unit whose target
    /// list contains `target`, carrying `payload`.
    SpawnAgent {
        agent: Arc<AgentType>,
        target: String,
        payload: ResourceBag,
    },
}

impl RuleCommand {
    /// `true` if the command could execute against `ctx` right now.
    pub fn validate(&self, ctx: &RuleContext<'_>) -> bool {
        match self {
            RuleCommand::Add { target, amount } => target.can_add(ctx, *amount),
            RuleCommand::Remove { target, amount } => target.can_remove(ctx, *amount),
            RuleCommand::Test { target, comparison, amount } => {
                comparison.holds(target.get(ctx), *amount)
            }
            // Agents can only leave a unit whose node is on the graph.
            RuleCommand::SpawnAgent { .. } => ctx.unit.is_some() && ctx.has_ways,
        }
    }

    /// Apply the command.  Callers must have validated the whole batch first.
    pub fn execute(&self, ctx: &mut RuleContext<'_>) {
        match self {
            RuleCommand::Add { target, amount } => target.add(ctx, *amount),
            RuleCommand::Remove { target, amount } => target.remove(ctx, *amount),
            RuleCommand::Test { .. } => {}
            RuleCommand::SpawnAgent { agent, target, payload } => {
                if let Some(unit) = ctx.unit {
                    ctx.spawns.push(AgentSpawn {
                        unit,
                        agent: Arc::clone(agent),
                        target: target.clone(),
                        payload: payload.clone(),
                    });
                }
            }
        }
    }
}
