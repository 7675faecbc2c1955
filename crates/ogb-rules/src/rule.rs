//! Rule types and two-phase firing.
//!
//! Both rule kinds share the same firing discipline: validate every command
//! in reverse declaration order; if any fails, abort with zero side effects;
//! otherwise execute every command, also in reverse declaration order.
//! Later-declared rules and commands take effective priority within a tick.

use std::sync::Arc;

use crate::command::RuleCommand;
use crate::context::RuleContext;

/// Two-phase fire shared by both rule kinds.  Returns `true` if the batch
/// executed.
fn fire_commands(commands: &[RuleCommand], ctx: &mut RuleContext<'_>) -> bool {
    for command in commands.iter().rev() {
        if !command.validate(ctx) {
            return false;
        }
    }
    for command in commands.iter().rev() {
        command.execute(ctx);
    }
    true
}

// ── MapRule ───────────────────────────────────────────────────────────────────

/// A periodic rule attached to a map type, fired per cell.
///
/// In sweep mode (`random_tiles = false`) the rule body runs for every cell
/// in row-major order.  In stochastic mode the cells are visited in an RNG
/// permutation and each fires with probability `random_tiles_percent / 100`.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapRule {
    pub name: String,
    /// Fires when `map_tick % rate == 0`; a rate of 0 disables the rule.
    pub rate: u32,
    pub random_tiles: bool,
    /// Per-cell firing probability in percent, used in stochastic mode.
    pub random_tiles_percent: u8,
    pub commands: Vec<RuleCommand>,
}

impl MapRule {
    #[inline]
    pub fn should_fire(&self, tick: u32) -> bool {
        self.rate > 0 && tick % self.rate == 0
    }

    /// Fire the rule body once.  Returns `true` if the batch executed.
    pub fn fire(&self, ctx: &mut RuleContext<'_>) -> bool {
        fire_commands(&self.commands, ctx)
    }
}

// ── UnitRule ──────────────────────────────────────────────────────────────────

/// A periodic rule attached to a unit type.
///
/// If the batch aborts and `on_fail` is set, the fallback rule fires
/// recursively with the same context.  Fallback chains cannot cycle: the
/// parser only resolves `on_fail` against already-registered rules.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitRule {
    pub name: String,
    /// Fires when `unit_tick % rate == 0`; a rate of 0 disables the rule.
    pub rate: u32,
    pub commands: Vec<RuleCommand>,
    pub on_fail: Option<Arc<UnitRule>>,
}

impl UnitRule {
    #[inline]
    pub fn should_fire(&self, tick: u32) -> bool {
        self.rate > 0 && tick % self.rate == 0
    }

    /// Fire the rule, falling back to `on_fail` on abort.
    ///
    /// Returns `true` if this rule's own batch executed (the fallback's
    /// outcome does not count).
    pub fn fire(&self, ctx: &mut RuleContext<'_>) -> bool {
        if fire_commands(&self.commands, ctx) {
            return true;
        }
        if let Some(fallback) = &self.on_fail {
            fallback.fire(ctx);
        }
        false
    }
}
