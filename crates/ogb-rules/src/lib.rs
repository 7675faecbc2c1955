//! `ogb-rules` — the rule system and the simulation type registry entries.
//!
//! Rules are the engine's only mutators of resource state.  A rule is an
//! ordered list of commands fired periodically against a [`RuleContext`];
//! execution is two-phase (validate everything, then execute everything, both
//! in reverse declaration order) so a rule either applies completely or not
//! at all.
//!
//! Commands never touch a city directly: agent spawns are emitted as
//! [`AgentSpawn`] intents into the context's queue and applied by the city
//! after the rule pass.  This keeps the validate phase pure and the borrows
//! disjoint.
//!
//! | Module      | Contents                                               |
//! |-------------|--------------------------------------------------------|
//! | [`value`]   | `RuleValue` (local / global / map accessors)           |
//! | [`command`] | `RuleCommand`, `Comparison`                            |
//! | [`context`] | `RuleContext`, `AgentSpawn`                            |
//! | [`rule`]    | `MapRule`, `UnitRule`, two-phase firing                |
//! | [`types`]   | `MapType`, `UnitType`, `AgentType` registry entries    |

pub mod command;
pub mod context;
pub mod rule;
pub mod types;
pub mod value;


pub use command::{Comparison, RuleCommand};
pub use context::{AgentSpawn, RuleContext};
pub use rule::{MapRule, UnitRule};
pub use types::{AgentType, MapType, UnitType};
pub use value::RuleValue;
