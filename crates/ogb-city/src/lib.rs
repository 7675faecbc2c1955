//! `ogb-city` — the world container and its inhabitants.
//!
//! A [`City`] owns everything that exists at runtime: resource maps, path
//! graphs, stationary [`Unit`]s, mobile [`Agent`]s, and the global resource
//! bag.  `City::update` runs one deterministic tick pass:
//!
//! ```text
//! ① Maps   — bump each map's tick counter; fire due rules per cell
//!            (reverse declaration order; sweep or stochastic).
//! ② Units  — bump each unit's tick counter; fire due rules with the
//!            unit's bag, cell, and radius; collect spawn intents.
//! ③ Spawns — apply queued AgentSpawn intents (target search + creation).
//! ④ Agents — advance along their routes; deliver payloads on arrival;
//!            compact destroyed agents after the pass.
//! ```
//!
//! Everything the outside world should observe (units/agents appearing,
//! agents dying, runtime warnings) is queued as [`SimEvent`]s and drained by
//! the simulation driver, which forwards them to the registered listener.
//!
//! | Module    | Contents                                  |
//! |-----------|-------------------------------------------|
//! | [`city`]  | `City`, construction API, tick pass       |
//! | [`unit`]  | `Unit`                                    |
//! | [`agent`] | `Agent`, traversal                        |
//! | [`event`] | `SimEvent`, `RuntimeWarning`              |
//! | [`error`] | `CityError`, `CityResult<T>`              |

pub mod agent;
pub mod city;
pub mod error;
pub mod event;
pub mod unit;

#[cfg(test)]
mod tests;

pub use agent::Agent;
pub use city::City;
pub use error::{CityError, CityResult};
pub use event::{RuntimeWarning, SimEvent};
pub use unit::Unit;
