//! `ogb-sim` — the simulation driver.
//!
//! # Tick loop
//!
//! ```text
//! update(delta_secs):
//!   bank delta in the accumulator; drain whole 5 ms ticks (≤ 20 per call)
//!   per tick, cities in insertion order:
//!     deliver queued construction events to the listener
//!     city.update(rng)      — maps → units → spawns → agents
//!     deliver the tick's runtime events to the listener
//! ```
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use ogb_core::Vec3;
//! use ogb_sim::Simulation;
//!
//! let mut sim = Simulation::new(32, 32);
//! sim.parse_file(std::path::Path::new("demo.ogb"))?;
//! let city = sim.add_city("Paris", Vec3::ZERO)?;
//! // ... add paths, units, agents through the city handle ...
//! loop {
//!     sim.update(frame_seconds);
//! }
//! ```
//!
//! | Module         | Contents                                   |
//! |----------------|--------------------------------------------|
//! | [`simulation`] | `Simulation` driver and city registry      |
//! | [`listener`]   | `SimListener`, `NoopListener`              |
//! | [`error`]      | `SimError`, `SimResult<T>`                 |

pub mod error;
pub mod listener;
pub mod simulation;


pub use error::{SimError, SimResult};
pub use listener::{NoopListener, SimListener};
pub use simulation::Simulation;
