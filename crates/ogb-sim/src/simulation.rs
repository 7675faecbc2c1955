//! The `Simulation` driver.

use std::collections::HashMap;
use std::path::Path;

use ogb_city::{City, SimEvent};
use ogb_core::{SimRng, TickAccumulator, Vec3};
use ogb_script::TypeCatalog;

use crate::error::{SimError, SimResult};
use crate::listener::{NoopListener, SimListener};

/// Owns the type catalog, the cities, the accumulator, the RNG stream, and
/// the registered listener.  `update` is the only entry point that advances
/// world state; everything it does is single-threaded and deterministic.
pub struct Simulation {
    grid_u: u32,
    grid_v: u32,
    catalog: TypeCatalog,
    cities: Vec<City>,
    city_ids: HashMap<String, usize>,
    accumulator: TickAccumulator,
    total_ticks: u64,
    rng: SimRng,
    listener: Box<dyn SimListener>,
}

impl Simulation {
    /// A simulation whose cities share a `grid_u × grid_v` map grid, with
    /// the default RNG seed (0).
    pub fn new(grid_u: u32, grid_v: u32) -> Self {
        Self::with_seed(grid_u, grid_v, 0)
    }

    /// Like [`new`](Self::new) with an explicit seed for the stochastic
    /// map-rule stream.  Identical seeds and tick-aligned inputs replay
    /// identically.
    pub fn with_seed(grid_u: u32, grid_v: u32, seed: u64) -> Self {
        Self {
            grid_u,
            grid_v,
            catalog: TypeCatalog::new(),
            cities: Vec::new(),
            city_ids: HashMap::new(),
            accumulator: TickAccumulator::new(),
            total_ticks: 0,
            rng: SimRng::new(seed),
            listener: Box::new(NoopListener),
        }
    }

    // ── Type catalog ──────────────────────────────────────────────────────

    /// Parse a scenario script, replacing the current type catalog.
    pub fn parse_script(&mut self, source: &str) -> SimResult<()> {
        self.catalog = ogb_script::parse_script(source)?;
        Ok(())
    }

    /// Parse a scenario script from a file, replacing the current catalog.
    pub fn parse_file(&mut self, path: &Path) -> SimResult<()> {
        self.catalog = ogb_script::parse_file(path)?;
        Ok(())
    }

    pub fn catalog(&self) -> &TypeCatalog {
        &self.catalog
    }

    // ── Listener ──────────────────────────────────────────────────────────

    /// Install `listener`, replacing any previously registered one.
    pub fn set_listener(&mut self, listener: Box<dyn SimListener>) {
        self.listener = listener;
    }

    // ── Cities ────────────────────────────────────────────────────────────

    /// Create a city anchored at `position`, sharing the simulation grid.
    ///
    /// The `on_city_added` callback is queued (the city announces itself)
    /// and delivered at the next `update` boundary, like every other
    /// construction event.
    pub fn add_city(&mut self, name: &str, position: Vec3) -> SimResult<&mut City> {
        if self.city_ids.contains_key(name) {
            return Err(SimError::DuplicateCity(name.to_owned()));
        }
        let idx = self.cities.len();
        self.city_ids.insert(name.to_owned(), idx);
        self.cities.push(City::new(name, position, self.grid_u, self.grid_v));
        Ok(&mut self.cities[idx])
    }

    pub fn city(&self, name: &str) -> Option<&City> {
        self.city_ids.get(name).map(|&i| &self.cities[i])
    }

    pub fn city_mut(&mut self, name: &str) -> Option<&mut City> {
        match self.city_ids.get(name) {
            Some(&i) => self.cities.get_mut(i),
            None => None,
        }
    }

    /// Cities in insertion order.
    pub fn cities(&self) -> impl Iterator<Item = &City> {
        self.cities.iter()
    }

    // ── Time ──────────────────────────────────────────────────────────────

    /// Ticks executed since construction.
    pub fn total_ticks(&self) -> u64 {
        self.total_ticks
    }

    /// Advance simulated time by `delta_secs`.
    ///
    /// Banks the delta and runs whole 5 ms ticks, at most 20 per call;
    /// backlog beyond the cap is discarded.  Queued construction events are
    /// delivered to the listener even when the delta is too small to tick.
    pub fn update(&mut self, delta_secs: f32) {
        self.flush_events();
        let ticks = self.accumulator.drain(delta_secs);
        for _ in 0..ticks {
            self.tick();
        }
    }

    fn tick(&mut self) {
        self.total_ticks += 1;
        let rng = &mut self.rng;
        let listener = self.listener.as_mut();
        for city in self.cities.iter_mut() {
            city.update(rng);
            for event in city.drain_events() {
                dispatch(listener, city.name(), event);
            }
        }
    }

    /// Deliver construction-time events queued since the last update.
    fn flush_events(&mut self) {
        let listener = self.listener.as_mut();
        for city in self.cities.iter_mut() {
            for event in city.drain_events() {
                dispatch(listener, city.name(), event);
            }
        }
    }
}

fn dispatch(listener: &mut dyn SimListener, city: &str, event: SimEvent) {
    match event {
        SimEvent::CityAdded { name } => listener.on_city_added(&name),
        SimEvent::UnitAdded { unit, type_name } => {
            listener.on_unit_added(city, unit, &type_name);
        }
        SimEvent::AgentAdded { agent, type_name } => {
            listener.on_agent_added(city, agent, &type_name);
        }
        SimEvent::AgentRemoved { agent } => listener.on_agent_removed(city, agent),
        SimEvent::Warning(warning) => listener.on_warning(city, &warning),
    }
}
