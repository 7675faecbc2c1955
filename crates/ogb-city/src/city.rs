//! The `City` world container and its tick pass.

use std::collections::HashMap;
use std::sync::Arc;

use ogb_core::{AgentId, MapId, NodeId, PathId, ResourceBag, SimRng, UnitId, Vec3, WayId};
use ogb_map::{Map, MapIndex, world_to_cell};
use ogb_rules::{AgentSpawn, AgentType, MapRule, MapType, RuleContext, UnitType};
use ogb_spatial::{Path, PathType, SearchResult, nearest_accepting};

use crate::agent::{Agent, AgentStep};
use crate::error::{CityError, CityResult};
use crate::event::{RuntimeWarning, SimEvent};
use crate::unit::Unit;

/// A world instance: maps, path graphs, units, agents, and a global
/// resource bag, all updated in deterministic insertion order.
pub struct City {
    name: String,
    position: Vec3,
    grid_u: u32,
    grid_v: u32,
    globals: ResourceBag,
    maps: MapIndex,
    map_types: Vec<Arc<MapType>>,
    map_ticks: Vec<u32>,
    paths: Vec<Path>,
    path_ids: HashMap<String, PathId>,
    units: Vec<Unit>,
    agents: Vec<Agent>,
    next_agent: u32,
    events: Vec<SimEvent>,
}

impl City {
    pub fn new(name: &str, position: Vec3, grid_u: u32, grid_v: u32) -> Self {
        Self {
            name: name.to_owned(),
            position,
            grid_u,
            grid_v,
            globals: ResourceBag::new(),
            maps: MapIndex::new(),
            map_types: Vec::new(),
            map_ticks: Vec::new(),
            paths: Vec::new(),
            path_ids: HashMap::new(),
            units: Vec::new(),
            agents: Vec::new(),
            next_agent: 0,
            // The city announces its own creation; the driver drains it at
            // the next update boundary like every other construction event.
            events: vec![SimEvent::CityAdded { name: name.to_owned() }],
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// `(grid_u, grid_v)` dimensions shared by every map of this city.
    pub fn grid(&self) -> (u32, u32) {
        (self.grid_u, self.grid_v)
    }

    pub fn globals(&self) -> &ResourceBag {
        &self.globals
    }

    pub fn globals_mut(&mut self) -> &mut ResourceBag {
        &mut self.globals
    }

    pub fn maps(&self) -> &MapIndex {
        &self.maps
    }

    pub fn map(&self, name: &str) -> Option<&Map> {
        self.maps.by_name(name)
    }

    pub fn path(&self, id: PathId) -> Option<&Path> {
        self.paths.get(id.index())
    }

    pub fn path_mut(&mut self, id: PathId) -> Option<&mut Path> {
        self.paths.get_mut(id.index())
    }

    pub fn path_id(&self, name: &str) -> Option<PathId> {
        self.path_ids.get(name).copied()
    }

    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.units.get(id.index())
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    /// Drain the pending event queue (oldest first).
    pub fn drain_events(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }

    // ── Construction API ──────────────────────────────────────────────────

    /// Instantiate `ty` as a map sharing the city grid dimensions.
    pub fn add_map(&mut self, ty: Arc<MapType>) -> CityResult<MapId> {
        let id = self
            .maps
            .add(&ty.name, ty.capacity, self.grid_u, self.grid_v)
            .ok_or_else(|| CityError::DuplicateMap(ty.name.clone()))?;
        self.map_types.push(ty);
        self.map_ticks.push(0);
        Ok(id)
    }

    /// Create an empty path graph of type `ty`.
    pub fn add_path(&mut self, ty: Arc<PathType>) -> CityResult<PathId> {
        if self.path_ids.contains_key(&ty.name) {
            return Err(CityError::DuplicatePath(ty.name.clone()));
        }
        let id = PathId(self.paths.len() as u32);
        self.path_ids.insert(ty.name.clone(), id);
        self.paths.push(Path::new(ty));
        Ok(id)
    }

    /// Place a unit along `way` at fractional parameter `t ∈ [0, 1]`.
    ///
    /// `t` of 0 or 1 binds the unit to the way's existing endpoint; an
    /// interior `t` splits the way and binds to the inserted node.
    pub fn add_unit(
        &mut self,
        ty: Arc<UnitType>,
        path: PathId,
        way: WayId,
        t: f32,
    ) -> CityResult<UnitId> {
        let graph = self
            .paths
            .get_mut(path.index())
            .ok_or(CityError::PathNotFound(path))?;
        if way.index() >= graph.way_count() {
            return Err(CityError::WayNotFound(way));
        }
        let node = if t <= 0.0 {
            graph.way(way).from()
        } else if t >= 1.0 {
            graph.way(way).to()
        } else {
            graph.split_way(way, t)?
        };

        let id = UnitId(self.units.len() as u32);
        graph.attach_unit(node, id)?;
        self.events.push(SimEvent::UnitAdded {
            unit: id,
            type_name: ty.name.clone(),
        });
        self.units.push(Unit::new(id, ty, path, node));
        Ok(id)
    }

    /// Spawn an agent at `from`, searching for the nearest unit accepting
    /// `target` with `payload`.
    pub fn add_agent(
        &mut self,
        ty: Arc<AgentType>,
        path: PathId,
        from: NodeId,
        target: &str,
        payload: ResourceBag,
    ) -> CityResult<AgentId> {
        let graph = self.paths.get(path.index()).ok_or(CityError::PathNotFound(path))?;
        if from.index() >= graph.node_count() {
            return Err(CityError::NodeNotFound(from));
        }
        Ok(self.spawn_agent(ty, path, from, target, payload))
    }

    // ── Tick pass ─────────────────────────────────────────────────────────

    /// Run one tick over this city: maps, units, spawn intents, agents.
    pub fn update(&mut self, rng: &mut SimRng) {
        self.update_maps(rng);
        let spawns = self.update_units();
        for spawn in spawns {
            let (path, node) = {
                let unit = &self.units[spawn.unit.index()];
                (unit.path, unit.node)
            };
            self.spawn_agent(spawn.agent, path, node, &spawn.target, spawn.payload);
        }
        self.update_agents();
    }

    fn update_maps(&mut self, rng: &mut SimRng) {
        let (dim_u, dim_v) = (self.grid_u, self.grid_v);
        for i in 0..self.map_types.len() {
            self.map_ticks[i] += 1;
            let tick = self.map_ticks[i];
            let ty = Arc::clone(&self.map_types[i]);

            // Later-declared rules take effective priority within a tick.
            for rule in ty.rules.iter().rev() {
                if !rule.should_fire(tick) {
                    continue;
                }
                if rule.random_tiles {
                    let mut order: Vec<u32> = (0..dim_u * dim_v).collect();
                    rng.shuffle(&mut order);
                    let chance = f64::from(rule.random_tiles_percent) / 100.0;
                    for cell in order {
                        if rng.gen_bool(chance) {
                            self.fire_map_rule(rule, cell % dim_u, cell / dim_u);
                        }
                    }
                } else {
                    for v in 0..dim_v {
                        for u in 0..dim_u {
                            self.fire_map_rule(rule, u, v);
                        }
                    }
                }
            }
        }
    }

    fn fire_map_rule(&mut self, rule: &MapRule, u: u32, v: u32) {
        // Map rules have no origin unit, so SpawnAgent commands cannot
        // validate; the intent queue stays empty and is dropped.
        let mut spawns = Vec::new();
        let mut ctx = RuleContext {
            locals: None,
            globals: &mut self.globals,
            maps: &mut self.maps,
            unit: None,
            has_ways: false,
            u,
            v,
            radius: 0,
            spawns: &mut spawns,
        };
        rule.fire(&mut ctx);
    }

    fn update_units(&mut self) -> Vec<AgentSpawn> {
        let mut spawns = Vec::new();
        let origin = self.position;
        let (dim_u, dim_v) = (self.grid_u, self.grid_v);

        let paths = &self.paths;
        let globals = &mut self.globals;
        let maps = &mut self.maps;
        let events = &mut self.events;

        for unit in self.units.iter_mut() {
            unit.tick += 1;
            let ty = Arc::clone(&unit.ty);
            let node = paths[unit.path.index()].node(unit.node);
            let (u, v) = world_to_cell(origin, dim_u, dim_v, node.position());
            let has_ways = node.has_ways();

            for rule in ty.rules.iter().rev() {
                if !rule.should_fire(unit.tick) {
                    continue;
                }
                let mut ctx = RuleContext {
                    locals: Some(&mut unit.resources),
                    globals: &mut *globals,
                    maps: &mut *maps,
                    unit: Some(unit.id),
                    has_ways,
                    u,
                    v,
                    radius: ty.map_radius,
                    spawns: &mut spawns,
                };
                let fired = rule.fire(&mut ctx);
                if !fired && rule.on_fail.is_none() {
                    events.push(SimEvent::Warning(RuntimeWarning::RuleAborted {
                        unit: unit.id,
                        rule: rule.name.clone(),
                    }));
                }
            }
        }
        spawns
    }

    fn update_agents(&mut self) {
        let paths = &self.paths;
        let units = &mut self.units;
        let events = &mut self.events;

        for agent in self.agents.iter_mut() {
            match agent.advance(&paths[agent.path.index()]) {
                AgentStep::Moving => {}
                AgentStep::Arrived => {
                    let target = &mut units[agent.target_unit.index()];
                    agent.payload.transfer_to(&mut target.resources);
                    events.push(SimEvent::AgentRemoved { agent: agent.id });
                    agent.done = true;
                }
                AgentStep::Stranded => {
                    events.push(SimEvent::Warning(RuntimeWarning::NoReachableTarget {
                        agent: agent.id,
                        target: agent.searched_target.clone(),
                    }));
                    events.push(SimEvent::AgentRemoved { agent: agent.id });
                    agent.done = true;
                }
            }
        }
        self.agents.retain(|a| !a.done);
    }

    // ── Agent spawning ────────────────────────────────────────────────────

    /// Create an agent with a precomputed route to the nearest accepting
    /// unit, or a stranded agent if none is reachable.
    fn spawn_agent(
        &mut self,
        ty: Arc<AgentType>,
        path: PathId,
        from: NodeId,
        target: &str,
        payload: ResourceBag,
    ) -> AgentId {
        let id = AgentId(self.next_agent);
        self.next_agent += 1;

        let agent = match self.find_target(path, from, target, &payload) {
            Some((search, unit)) => Agent::with_route(
                id,
                Arc::clone(&ty),
                path,
                search.nodes,
                search.ways,
                unit,
                target,
                payload,
            ),
            None => Agent::stranded(id, Arc::clone(&ty), path, from, target, payload),
        };
        self.events.push(SimEvent::AgentAdded {
            agent: id,
            type_name: ty.name.clone(),
        });
        self.agents.push(agent);
        id
    }

    /// Nearest unit (by summed way magnitude) accepting `target` with
    /// `payload`.  Ties between units at the same node go to the lowest
    /// unit id (attachment order).
    fn find_target(
        &self,
        path: PathId,
        start: NodeId,
        target: &str,
        payload: &ResourceBag,
    ) -> Option<(SearchResult, UnitId)> {
        let graph = &self.paths[path.index()];
        let units = &self.units;

        let search = nearest_accepting(graph, start, |node| {
            graph
                .node(node)
                .units()
                .iter()
                .any(|&u| units[u.index()].accepts(target, payload))
        })?;
        let goal = *search.nodes.last()?;
        let unit = graph
            .node(goal)
            .units()
            .iter()
            .copied()
            .find(|&u| units[u.index()].accepts(target, payload))?;
        Some((search, unit))
    }
}
