//! Unit tests for ogb-city.

#[cfg(test)]
mod helpers {
    use std::sync::Arc;

    use ogb_core::{Color, ResourceBag};
    use ogb_rules::{AgentType, MapRule, MapType, RuleCommand, RuleValue, UnitRule, UnitType};
    use ogb_spatial::{PathType, WayType};

    pub fn path_type() -> Arc<PathType> {
        Arc::new(PathType { name: "Road".into(), color: Color::WHITE })
    }

    pub fn way_type() -> Arc<WayType> {
        Arc::new(WayType { name: "Dirt".into(), color: Color::WHITE })
    }

    pub fn agent_type(speed: f32) -> Arc<AgentType> {
        Arc::new(AgentType { name: "People".into(), color: Color::WHITE, speed })
    }

    pub fn local(resource: &str) -> RuleValue {
        RuleValue::Local { resource: resource.into() }
    }

    pub fn global(resource: &str) -> RuleValue {
        RuleValue::Global { resource: resource.into() }
    }

    pub fn bag(entries: &[(&str, u32, u32)]) -> ResourceBag {
        let mut bag = ResourceBag::new();
        for &(name, amount, capacity) in entries {
            bag.add_type(name, capacity);
            bag.add(name, amount);
        }
        bag
    }

    /// Unit type with no rules, accepting `targets`.
    pub fn sink_unit(name: &str, targets: &[&str], caps: &[(&str, u32, u32)]) -> Arc<UnitType> {
        Arc::new(UnitType {
            name: name.into(),
            color: Color::WHITE,
            map_radius: 0,
            targets: targets.iter().map(|&t| t.to_owned()).collect(),
            caps: bag(caps),
            resources: ResourceBag::new(),
            rules: vec![],
        })
    }

    pub fn unit_rule(name: &str, rate: u32, commands: Vec<RuleCommand>) -> Arc<UnitRule> {
        Arc::new(UnitRule { name: name.into(), rate, commands, on_fail: None })
    }

    pub fn map_type(name: &str, capacity: u32, rules: Vec<Arc<MapRule>>) -> Arc<MapType> {
        Arc::new(MapType { name: name.into(), color: Color::WHITE, capacity, rules })
    }
}

// ── Construction ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod construction {
    use std::sync::Arc;

    use ogb_core::Vec3;

    use super::helpers::*;
    use crate::{City, CityError};

    #[test]
    fn new_city_queues_its_own_announcement() {
        let mut city = City::new("Test", Vec3::ZERO, 4, 4);
        let events = city.drain_events();
        assert_eq!(events, [crate::SimEvent::CityAdded { name: "Test".into() }]);
        assert!(city.drain_events().is_empty(), "announced exactly once");
    }

    #[test]
    fn duplicate_map_and_path_names_rejected() {
        let mut city = City::new("Test", Vec3::ZERO, 4, 4);
        city.add_map(map_type("Water", 10, vec![])).unwrap();
        assert!(matches!(
            city.add_map(map_type("Water", 10, vec![])),
            Err(CityError::DuplicateMap(_))
        ));

        city.add_path(path_type()).unwrap();
        assert!(matches!(city.add_path(path_type()), Err(CityError::DuplicatePath(_))));
    }

    #[test]
    fn maps_share_the_city_grid() {
        let mut city = City::new("Test", Vec3::ZERO, 6, 3);
        city.add_map(map_type("Water", 10, vec![])).unwrap();
        assert_eq!(city.map("Water").unwrap().dims(), (6, 3));
    }

    #[test]
    fn unit_at_endpoints_binds_without_splitting() {
        let mut city = City::new("Test", Vec3::ZERO, 4, 4);
        let road = city.add_path(path_type()).unwrap();
        let graph = city.path_mut(road).unwrap();
        let a = graph.add_node(Vec3::ZERO);
        let b = graph.add_node(Vec3::new(100.0, 0.0, 0.0));
        let way = graph.add_way(way_type(), a, b).unwrap();

        let home = city
            .add_unit(sink_unit("Home", &["Home"], &[]), road, way, 0.0)
            .unwrap();
        let work = city
            .add_unit(sink_unit("Work", &["Work"], &[]), road, way, 1.0)
            .unwrap();

        assert_eq!(city.unit(home).unwrap().node(), a);
        assert_eq!(city.unit(work).unwrap().node(), b);
        assert_eq!(city.path(road).unwrap().way_count(), 1);
    }

    #[test]
    fn unit_at_interior_parameter_splits_the_way() {
        let mut city = City::new("Test", Vec3::ZERO, 4, 4);
        let road = city.add_path(path_type()).unwrap();
        let graph = city.path_mut(road).unwrap();
        let a = graph.add_node(Vec3::ZERO);
        let b = graph.add_node(Vec3::new(100.0, 0.0, 0.0));
        let way = graph.add_way(way_type(), a, b).unwrap();

        let unit = city
            .add_unit(sink_unit("Shop", &["Shop"], &[]), road, way, 0.7)
            .unwrap();

        let graph = city.path(road).unwrap();
        let node = city.unit(unit).unwrap().node();
        assert_eq!(graph.node(node).position(), Vec3::new(70.0, 0.0, 0.0));
        assert_eq!(graph.way_count(), 2);
        assert_eq!(graph.node(node).units(), [unit]);
    }

    #[test]
    fn starting_resources_respect_caps() {
        let mut city = City::new("Test", Vec3::ZERO, 4, 4);
        let road = city.add_path(path_type()).unwrap();
        let graph = city.path_mut(road).unwrap();
        let a = graph.add_node(Vec3::ZERO);
        let b = graph.add_node(Vec3::new(10.0, 0.0, 0.0));
        let way = graph.add_way(way_type(), a, b).unwrap();

        let ty = Arc::new(ogb_rules::UnitType {
            name: "Home".into(),
            color: ogb_core::Color::WHITE,
            map_radius: 0,
            targets: vec!["Home".into()],
            caps: bag(&[("People", 0, 4)]),
            resources: bag(&[("People", 9, 9)]),
            rules: vec![],
        });
        let home = city.add_unit(ty, road, way, 0.0).unwrap();
        assert_eq!(city.unit(home).unwrap().resources().get("People"), 4);
    }
}

// ── Unit rules ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod unit_rules {
    use ogb_core::{SimRng, Vec3};
    use ogb_rules::RuleCommand;

    use super::helpers::*;
    use crate::{City, RuntimeWarning, SimEvent};

    fn city_with_unit(rules: Vec<std::sync::Arc<ogb_rules::UnitRule>>) -> City {
        let mut city = City::new("Test", Vec3::ZERO, 4, 4);
        let road = city.add_path(path_type()).unwrap();
        let graph = city.path_mut(road).unwrap();
        let a = graph.add_node(Vec3::ZERO);
        let b = graph.add_node(Vec3::new(10.0, 0.0, 0.0));
        let way = graph.add_way(way_type(), a, b).unwrap();

        let ty = std::sync::Arc::new(ogb_rules::UnitType {
            name: "Factory".into(),
            color: ogb_core::Color::WHITE,
            map_radius: 0,
            targets: vec!["Factory".into()],
            caps: bag(&[("Water", 0, 10)]),
            resources: bag(&[("Water", 5, 5)]),
            rules,
        });
        city.add_unit(ty, road, way, 0.0).unwrap();
        city
    }

    #[test]
    fn rule_rate_divides_unit_ticks() {
        let consume = unit_rule(
            "Drink",
            3,
            vec![RuleCommand::Remove { target: local("Water"), amount: 1 }],
        );
        let mut city = city_with_unit(vec![consume]);
        let mut rng = SimRng::new(0);

        for _ in 0..6 {
            city.update(&mut rng);
        }
        // Fires at unit ticks 3 and 6.
        assert_eq!(city.units()[0].resources().get("Water"), 3);
    }

    /// Rules iterate in reverse declaration order: the later-declared
    /// producer runs first, so the earlier-declared consumer finds the token
    /// it needs within the same tick.
    #[test]
    fn rules_fire_in_reverse_declaration_order() {
        let consume = unit_rule(
            "Consume",
            1,
            vec![RuleCommand::Remove { target: global("Token"), amount: 1 }],
        );
        let produce = unit_rule(
            "Produce",
            1,
            vec![RuleCommand::Add { target: global("Token"), amount: 1 }],
        );
        let mut city = city_with_unit(vec![consume, produce]);
        let mut rng = SimRng::new(0);

        city.update(&mut rng);

        assert_eq!(city.globals().get("Token"), 0, "produced then consumed");
        let aborted = city
            .drain_events()
            .into_iter()
            .any(|e| matches!(e, SimEvent::Warning(RuntimeWarning::RuleAborted { .. })));
        assert!(!aborted, "declaration order would have aborted Consume");
    }

    #[test]
    fn aborted_rule_without_fallback_warns() {
        let consume = unit_rule(
            "Drain",
            1,
            vec![RuleCommand::Remove { target: local("Water"), amount: 100 }],
        );
        let mut city = city_with_unit(vec![consume]);
        let mut rng = SimRng::new(0);
        city.update(&mut rng);

        let events = city.drain_events();
        assert!(events.iter().any(|e| matches!(
            e,
            SimEvent::Warning(RuntimeWarning::RuleAborted { rule, .. }) if rule == "Drain"
        )));
        assert_eq!(city.units()[0].resources().get("Water"), 5);
    }
}

// ── Map rules ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod map_rules {
    use std::sync::Arc;

    use ogb_core::{SimRng, Vec3};
    use ogb_rules::{MapRule, RuleCommand, RuleValue};

    use super::helpers::*;
    use crate::City;

    fn add_map_rule(map: &str, random_tiles: bool, percent: u8) -> Arc<MapRule> {
        Arc::new(MapRule {
            name: "Spread".into(),
            rate: 1,
            random_tiles,
            random_tiles_percent: percent,
            commands: vec![RuleCommand::Add {
                target: RuleValue::Map { name: map.into() },
                amount: 1,
            }],
        })
    }

    #[test]
    fn sweep_mode_touches_every_cell() {
        let mut city = City::new("Test", Vec3::ZERO, 4, 4);
        city.add_map(map_type("Water", 10, vec![add_map_rule("Water", false, 0)]))
            .unwrap();
        let mut rng = SimRng::new(0);

        city.update(&mut rng);
        assert!(city.map("Water").unwrap().cells().iter().all(|&c| c == 1));
    }

    #[test]
    fn stochastic_extremes() {
        // 0 % never fires; 100 % fires on every cell.
        let mut city = City::new("Test", Vec3::ZERO, 4, 4);
        city.add_map(map_type("Never", 10, vec![add_map_rule("Never", true, 0)]))
            .unwrap();
        city.add_map(map_type("Always", 10, vec![add_map_rule("Always", true, 100)]))
            .unwrap();
        let mut rng = SimRng::new(42);

        city.update(&mut rng);
        assert_eq!(city.map("Never").unwrap().total(), 0);
        assert!(city.map("Always").unwrap().cells().iter().all(|&c| c == 1));
    }

    #[test]
    fn identical_seeds_replay_identically() {
        let build = || {
            let mut city = City::new("Test", Vec3::ZERO, 8, 8);
            city.add_map(map_type("Water", 10, vec![add_map_rule("Water", true, 50)]))
                .unwrap();
            city
        };
        let run = |mut city: City, seed: u64| {
            let mut rng = SimRng::new(seed);
            for _ in 0..5 {
                city.update(&mut rng);
            }
            city.map("Water").unwrap().cells().to_vec()
        };

        assert_eq!(run(build(), 7), run(build(), 7));
        assert_ne!(run(build(), 7), run(build(), 8), "different seeds should diverge");
    }
}

// ── Agents ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod agents {
    use ogb_core::{SimRng, UnitId, Vec3};

    use super::helpers::*;
    use crate::{City, RuntimeWarning, SimEvent};

    /// Home at node A, Work at node B, 10 world units apart.
    fn delivery_city(speed: f32) -> City {
        let mut city = City::new("Test", Vec3::ZERO, 4, 4);
        let road = city.add_path(path_type()).unwrap();
        let graph = city.path_mut(road).unwrap();
        let a = graph.add_node(Vec3::ZERO);
        let b = graph.add_node(Vec3::new(10.0, 0.0, 0.0));
        let way = graph.add_way(way_type(), a, b).unwrap();

        city.add_unit(sink_unit("Home", &["Home"], &[]), road, way, 0.0)
            .unwrap();
        city.add_unit(sink_unit("Work", &["Work"], &[("People", 0, 4)]), road, way, 1.0)
            .unwrap();

        let payload = bag(&[("People", 1, 1)]);
        let graph = city.path(road).unwrap();
        let from = graph.way(way).from();
        city.add_agent(agent_type(speed), road, from, "Work", payload)
            .unwrap();
        city
    }

    #[test]
    fn agent_travels_and_delivers() {
        // Speed 1000 → 5 units per tick → arrival on the second tick.
        let mut city = delivery_city(1_000.0);
        let mut rng = SimRng::new(0);

        city.update(&mut rng);
        assert_eq!(city.agents().len(), 1, "still in transit");
        assert_eq!(city.unit(UnitId(1)).unwrap().resources().get("People"), 0);

        city.update(&mut rng);
        assert!(city.agents().is_empty(), "delivered and destroyed");
        assert_eq!(city.unit(UnitId(1)).unwrap().resources().get("People"), 1);

        let events = city.drain_events();
        assert!(events.iter().any(|e| matches!(e, SimEvent::AgentRemoved { .. })));
    }

    #[test]
    fn agent_position_interpolates() {
        let mut city = delivery_city(1_000.0);
        let mut rng = SimRng::new(0);
        city.update(&mut rng);

        let road = city.path_id("Road").unwrap();
        let graph = city.path(road).unwrap();
        let agent = &city.agents()[0];
        assert_eq!(agent.position(graph), Vec3::new(5.0, 0.0, 0.0));
        assert_eq!(agent.offset(), 5.0);
    }

    #[test]
    fn unreachable_target_strands_the_agent() {
        let mut city = City::new("Test", Vec3::ZERO, 4, 4);
        let road = city.add_path(path_type()).unwrap();
        let graph = city.path_mut(road).unwrap();
        let a = graph.add_node(Vec3::ZERO);
        let b = graph.add_node(Vec3::new(10.0, 0.0, 0.0));
        graph.add_way(way_type(), a, b).unwrap();

        city.add_agent(agent_type(50.0), road, a, "Nowhere", bag(&[]))
            .unwrap();
        assert_eq!(city.agents().len(), 1, "spawned even without a target");

        let mut rng = SimRng::new(0);
        city.update(&mut rng);
        assert!(city.agents().is_empty(), "destroyed on first update");

        let events = city.drain_events();
        assert!(events.iter().any(|e| matches!(
            e,
            SimEvent::Warning(RuntimeWarning::NoReachableTarget { .. })
        )));
    }

    #[test]
    fn same_node_target_ties_break_by_unit_order() {
        let mut city = City::new("Test", Vec3::ZERO, 4, 4);
        let road = city.add_path(path_type()).unwrap();
        let graph = city.path_mut(road).unwrap();
        let a = graph.add_node(Vec3::ZERO);
        let b = graph.add_node(Vec3::new(10.0, 0.0, 0.0));
        let way = graph.add_way(way_type(), a, b).unwrap();

        // Two accepting units on the same node; the first added must win.
        let first = city
            .add_unit(sink_unit("Depot", &["Depot"], &[("Ore", 0, 9)]), road, way, 1.0)
            .unwrap();
        let _second = city
            .add_unit(sink_unit("Depot2", &["Depot"], &[("Ore", 0, 9)]), road, way, 1.0)
            .unwrap();

        city.add_agent(agent_type(50.0), road, a, "Depot", bag(&[("Ore", 1, 1)]))
            .unwrap();
        assert_eq!(city.agents()[0].target_unit(), first);
    }
}
