//! Unit tests for ogb-core primitives.

#[cfg(test)]
mod ids {
    use crate::{AgentId, NodeId, UnitId, WayId};

    #[test]
    fn index_roundtrip() {
        let id = NodeId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(NodeId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn ordering() {
        assert!(UnitId(0) < UnitId(1));
        assert!(WayId(100) > WayId(99));
    }

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(NodeId::INVALID.0, u32::MAX);
        assert_eq!(AgentId::INVALID.0, u32::MAX);
        assert_eq!(NodeId::default(), NodeId::INVALID);
    }

    #[test]
    fn display() {
        assert_eq!(UnitId(7).to_string(), "UnitId(7)");
    }
}

#[cfg(test)]
mod math {
    use crate::Vec3;

    #[test]
    fn magnitude_and_distance() {
        let v = Vec3::new(3.0, 4.0, 0.0);
        assert_eq!(v.magnitude(), 5.0);
        assert_eq!(Vec3::ZERO.distance(v), 5.0);
    }

    #[test]
    fn normalized_unit_length() {
        let n = Vec3::new(10.0, 0.0, 0.0).normalized();
        assert_eq!(n, Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(Vec3::ZERO.normalized(), Vec3::ZERO);
    }

    #[test]
    fn lerp_endpoints_and_midpoint() {
        let a = Vec3::new(0.0, 0.0, 0.0);
        let b = Vec3::new(100.0, 50.0, 0.0);
        assert_eq!(Vec3::lerp(a, b, 0.0), a);
        assert_eq!(Vec3::lerp(a, b, 1.0), b);
        assert_eq!(Vec3::lerp(a, b, 0.5), Vec3::new(50.0, 25.0, 0.0));
    }

    #[test]
    fn operators() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 5.0, 6.0);
        assert_eq!(a + b, Vec3::new(5.0, 7.0, 9.0));
        assert_eq!(b - a, Vec3::new(3.0, 3.0, 3.0));
        assert_eq!(a * 2.0, Vec3::new(2.0, 4.0, 6.0));
        assert_eq!(-a, Vec3::new(-1.0, -2.0, -3.0));
    }
}

#[cfg(test)]
mod color {
    use crate::Color;

    #[test]
    fn parses_with_and_without_prefix() {
        assert_eq!(Color::from_hex("0xFF00AA"), Some(Color(0xFF00AA)));
        assert_eq!(Color::from_hex("ff00aa"), Some(Color(0xFF00AA)));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(Color::from_hex("nope"), None);
        assert_eq!(Color::from_hex(""), None);
        assert_eq!(Color::from_hex("0x123456789"), None);
    }

    #[test]
    fn display() {
        assert_eq!(Color(0xAB).to_string(), "#0000AB");
    }
}

#[cfg(test)]
mod resource {
    use crate::ResourceBag;

    fn bag_with(name: &str, amount: u32, capacity: u32) -> ResourceBag {
        let mut bag = ResourceBag::new();
        bag.add_type(name, capacity);
        bag.add(name, amount);
        bag
    }

    #[test]
    fn add_saturates_at_capacity() {
        let mut bag = bag_with("Water", 8, 10);
        assert_eq!(bag.add("Water", 5), 2);
        assert_eq!(bag.get("Water"), 10);
    }

    #[test]
    fn remove_is_all_or_nothing() {
        let mut bag = bag_with("Water", 3, 10);
        assert!(!bag.remove("Water", 4));
        assert_eq!(bag.get("Water"), 3, "failed remove must not mutate");
        assert!(bag.remove("Water", 3));
        assert_eq!(bag.get("Water"), 0);
    }

    #[test]
    fn can_add_is_strict() {
        let bag = bag_with("Water", 8, 10);
        assert!(bag.can_add("Water", 2));
        assert!(!bag.can_add("Water", 3));
        // Unknown types are implicitly creatable.
        assert!(bag.can_add("Oil", u32::MAX));
    }

    #[test]
    fn add_then_remove_roundtrips_unless_saturated() {
        let mut bag = bag_with("Grain", 5, 10);
        let before = bag.get("Grain");
        assert_eq!(bag.add("Grain", 3), 3);
        assert!(bag.remove("Grain", 3));
        assert_eq!(bag.get("Grain"), before);

        // Saturated add cannot round-trip: the removal underflows past start.
        let mut full = bag_with("Grain", 9, 10);
        full.add("Grain", 3); // stores only 1
        assert!(!full.remove("Grain", 3) || full.get("Grain") != 9);
    }

    #[test]
    fn implicit_type_has_unlimited_capacity() {
        let mut bag = ResourceBag::new();
        assert_eq!(bag.add("Gold", 7), 7);
        assert_eq!(bag.capacity("Gold"), u32::MAX);
    }

    #[test]
    fn redeclaring_type_clamps_amount() {
        let mut bag = bag_with("Water", 8, 10);
        bag.add_type("Water", 5);
        assert_eq!(bag.get("Water"), 5);
        assert_eq!(bag.capacity("Water"), 5);
    }

    #[test]
    fn insertion_order_preserved() {
        let mut bag = ResourceBag::new();
        bag.add_type("C", 1);
        bag.add_type("A", 1);
        bag.add_type("B", 1);
        let names: Vec<_> = bag.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["C", "A", "B"]);
    }

    #[test]
    fn transfer_saturates_and_empties_source() {
        let mut src = bag_with("Water", 5, 5);
        let mut dest = bag_with("Water", 8, 10);
        src.transfer_to(&mut dest);
        assert_eq!(dest.get("Water"), 10, "only 2 of 5 fit");
        assert_eq!(src.get("Water"), 0);
    }
}

#[cfg(test)]
mod rng {
    use crate::SimRng;

    #[test]
    fn deterministic_same_seed() {
        let mut r1 = SimRng::new(12345);
        let mut r2 = SimRng::new(12345);
        for _ in 0..100 {
            assert_eq!(r1.gen_range(0u32..1000), r2.gen_range(0u32..1000));
        }
    }

    #[test]
    fn different_seeds_diverge() {
        let mut r1 = SimRng::new(1);
        let mut r2 = SimRng::new(2);
        let a: Vec<u32> = (0..16).map(|_| r1.gen_range(0..u32::MAX)).collect();
        let b: Vec<u32> = (0..16).map(|_| r2.gen_range(0..u32::MAX)).collect();
        assert_ne!(a, b);
    }

    #[test]
    fn gen_bool_extremes() {
        let mut rng = SimRng::new(0);
        assert!(!rng.gen_bool(0.0));
        assert!(rng.gen_bool(1.0));
    }

    #[test]
    fn shuffle_is_a_permutation() {
        let mut rng = SimRng::new(7);
        let mut values: Vec<u32> = (0..32).collect();
        rng.shuffle(&mut values);
        let mut sorted = values.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..32).collect::<Vec<_>>());
    }
}

#[cfg(test)]
mod time {
    use crate::{MAX_TICKS_PER_UPDATE, TICK_INTERVAL_SECS, TickAccumulator};

    #[test]
    fn sub_interval_deltas_accumulate() {
        let mut acc = TickAccumulator::new();
        assert_eq!(acc.drain(0.002), 0);
        assert_eq!(acc.drain(0.002), 0);
        // 0.006 s banked in total → one tick, 0.001 s left over.
        assert_eq!(acc.drain(0.002), 1);
        assert!(acc.budget() < TICK_INTERVAL_SECS);
    }

    #[test]
    fn one_interval_yields_one_tick() {
        let mut acc = TickAccumulator::new();
        for _ in 0..10 {
            assert_eq!(acc.drain(TICK_INTERVAL_SECS), 1);
        }
    }

    #[test]
    fn catch_up_capped_and_excess_discarded() {
        let mut acc = TickAccumulator::new();
        // 1 s = 200 intervals, far beyond the cap.
        assert_eq!(acc.drain(1.0), MAX_TICKS_PER_UPDATE);
        assert_eq!(acc.budget(), 0.0, "excess backlog must be dropped");
        assert_eq!(acc.drain(0.0), 0);
    }

    #[test]
    fn sub_interval_remainder_survives_the_cap() {
        let mut acc = TickAccumulator::new();
        // Cap plus half an interval: the half-interval remainder is kept.
        let delta = TICK_INTERVAL_SECS * (MAX_TICKS_PER_UPDATE as f32 + 0.5);
        assert_eq!(acc.drain(delta), MAX_TICKS_PER_UPDATE);
        assert!(acc.budget() > 0.0);
        assert_eq!(acc.drain(TICK_INTERVAL_SECS), 1);
    }
}
