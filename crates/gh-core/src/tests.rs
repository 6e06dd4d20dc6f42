//! Unit tests for gh-core primitives.

#[cfg(test)]
mod ids {
    use crate::{AgentId, ItemId, PickupId};

    #[test]
    fn index_roundtrip() {
        let id = AgentId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(AgentId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn ordering_follows_inner() {
        assert!(ItemId(0) < ItemId(1));
        assert!(PickupId(100) > PickupId(99));
    }

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(AgentId::INVALID.0, u32::MAX);
        assert_eq!(ItemId::default(), ItemId::INVALID);
    }

    #[test]
    fn display() {
        assert_eq!(AgentId(7).to_string(), "AgentId(7)");
        assert_eq!(ItemId(3).to_string(), "ItemId(3)");
    }
}

#[cfg(test)]
mod pos {
    use crate::{Dir, Pos};

    #[test]
    fn manhattan_distance() {
        assert_eq!(Pos::new(0, 0).manhattan(Pos::new(2, 2)), 4);
        assert_eq!(Pos::new(5, 1).manhattan(Pos::new(1, 4)), 7);
        assert_eq!(Pos::new(3, 3).manhattan(Pos::new(3, 3)), 0);
    }

    #[test]
    fn step_applies_delta() {
        let p = Pos::new(2, 2);
        assert_eq!(p.step(Dir::Left), Pos::new(1, 2));
        assert_eq!(p.step(Dir::Right), Pos::new(3, 2));
        assert_eq!(p.step(Dir::Up), Pos::new(2, 1));
        assert_eq!(p.step(Dir::Down), Pos::new(2, 3));
    }

    #[test]
    fn from_delta_accepts_only_unit_steps() {
        assert_eq!(Dir::from_delta(-1, 0), Some(Dir::Left));
        assert_eq!(Dir::from_delta(0, 1), Some(Dir::Down));
        assert_eq!(Dir::from_delta(1, 1), None);
        assert_eq!(Dir::from_delta(0, 0), None);
        assert_eq!(Dir::from_delta(2, 0), None);
    }

    #[test]
    fn dir_to_adjacent() {
        let p = Pos::new(4, 4);
        assert_eq!(p.dir_to(Pos::new(5, 4)), Some(Dir::Right));
        assert_eq!(p.dir_to(Pos::new(4, 3)), Some(Dir::Up));
        assert_eq!(p.dir_to(Pos::new(6, 4)), None);
    }
}

#[cfg(test)]
mod tick {
    use crate::Tick;

    #[test]
    fn arithmetic() {
        let t = Tick(10);
        assert_eq!(t + 5, Tick(15));
        assert_eq!(Tick(15) - Tick(10), 5u64);
        assert_eq!(Tick(15).since(Tick(10)), 5);
    }

    #[test]
    fn display() {
        assert_eq!(Tick(4).to_string(), "T4");
    }
}

#[cfg(test)]
mod rng {
    use crate::SimRng;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = SimRng::new(7);
        let mut b = SimRng::new(7);
        for _ in 0..16 {
            assert_eq!(a.gen_range(0..1000u32), b.gen_range(0..1000u32));
        }
    }

    #[test]
    fn shuffle_is_deterministic_per_seed() {
        let mut a = SimRng::new(99);
        let mut b = SimRng::new(99);
        let mut va: Vec<u32> = (0..10).collect();
        let mut vb: Vec<u32> = (0..10).collect();
        a.shuffle(&mut va);
        b.shuffle(&mut vb);
        assert_eq!(va, vb);
    }

    #[test]
    fn choose_on_empty_is_none() {
        let mut rng = SimRng::new(1);
        let empty: [u32; 0] = [];
        assert!(rng.choose(&empty).is_none());
    }

    #[test]
    fn gen_bool_extremes() {
        let mut rng = SimRng::new(5);
        assert!(!rng.gen_bool(0.0));
        assert!(rng.gen_bool(1.0));
    }
}

#[cfg(test)]
mod item {
    use crate::{AgentId, DeliveryId, Item, ItemId, ItemStatus, PickupId, Tick};

    fn fresh() -> Item {
        Item::new(ItemId(0), Tick(3), PickupId(0), DeliveryId(1))
    }

    #[test]
    fn full_lifecycle_stamps_ticks() {
        let mut item = fresh();
        assert_eq!(item.status(), ItemStatus::AwaitingPickup);

        item.assign_to(AgentId(2), 1).unwrap();
        assert_eq!(item.status(), ItemStatus::AssignedToAgent);
        assert_eq!(item.assigned_agent, Some(AgentId(2)));
        assert_eq!(item.priority, Some(1));

        item.pick_up(AgentId(2), Tick(5)).unwrap();
        assert_eq!(item.status(), ItemStatus::InTransit);
        assert_eq!(item.pickup_tick, Some(Tick(5)));

        item.deliver(Tick(9)).unwrap();
        assert_eq!(item.status(), ItemStatus::Delivered);
        assert_eq!(item.delivered_tick, Some(Tick(9)));
        assert!(item.created_tick <= item.pickup_tick.unwrap());
        assert!(item.pickup_tick.unwrap() <= item.delivered_tick.unwrap());
    }

    #[test]
    fn direct_pickup_skips_assignment() {
        let mut item = fresh();
        item.pick_up(AgentId(0), Tick(1)).unwrap();
        assert_eq!(item.status(), ItemStatus::InTransit);
        assert_eq!(item.assigned_agent, Some(AgentId(0)));
    }

    #[test]
    fn backward_transitions_rejected() {
        let mut item = fresh();
        item.pick_up(AgentId(0), Tick(1)).unwrap();
        assert!(item.assign_to(AgentId(1), 1).is_err());
        item.deliver(Tick(2)).unwrap();
        assert!(item.pick_up(AgentId(0), Tick(3)).is_err());
        assert!(item.deliver(Tick(3)).is_err());
    }

    #[test]
    fn deliver_requires_transit() {
        let mut item = fresh();
        assert!(item.deliver(Tick(1)).is_err());
        item.assign_to(AgentId(0), 1).unwrap();
        assert!(item.deliver(Tick(1)).is_err());
    }

    #[test]
    fn status_order_matches_lifecycle() {
        use ItemStatus::*;
        assert!(AwaitingPickup < AssignedToAgent);
        assert!(AssignedToAgent < InTransit);
        assert!(InTransit < Delivered);
    }
}
