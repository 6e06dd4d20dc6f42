//! Unit tests for the item-generation strategies.

use gh_core::{DeliveryId, PickupId, Pos, SimRng, Tick};
use gh_grid::Grid;

use crate::{Distribution, InitialDistribution, ItemFactory, WeightedDistribution};

fn p(x: i32, y: i32) -> Pos {
    Pos::new(x, y)
}

/// Two pickup stations and two delivery stations on a 6×6 board.
fn two_by_two() -> Grid {
    let mut grid = Grid::new(6, 6).unwrap();
    grid.add_pickup(p(0, 0)).unwrap();
    grid.add_pickup(p(5, 0)).unwrap();
    grid.add_delivery(p(0, 5)).unwrap();
    grid.add_delivery(p(5, 5)).unwrap();
    grid
}

#[cfg(test)]
mod initial {
    use super::*;

    #[test]
    fn uniform_seeds_every_station_with_k_items() {
        let mut grid = two_by_two();
        let mut rng = SimRng::new(1);
        let mut factory = InitialDistribution::new(Distribution::Uniform(3));

        factory.add_items(&mut grid, Tick(0), &mut rng).unwrap();
        for station in &grid.pickups {
            assert_eq!(station.queue.len(), 3);
        }
        assert_eq!(grid.items_created(), 6);
    }

    #[test]
    fn uniform_destinations_are_valid() {
        let mut grid = two_by_two();
        let mut rng = SimRng::new(9);
        let mut factory = InitialDistribution::new(Distribution::Uniform(8));
        factory.add_items(&mut grid, Tick(0), &mut rng).unwrap();

        for item in grid.items() {
            assert!(grid.delivery(item.destination).is_ok());
        }
    }

    #[test]
    fn exact_adds_in_listed_order() {
        let mut grid = two_by_two();
        let mut rng = SimRng::new(1);
        let plan = vec![(
            PickupId(0),
            vec![DeliveryId(1), DeliveryId(0), DeliveryId(1)],
        )];
        let mut factory = InitialDistribution::new(Distribution::Exact(plan));

        factory.add_items(&mut grid, Tick(0), &mut rng).unwrap();
        let queue = &grid.pickup(PickupId(0)).unwrap().queue;
        let destinations: Vec<DeliveryId> = queue.iter().map(|i| i.destination).collect();
        assert_eq!(destinations, vec![DeliveryId(1), DeliveryId(0), DeliveryId(1)]);
        assert!(grid.pickup(PickupId(1)).unwrap().queue.is_empty());
    }

    #[test]
    fn exact_rejects_unknown_stations_without_seeding() {
        let mut grid = two_by_two();
        let mut rng = SimRng::new(1);

        let bad_pickup = vec![(PickupId(7), vec![DeliveryId(0)])];
        let mut factory = InitialDistribution::new(Distribution::Exact(bad_pickup));
        assert!(factory.add_items(&mut grid, Tick(0), &mut rng).is_err());
        assert_eq!(grid.items_created(), 0);

        let bad_delivery = vec![(PickupId(0), vec![DeliveryId(7)])];
        let mut factory = InitialDistribution::new(Distribution::Exact(bad_delivery));
        assert!(factory.add_items(&mut grid, Tick(0), &mut rng).is_err());
        assert_eq!(grid.items_created(), 0);
    }

    #[test]
    fn noop_after_tick_zero() {
        let mut grid = two_by_two();
        let mut rng = SimRng::new(1);
        let mut factory = InitialDistribution::new(Distribution::Uniform(2));

        factory.add_items(&mut grid, Tick(0), &mut rng).unwrap();
        let seeded = grid.items_created();
        for t in 1..10 {
            factory.add_items(&mut grid, Tick(t), &mut rng).unwrap();
        }
        assert_eq!(grid.items_created(), seeded);
    }
}

#[cfg(test)]
mod weighted {
    use super::*;

    fn all_stations(p0: f64, p1: f64) -> WeightedDistribution {
        WeightedDistribution::new(
            vec![(PickupId(0), p0), (PickupId(1), p1)],
            vec![(DeliveryId(0), 1), (DeliveryId(1), 1)],
            10,
        )
    }

    #[test]
    fn certain_arrival_fills_every_step() {
        let mut grid = two_by_two();
        let mut rng = SimRng::new(1);
        let mut factory = all_stations(1.0, 1.0);

        factory.add_items(&mut grid, Tick(0), &mut rng).unwrap();
        assert_eq!(grid.pickup(PickupId(0)).unwrap().queue.len(), 10);
        assert_eq!(grid.pickup(PickupId(1)).unwrap().queue.len(), 10);
    }

    #[test]
    fn zero_probability_spawns_nothing() {
        let mut grid = two_by_two();
        let mut rng = SimRng::new(1);
        let mut factory = all_stations(0.0, 0.0);

        for t in 0..5 {
            factory.add_items(&mut grid, Tick(t), &mut rng).unwrap();
        }
        assert_eq!(grid.items_created(), 0);
    }

    #[test]
    fn arrivals_accumulate_across_ticks() {
        let mut grid = two_by_two();
        let mut rng = SimRng::new(1);
        let mut factory = all_stations(1.0, 0.0);

        for t in 0..3 {
            factory.add_items(&mut grid, Tick(t), &mut rng).unwrap();
        }
        assert_eq!(grid.pickup(PickupId(0)).unwrap().queue.len(), 30);
        assert!(grid.pickup(PickupId(1)).unwrap().queue.is_empty());
    }

    #[test]
    fn weight_zero_station_is_rejected() {
        let mut grid = two_by_two();
        let mut rng = SimRng::new(1);
        let mut factory = WeightedDistribution::new(
            vec![(PickupId(0), 1.0)],
            vec![(DeliveryId(0), 1), (DeliveryId(1), 0)],
            4,
        );
        assert!(factory.add_items(&mut grid, Tick(0), &mut rng).is_err());
    }

    #[test]
    fn dominant_weight_receives_all_items() {
        // A single configured destination gets every item regardless of the
        // other station existing on the board.
        let mut grid = two_by_two();
        let mut rng = SimRng::new(3);
        let mut factory = WeightedDistribution::new(
            vec![(PickupId(0), 1.0)],
            vec![(DeliveryId(1), 5)],
            12,
        );

        factory.add_items(&mut grid, Tick(0), &mut rng).unwrap();
        assert!(grid
            .items()
            .all(|item| item.destination == DeliveryId(1)));
        assert_eq!(grid.items_created(), 12);
    }

    #[test]
    fn unknown_target_fails_on_first_use() {
        let mut grid = two_by_two();
        let mut rng = SimRng::new(1);
        let mut factory = WeightedDistribution::new(
            vec![(PickupId(0), 1.0)],
            vec![(DeliveryId(9), 1)],
            4,
        );
        assert!(factory.add_items(&mut grid, Tick(0), &mut rng).is_err());
    }

    #[test]
    fn unknown_pickup_fails() {
        let mut grid = two_by_two();
        let mut rng = SimRng::new(1);
        let mut factory = WeightedDistribution::new(
            vec![(PickupId(9), 1.0)],
            vec![(DeliveryId(0), 1)],
            4,
        );
        assert!(factory.add_items(&mut grid, Tick(0), &mut rng).is_err());
    }
}
