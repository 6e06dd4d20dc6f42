//! Unit tests for the board and pathfinding.

use gh_core::{AgentId, DeliveryId, PickupId, Pos, Tick};

use crate::board::{CellObject, Grid};
use crate::{GridError, astar};

fn p(x: i32, y: i32) -> Pos {
    Pos::new(x, y)
}

#[cfg(test)]
mod board {
    use super::*;

    #[test]
    fn rejects_non_positive_dimensions() {
        assert!(Grid::new(0, 5).is_err());
        assert!(Grid::new(5, -1).is_err());
        assert!(Grid::new(1, 1).is_ok());
    }

    #[test]
    fn bounds_and_passability() {
        let mut grid = Grid::new(3, 3).unwrap();
        grid.add_obstacle(p(1, 1)).unwrap();

        assert!(grid.in_bounds(p(0, 0)));
        assert!(grid.in_bounds(p(2, 2)));
        assert!(!grid.in_bounds(p(-1, 0)));
        assert!(!grid.in_bounds(p(3, 0)));

        assert!(grid.is_obstacle(p(1, 1)));
        assert!(!grid.passable(p(1, 1)));
        assert!(grid.passable(p(1, 0)));
        assert!(!grid.passable(p(0, 3)));
    }

    #[test]
    fn placement_out_of_bounds_errors() {
        let mut grid = Grid::new(3, 3).unwrap();
        assert!(matches!(
            grid.add_agent(p(3, 0), 1),
            Err(GridError::OutOfBounds { .. })
        ));
        assert!(grid.add_obstacle(p(0, 5)).is_err());
        assert!(grid.add_pickup(p(-1, 0)).is_err());
    }

    #[test]
    fn station_ids_follow_insertion_order() {
        let mut grid = Grid::new(5, 5).unwrap();
        assert_eq!(grid.add_pickup(p(0, 0)).unwrap(), PickupId(0));
        assert_eq!(grid.add_pickup(p(1, 1)).unwrap(), PickupId(1));
        assert_eq!(grid.add_delivery(p(2, 2)).unwrap(), DeliveryId(0));
        assert_eq!(grid.add_agent(p(3, 3), 2).unwrap(), AgentId(0));
    }

    #[test]
    fn position_lookups() {
        let mut grid = Grid::new(5, 5).unwrap();
        let pickup = grid.add_pickup(p(1, 2)).unwrap();
        let delivery = grid.add_delivery(p(3, 4)).unwrap();

        assert_eq!(grid.pickup_at(p(1, 2)), Some(pickup));
        assert_eq!(grid.pickup_at(p(0, 0)), None);
        assert_eq!(grid.delivery_at(p(3, 4)), Some(delivery));
    }

    #[test]
    fn objects_at_reports_cohabiting_entities() {
        let mut grid = Grid::new(3, 3).unwrap();
        let pickup = grid.add_pickup(p(1, 1)).unwrap();
        let agent = grid.add_agent(p(1, 1), 1).unwrap();

        let objs = grid.objects_at(p(1, 1));
        assert!(objs.contains(&CellObject::Pickup(pickup)));
        assert!(objs.contains(&CellObject::Agent(agent)));
        assert_eq!(grid.objects_at(p(0, 0)), vec![]);
    }

    #[test]
    fn spawn_item_validates_station_ids() {
        let mut grid = Grid::new(3, 3).unwrap();
        let pickup = grid.add_pickup(p(0, 0)).unwrap();
        let delivery = grid.add_delivery(p(2, 2)).unwrap();

        let item = grid.spawn_item(pickup, delivery, Tick(0)).unwrap();
        assert_eq!(item.index(), 0);
        assert_eq!(grid.pickup(pickup).unwrap().queue.len(), 1);
        assert_eq!(grid.items_created(), 1);

        assert!(grid.spawn_item(PickupId(9), delivery, Tick(0)).is_err());
        assert!(grid.spawn_item(pickup, DeliveryId(9), Tick(0)).is_err());
    }

    #[test]
    fn item_ids_are_monotonic() {
        let mut grid = Grid::new(3, 3).unwrap();
        let pickup = grid.add_pickup(p(0, 0)).unwrap();
        let delivery = grid.add_delivery(p(2, 2)).unwrap();
        let a = grid.spawn_item(pickup, delivery, Tick(0)).unwrap();
        let b = grid.spawn_item(pickup, delivery, Tick(0)).unwrap();
        assert!(a < b);
    }

    #[test]
    fn crowd_ranking_deepest_first() {
        let mut grid = Grid::new(10, 10).unwrap();
        let s1 = grid.add_pickup(p(1, 1)).unwrap();
        let s2 = grid.add_pickup(p(2, 2)).unwrap();
        let s3 = grid.add_pickup(p(3, 3)).unwrap();
        let d = grid.add_delivery(p(4, 4)).unwrap();

        for _ in 0..5 {
            grid.spawn_item(s1, d, Tick(0)).unwrap();
        }
        for _ in 0..3 {
            grid.spawn_item(s2, d, Tick(0)).unwrap();
        }
        for _ in 0..7 {
            grid.spawn_item(s3, d, Tick(0)).unwrap();
        }

        assert_eq!(grid.stations_by_queue_depth(), vec![s3, s1, s2]);
    }

    #[test]
    fn crowd_ranking_ties_by_station_id() {
        let mut grid = Grid::new(5, 5).unwrap();
        let s1 = grid.add_pickup(p(0, 0)).unwrap();
        let s2 = grid.add_pickup(p(1, 1)).unwrap();
        assert_eq!(grid.stations_by_queue_depth(), vec![s1, s2]);
    }

    #[test]
    fn fleet_remaining_capacity_sums_agents() {
        let mut grid = Grid::new(5, 5).unwrap();
        grid.add_agent(p(0, 0), 2).unwrap();
        grid.add_agent(p(1, 1), 3).unwrap();
        assert_eq!(grid.fleet_remaining_capacity(), 5);
    }

    #[test]
    fn move_agent_updates_position() {
        let mut grid = Grid::new(3, 3).unwrap();
        let agent = grid.add_agent(p(0, 0), 1).unwrap();
        grid.move_agent(agent, p(1, 0)).unwrap();
        assert_eq!(grid.agent(agent).unwrap().pos, p(1, 0));
        assert!(grid.move_agent(agent, p(5, 5)).is_err());
    }
}

#[cfg(test)]
mod agent_state {
    use super::*;
    use gh_core::ItemId;

    #[test]
    fn capacity_accounting() {
        let mut grid = Grid::new(5, 5).unwrap();
        let pickup = grid.add_pickup(p(0, 0)).unwrap();
        let delivery = grid.add_delivery(p(4, 4)).unwrap();
        let agent = grid.add_agent(p(0, 0), 2).unwrap();

        let id = grid.spawn_item(pickup, delivery, Tick(0)).unwrap();
        let mut item = grid.pickup_mut(pickup).unwrap().queue.pop().unwrap();
        assert_eq!(id, item.id);
        item.assign_to(agent, 1).unwrap();
        grid.agent_mut(agent).unwrap().items.push(item);

        let state = grid.agent(agent).unwrap();
        assert_eq!(state.in_use(), 1);
        assert_eq!(state.remaining_capacity(), 1);
        assert!(!state.is_carrying());
        assert_eq!(state.next_assigned().map(|i| i.id), Some(id));
        assert!(state.next_carried().is_none());
    }

    #[test]
    fn execution_order_prefers_priority_then_creation() {
        let mut grid = Grid::new(5, 5).unwrap();
        let pickup = grid.add_pickup(p(0, 0)).unwrap();
        let delivery = grid.add_delivery(p(4, 4)).unwrap();
        let agent = grid.add_agent(p(0, 0), 3).unwrap();

        let first = grid.spawn_item(pickup, delivery, Tick(0)).unwrap();
        let second = grid.spawn_item(pickup, delivery, Tick(0)).unwrap();
        let third = grid.spawn_item(pickup, delivery, Tick(0)).unwrap();

        let mut queue = std::mem::take(&mut grid.pickup_mut(pickup).unwrap().queue);
        // Assign out of creation order: `third` gets the better priority.
        queue[2].assign_to(agent, 1).unwrap();
        queue[0].assign_to(agent, 2).unwrap();
        queue[1].assign_to(agent, 2).unwrap();
        grid.agent_mut(agent).unwrap().items.extend(queue);

        let state = grid.agent(agent).unwrap();
        assert_eq!(state.next_assigned().map(|i| i.id), Some(third));

        // Drop `third` to expose the tie: equal priority falls back to
        // creation order, so `first` beats `second`.
        grid.agent_mut(agent).unwrap().items.retain(|i| i.id != third);
        assert_eq!(
            grid.agent(agent).unwrap().next_assigned().map(|i| i.id),
            Some(first)
        );
        assert!(first < second);
    }

    #[test]
    fn item_lookup_by_id() {
        let mut grid = Grid::new(5, 5).unwrap();
        let pickup = grid.add_pickup(p(0, 0)).unwrap();
        let delivery = grid.add_delivery(p(4, 4)).unwrap();
        let agent = grid.add_agent(p(0, 0), 1).unwrap();

        let id = grid.spawn_item(pickup, delivery, Tick(0)).unwrap();
        let mut item = grid.pickup_mut(pickup).unwrap().queue.pop().unwrap();
        item.assign_to(agent, 1).unwrap();
        grid.agent_mut(agent).unwrap().items.push(item);

        assert!(grid.agent(agent).unwrap().item(id).is_some());
        assert!(grid.agent(agent).unwrap().item(ItemId(99)).is_none());
    }
}

#[cfg(test)]
mod astar_tests {
    use super::*;

    #[test]
    fn straight_line_path() {
        let grid = Grid::new(5, 5).unwrap();
        let route = astar::path(&grid, p(0, 0), p(4, 0)).unwrap();
        assert_eq!(route.len(), 5);
        assert_eq!(route.first(), Some(&p(0, 0)));
        assert_eq!(route.last(), Some(&p(4, 0)));
    }

    #[test]
    fn path_length_matches_manhattan_without_obstacles() {
        let grid = Grid::new(8, 8).unwrap();
        let from = p(1, 2);
        let to = p(6, 7);
        let route = astar::path(&grid, from, to).unwrap();
        assert_eq!(route.len() as u32 - 1, from.manhattan(to));
    }

    #[test]
    fn detours_around_a_wall() {
        // Wall across x=2 with a gap at y=4.
        let mut grid = Grid::new(5, 5).unwrap();
        for y in 0..4 {
            grid.add_obstacle(p(2, y)).unwrap();
        }
        let route = astar::path(&grid, p(0, 0), p(4, 0)).unwrap();
        assert!(route.len() as u32 - 1 > p(0, 0).manhattan(p(4, 0)));
        assert!(route.contains(&p(2, 4)));
        for step in &route {
            assert!(grid.passable(*step));
        }
    }

    #[test]
    fn consecutive_steps_are_adjacent() {
        let mut grid = Grid::new(6, 6).unwrap();
        grid.add_obstacle(p(3, 3)).unwrap();
        let route = astar::path(&grid, p(0, 0), p(5, 5)).unwrap();
        for pair in route.windows(2) {
            assert_eq!(pair[0].manhattan(pair[1]), 1);
        }
    }

    #[test]
    fn unreachable_target_errors() {
        // Box in the target completely.
        let mut grid = Grid::new(5, 5).unwrap();
        for pos in [p(3, 4), p(3, 3), p(4, 3)] {
            grid.add_obstacle(pos).unwrap();
        }
        assert!(matches!(
            astar::path(&grid, p(0, 0), p(4, 4)),
            Err(GridError::NoPath { .. })
        ));
    }

    #[test]
    fn obstacle_target_errors() {
        let mut grid = Grid::new(3, 3).unwrap();
        grid.add_obstacle(p(1, 1)).unwrap();
        assert!(astar::path(&grid, p(0, 0), p(1, 1)).is_err());
        assert!(astar::path(&grid, p(0, 0), p(9, 9)).is_err());
    }

    #[test]
    fn next_step_moves_toward_target() {
        let grid = Grid::new(3, 3).unwrap();
        let step = astar::next_step(&grid, p(0, 0), p(2, 2)).unwrap();
        assert!(step == p(1, 0) || step == p(0, 1));
    }

    #[test]
    fn next_step_at_target_is_identity() {
        let grid = Grid::new(3, 3).unwrap();
        assert_eq!(astar::next_step(&grid, p(1, 1), p(1, 1)).unwrap(), p(1, 1));
    }
}
