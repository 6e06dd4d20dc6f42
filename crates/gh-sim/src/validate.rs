//! Phase ④ — reject outright illegal intention batches.
//!
//! All checks are defensive: the shipped policies cannot produce an illegal
//! intention, so any hit here is an agent bug and fails the run fast rather
//! than silently corrupting the world.

use std::collections::BTreeSet;

use gh_behavior::Intention;
use gh_grid::Grid;

use crate::error::{IllegalIntention, SimResult};

/// Validate one batch of intentions against the current grid.
///
/// The batch is rejected as a whole on the first violation found; partial
/// enactment of a batch containing an illegal intention never happens.
pub fn check_legal(intentions: &[Intention], grid: &Grid) -> SimResult<()> {
    let mut origins = BTreeSet::new();
    for intention in intentions {
        if !origins.insert(intention.agent()) {
            return Err(IllegalIntention::DuplicateOrigin {
                agent: intention.agent(),
            }
            .into());
        }
    }

    for intention in intentions {
        let agent = intention.agent();
        let at = grid.agent(agent)?.pos;
        match intention {
            Intention::Move { dir, .. } => {
                let to = at.step(*dir);
                if !grid.in_bounds(to) {
                    return Err(IllegalIntention::OutOfBoundsMove { agent, to }.into());
                }
                if grid.is_obstacle(to) {
                    return Err(IllegalIntention::ObstacleCollision { agent, to }.into());
                }
            }
            Intention::Pickup { .. } => {
                if grid.pickup_at(at).is_none() {
                    return Err(IllegalIntention::PickupOffStation { agent, at }.into());
                }
            }
            Intention::Deliver { .. } => {
                if grid.delivery_at(at).is_none() {
                    return Err(IllegalIntention::DeliverOffStation { agent, at }.into());
                }
            }
        }
    }
    Ok(())
}
