//! The greedy reactive policy.
//!
//! One intention per tick, chosen by the first matching rule:
//!
//! 1. Standing on the destination of a carried item → `Deliver` it.
//! 2. Carrying anything → `Move` one A* step toward the next carried item's
//!    destination.
//! 3. Holding an assignment and standing on its source → `Pickup` it.
//! 4. Holding an assignment elsewhere → `Move` toward its source.
//! 5. Otherwise, in crowd-seeking mode only: target the rank-n station of
//!    the congestion ranking and `Pickup`/`Move` accordingly.
//!
//! "Next" always means highest bundle priority, ties broken by item creation
//! order.

use gh_core::{AgentId, PickupId};
use gh_grid::board::execution_order;
use gh_grid::{Grid, astar};

use crate::error::BehaviorResult;
use crate::intention::Intention;
use crate::policy::CourierPolicy;

enum SeekMode {
    /// Broker-managed fleet: an agent with no assignment idles.
    AssignedOnly,
    /// Self-directed fleet: idle agents head for the congestion ranking.
    /// `ranks[agent.index()]` is the agent's preferred rank (0 = deepest
    /// queue); missing entries default to 0.
    CrowdSeeking { ranks: Vec<usize> },
}

/// The reactive courier policy, in broker-managed or self-directed flavour.
pub struct GreedyCourier {
    seek: SeekMode,
}

impl GreedyCourier {
    /// Agents act only on items assigned to them (auction fleets).
    pub fn assigned_only() -> Self {
        Self {
            seek: SeekMode::AssignedOnly,
        }
    }

    /// Idle agents seek out crowded pickup stations and grab any item.
    /// `ranks[i]` is agent `i`'s preferred position in the depth ranking,
    /// clamped to the stations that still have items.
    pub fn crowd_seeking(ranks: Vec<usize>) -> Self {
        Self {
            seek: SeekMode::CrowdSeeking { ranks },
        }
    }

    fn step_toward(
        &self,
        agent: AgentId,
        grid: &Grid,
        to: gh_core::Pos,
    ) -> BehaviorResult<Intention> {
        let from = grid.agent(agent)?.pos;
        let next = astar::next_step(grid, from, to)?;
        Intention::move_by(agent, next.x - from.x, next.y - from.y)
    }
}

impl CourierPolicy for GreedyCourier {
    fn propose(&self, agent: AgentId, grid: &Grid) -> BehaviorResult<Option<Intention>> {
        let state = grid.agent(agent)?;

        // 1. Deliver a carried item whose destination is this cell.
        let mut deliverable = None;
        for item in state.carried() {
            if grid.delivery(item.destination)?.pos != state.pos {
                continue;
            }
            let better = deliverable
                .map(|best| execution_order(item) < execution_order(best))
                .unwrap_or(true);
            if better {
                deliverable = Some(item);
            }
        }
        if let Some(item) = deliverable {
            return Ok(Some(Intention::Deliver {
                agent,
                item: Some(item.id),
            }));
        }

        // 2. Carrying: head for the next carried item's destination.
        if let Some(item) = state.next_carried() {
            let goal = grid.delivery(item.destination)?.pos;
            return self.step_toward(agent, grid, goal).map(Some);
        }

        // 3–4. Assigned: collect (or head for) the next assignment's source.
        if let Some(item) = state.next_assigned() {
            let source = grid.pickup(item.source)?.pos;
            if source == state.pos {
                return Ok(Some(Intention::Pickup {
                    agent,
                    item: Some(item.id),
                }));
            }
            return self.step_toward(agent, grid, source).map(Some);
        }

        // 5. Nothing held: idle, or chase congestion.
        let ranks = match &self.seek {
            SeekMode::AssignedOnly => return Ok(None),
            SeekMode::CrowdSeeking { ranks } => ranks,
        };
        if state.remaining_capacity() == 0 {
            return Ok(None);
        }

        let mut ranked: Vec<PickupId> = grid.stations_by_queue_depth();
        ranked.retain(|id| {
            grid.pickup(*id)
                .map(|s| !s.queue.is_empty())
                .unwrap_or(false)
        });
        if ranked.is_empty() {
            return Ok(None);
        }

        let rank = ranks.get(agent.index()).copied().unwrap_or(0);
        let target = ranked[rank.min(ranked.len() - 1)];
        let target_pos = grid.pickup(target)?.pos;

        if target_pos == state.pos {
            Ok(Some(Intention::Pickup { agent, item: None }))
        } else {
            self.step_toward(agent, grid, target_pos).map(Some)
        }
    }
}
