//! End-of-run analytics.
//!
//! Station and agent labels use the same 1-based `pickup_N` / `delivery_N` /
//! `agent_N` syntax as the configuration file, so report lines can be traced
//! straight back to the config that produced them.

use std::fmt;

use gh_core::{AgentId, ItemStatus, PickupId, Tick};
use gh_grid::Grid;

/// Aggregate statistics computed from the final grid.
#[derive(Debug)]
pub struct RunReport {
    pub total_ticks: u64,
    /// Queue depth per pickup station, deepest first.
    pub left_behind: Vec<(PickupId, usize)>,
    /// Delivered-item count per agent, best first.
    pub delivered_per_agent: Vec<(AgentId, usize)>,
    /// Creation tick of the oldest still-awaiting item per station, oldest
    /// first.  Stations with empty queues are omitted.
    pub oldest_awaiting: Vec<(PickupId, Tick)>,
    /// Mean (delivery − creation) latency divided by the run length.
    pub avg_delivery_time_per_step: f64,
    /// World-wide item counts: awaiting, assigned, in transit, delivered.
    pub status_totals: [usize; 4],
    /// Accumulated winning-bid cost per agent.
    pub agent_costs: Vec<(AgentId, u64)>,
    /// Won bids whose every item has been delivered, per agent.
    pub bundles_completed: Vec<(AgentId, usize)>,
}

impl RunReport {
    /// Compute every analytic from the final world state.
    pub fn collect(grid: &Grid, total_ticks: u64) -> Self {
        // ── Stations ──────────────────────────────────────────────────────
        let mut left_behind: Vec<(PickupId, usize)> = grid
            .pickups
            .iter()
            .map(|s| (s.id, s.queue.len()))
            .collect();
        left_behind.sort_by_key(|&(id, n)| (std::cmp::Reverse(n), id));

        let mut oldest_awaiting: Vec<(PickupId, Tick)> = grid
            .pickups
            .iter()
            .filter_map(|s| {
                s.queue
                    .iter()
                    .map(|i| i.created_tick)
                    .min()
                    .map(|t| (s.id, t))
            })
            .collect();
        oldest_awaiting.sort_by_key(|&(id, t)| (t, id));

        // ── Agents ────────────────────────────────────────────────────────
        let mut delivered_per_agent: Vec<(AgentId, usize)> = grid
            .agents
            .iter()
            .map(|a| {
                let n = grid
                    .delivered
                    .iter()
                    .filter(|i| i.assigned_agent == Some(a.id))
                    .count();
                (a.id, n)
            })
            .collect();
        delivered_per_agent.sort_by_key(|&(id, n)| (std::cmp::Reverse(n), id));

        let agent_costs: Vec<(AgentId, u64)> =
            grid.agents.iter().map(|a| (a.id, a.total_cost)).collect();

        let bundles_completed: Vec<(AgentId, usize)> = grid
            .agents
            .iter()
            .map(|a| {
                let done = a
                    .won_bids
                    .iter()
                    .filter(|bid| {
                        bid.items.iter().all(|id| {
                            grid.delivered.iter().any(|i| i.id == *id)
                        })
                    })
                    .count();
                (a.id, done)
            })
            .collect();

        // ── Items ─────────────────────────────────────────────────────────
        let mut status_totals = [0usize; 4];
        for item in grid.items() {
            let slot = match item.status() {
                ItemStatus::AwaitingPickup => 0,
                ItemStatus::AssignedToAgent => 1,
                ItemStatus::InTransit => 2,
                ItemStatus::Delivered => 3,
            };
            status_totals[slot] += 1;
        }

        let latencies: Vec<u64> = grid
            .delivered
            .iter()
            .filter_map(|i| i.delivered_tick.map(|t| t - i.created_tick))
            .collect();
        let avg_delivery_time_per_step = if latencies.is_empty() || total_ticks == 0 {
            0.0
        } else {
            let mean = latencies.iter().sum::<u64>() as f64 / latencies.len() as f64;
            mean / total_ticks as f64
        };

        Self {
            total_ticks,
            left_behind,
            delivered_per_agent,
            oldest_awaiting,
            avg_delivery_time_per_step,
            status_totals,
            agent_costs,
            bundles_completed,
        }
    }
}

// ── Formatting ────────────────────────────────────────────────────────────────

fn pickup_label(id: PickupId) -> String {
    format!("pickup_{}", id.0 + 1)
}

fn agent_label(id: AgentId) -> String {
    format!("agent_{}", id.0 + 1)
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Run report ({} ticks) ===", self.total_ticks)?;

        writeln!(f, "Items left behind per station:")?;
        for &(id, n) in &self.left_behind {
            writeln!(f, "  {}: {}", pickup_label(id), n)?;
        }

        writeln!(f, "Items delivered per agent:")?;
        for &(id, n) in &self.delivered_per_agent {
            writeln!(f, "  {}: {}", agent_label(id), n)?;
        }

        writeln!(f, "Oldest awaiting item per station:")?;
        for &(id, t) in &self.oldest_awaiting {
            writeln!(f, "  {}: created at {}", pickup_label(id), t)?;
        }

        writeln!(
            f,
            "Average delivery time per step: {:.3}",
            self.avg_delivery_time_per_step
        )?;

        let [awaiting, assigned, transit, delivered] = self.status_totals;
        writeln!(
            f,
            "Item totals: {awaiting} awaiting, {assigned} assigned, {transit} in transit, {delivered} delivered"
        )?;

        writeln!(f, "Total cost per agent:")?;
        for &(id, cost) in &self.agent_costs {
            writeln!(f, "  {}: {}", agent_label(id), cost)?;
        }

        writeln!(f, "Bundles fully delivered per agent:")?;
        for &(id, n) in &self.bundles_completed {
            writeln!(f, "  {}: {}", agent_label(id), n)?;
        }
        Ok(())
    }
}
