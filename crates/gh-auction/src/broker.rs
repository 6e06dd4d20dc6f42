//! Winner determination and assignment.
//!
//! The broker solves a weighted exact cover: choose a set of bids whose
//! bundles partition the auctionable items, at most one bid per agent, with
//! minimum total cost.  Search enumerates combinations of the flat bid pool
//! in ascending size and lexicographic order; a strict `<` on cost keeps the
//! first minimum found, making ties deterministic.

use std::collections::BTreeSet;

use gh_core::{AgentId, Item, ItemId, ItemStatus, Pos, Tick};
use gh_grid::{Grid, WonBid};
use tracing::{debug, warn};

use crate::bid::Bid;
use crate::bundle::{PathCache, combinations, compute_bids};
use crate::error::{AuctionError, AuctionResult};

/// What one auction round did.
#[derive(Debug, Default)]
pub struct AuctionOutcome {
    /// Items put up for auction this round.
    pub auctioned: usize,
    /// Winning bids, in pool order.  Empty when the round was a no-op.
    pub winners: Vec<Bid>,
    /// Items actually assigned (the union of the winning bundles).
    pub assigned: usize,
}

/// Run one auction round over all AWAITING_PICKUP items.
///
/// No-op when nothing is auctionable or the fleet has no spare capacity.
/// A non-empty pool with no valid exact cover (every bid failed routing,
/// for instance) is logged and skipped rather than treated as fatal.
pub fn run_auction(grid: &mut Grid, tick: Tick) -> AuctionResult<AuctionOutcome> {
    // ── 1. Auctionable set, truncated to fleet capacity ───────────────────
    //
    // Creation order across stations is ItemId order; truncation keeps the
    // oldest items so nothing starves.
    let fleet_capacity = grid.fleet_remaining_capacity();
    let mut auctionable: Vec<(ItemId, Pos)> = grid
        .pickups
        .iter()
        .flat_map(|s| {
            s.queue
                .iter()
                .filter(|i| i.status() == ItemStatus::AwaitingPickup)
                .map(|i| (i.id, s.pos))
        })
        .collect();
    auctionable.sort_by_key(|&(id, _)| id);
    auctionable.truncate(fleet_capacity);

    if auctionable.is_empty() {
        return Ok(AuctionOutcome::default());
    }

    // ── 2. Collect bids from every agent with spare capacity ──────────────
    let mut cache = PathCache::new();
    let mut pool: Vec<Bid> = Vec::new();
    for agent in grid.agent_ids() {
        if grid.agent(agent)?.remaining_capacity() == 0 {
            continue;
        }
        pool.extend(compute_bids(grid, agent, &auctionable, &mut cache)?);
    }
    let bidders: BTreeSet<AgentId> = pool.iter().map(|b| b.agent).collect();

    debug!(
        tick = tick.0,
        items = auctionable.len(),
        bids = pool.len(),
        bidders = bidders.len(),
        "auction round"
    );

    // ── 3. Winner search ──────────────────────────────────────────────────
    let want: Vec<ItemId> = auctionable.iter().map(|&(id, _)| id).collect();
    let mut best: Option<(u64, Vec<usize>)> = None;
    for r in 1..=bidders.len().min(pool.len()) {
        for combo in combinations(pool.len(), r) {
            if !is_exact_cover(&pool, &combo, &want) {
                continue;
            }
            let cost: u64 = combo.iter().map(|&i| pool[i].cost).sum();
            let better = best.as_ref().map(|&(b, _)| cost < b).unwrap_or(true);
            if better {
                best = Some((cost, combo));
            }
        }
    }

    let Some((total_cost, combo)) = best else {
        warn!(
            tick = tick.0,
            items = auctionable.len(),
            "no exact cover found; leaving items unassigned"
        );
        return Ok(AuctionOutcome {
            auctioned: auctionable.len(),
            ..AuctionOutcome::default()
        });
    };

    // ── 4. Assign winning bundles ─────────────────────────────────────────
    let winners: Vec<Bid> = combo.iter().map(|&i| pool[i].clone()).collect();
    for bid in &winners {
        assign_bundle(grid, bid, tick)?;
    }

    debug!(
        tick = tick.0,
        winners = winners.len(),
        total_cost,
        "auction settled"
    );

    Ok(AuctionOutcome {
        auctioned: auctionable.len(),
        assigned: want.len(),
        winners,
    })
}

/// Valid winner subset: distinct agents, and the bundles partition `want`
/// (every item exactly once).  `want` must be sorted.
fn is_exact_cover(pool: &[Bid], combo: &[usize], want: &[ItemId]) -> bool {
    let mut agents: BTreeSet<AgentId> = BTreeSet::new();
    let mut items: Vec<ItemId> = Vec::with_capacity(want.len());
    for &i in combo {
        if !agents.insert(pool[i].agent) {
            return false;
        }
        items.extend_from_slice(&pool[i].bundle);
    }
    if items.len() != want.len() {
        return false;
    }
    items.sort_unstable();
    items == want
}

/// Move a winning bundle's items from their queues into the agent's list.
fn assign_bundle(grid: &mut Grid, bid: &Bid, tick: Tick) -> AuctionResult<()> {
    for (index, &item_id) in bid.bundle.iter().enumerate() {
        let mut item = take_from_queue(grid, item_id)?;
        item.assign_to(bid.agent, (index + 1) as u32)?;
        debug!(item = %item_id, agent = %bid.agent, priority = index + 1, "item assigned");
        grid.agent_mut(bid.agent)?.items.push(item);
    }

    let agent = grid.agent_mut(bid.agent)?;
    agent.total_cost += bid.cost;
    agent.won_bids.push(WonBid {
        tick,
        items: bid.bundle.clone(),
        cost: bid.cost,
    });
    Ok(())
}

fn take_from_queue(grid: &mut Grid, id: ItemId) -> AuctionResult<Item> {
    for station in &mut grid.pickups {
        if let Some(idx) = station.queue.iter().position(|i| i.id == id) {
            return Ok(station.queue.remove(idx));
        }
    }
    Err(AuctionError::ItemNotAvailable(id))
}
