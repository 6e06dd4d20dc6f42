//! Bundle enumeration and route pricing.
//!
//! For an agent with remaining capacity `c` and an auctionable list `A`, we
//! enumerate every non-empty subset `B ⊆ A` with `|B| ≤ c` and price each by
//! a nearest-insertion tour: starting from the agent's position, repeatedly
//! append the unvisited item whose source is the shortest path away from the
//! current tail, accumulating path length (the starting cell of each leg is
//! not counted).

use gh_core::{AgentId, ItemId, Pos};
use gh_grid::{Grid, astar};
use rustc_hash::FxHashMap;

use crate::bid::Bid;
use crate::error::AuctionResult;

// ── Path-length memo ──────────────────────────────────────────────────────────

/// Per-auction-round memo of shortest-path lengths between cells.
///
/// Many bundles share legs (every subset containing item X prices the leg to
/// X's station), so caching turns the enumeration's A* cost from
/// per-subset-per-leg into per-distinct-leg.
#[derive(Default)]
pub struct PathCache {
    lengths: FxHashMap<(Pos, Pos), u64>,
}

impl PathCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shortest-path length in steps from `from` to `to`.
    pub fn leg(&mut self, grid: &Grid, from: Pos, to: Pos) -> AuctionResult<u64> {
        if let Some(&len) = self.lengths.get(&(from, to)) {
            return Ok(len);
        }
        let len = (astar::path(grid, from, to)?.len() - 1) as u64;
        // The board is undirected, so the reverse leg costs the same.
        self.lengths.insert((from, to), len);
        self.lengths.insert((to, from), len);
        Ok(len)
    }
}

// ── Combination enumeration ───────────────────────────────────────────────────

/// All `k`-combinations of `0..n`, in lexicographic order.
///
/// Lexicographic order is load-bearing: both bundle enumeration and the
/// broker's winner search resolve cost ties by "first enumerated wins".
pub(crate) fn combinations(n: usize, k: usize) -> Vec<Vec<usize>> {
    let mut out = Vec::new();
    if k == 0 || k > n {
        return out;
    }
    let mut idx: Vec<usize> = (0..k).collect();
    loop {
        out.push(idx.clone());
        // Rightmost index that can still be incremented.
        let mut i = k;
        while i > 0 && idx[i - 1] == n - k + (i - 1) {
            i -= 1;
        }
        if i == 0 {
            return out;
        }
        idx[i - 1] += 1;
        for j in i..k {
            idx[j] = idx[j - 1] + 1;
        }
    }
}

// ── Bidding ───────────────────────────────────────────────────────────────────

/// Enumerate and price every feasible bundle for `agent`.
///
/// `auctionable` pairs each item with its source station's position.  Bundle
/// size is capped at the agent's *remaining* capacity; the cost divisor is
/// the agent's *full* capacity.
pub fn compute_bids(
    grid: &Grid,
    agent: AgentId,
    auctionable: &[(ItemId, Pos)],
    cache: &mut PathCache,
) -> AuctionResult<Vec<Bid>> {
    let state = grid.agent(agent)?;
    let max_len = state.remaining_capacity().min(auctionable.len());
    let capacity = state.capacity.max(1) as f64;

    let mut bids = Vec::new();
    for k in 1..=max_len {
        for combo in combinations(auctionable.len(), k) {
            let subset: Vec<(ItemId, Pos)> = combo.iter().map(|&i| auctionable[i]).collect();
            let (bundle, length) = route_bundle(grid, state.pos, subset, cache)?;
            let cost = (length as f64 / capacity).round() as u64;
            bids.push(Bid {
                agent,
                bundle,
                cost,
            });
        }
    }
    Ok(bids)
}

/// Order a subset by nearest insertion and return (visit order, total steps).
fn route_bundle(
    grid: &Grid,
    start: Pos,
    mut remaining: Vec<(ItemId, Pos)>,
    cache: &mut PathCache,
) -> AuctionResult<(Vec<ItemId>, u64)> {
    let mut order = Vec::with_capacity(remaining.len());
    let mut current = start;
    let mut total = 0u64;

    while !remaining.is_empty() {
        let mut best = 0;
        let mut best_len = cache.leg(grid, current, remaining[0].1)?;
        for i in 1..remaining.len() {
            let len = cache.leg(grid, current, remaining[i].1)?;
            if len < best_len {
                best = i;
                best_len = len;
            }
        }
        let (id, pos) = remaining.remove(best);
        order.push(id);
        total += best_len;
        current = pos;
    }
    Ok((order, total))
}
