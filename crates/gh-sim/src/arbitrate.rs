//! Phase ⑤ — split a legal batch into consistent and conflicting intentions.
//!
//! The only contestable resource in this world is a pickup: two agents may
//! want the same concrete item, or a station's queue may be shorter than the
//! number of wildcard grabs aimed at it.  Moves and deliveries never
//! conflict (agents may share cells, and a delivery only touches the
//! deliverer's own load).
//!
//! Fairness: each conflict group is shuffled through the run's `SimRng`
//! before winners are taken, so no agent is preferred for having a lower ID
//! or an earlier slot in the batch.  Groups are visited in `BTreeMap` order,
//! which keeps RNG consumption — and therefore the whole run — a pure
//! function of the seed.

use std::collections::{BTreeMap, BTreeSet};

use gh_behavior::Intention;
use gh_core::{ItemId, PickupId, SimRng};
use gh_grid::Grid;
use tracing::trace;

/// Split `intentions` into (consistent, conflicting), preserving batch order
/// within each half.  Callers must have validated legality first; a pickup
/// away from any station is silently treated as consistent here and will
/// fail loudly at enactment.
pub fn split_conflicts(
    intentions: Vec<Intention>,
    grid: &Grid,
    rng: &mut SimRng,
) -> (Vec<Intention>, Vec<Intention>) {
    // Group pickup batch indices by (station, wanted item).
    let mut groups: BTreeMap<(PickupId, Option<ItemId>), Vec<usize>> = BTreeMap::new();
    for (idx, intention) in intentions.iter().enumerate() {
        let Intention::Pickup { agent, item } = intention else {
            continue;
        };
        let Ok(state) = grid.agent(*agent) else {
            continue;
        };
        let Some(station) = grid.pickup_at(state.pos) else {
            continue;
        };
        groups.entry((station, *item)).or_default().push(idx);
    }

    let mut rejected: BTreeSet<usize> = BTreeSet::new();

    // ── Same concrete item, several agents: keep one at random ────────────
    for ((station, item), indices) in groups.iter_mut() {
        if item.is_some() && indices.len() > 1 {
            rng.shuffle(indices);
            trace!(
                station = %station,
                item = %item.map(|i| i.0).unwrap_or(u32::MAX),
                contenders = indices.len(),
                "contested pickup"
            );
            rejected.extend(indices[1..].iter().copied());
        }
    }

    // ── Wildcard over-demand per station ──────────────────────────────────
    //
    // Concrete requests are served first (each consumes one queued item);
    // wildcards share what is left.  Excess wildcards lose a fair shuffle.
    let mut per_station: BTreeMap<PickupId, (usize, Vec<usize>)> = BTreeMap::new();
    for ((station, item), indices) in &groups {
        let entry = per_station.entry(*station).or_default();
        match item {
            Some(_) => entry.0 += 1,
            None => entry.1.extend(indices.iter().copied()),
        }
    }
    for (station, (concrete, mut wildcards)) in per_station {
        if wildcards.is_empty() {
            continue;
        }
        let queue_len = grid
            .pickup(station)
            .map(|s| s.queue.len())
            .unwrap_or(0);
        let available = queue_len.saturating_sub(concrete);
        if wildcards.len() > available {
            rng.shuffle(&mut wildcards);
            trace!(
                station = %station,
                wildcards = wildcards.len(),
                available,
                "wildcard overflow"
            );
            rejected.extend(wildcards[available..].iter().copied());
        }
    }

    // ── Partition, preserving batch order ─────────────────────────────────
    let mut consistent = Vec::with_capacity(intentions.len() - rejected.len());
    let mut conflicting = Vec::with_capacity(rejected.len());
    for (idx, intention) in intentions.into_iter().enumerate() {
        if rejected.contains(&idx) {
            conflicting.push(intention);
        } else {
            consistent.push(intention);
        }
    }
    (consistent, conflicting)
}
