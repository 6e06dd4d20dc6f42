//! A* shortest paths on the obstacle-aware board.
//!
//! Movement is 4-connected with uniform step cost 1, so the Manhattan
//! distance is an admissible and consistent heuristic.  Cells containing an
//! obstacle are impassable; stations and other agents are not.
//!
//! Ties on `f = g + h` are broken by smaller `h`, then by position order, so
//! the returned path is a pure function of the board — no hidden iteration
//! order leaks into the simulation.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use gh_core::{Dir, Pos};
use rustc_hash::FxHashMap;

use crate::board::Grid;
use crate::error::{GridError, GridResult};

/// Full shortest path from `from` to `to`, **including** the starting cell.
///
/// `from == to` yields a single-cell path.  Returns
/// [`GridError::NoPath`] when the target is unreachable, out of bounds, or an
/// obstacle.
pub fn path(grid: &Grid, from: Pos, to: Pos) -> GridResult<Vec<Pos>> {
    if !grid.passable(from) || !grid.passable(to) {
        return Err(GridError::NoPath { from, to });
    }
    if from == to {
        return Ok(vec![from]);
    }

    // Min-heap keyed on (f, h, pos): h breaks f-ties toward the goal, pos
    // breaks the rest deterministically.
    let mut open: BinaryHeap<Reverse<(u32, u32, Pos)>> = BinaryHeap::new();
    let mut g_score: FxHashMap<Pos, u32> = FxHashMap::default();
    let mut came_from: FxHashMap<Pos, Pos> = FxHashMap::default();

    g_score.insert(from, 0);
    let h0 = from.manhattan(to);
    open.push(Reverse((h0, h0, from)));

    while let Some(Reverse((f, _, current))) = open.pop() {
        let g = g_score[&current];
        if f > g + current.manhattan(to) {
            // Stale heap entry superseded by a cheaper route.
            continue;
        }
        if current == to {
            return Ok(reconstruct(&came_from, from, to));
        }

        for dir in Dir::ALL {
            let next = current.step(dir);
            if !grid.passable(next) {
                continue;
            }
            let tentative = g + 1;
            if tentative < g_score.get(&next).copied().unwrap_or(u32::MAX) {
                g_score.insert(next, tentative);
                came_from.insert(next, current);
                let h = next.manhattan(to);
                open.push(Reverse((tentative + h, h, next)));
            }
        }
    }

    Err(GridError::NoPath { from, to })
}

/// The first step on a shortest path from `from` to `to`.
///
/// Returns `from` itself when the two coincide.
pub fn next_step(grid: &Grid, from: Pos, to: Pos) -> GridResult<Pos> {
    let route = path(grid, from, to)?;
    Ok(route.get(1).copied().unwrap_or(from))
}

fn reconstruct(came_from: &FxHashMap<Pos, Pos>, from: Pos, to: Pos) -> Vec<Pos> {
    let mut route = vec![to];
    let mut current = to;
    while current != from {
        current = came_from[&current];
        route.push(current);
    }
    route.reverse();
    route
}
