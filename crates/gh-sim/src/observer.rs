//! Observer hooks for progress reporting and data collection.

use gh_core::Tick;
use gh_grid::Grid;

use crate::env::TickStats;

/// Callbacks invoked by [`Environment::run`][crate::Environment::run] at the
/// tick boundaries — the only points where an outer driver may observe or
/// render the world.
///
/// All methods default to no-ops so implementors only override what they
/// need.
pub trait SimObserver {
    /// Called before any phase of the tick runs.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called after the tick committed, with read-only access to the grid.
    fn on_tick_end(&mut self, _stats: &TickStats, _grid: &Grid) {}

    /// Called once after the final tick.
    fn on_run_end(&mut self, _final_tick: Tick, _grid: &Grid) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
