//! `gh-factory` — item-generation strategies.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                 |
//! |--------------|----------------------------------------------------------|
//! | [`initial`]  | `InitialDistribution` — seeds the board once, at tick 0  |
//! | [`weighted`] | `WeightedDistribution` — Bernoulli arrivals every tick   |
//! | [`error`]    | `FactoryError`, `FactoryResult`                          |
//!
//! A factory is the first phase of every tick.  It draws from the engine's
//! single `SimRng`, so item arrivals are reproducible from the run seed.

pub mod error;
pub mod initial;
pub mod weighted;

#[cfg(test)]
mod tests;

use gh_core::{SimRng, Tick};
use gh_grid::Grid;

pub use error::{FactoryError, FactoryResult};
pub use initial::{Distribution, InitialDistribution};
pub use weighted::WeightedDistribution;

/// An item-generation strategy, invoked once per tick before assignment.
pub trait ItemFactory {
    /// Add this tick's new items to the grid's pickup queues.
    ///
    /// Station IDs referenced by the strategy's configuration are validated
    /// against the grid; an unknown ID is fatal for the run.
    fn add_items(&mut self, grid: &mut Grid, tick: Tick, rng: &mut SimRng) -> FactoryResult<()>;
}
