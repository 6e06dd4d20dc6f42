//! `gh-grid` — the warehouse world: board, entity registries, pathfinding.
//!
//! # Crate layout
//!
//! | Module    | Contents                                                      |
//! |-----------|---------------------------------------------------------------|
//! | [`board`] | `Grid`, stations, obstacles, `AgentState`, item ownership     |
//! | [`astar`] | 4-connected A* (`path`, `next_step`)                          |
//! | [`error`] | `GridError`, `GridResult`                                     |
//!
//! # Ownership model
//!
//! Relationships are stored by typed ID, never by reference, so there are no
//! ownership cycles between items, stations, and agents.  An item is owned by
//! exactly one container at a time:
//!
//! - its pickup station's `queue` while `AwaitingPickup`;
//! - the assigned agent's `items` list while `AssignedToAgent`/`InTransit`;
//! - the grid's `delivered` archive afterwards (kept for analytics only).
//!
//! During a tick the grid is mutated exclusively by the engine; agents, the
//! broker, and policies receive `&Grid`.

pub mod astar;
pub mod board;
pub mod error;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use board::{AgentState, CellObject, DeliveryStation, Grid, Obstacle, PickupStation, WonBid};
pub use error::{GridError, GridResult};
