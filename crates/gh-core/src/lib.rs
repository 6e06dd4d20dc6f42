//! `gh-core` — foundational types for the `gridhaul` courier testbed.
//!
//! This crate is a dependency of every other `gh-*` crate.  It intentionally
//! has no `gh-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`).
//!
//! # What lives here
//!
//! | Module    | Contents                                              |
//! |-----------|-------------------------------------------------------|
//! | [`ids`]   | `AgentId`, `ItemId`, `PickupId`, `DeliveryId`         |
//! | [`pos`]   | `Pos`, `Dir`, Manhattan metric                        |
//! | [`tick`]  | `Tick` counter                                        |
//! | [`rng`]   | `SimRng` — the single seeded PRNG per simulation      |
//! | [`item`]  | `Item`, `ItemStatus`, checked lifecycle transitions   |
//! | [`error`] | `CoreError`, `CoreResult`                             |

pub mod error;
pub mod ids;
pub mod item;
pub mod pos;
pub mod rng;
pub mod tick;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use ids::{AgentId, DeliveryId, ItemId, PickupId};
pub use item::{Item, ItemStatus};
pub use pos::{Dir, Pos};
pub use rng::SimRng;
pub use tick::Tick;
