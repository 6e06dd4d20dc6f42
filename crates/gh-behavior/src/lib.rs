//! `gh-behavior` — intention types and courier decision policies.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`intention`] | `Intention` enum (`Move`, `Pickup`, `Deliver`)            |
//! | [`policy`]    | `CourierPolicy` trait                                     |
//! | [`greedy`]    | `GreedyCourier` — the reactive heuristic                  |
//! | [`error`]     | `BehaviorError`, `BehaviorResult`                         |
//!
//! # Design notes
//!
//! The engine's tick loop works in two halves:
//!
//! 1. **Propose**: every agent that has something to do produces at most one
//!    [`Intention`] from a read-only `&Grid`.  No mutation.
//! 2. **Enact** (engine side): the consistent subset of intentions is applied
//!    to the grid sequentially.
//!
//! Policies are deterministic — all randomness in the simulation lives in
//! the engine's single `SimRng` (arbitration) and in the item factories.

pub mod error;
pub mod greedy;
pub mod intention;
pub mod policy;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{BehaviorError, BehaviorResult};
pub use greedy::GreedyCourier;
pub use intention::Intention;
pub use policy::CourierPolicy;
