//! `gh-sim` — the tick engine.
//!
//! # Tick anatomy
//!
//! ```text
//! for each tick:
//!   ① Generate  — the item factory adds this tick's arrivals.
//!   ② Assign    — the broker auctions AWAITING items (auction mode only).
//!   ③ Propose   — each pending agent offers at most one intention.
//!   ④ Validate  — illegal intentions (out of bounds, obstacle, off-station,
//!                 duplicate origin) abort the tick and the run.
//!   ⑤ Arbitrate — contested pickups lose a fair coin flip and are set aside.
//!   ⑥ Enact     — the consistent remainder mutates the grid.
//!   ⑦ Iterate   — losers re-propose against the updated grid; repeat ③–⑥
//!                 until no intention is set aside, capped at the agent count.
//!   ⑧ Advance   — tick += 1.
//! ```
//!
//! Intentions within one iteration are logically simultaneous: arbitration
//! removes every pair that touches the same resource, so enactment order
//! cannot change the post-tick state.
//!
//! # Crate layout
//!
//! | Module        | Contents                                            |
//! |---------------|-----------------------------------------------------|
//! | [`env`]       | `Environment`, `Assignment`, `TickStats`, enactment |
//! | [`validate`]  | Phase ④ legality checks                             |
//! | [`arbitrate`] | Phase ⑤ conflict resolution                         |
//! | [`observer`]  | `SimObserver`, `NoopObserver`                       |
//! | [`error`]     | `SimError`, `IllegalIntention`                      |

pub mod arbitrate;
pub mod env;
pub mod error;
pub mod observer;
pub mod validate;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use env::{Assignment, Environment, TickStats};
pub use error::{IllegalIntention, SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
