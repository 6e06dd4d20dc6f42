//! The `CourierPolicy` trait — the decision seam between agents and engine.

use gh_core::AgentId;
use gh_grid::Grid;

use crate::error::BehaviorResult;
use crate::intention::Intention;

/// Pluggable per-tick decision making.
///
/// The engine calls `propose` once per agent per arbitration round, always
/// with a read-only view of the world.  `Ok(None)` means the agent has
/// nothing to do this round and makes no proposal.
///
/// Implementations must be deterministic: the same grid state must yield the
/// same intention.  Randomness belongs to the engine (conflict arbitration)
/// and the item factories, so that a run is reproducible from one seed.
pub trait CourierPolicy {
    fn propose(&self, agent: AgentId, grid: &Grid) -> BehaviorResult<Option<Intention>>;
}
