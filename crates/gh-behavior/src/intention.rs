//! Intentions — the atomic actions an agent can propose for one tick.

use gh_core::{AgentId, Dir, ItemId};

use crate::error::{BehaviorError, BehaviorResult};

/// An atomic action proposal.  Value semantics; equality is structural.
///
/// Every variant records its origin agent.  The engine validates each batch
/// of intentions (legality), arbitrates conflicts between them, and enacts
/// the consistent remainder.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Intention {
    /// Step one cell in `dir`.
    Move { agent: AgentId, dir: Dir },

    /// Collect an item from the pickup station the agent is standing on.
    ///
    /// `item: None` means "any item present" — used by self-directed agents
    /// grabbing from a queue rather than collecting an auction assignment.
    Pickup {
        agent: AgentId,
        item: Option<ItemId>,
    },

    /// Drop a carried item at the delivery station the agent is standing on.
    ///
    /// `item: None` delivers the first carried item in execution order.
    Deliver {
        agent: AgentId,
        item: Option<ItemId>,
    },
}

impl Intention {
    /// The agent that made this proposal.
    pub fn agent(&self) -> AgentId {
        match *self {
            Intention::Move { agent, .. }
            | Intention::Pickup { agent, .. }
            | Intention::Deliver { agent, .. } => agent,
        }
    }

    /// Build a `Move` from a raw displacement vector.  Anything other than
    /// the four unit steps is rejected.
    pub fn move_by(agent: AgentId, dx: i32, dy: i32) -> BehaviorResult<Intention> {
        match Dir::from_delta(dx, dy) {
            Some(dir) => Ok(Intention::Move { agent, dir }),
            None => Err(BehaviorError::InvalidMoveVector { agent, dx, dy }),
        }
    }
}
