//! The bid type exchanged between agents and the broker.

use gh_core::{AgentId, ItemId};

/// One agent's offer to handle a bundle of items as a unit.
///
/// `bundle` is ordered — it is the visit order produced by the
/// nearest-insertion routing, and becomes the items' execution priority if
/// the bid wins.  `cost` is the routed path length divided by the agent's
/// full capacity (rounded), so higher-capacity agents bid proportionally
/// cheaper.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Bid {
    pub agent: AgentId,
    pub bundle: Vec<ItemId>,
    pub cost: u64,
}
