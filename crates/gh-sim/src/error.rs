use gh_auction::AuctionError;
use gh_behavior::BehaviorError;
use gh_core::{AgentId, CoreError, ItemId, PickupId, Pos};
use gh_factory::FactoryError;
use gh_grid::GridError;
use thiserror::Error;

/// A proposal that violates the rules of the world outright.
///
/// These are defensive checks: a well-behaved policy never produces one, so
/// hitting any of them indicates an agent bug and aborts the run.
#[derive(Debug, Error)]
pub enum IllegalIntention {
    #[error("agent {agent} tried to move out of bounds to {to}")]
    OutOfBoundsMove { agent: AgentId, to: Pos },

    #[error("agent {agent} tried to move into an obstacle at {to}")]
    ObstacleCollision { agent: AgentId, to: Pos },

    #[error("agent {agent} tried to pick up away from any pickup station (at {at})")]
    PickupOffStation { agent: AgentId, at: Pos },

    #[error("agent {agent} tried to deliver away from any delivery station (at {at})")]
    DeliverOffStation { agent: AgentId, at: Pos },

    #[error("agent {agent} issued more than one intention this round")]
    DuplicateOrigin { agent: AgentId },
}

#[derive(Debug, Error)]
pub enum SimError {
    #[error("illegal intention: {0}")]
    Illegal(#[from] IllegalIntention),

    #[error("agent {agent} tried to pick up item {item}, which is not present")]
    MissingPickupItem { agent: AgentId, item: ItemId },

    #[error("agent {agent} tried to pick up from the empty queue of station {station}")]
    EmptyQueue { agent: AgentId, station: PickupId },

    #[error("agent {agent} has no item in transit to deliver")]
    NothingToDeliver { agent: AgentId },

    #[error(transparent)]
    Grid(#[from] GridError),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Behavior(#[from] BehaviorError),

    #[error("auction failed: {0}")]
    Auction(#[from] AuctionError),

    #[error("item factory failed: {0}")]
    Factory(#[from] FactoryError),
}

pub type SimResult<T> = Result<T, SimError>;
