use gh_core::{AgentId, DeliveryId, PickupId, Pos};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GridError {
    #[error("grid dimensions {width}x{height} are not positive")]
    InvalidDimensions { width: i32, height: i32 },

    #[error("position {pos} is outside the board")]
    OutOfBounds { pos: Pos },

    #[error("no path from {from} to {to}")]
    NoPath { from: Pos, to: Pos },

    #[error("pickup station {0} not found")]
    UnknownPickup(PickupId),

    #[error("delivery station {0} not found")]
    UnknownDelivery(DeliveryId),

    #[error("agent {0} not found")]
    UnknownAgent(AgentId),
}

pub type GridResult<T> = Result<T, GridError>;
