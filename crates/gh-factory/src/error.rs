use gh_core::{DeliveryId, PickupId};
use gh_grid::GridError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FactoryError {
    #[error("pickup station {0} does not exist")]
    UnknownPickup(PickupId),

    #[error("delivery station {0} does not exist")]
    UnknownDelivery(DeliveryId),

    #[error("delivery station {0} has weight 0")]
    ZeroWeight(DeliveryId),

    #[error("cannot create items: the grid has no delivery stations")]
    NoDeliveryStations,

    #[error("invalid delivery weights: {0}")]
    BadWeights(String),

    #[error(transparent)]
    Grid(#[from] GridError),
}

pub type FactoryResult<T> = Result<T, FactoryError>;
