use gh_core::{CoreError, ItemId};
use gh_grid::GridError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuctionError {
    #[error("item {0} is no longer available for assignment")]
    ItemNotAvailable(ItemId),

    /// Routing failure while pricing a bundle.  Does not occur in
    /// well-formed configurations.
    #[error(transparent)]
    Grid(#[from] GridError),

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type AuctionResult<T> = Result<T, AuctionError>;
