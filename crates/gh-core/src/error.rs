//! Core error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant where the item state machine can reject a transition.

use thiserror::Error;

use crate::ids::ItemId;
use crate::item::ItemStatus;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("item {item} cannot move from {from:?} to {to:?}")]
    InvalidTransition {
        item: ItemId,
        from: ItemStatus,
        to: ItemStatus,
    },
}

/// Shorthand result type for `gh-core`.
pub type CoreResult<T> = Result<T, CoreError>;
