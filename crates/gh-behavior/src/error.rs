use gh_core::AgentId;
use gh_grid::GridError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BehaviorError {
    #[error("agent {agent} proposed a non-unit move vector ({dx}, {dy})")]
    InvalidMoveVector { agent: AgentId, dx: i32, dy: i32 },

    /// Pathfinding failure while planning a move.  Does not occur in
    /// well-formed configurations.
    #[error(transparent)]
    Grid(#[from] GridError),
}

pub type BehaviorResult<T> = Result<T, BehaviorError>;
