use thiserror::Error;

use crate::Coords;

/// A broken snake/grid invariant. These only come from logic bugs, never from
/// anything a player can do, so callers should treat them as fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("a snake needs at least one segment")]
    EmptyPath,

    #[error("cannot remove the last segment of a snake")]
    EmptySnake,

    #[error("segments {from:?} and {to:?} are not orthogonal neighbours")]
    Disjoint { from: Coords, to: Coords },

    #[error("segment {0:?} appears more than once")]
    Repeated(Coords),
}
