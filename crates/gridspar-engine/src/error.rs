//! Error types for the engine.

use gridspar_protocol::{Direction, MoveReason, PieceId};

/// Why a move was rejected, in the order the validator checks. The first
/// failing check wins and the state is left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    /// No piece with this id is on the board.
    #[error("piece {0} not found")]
    PieceNotFound(PieceId),

    /// The piece belongs to the player not holding the turn.
    #[error("not your turn")]
    NotYourTurn,

    /// The direction is not in the piece kind's vocabulary.
    #[error("piece cannot move {0}")]
    IllegalMove(Direction),

    /// The target cell lies outside the board.
    #[error("move out of bounds")]
    OutOfBounds,

    /// The target cell holds a piece of the same player.
    #[error("cannot capture your own piece")]
    OwnPieceCapture,
}

impl MoveError {
    /// The wire-level rejection code for this error.
    pub fn reason(&self) -> MoveReason {
        match self {
            Self::PieceNotFound(_) => MoveReason::PieceNotFound,
            Self::NotYourTurn => MoveReason::NotYourTurn,
            Self::IllegalMove(_) => MoveReason::IllegalMove,
            Self::OutOfBounds => MoveReason::OutOfBounds,
            Self::OwnPieceCapture => MoveReason::OwnPieceCapture,
        }
    }
}
