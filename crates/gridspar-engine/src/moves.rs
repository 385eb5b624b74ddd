//! Move validation and application: the single source of truth for rule
//! legality.
//!
//! [`attempt_move`] is all-or-nothing: a rejected move leaves the state
//! byte-for-byte untouched, an accepted one applies completely (clear
//! source, capture, occupy target, flip turn) before returning.

use gridspar_protocol::{Direction, PieceId, BOARD_SIZE};

use crate::piece;
use crate::{GameState, MoveError};

/// What an accepted move did. Enough to log or replay the step without
/// re-deriving it from state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveReport {
    pub piece: PieceId,
    pub from: (u8, u8),
    pub to: (u8, u8),
    /// The opposing piece removed from the roster, if the target cell was
    /// occupied.
    pub captured: Option<PieceId>,
}

/// Validates `direction` for the piece and, if legal, mutates the state.
///
/// Checks run in a fixed order and the first failure wins:
/// piece exists → mover holds the turn → direction fits the kind →
/// target on the board → target not own piece. No I/O, no side effects
/// beyond `state`.
pub fn attempt_move(
    state: &mut GameState,
    piece_id: PieceId,
    direction: Direction,
) -> Result<MoveReport, MoveError> {
    let piece = state
        .pieces
        .get(&piece_id)
        .ok_or(MoveError::PieceNotFound(piece_id))?;
    let (kind, owner, from) = (piece.kind, piece.owner, (piece.row, piece.col));

    if Some(owner) != state.active_player {
        return Err(MoveError::NotYourTurn);
    }

    let (dr, dc) = piece::offset(kind, direction)
        .ok_or(MoveError::IllegalMove(direction))?;
    let (row, col) = (from.0 as i8 + dr, from.1 as i8 + dc);

    let bounds = 0..BOARD_SIZE as i8;
    if !bounds.contains(&row) || !bounds.contains(&col) {
        return Err(MoveError::OutOfBounds);
    }
    let to = (row as u8, col as u8);

    let captured = state.grid[to.0 as usize][to.1 as usize];
    if let Some(target_id) = captured {
        if state.pieces[&target_id].owner == owner {
            return Err(MoveError::OwnPieceCapture);
        }
    }

    // All checks passed; apply.
    state.grid[from.0 as usize][from.1 as usize] = None;
    if let Some(target_id) = captured {
        state.pieces.remove(&target_id);
    }
    if let Some(moved) = state.pieces.get_mut(&piece_id) {
        moved.row = to.0;
        moved.col = to.1;
    }
    state.grid[to.0 as usize][to.1 as usize] = Some(piece_id);
    state.active_player = state
        .players
        .iter()
        .copied()
        .find(|p| Some(*p) != state.active_player);
    debug_assert!(state.audit());

    Ok(MoveReport {
        piece: piece_id,
        from,
        to,
        captured,
    })
}
