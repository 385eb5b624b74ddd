//! The piece model: what each kind is and how it moves.
//!
//! Movement is a closed lookup table over (kind, direction). Directions
//! are absolute (`Forward` decreases the row for both players), and the
//! leapers ignore intervening cells entirely: only the destination matters.

use gridspar_protocol::{Direction, PieceId, PieceKind, PlayerId};

/// One piece on the board. Identity, kind, and owner are fixed at spawn;
/// only the position changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    pub id: PieceId,
    pub kind: PieceKind,
    pub owner: PlayerId,
    pub row: u8,
    pub col: u8,
}

impl Piece {
    /// Candidate position for a step in `direction`, possibly off-board.
    ///
    /// Returns `None` when the direction does not belong to this piece's
    /// kind; bounds are the validator's concern, not this function's.
    pub fn target(&self, direction: Direction) -> Option<(i8, i8)> {
        offset(self.kind, direction)
            .map(|(dr, dc)| (self.row as i8 + dr, self.col as i8 + dc))
    }
}

/// The fixed direction set for a kind. Four entries each; order carries
/// no meaning.
pub fn directions(kind: PieceKind) -> [Direction; 4] {
    use Direction::*;
    match kind {
        PieceKind::Runner | PieceKind::LeaperOrthogonal => {
            [Forward, Back, Left, Right]
        }
        PieceKind::LeaperDiagonal => {
            [ForwardLeft, ForwardRight, BackLeft, BackRight]
        }
    }
}

/// The (kind, direction) → (row delta, col delta) lookup table.
///
/// `None` means the direction is not in the kind's vocabulary.
pub fn offset(kind: PieceKind, direction: Direction) -> Option<(i8, i8)> {
    use Direction::*;
    use PieceKind::*;
    match (kind, direction) {
        (Runner, Forward) => Some((-1, 0)),
        (Runner, Back) => Some((1, 0)),
        (Runner, Left) => Some((0, -1)),
        (Runner, Right) => Some((0, 1)),
        (LeaperOrthogonal, Forward) => Some((-2, 0)),
        (LeaperOrthogonal, Back) => Some((2, 0)),
        (LeaperOrthogonal, Left) => Some((0, -2)),
        (LeaperOrthogonal, Right) => Some((0, 2)),
        (LeaperDiagonal, ForwardLeft) => Some((-2, -2)),
        (LeaperDiagonal, ForwardRight) => Some((-2, 2)),
        (LeaperDiagonal, BackLeft) => Some((2, -2)),
        (LeaperDiagonal, BackRight) => Some((2, 2)),
        _ => None,
    }
}
