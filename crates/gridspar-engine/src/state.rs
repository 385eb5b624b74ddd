//! The canonical game state: grid, players, turn pointer, roster, winner.
//!
//! One `GameState` backs exactly one session and is owned by it; nothing
//! here is shared or synchronized. Field access outside this crate goes
//! through the public methods so the grid/roster invariant (every piece's
//! recorded position matches the cell holding it) cannot be broken from
//! the outside.

use std::collections::BTreeMap;

use gridspar_protocol::{
    CellView, PieceId, PieceKind, PlayerId, PublicView, BOARD_SIZE,
};

use crate::piece::Piece;

/// Starting kinds per side, column 0 through 4.
const STARTING_KINDS: [PieceKind; BOARD_SIZE] = [
    PieceKind::Runner,
    PieceKind::Runner,
    PieceKind::LeaperOrthogonal,
    PieceKind::LeaperDiagonal,
    PieceKind::Runner,
];

/// The authoritative state of one game.
///
/// Lifecycle: constructed empty → players join (0→1→2) → roster
/// initialized → moves alternate → terminal when one side's roster is
/// empty → `reset()` back to empty for a fresh round.
#[derive(Debug, Clone)]
pub struct GameState {
    /// Row-major grid of piece ids; the roster map holds the pieces.
    pub(crate) grid: [[Option<PieceId>; BOARD_SIZE]; BOARD_SIZE],
    /// Join order; index 0 is "Player A" and takes the first turn.
    pub(crate) players: Vec<PlayerId>,
    pub(crate) active_player: Option<PlayerId>,
    pub(crate) pieces: BTreeMap<PieceId, Piece>,
    pub(crate) winner: Option<PlayerId>,
    /// Monotonic id source. Survives `reset()` so a rebuilt board never
    /// reuses an id from an earlier round of the same session.
    next_piece_id: u32,
}

impl GameState {
    /// An empty board with no players.
    pub fn new() -> Self {
        Self {
            grid: [[None; BOARD_SIZE]; BOARD_SIZE],
            players: Vec::new(),
            active_player: None,
            pieces: BTreeMap::new(),
            winner: None,
            next_piece_id: 1,
        }
    }

    /// Admits a player. The first player admitted becomes the active
    /// player. Returns `false` (state untouched) when two players are
    /// already present or the id is already admitted.
    pub fn add_player(&mut self, player: PlayerId) -> bool {
        if self.players.len() >= 2 || self.players.contains(&player) {
            return false;
        }
        self.players.push(player);
        if self.players.len() == 1 {
            self.active_player = Some(player);
        }
        true
    }

    /// Removes a player if present. If the active player left, the
    /// remaining player (or nobody) holds the turn.
    pub fn remove_player(&mut self, player: PlayerId) {
        self.players.retain(|p| *p != player);
        if self.active_player == Some(player) {
            self.active_player = self.players.first().copied();
        }
    }

    /// `true` once both seats are taken.
    pub fn is_ready(&self) -> bool {
        self.players.len() == 2
    }

    /// The admitted players in join order.
    pub fn players(&self) -> &[PlayerId] {
        &self.players
    }

    /// The 'A' / 'B' label clients see for a player, by join order.
    pub fn player_label(&self, player: PlayerId) -> Option<char> {
        self.players
            .iter()
            .position(|p| *p == player)
            .map(|i| if i == 0 { 'A' } else { 'B' })
    }

    /// The player currently permitted to move.
    pub fn active_player(&self) -> Option<PlayerId> {
        self.active_player
    }

    /// The recorded winner, once terminal.
    pub fn winner(&self) -> Option<PlayerId> {
        self.winner
    }

    /// Looks up a piece by id.
    pub fn piece(&self, id: PieceId) -> Option<&Piece> {
        self.pieces.get(&id)
    }

    /// Number of pieces a player still has on the board.
    pub fn piece_count(&self, player: PlayerId) -> usize {
        self.pieces.values().filter(|p| p.owner == player).count()
    }

    /// Total pieces on the board.
    pub fn total_pieces(&self) -> usize {
        self.pieces.len()
    }

    /// Lays out the fixed ten-piece starting position: player 0 across
    /// row 0, player 1 across row 4, each with Runner, Runner,
    /// LeaperOrthogonal, LeaperDiagonal, Runner on columns 0–4.
    ///
    /// Overwrites any existing roster and clears a stale winner. Returns
    /// `false` untouched unless exactly two players are present.
    pub fn initialize_roster(&mut self) -> bool {
        if !self.is_ready() {
            return false;
        }
        self.grid = [[None; BOARD_SIZE]; BOARD_SIZE];
        self.pieces.clear();
        self.winner = None;

        let players: Vec<PlayerId> = self.players.clone();
        for (index, player) in players.into_iter().enumerate() {
            let row = if index == 0 { 0 } else { BOARD_SIZE as u8 - 1 };
            for (col, kind) in STARTING_KINDS.into_iter().enumerate() {
                self.spawn(kind, player, row, col as u8);
            }
        }
        debug_assert!(self.audit());
        true
    }

    /// The broadcast-safe snapshot: grid, player order, active player.
    /// The id counter and anything else internal stays internal.
    pub fn public_view(&self) -> PublicView {
        let mut grid = [[None; BOARD_SIZE]; BOARD_SIZE];
        for piece in self.pieces.values() {
            grid[piece.row as usize][piece.col as usize] = Some(CellView {
                piece_id: piece.id,
                kind: piece.kind,
                owner: piece.owner,
            });
        }
        PublicView {
            grid,
            players: self.players.clone(),
            active_player: self.active_player,
        }
    }

    /// `true` once either player's roster is empty; fixes the winner to
    /// the opponent. Idempotent: repeated calls after a win keep the
    /// recorded winner.
    pub fn is_terminal(&mut self) -> bool {
        if self.winner.is_some() {
            return true;
        }
        if !self.is_ready() {
            return false;
        }
        let (a, b) = (self.players[0], self.players[1]);
        if self.piece_count(a) == 0 {
            self.winner = Some(b);
            true
        } else if self.piece_count(b) == 0 {
            self.winner = Some(a);
            true
        } else {
            false
        }
    }

    /// Back to the empty-construction condition: no players, no pieces,
    /// no active player, no winner. The piece-id counter is not rewound.
    pub fn reset(&mut self) {
        self.grid = [[None; BOARD_SIZE]; BOARD_SIZE];
        self.players.clear();
        self.active_player = None;
        self.pieces.clear();
        self.winner = None;
    }

    /// Consistency oracle for the core invariant set: at most two
    /// players, active player among them once both are seated, and grid
    /// and roster in exact one-to-one agreement.
    pub fn audit(&self) -> bool {
        if self.players.len() > 2 {
            return false;
        }
        if self.players.len() == 2 {
            match self.active_player {
                Some(p) if self.players.contains(&p) => {}
                _ => return false,
            }
        }
        let occupied = self
            .grid
            .iter()
            .flatten()
            .filter(|cell| cell.is_some())
            .count();
        if occupied != self.pieces.len() {
            return false;
        }
        self.pieces.values().all(|p| {
            (p.row as usize) < BOARD_SIZE
                && (p.col as usize) < BOARD_SIZE
                && self.grid[p.row as usize][p.col as usize] == Some(p.id)
        })
    }

    /// Places a fresh piece, allocating its id. Test scaffolding and
    /// roster initialization only.
    pub(crate) fn spawn(
        &mut self,
        kind: PieceKind,
        owner: PlayerId,
        row: u8,
        col: u8,
    ) -> PieceId {
        let id = PieceId(self.next_piece_id);
        self.next_piece_id += 1;
        self.grid[row as usize][col as usize] = Some(id);
        self.pieces.insert(
            id,
            Piece {
                id,
                kind,
                owner,
                row,
                col,
            },
        );
        id
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
