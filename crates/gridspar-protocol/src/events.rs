//! The event vocabulary: what clients send, what the server broadcasts,
//! and the board snapshot that rides along with state-bearing events.
//!
//! Both event enums use internally tagged JSON (`#[serde(tag = "type")]`),
//! so a message looks like `{ "type": "JoinLobby", "lobby_id": "9bc2e4" }`.
//! Client SDKs switch on the `type` field.

use serde::{Deserialize, Serialize};

use crate::{LobbyId, PieceId, PlayerId, SessionId};

/// Side length of the (square) board.
pub const BOARD_SIZE: usize = 5;

// ---------------------------------------------------------------------------
// Piece vocabulary
// ---------------------------------------------------------------------------

/// The three piece kinds. A closed set; movement geometry lives in the
/// engine's lookup table, keyed by this enum.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
pub enum PieceKind {
    /// Moves 1 cell orthogonally.
    Runner,
    /// Moves 2 cells orthogonally, jumping anything in between.
    LeaperOrthogonal,
    /// Moves 2 cells diagonally, jumping anything in between.
    LeaperDiagonal,
}

/// A movement direction, encoded on the wire as the short code clients
/// send (`"F"`, `"BL"`, …).
///
/// Directions are absolute, not mirrored per side: `Forward` decreases the
/// row for both players. The starting rows (0 vs 4) are what make the two
/// sides differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    #[serde(rename = "F")]
    Forward,
    #[serde(rename = "B")]
    Back,
    #[serde(rename = "L")]
    Left,
    #[serde(rename = "R")]
    Right,
    #[serde(rename = "FL")]
    ForwardLeft,
    #[serde(rename = "FR")]
    ForwardRight,
    #[serde(rename = "BL")]
    BackLeft,
    #[serde(rename = "BR")]
    BackRight,
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let code = match self {
            Self::Forward => "F",
            Self::Back => "B",
            Self::Left => "L",
            Self::Right => "R",
            Self::ForwardLeft => "FL",
            Self::ForwardRight => "FR",
            Self::BackLeft => "BL",
            Self::BackRight => "BR",
        };
        f.write_str(code)
    }
}

/// Why a move was rejected. One variant per validation failure, so clients
/// can react programmatically instead of parsing message strings.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum MoveReason {
    PieceNotFound,
    NotYourTurn,
    IllegalMove,
    OutOfBounds,
    OwnPieceCapture,
}

// ---------------------------------------------------------------------------
// Board snapshot
// ---------------------------------------------------------------------------

/// One occupied cell as clients see it: enough identity to issue a later
/// move (`piece_id`) plus what to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellView {
    pub piece_id: PieceId,
    pub kind: PieceKind,
    pub owner: PlayerId,
}

/// The broadcast-safe snapshot of a game: grid, player order, whose turn.
///
/// This is everything a client may know. Internal counters and registry
/// bookkeeping never appear here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicView {
    /// Row-major 5×5 grid; `None` is an empty cell.
    pub grid: [[Option<CellView>; BOARD_SIZE]; BOARD_SIZE],
    /// Join order; index 0 is "Player A", index 1 "Player B".
    pub players: Vec<PlayerId>,
    /// The player permitted to move, once any player has joined.
    pub active_player: Option<PlayerId>,
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// Everything a client can ask of the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ClientEvent {
    /// Enter the quick-match pool (or pair immediately if someone waits).
    JoinQuickMatch,
    /// Open a new lobby and become its first member.
    CreateLobby,
    /// Join an existing lobby by id.
    JoinLobby { lobby_id: LobbyId },
    /// Join a session by id, creating it if absent.
    JoinSession { session_id: SessionId },
    /// Move a piece. Ignored entirely unless the sender holds the turn.
    Move {
        session_id: SessionId,
        piece_id: PieceId,
        direction: Direction,
    },
    /// Rebuild the board inside a still-running session.
    PlayAgain { session_id: SessionId },
}

/// Everything the server can tell a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ServerEvent {
    /// First message on every connection: the identity the server assigned.
    Connected { player_id: PlayerId },
    /// Parked in the quick-match pool; an opponent will come.
    WaitingForOpponent,
    /// A lobby was opened for the requester.
    LobbyCreated { lobby_id: LobbyId },
    /// The requester was admitted to a lobby.
    LobbyJoined { lobby_id: LobbyId },
    /// The named lobby already has two members.
    LobbyFull,
    /// The named lobby does not exist.
    LobbyNotFound,
    /// The roster is initialized; the game begins. Sent to both members.
    GameStart {
        session_id: SessionId,
        view: PublicView,
    },
    /// Snapshot after every accepted admission or move. Sent to all members.
    StateUpdate { view: PublicView },
    /// The sender's move was rejected. Private to the mover.
    InvalidMove {
        reason: MoveReason,
        message: String,
    },
    /// A player's roster was wiped out. Sent to all members, then the
    /// session is deleted.
    GameOver { winner: PlayerId },
    /// The board was rebuilt after `PlayAgain`. Sent to all members.
    GameRestart { view: PublicView },
    /// Another member of a shared session or lobby dropped.
    PlayerDisconnected { player_id: PlayerId },
    /// The named session already has two players.
    SessionFull,
}
