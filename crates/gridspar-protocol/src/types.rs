//! Identity newtypes shared by every layer.
//!
//! Each id is a thin wrapper so the compiler keeps players, sessions,
//! lobbies, and pieces apart even where the underlying representation is
//! the same. `#[serde(transparent)]` keeps the wire format flat: a
//! `PlayerId(42)` is just `42` in JSON, a `SessionId("k3f0a1")` just
//! `"k3f0a1"`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A connected participant, assigned by the server when the connection is
/// accepted. Session-scoped and opaque to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub u64);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P-{}", self.0)
    }
}

/// Key of one game session. Server-generated for quick-match and lobby
/// promotion, but clients may also name one explicitly via `JoinSession`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub String);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Key of a pre-session pairing group. Always server-generated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LobbyId(pub String);

impl fmt::Display for LobbyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identity of one piece on a board. Unique within its session for the
/// lifetime of the process; never reused, even across restarts of the same
/// board.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize,
    Deserialize,
)]
#[serde(transparent)]
pub struct PieceId(pub u32);

impl fmt::Display for PieceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
