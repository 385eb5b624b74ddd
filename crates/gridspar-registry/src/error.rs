//! Error types for the registry layer.

use gridspar_protocol::{LobbyId, SessionId};

/// A join request the registry turned away. Surfaced privately to the
/// requester; nothing is mutated on the way out.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AdmissionError {
    /// No lobby with this id exists (or it was already promoted).
    #[error("lobby {0} not found")]
    LobbyNotFound(LobbyId),

    /// The lobby already has two members.
    #[error("lobby {0} is full")]
    LobbyFull(LobbyId),

    /// The session already has two players.
    #[error("session {0} is full")]
    SessionFull(SessionId),
}

/// The controller actor's command channel is closed.
#[derive(Debug, thiserror::Error)]
pub enum ControllerError {
    #[error("lifecycle controller is unavailable")]
    Unavailable,
}
