//! Wire protocol for Gridspar.
//!
//! This crate defines everything that travels between client and server:
//!
//! - **Identity** ([`PlayerId`], [`SessionId`], [`LobbyId`], [`PieceId`]) —
//!   newtype keys used across the whole stack.
//! - **Events** ([`ClientEvent`], [`ServerEvent`]) — the inbound and
//!   outbound message sets, plus the [`PublicView`] board snapshot that
//!   accompanies state-bearing events.
//! - **Codec** ([`Codec`], [`JsonCodec`]) — how events become bytes.
//!
//! The protocol layer sits below the engine and registry: it knows nothing
//! about rules or matchmaking, only about message shapes.

mod codec;
mod error;
mod events;
mod types;

pub use codec::{Codec, JsonCodec};
pub use error::ProtocolError;
pub use events::{
    CellView, ClientEvent, Direction, MoveReason, PieceKind, PublicView,
    ServerEvent, BOARD_SIZE,
};
pub use types::{LobbyId, PieceId, PlayerId, SessionId};
