//! # Gridspar
//!
//! Authoritative server for a two-player, turn-based 5×5 board game.
//!
//! The server owns the canonical board for every session, validates each
//! move itself, and pushes state snapshots to both players over persistent
//! WebSocket connections. Clients are thin: they render snapshots and send
//! intents.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use gridspar::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), GridsparError> {
//!     let server = GridsparServerBuilder::new()
//!         .bind("0.0.0.0:8080")
//!         .build()
//!         .await?;
//!     server.run().await
//! }
//! ```

mod error;
mod handler;
mod server;

pub use error::GridsparError;
pub use server::{GridsparServer, GridsparServerBuilder};

// Umbrella re-exports, so downstream tooling (bots, load drivers) can
// reach the rules and registry without naming every member crate.
pub use gridspar_engine as engine;
pub use gridspar_protocol as protocol;
pub use gridspar_registry as registry;

/// The common imports for running or driving a server.
pub mod prelude {
    pub use crate::{GridsparError, GridsparServer, GridsparServerBuilder};
    pub use gridspar_protocol::{
        CellView, ClientEvent, Codec, Direction, JsonCodec, LobbyId,
        MoveReason, PieceId, PieceKind, PlayerId, PublicView, ServerEvent,
        SessionId,
    };
}
