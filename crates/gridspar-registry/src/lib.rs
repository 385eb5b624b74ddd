//! Session registry and lifecycle controller for Gridspar.
//!
//! This crate owns everything between "a decoded client event" and "a list
//! of server events to deliver":
//!
//! - [`SessionRegistry`] — the single owned value holding all sessions,
//!   lobbies, and the quick-match pool. Plain synchronous operations with
//!   typed outcomes; no globals, no locks.
//! - [`Controller`] — the lifecycle state machine. Feeds inbound events
//!   through the registry and the engine and returns the outbound events
//!   each affected player should receive.
//! - [`spawn_controller`] / [`ControllerHandle`] — the actor shell. One
//!   Tokio task owns the controller and processes every command to
//!   completion before the next, so all sessions are serialized through a
//!   single logical thread and no cross-session locking exists anywhere.

mod controller;
mod error;
mod registry;

pub use controller::{
    spawn_controller, Controller, ControllerHandle, EventSender, Outbound,
};
pub use error::{AdmissionError, ControllerError};
pub use registry::{
    Departure, LobbyJoin, PlayerPhase, QuickMatch, SessionJoin,
    SessionRegistry,
};
