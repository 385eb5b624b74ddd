//! Unified error type for the Gridspar server.

use gridspar_protocol::ProtocolError;
use gridspar_registry::ControllerError;
use gridspar_transport::TransportError;

/// Top-level error wrapping the layer-specific errors.
///
/// The `#[from]` attributes let connection handlers use `?` across layer
/// boundaries without manual conversion.
#[derive(Debug, thiserror::Error)]
pub enum GridsparError {
    /// A transport-level error (bind, accept, send, recv).
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A protocol-level error (encode, decode).
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// The lifecycle controller went away.
    #[error(transparent)]
    Controller(#[from] ControllerError),
}
