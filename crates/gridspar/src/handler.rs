//! Per-connection handler: identity, decode, and the two-way pump between
//! the socket and the controller actor.
//!
//! Each accepted connection gets its own task running this handler. The
//! flow is:
//!   1. Derive the player id from the connection id
//!   2. Register an outbound channel with the controller (client receives
//!      `Connected`)
//!   3. Loop: forward decoded inbound events; encode and send outbound
//!      events
//!   4. On any exit, report the disconnect so sessions tear down

use std::sync::Arc;

use gridspar_protocol::{ClientEvent, Codec, PlayerId, ServerEvent};
use gridspar_registry::ControllerHandle;
use gridspar_transport::{Connection, WsConnection};
use tokio::sync::mpsc;

use crate::server::ServerState;
use crate::GridsparError;

/// Drop guard that reports the disconnect however the handler exits,
/// panics included. `Drop` is synchronous, so the async report is a
/// fire-and-forget task.
struct DisconnectGuard {
    player_id: PlayerId,
    controller: ControllerHandle,
}

impl Drop for DisconnectGuard {
    fn drop(&mut self) {
        let player_id = self.player_id;
        let controller = self.controller.clone();
        tokio::spawn(async move {
            let _ = controller.disconnect(player_id).await;
        });
    }
}

/// Handles a single connection from accept to close.
pub(crate) async fn handle_connection<C: Codec>(
    conn: WsConnection,
    state: Arc<ServerState<C>>,
) -> Result<(), GridsparError> {
    // One connection, one participant: the connection counter is the
    // identity source, like a socket id.
    let player_id = PlayerId(conn.id().into_inner());
    tracing::debug!(%player_id, "handling new connection");

    let (tx, mut rx) = mpsc::unbounded_channel::<ServerEvent>();
    state.controller.connect(player_id, tx).await?;
    let _guard = DisconnectGuard {
        player_id,
        controller: state.controller.clone(),
    };

    loop {
        tokio::select! {
            inbound = conn.recv() => match inbound {
                Ok(Some(data)) => {
                    match state.codec.decode::<ClientEvent>(&data) {
                        Ok(event) => {
                            state.controller.event(player_id, event).await?;
                        }
                        Err(e) => {
                            // A malformed frame is the sender's problem;
                            // skip it and keep the connection alive.
                            tracing::debug!(
                                %player_id,
                                error = %e,
                                "dropping undecodable frame"
                            );
                        }
                    }
                }
                Ok(None) => {
                    tracing::info!(%player_id, "connection closed cleanly");
                    break;
                }
                Err(e) => {
                    tracing::debug!(%player_id, error = %e, "recv error");
                    break;
                }
            },
            outbound = rx.recv() => match outbound {
                Some(event) => {
                    let bytes = state.codec.encode(&event)?;
                    conn.send(&bytes).await?;
                }
                // The controller dropped our channel; nothing more will
                // ever arrive.
                None => break,
            },
        }
    }

    // _guard drops here → the disconnect report fires.
    Ok(())
}
