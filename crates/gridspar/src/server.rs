//! `GridsparServer` builder and accept loop.
//!
//! Ties the layers together: transport accepts connections, the handler
//! speaks the protocol, and the controller actor owns every session.

use std::sync::Arc;

use gridspar_protocol::{Codec, JsonCodec};
use gridspar_registry::{spawn_controller, ControllerHandle};
use gridspar_transport::{Listener, WsListener};

use crate::handler::handle_connection;
use crate::GridsparError;

/// Shared server state, cloned into each connection handler task.
pub(crate) struct ServerState<C: Codec> {
    pub(crate) controller: ControllerHandle,
    pub(crate) codec: C,
}

/// Builder for configuring and starting a Gridspar server.
pub struct GridsparServerBuilder {
    bind_addr: String,
}

impl GridsparServerBuilder {
    pub fn new() -> Self {
        Self {
            bind_addr: "127.0.0.1:8080".to_string(),
        }
    }

    /// Sets the address to bind. Port 0 picks an ephemeral port.
    pub fn bind(mut self, addr: &str) -> Self {
        self.bind_addr = addr.to_string();
        self
    }

    /// Binds the listener, spawns the controller actor, and returns the
    /// server ready to [`run`](GridsparServer::run).
    pub async fn build(
        self,
    ) -> Result<GridsparServer<JsonCodec>, GridsparError> {
        let listener = WsListener::bind(&self.bind_addr).await?;
        let state = Arc::new(ServerState {
            controller: spawn_controller(),
            codec: JsonCodec,
        });
        Ok(GridsparServer { listener, state })
    }
}

impl Default for GridsparServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A running Gridspar server.
pub struct GridsparServer<C: Codec> {
    listener: WsListener,
    state: Arc<ServerState<C>>,
}

impl<C: Codec> GridsparServer<C> {
    pub fn builder() -> GridsparServerBuilder {
        GridsparServerBuilder::new()
    }

    /// The address the listener actually bound.
    pub fn local_addr(&self) -> std::io::Result<std::net::SocketAddr> {
        self.listener.local_addr()
    }

    /// Accepts connections until the process is terminated, one handler
    /// task per connection.
    pub async fn run(mut self) -> Result<(), GridsparError> {
        tracing::info!("Gridspar server running");

        loop {
            match self.listener.accept().await {
                Ok(conn) => {
                    let state = Arc::clone(&self.state);
                    tokio::spawn(async move {
                        if let Err(e) =
                            handle_connection(conn, state).await
                        {
                            tracing::debug!(
                                error = %e,
                                "connection ended with error"
                            );
                        }
                    });
                }
                Err(e) => {
                    tracing::error!(error = %e, "accept failed");
                }
            }
        }
    }
}
