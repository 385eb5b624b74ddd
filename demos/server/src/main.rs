//! Runnable Gridspar server.
//!
//! Binds the address in `GRIDSPAR_ADDR` (default `0.0.0.0:8080`) and
//! serves games until killed. `RUST_LOG` controls verbosity.

use gridspar::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let addr = std::env::var("GRIDSPAR_ADDR")
        .unwrap_or_else(|_| "0.0.0.0:8080".to_string());

    let server = GridsparServerBuilder::new().bind(&addr).build().await?;
    tracing::info!(%addr, "gridspar server listening");
    server.run().await?;
    Ok(())
}
