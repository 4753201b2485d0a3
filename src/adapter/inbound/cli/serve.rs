//! `clientdb serve`.

use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::signal;
use tracing::info;

use super::command::ServeArgs;
use crate::adapter::inbound::http::{self, AppState};
use crate::error::Result;
use crate::infrastructure::bootstrap;
use crate::infrastructure::config::settings::Config;

/// Load config, open and initialize both stores, and serve until Ctrl-C.
///
/// Stores are closed after the server drains.
pub async fn execute(args: ServeArgs) -> Result<()> {
    let mut config = Config::load(&args.config)?;
    if let Some(bind) = args.bind {
        config.server.bind = bind;
    }
    let addr = config.server.socket_addr()?;

    config.init_logging();
    info!(version = env!("CARGO_PKG_VERSION"), "clientdb starting");

    let service = Arc::new(bootstrap::build_service(&config).await?);
    service.init().await?;

    let listener = TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "Listening");

    http::serve(listener, AppState::new(Arc::clone(&service)), shutdown_signal()).await?;

    service.close().await;
    info!("clientdb stopped");
    Ok(())
}

async fn shutdown_signal() {
    if signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}
