use std::io;

use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::web::router::app_router;
use crate::web::state::AppState;

/// Bind `bind_addr` and serve until Ctrl-C.
pub async fn start_server(state: AppState, bind_addr: &str) -> io::Result<()> {
    let listener = TcpListener::bind(bind_addr).await?;
    let local = listener.local_addr()?;

    info!("Web server listening on {} (visit http://127.0.0.1:{})", local, local.port());
    info!("Health check: http://127.0.0.1:{}/health", local.port());

    axum::serve(listener, app_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        // Without a signal handler, serve until the process is killed
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
