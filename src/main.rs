//! Pomodoro Server - a Pomodoro countdown timer with a local HTTP front end
//!
//! This is the main entry point for the pomodoro-server application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use pomodoro_server::{
    api::create_router,
    config::Config,
    state::AppState,
    tasks::spawn_controller,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("pomodoro_server={},tower_http=info", config.log_level()))
        .init();

    info!("Starting pomodoro-server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, alarm={}",
          config.host, config.port, config.alarm_url);

    // Spawn the timer controller loop
    let link = spawn_controller(&config.alarm_url);
    let state = Arc::new(AppState::new(config.port, config.host.clone(), &link));

    let app = create_router(state);

    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Timer running on http://{}", addr);
    info!("Endpoints:");
    info!("  GET  /                  - Timer page");
    info!("  POST /start             - Start the countdown");
    info!("  POST /stop              - Stop the countdown");
    info!("  POST /reset             - Reset to the active mode's duration");
    info!("  POST /mode/:mode        - Switch to work, short-break or long-break");
    info!("  PUT  /durations/:mode   - Set a mode's duration in minutes");
    info!("  POST /durations/restore - Restore default durations");
    info!("  POST /alarm/dismiss     - Stop the alarm");
    info!("  GET  /status            - Current timer state");
    info!("  GET  /health            - Health check");

    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        result = shutdown_signal() => {
            match result {
                Ok(()) => info!("Shutdown signal received"),
                Err(e) => tracing::error!("Signal handler failed: {}", e),
            }
        }
    }

    link.task.abort();
    info!("Server shutdown complete");
    Ok(())
}
