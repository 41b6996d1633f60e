//! Pomodoro Daemon - A local HTTP daemon running a focus/break interval timer
//!
//! This is the main entry point for the pomodoro-daemon application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use pomodoro_daemon::{
    config::Config,
    state::AppState,
    api::create_router,
    tasks::SessionLoop,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("pomodoro_daemon={},tower_http=info", config.log_level()))
        .init();

    info!("Starting pomodoro-daemon v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Configuration: host={}, port={}, focus={}min, break={}min, sessions={}, tick={}ms",
        config.host,
        config.port,
        config.focus,
        config.break_minutes,
        config.sessions,
        config.tick_ms
    );

    // Start the session loop that owns the controller
    let (session_loop, channels) = SessionLoop::new(&config.session_settings());
    let session_task = tokio::spawn(session_loop.run());

    let state = Arc::new(AppState::new(config.port, config.host.clone(), channels));

    // Create HTTP router with all endpoints
    let app = create_router(Arc::clone(&state));

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /start         - Start a pomodoro run");
    info!("  POST /visibility    - Report editor window focus");
    info!("  GET  /focus-time    - Cumulative focus time");
    info!("  GET  /status        - Current session and status line");
    info!("  GET  /notifications - Recent notifications");
    info!("  GET  /health        - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    if let Err(e) = state.shutdown().await {
        tracing::error!("Failed to tear down session: {}", e);
    }
    session_task.await?;

    info!("Server shutdown complete");
    Ok(())
}
