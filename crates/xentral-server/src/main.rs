use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use xentral_mcp::{ProtocolEngine, ServerInfo, ToolRegistry};
use xentral_server::app_state::AppState;
use xentral_server::config::ServerConfig;
use xentral_server::SERVER_NAME;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServerConfig::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.default_log_filter()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let api_config = config.api_config();
    tracing::info!(?api_config, host = %config.host, port = config.port, "Starting Xentral MCP server");
    for problem in api_config.validate() {
        tracing::warn!(%problem, "Configuration issue; credentials can be set via POST /config/credentials");
    }
    let api_config = api_config.into_shared();

    // Tools are registered before the listener accepts any request.
    let registry = Arc::new(ToolRegistry::new());
    xentral_tools::register_default_tools(&registry, api_config.clone(), config.include_planned)?;
    if registry.is_empty() {
        anyhow::bail!("no MCP tools were registered");
    }

    let engine = Arc::new(ProtocolEngine::new(
        ServerInfo::new(SERVER_NAME, env!("CARGO_PKG_VERSION")),
        registry,
    ));
    let state = AppState::new(engine, api_config, config.options());
    let app = xentral_server::router::create_router(state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Xentral MCP server listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Received Ctrl+C, initiating graceful shutdown");
}
