use std::sync::Arc;

use clap::Parser;
use routeviz_core::create_road_graph;
use routeviz_server::{AppState, Cli, ServerConfig, app};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer())
        .init();
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {err}");
    }
    info!("Shutting down");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let cli = Cli::parse();
    let config = ServerConfig::load(&cli)?;
    let graph_config = config.road_graph_config()?;

    let graph = tokio::task::spawn_blocking(move || create_road_graph(&graph_config)).await??;
    info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "Road graph loaded"
    );

    let state = Arc::new(AppState::from_config(graph, &config));
    let router = app(state, config.server.max_concurrent_requests);

    let listener = TcpListener::bind(config.server.bind).await?;
    info!(addr = %config.server.bind, "Starting server");
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
