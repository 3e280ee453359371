use std::{sync::Arc, time::Duration};

use anyhow::Result;
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use crate::routes::AppState;

pub async fn serve(
    config: crate::Config,
    host_override: Option<String>,
    port_override: Option<u16>,
) -> Result<()> {
    tracing::info!("Starting meal-planner server...");

    let host = host_override.unwrap_or(config.server.host.to_owned());
    let port = port_override.unwrap_or(config.server.port);

    // Write pool: 1 connection for all writes and transactions
    let write_pool = crate::create_write_pool(&config.database.url).await?;
    let read_pool =
        crate::create_read_pool(&config.database.url, config.database.max_connections).await?;

    let state = meal_planner_shared::State {
        read_db: read_pool.clone(),
        write_db: write_pool.clone(),
    };

    let model = meal_planner_plan::OpenAiModel::new(
        &config.llm.base_url,
        &config.llm.api_key,
        &config.llm.model,
        config.llm.timeout(),
    )?;
    if config.llm.debug {
        tracing::warn!("LLM debug mode enabled, plans use the rule-based fallback");
    } else if config.llm.api_key.is_empty() {
        tracing::warn!("No LLM api key configured, generation will fall back on errors");
    }
    let plan_command =
        meal_planner_plan::Command::new(state.clone(), Arc::new(model), config.llm.debug);

    let images = meal_planner_image::ImageResolver::wikipedia(
        Duration::from_secs(config.images.cache_ttl_secs),
        config.images.cache_capacity,
        Duration::from_secs(config.images.timeout_secs),
    )?;

    let app = crate::router(AppState::new(state, plan_command, images))
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new().br(true).gzip(true))
        .layer(TraceLayer::new_for_http());

    let addr = format!("{host}:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Closing database pools...");
    read_pool.close().await;
    write_pool.close().await;

    tracing::info!("Graceful shutdown complete");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(%err, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(%err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal");
        },
    }

    tracing::info!("Starting graceful shutdown...");
}
