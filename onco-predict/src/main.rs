//! onco-predict - Image screening microservice
//!
//! Loads the classifier and opens the record store once, then serves:
//! - POST /predict
//! - GET /predict/histories
//! - GET /predict/histories/:id
//! - GET /health

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use onco_common::config::CompiledDefaults;
use onco_predict::classifier::OnnxClassifier;
use onco_predict::config::{Args, ServiceConfig};
use onco_predict::pipeline::policy::ClassificationPolicy;
use onco_predict::store::SqlitePredictionStore;
use onco_predict::{build_router, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let toml_config = args.load_toml().context("Failed to load configuration file")?;
    let config = ServiceConfig::resolve(
        &args,
        toml_config,
        CompiledDefaults::for_current_platform(),
    )?;

    // RUST_LOG wins over the configured level
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "onco_predict={lvl},onco_common={lvl},tower_http={lvl}",
                    lvl = config.log_level
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting onco-predict v{} (threshold {})",
        env!("CARGO_PKG_VERSION"),
        config.cancer_threshold
    );

    // Model is loaded once and shared read-only by every request
    let model_path = config.model_path.clone();
    let classifier = tokio::task::spawn_blocking(move || OnnxClassifier::load(model_path))
        .await
        .context("Model loading task failed")?
        .with_context(|| format!("Failed to load model {}", config.model_path.display()))?;
    info!("Model loaded from {}", classifier.model_path().display());

    info!("Database: {}", config.database_path.display());
    let pool = onco_common::db::init_database(&config.database_path)
        .await
        .context("Failed to initialize database")?;
    let store = SqlitePredictionStore::new(pool);

    let state = AppState::new(
        Arc::new(classifier),
        Arc::new(store),
        ClassificationPolicy::new(config.cancer_threshold),
    );
    let app = build_router(state);

    let addr = config.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("Listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
