//! Tourist Webhook Server Entry Point

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

use tourist_webhook_config::{load_settings, Settings};
use tourist_webhook_server::{build_store, create_router, init_metrics, AppState};

/// Selects `config/{env}.*` on top of `config/default.*`
const ENV_VAR: &str = "TOURIST_WEBHOOK_ENV";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Priority: env vars > config/{env}.yaml > config/default.yaml > defaults
    let env = std::env::var(ENV_VAR).ok();
    // Absent files fall back to defaults; invalid settings abort startup.
    // Tracing not yet initialized, use eprintln for early logging
    let config = load_settings(env.as_deref()).map_err(|e| {
        eprintln!(
            "Error: invalid configuration (env: {}): {}",
            env.as_deref().unwrap_or("default"),
            e
        );
        e
    })?;
    eprintln!(
        "Loaded configuration from files (env: {})",
        env.as_deref().unwrap_or("default")
    );

    init_tracing(&config);

    tracing::info!("Starting Tourist Webhook Server v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        environment = ?config.environment,
        config_path = env.as_deref().unwrap_or("default"),
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        if init_metrics().is_some() {
            tracing::info!("Initialized Prometheus metrics at /metrics");
        }
    } else {
        tracing::info!("Metrics disabled");
    }

    let store = build_store(&config.store)?;
    tracing::info!(
        backend = store.backend_name(),
        query_timeout_ms = config.store.query_timeout_ms,
        "Record store initialized"
    );

    let host = config.server.host.clone();
    let port = config.server.port;
    let app = create_router(AppState::new(config, store));

    let listener = tokio::net::TcpListener::bind((host.as_str(), port)).await?;
    tracing::info!("Listening on {}", listener.local_addr()?);

    // Graceful shutdown on SIGTERM/SIGINT
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown...");
        }
    }
}

fn init_tracing(config: &Settings) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = &config.observability.log_level;
        format!("tourist_webhook={},tower_http=debug", level).into()
    });

    let subscriber = tracing_subscriber::registry().with(env_filter);
    let fmt_layer = if config.observability.log_json {
        tracing_subscriber::fmt::layer().json().boxed()
    } else {
        tracing_subscriber::fmt::layer().boxed()
    };
    subscriber.with(fmt_layer).init();
}
