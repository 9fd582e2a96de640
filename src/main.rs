//! RoomHub Server: meeting room reservation backend
//!
//! Main entry point that wires all crates together and starts the server.

use tracing_subscriber::{EnvFilter, fmt};

use roomhub_api::{AppState, build_app};
use roomhub_cache::CacheManager;
use roomhub_core::config::AppConfig;
use roomhub_core::error::AppError;
use roomhub_database::DatabaseManager;
use roomhub_mail::MailManager;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Load `config/default.toml`, the overlay named by `ROOMHUB_ENV`, and
/// `ROOMHUB__*` environment variables.
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("ROOMHUB_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting RoomHub v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Relational store ─────────────────────────────────
    let database = DatabaseManager::new(&config.database).await?;

    // ── Step 2: Credential store ─────────────────────────────────
    let cache = CacheManager::new(&config.cache).await?;

    // ── Step 3: Mail provider ────────────────────────────────────
    let mailer = MailManager::new(&config.mail)?;

    // ── Step 4: Services ─────────────────────────────────────────
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let admin = config.admin.clone();
    let state = AppState::new(config, database, cache, mailer);

    // ── Step 5: Admin bootstrap ──────────────────────────────────
    match admin {
        Some(admin) => {
            if let Some(user) = state.user_service.bootstrap_admin(&admin).await? {
                tracing::info!(user_id = user.id, username = %user.username, "Admin account created");
            }
        }
        None => tracing::info!("No [admin] section configured, skipping admin bootstrap"),
    }

    // ── Step 6: Build and start HTTP server ──────────────────────
    let database = state.database.clone();
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {}: {}", addr, e)))?;

    tracing::info!("RoomHub server listening on {}", addr);

    // ── Step 7: Graceful shutdown ────────────────────────────────
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            shutdown_signal().await;
            tracing::info!("Shutdown signal received, starting graceful shutdown...");
        })
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    database.close().await;

    tracing::info!("RoomHub server shut down gracefully");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
