//! Budgetool Server
//!
//! HTTP server for the budgetool application: a JSON API plus
//! server-rendered pages for personal budget tracking.
//!
//! # Features
//!
//! - Cookie-based session authentication
//! - Database migrations on startup
//! - Periodic expired-session sweep
//! - Graceful shutdown handling
//! - Health check endpoints
//!
//! # Usage
//!
//! ```bash
//! # Start with default settings
//! budgetool-server
//!
//! # Start with custom config
//! budgetool-server --config /path/to/config.toml
//!
//! # Start with environment overrides
//! BUDGETOOL__SERVER__PORT=8080 budgetool-server
//! ```

mod config;

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio::signal;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use budgetool_api::{create_router, ApiConfig, AppState};
use budgetool_auth::{AuthConfig, AuthService, PasswordConfig, SessionConfig};
use budgetool_db::{Database, DatabaseConfig as DbConfig};

use crate::config::ServerConfig;

// =============================================================================
// CLI Arguments
// =============================================================================

/// Budgetool Server - personal budget tracking
#[derive(Parser, Debug)]
#[command(name = "budgetool-server")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file (TOML)
    #[arg(short, long, env = "BUDGETOOL_CONFIG")]
    config: Option<String>,

    /// Host to bind to
    #[arg(long, env = "BUDGETOOL_HOST")]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "BUDGETOOL_PORT")]
    port: Option<u16>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "BUDGETOOL_LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Log format (json, pretty)
    #[arg(long, env = "BUDGETOOL_LOG_FORMAT", default_value = "pretty")]
    log_format: String,

    /// PostgreSQL connection URL
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    /// Skip running migrations on startup
    #[arg(long, env = "BUDGETOOL_SKIP_MIGRATIONS")]
    skip_migrations: bool,
}

// =============================================================================
// Main Entry Point
// =============================================================================

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Load configuration
    let mut server_config = ServerConfig::load(args.config.as_deref())?;

    // Override with CLI arguments
    if let Some(host) = args.host {
        server_config.server.host = host;
    }
    if let Some(port) = args.port {
        server_config.server.port = port;
    }
    if let Some(db_url) = args.database_url {
        server_config.database.postgres_url = db_url;
    }
    if args.skip_migrations {
        server_config.database.run_migrations = false;
    }
    server_config.logging.level = args.log_level;
    server_config.logging.format = args.log_format;

    // Initialize logging
    init_logging(&server_config.logging)?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "Starting Budgetool server"
    );

    // Initialize database
    let db = init_database(&server_config.database).await?;

    // Initialize auth service
    let auth = init_auth(&server_config.auth, db.clone());

    // Sweep expired sessions in the background
    spawn_session_sweeper(auth.clone(), server_config.auth.session_sweep_interval);

    // Create application state
    let state = Arc::new(AppState::new(db, auth));

    // Create API configuration
    let api_config = ApiConfig {
        enable_cors: server_config.api.enable_cors,
        cors_origins: server_config.api.cors_origins.clone(),
        enable_compression: server_config.api.enable_compression,
        enable_tracing: server_config.api.enable_tracing,
    };

    // Create router
    let app = create_router(state, api_config);

    // Get bind address
    let addr = server_config.server.socket_addr()?;

    tracing::info!(
        host = %server_config.server.host,
        port = %server_config.server.port,
        "Server listening"
    );

    // Start server with graceful shutdown
    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(server_config.server.shutdown_timeout()))
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}

// =============================================================================
// Initialization Functions
// =============================================================================

/// Initialize tracing/logging
fn init_logging(config: &config::LoggingConfig) -> anyhow::Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let subscriber = tracing_subscriber::registry().with(env_filter);

    match config.format.as_str() {
        "json" => {
            subscriber.with(fmt::layer().json().with_target(true)).init();
        }
        _ => {
            subscriber
                .with(fmt::layer().pretty().with_target(true))
                .init();
        }
    }

    Ok(())
}

/// Initialize database connection and run migrations
async fn init_database(config: &config::DatabaseConfig) -> anyhow::Result<Arc<Database>> {
    tracing::info!("Connecting to database...");

    let db_config = DbConfig {
        postgres_url: config.postgres_url.clone(),
        pg_max_connections: config.max_connections,
        pg_min_connections: config.min_connections,
        pg_acquire_timeout_secs: config.connect_timeout_secs,
    };

    let db = Database::connect(&db_config).await?;

    tracing::info!("Database connected successfully");

    if config.run_migrations {
        db.migrate().await?;
    }

    if !db.health_check().await? {
        anyhow::bail!("Database health check failed");
    }

    Ok(Arc::new(db))
}

/// Initialize authentication service
fn init_auth(config: &config::AuthSettings, db: Arc<Database>) -> Arc<AuthService> {
    let auth_config = AuthConfig {
        password: PasswordConfig {
            pepper: config.password_pepper.clone(),
            ..Default::default()
        },
        session: SessionConfig {
            lifetime: config.session_lifetime,
            ..Default::default()
        },
    };

    Arc::new(AuthService::new(db, auth_config))
}

/// Periodically delete expired sessions
fn spawn_session_sweeper(auth: Arc<AuthService>, interval: Duration) {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        // The first tick fires immediately; skip it so startup stays quiet
        ticker.tick().await;

        loop {
            ticker.tick().await;
            if let Err(e) = auth.sessions.purge_expired().await {
                tracing::warn!(error = %e, "Expired-session sweep failed");
            }
        }
    });
}

// =============================================================================
// Graceful Shutdown
// =============================================================================

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal(timeout: Duration) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
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

    // Allow time for in-flight requests to complete
    tracing::info!(
        timeout_secs = timeout.as_secs(),
        "Waiting for in-flight requests to complete..."
    );

    tokio::time::sleep(timeout).await;
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let args = Args::parse_from(["budgetool-server", "--port", "8080"]);
        assert_eq!(args.port, Some(8080));
    }

    #[test]
    fn test_development_config() {
        let config = ServerConfig::development();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.logging.level, "debug");
    }
}
