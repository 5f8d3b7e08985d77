//! internlink-iv - Interview Service
//!
//! Runs practice internship interviews: streams interview turns over SSE,
//! scores finished sessions through the completion API and renders reports.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use internlink_common::config::{RootFolderInitializer, RootFolderResolver, TomlConfig};
use tokio::signal;
use tracing::info;

use internlink_iv::{build_router, AppState, DEFAULT_PORT};

/// Command-line arguments for internlink-iv
#[derive(Parser, Debug)]
#[command(name = "internlink-iv")]
#[command(about = "Interview service for InternLink")]
#[command(version)]
struct Args {
    /// Port to listen on (default 5740)
    #[arg(short, long, env = "INTERNLINK_IV_PORT")]
    port: Option<u16>,

    /// Root folder holding the database
    #[arg(short, long)]
    root_folder: Option<PathBuf>,

    /// Bootstrap TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a user (if needed) and print a new access token
    IssueToken {
        #[arg(long)]
        email: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let toml_config = match &args.config {
        Some(path) => TomlConfig::load_from(path)?,
        None => TomlConfig::load()?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("internlink_iv={0},internlink_common={0},tower_http=info", toml_config.logging.level).into()
            }),
        )
        .init();

    info!(
        "Starting InternLink Interview Service (internlink-iv) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let root_folder = RootFolderResolver::new("interview")
        .with_cli_arg(args.root_folder.clone())
        .with_toml(&toml_config)
        .resolve();

    let initializer = RootFolderInitializer::new(root_folder);
    initializer
        .ensure_directory_exists()
        .context("Failed to initialize root folder")?;

    let db_path = initializer.database_path();
    info!("Database: {}", db_path.display());

    let pool = internlink_iv::db::init_database(&db_path)
        .await
        .context("Failed to open database")?;

    if let Some(Command::IssueToken { email }) = args.command {
        return issue_token(&pool, &email).await;
    }

    let completion = internlink_iv::config::build_completion_client(&toml_config)?;

    let state = AppState::new(pool, completion);
    let app = build_router(state);

    let port = args.port.or(toml_config.port).unwrap_or(DEFAULT_PORT);
    let bind_address = toml_config.bind_address.as_deref().unwrap_or("127.0.0.1");
    let addr: SocketAddr = format!("{}:{}", bind_address, port)
        .parse()
        .with_context(|| format!("Invalid bind address {}:{}", bind_address, port))?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;
    info!("internlink-iv listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

async fn issue_token(pool: &sqlx::SqlitePool, email: &str) -> Result<()> {
    let existing: Option<String> = sqlx::query_scalar("SELECT id FROM users WHERE email = ?")
        .bind(email)
        .fetch_optional(pool)
        .await?;

    let user_id = match existing {
        Some(id) => id,
        None => internlink_common::api::create_user(pool, email).await?,
    };

    let token = internlink_common::api::issue_token(pool, &user_id).await?;
    info!(user_id = %user_id, "Issued access token for {}", email);
    println!("{}", token);
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
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
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received terminate signal, shutting down"),
    }
}
