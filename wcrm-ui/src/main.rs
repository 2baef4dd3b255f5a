//! wcrm-ui - WorkflowCRM web application entry point
//!
//! Serves the embedded UI and JSON API on localhost. All domain data
//! lives in the hosted backend; locally the process keeps only live
//! sessions and the persisted tenant selection.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wcrm_common::backend::BackendClient;
use wcrm_common::config::{
    ensure_data_folder, resolve_backend_config, resolve_data_folder, TomlConfig,
};
use wcrm_common::store::TenantSelectionStore;
use wcrm_ui::{build_router, AppState};

/// Command-line arguments for wcrm-ui
#[derive(Parser, Debug)]
#[command(name = "wcrm-ui")]
#[command(about = "WorkflowCRM web application")]
#[command(version)]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value = "5780", env = "WCRM_PORT")]
    port: u16,

    /// Hosted backend base URL
    #[arg(long, env = "WCRM_BACKEND_URL")]
    backend_url: Option<String>,

    /// Hosted backend anonymous API key
    #[arg(long, env = "WCRM_BACKEND_KEY")]
    backend_key: Option<String>,

    /// Folder for locally persisted state (tenant selection)
    #[arg(long, env = "WCRM_DATA_FOLDER")]
    data_folder: Option<PathBuf>,

    /// Public origin used in password-reset email links
    #[arg(long, env = "WCRM_PUBLIC_URL")]
    public_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wcrm_ui=debug,wcrm_common=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    info!("Starting WorkflowCRM (wcrm-ui) v{}", env!("CARGO_PKG_VERSION"));

    let file_config = TomlConfig::load();
    let backend_config = resolve_backend_config(
        args.backend_url.as_deref(),
        args.backend_key.as_deref(),
        &file_config,
    );
    info!("Backend: {}", backend_config.url);

    let data_folder = resolve_data_folder(args.data_folder.as_ref(), &file_config);
    ensure_data_folder(&data_folder).context("Failed to prepare data folder")?;
    info!("Data folder: {}", data_folder.display());

    let backend = BackendClient::new(&backend_config).context("Failed to create backend client")?;
    let tenant_store = TenantSelectionStore::new(&data_folder);
    let public_url = args
        .public_url
        .unwrap_or_else(|| format!("http://127.0.0.1:{}", args.port));

    let state = AppState::new(backend, tenant_store, public_url);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(("127.0.0.1", args.port))
        .await
        .context("Failed to bind listen port")?;
    info!("wcrm-ui listening on http://127.0.0.1:{}", args.port);
    info!("Health check: http://127.0.0.1:{}/health", args.port);

    axum::serve(listener, app).await?;

    Ok(())
}
