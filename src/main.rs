#![warn(clippy::all, rust_2018_idioms)]

use anyhow::Context;
use clap::Parser;
use cwsuggest::app::api_server::ApiServer;
use cwsuggest::app::config::{LoggingConfig, ServerConfig};
use cwsuggest::app::resource_explorer::ResourceContext;
use cwsuggest::{log_debug, log_info};
use std::path::PathBuf;
use tracing_subscriber::prelude::*;

const DEFAULT_LOG_FILTER: &str =
    "cwsuggest=info,tower_http=info,aws_config=warn,aws_smithy_runtime=warn,aws_smithy_runtime_api=warn,hyper=warn";

/// CloudWatch resource suggestion server
#[derive(Debug, Parser)]
#[command(name = "cwsuggest", version, about)]
struct Cli {
    /// Path to the TOML config file
    #[arg(long, env = "CWSUGGEST_CONFIG")]
    config: Option<PathBuf>,

    /// Address to listen on, overriding the config file
    #[arg(long)]
    listen: Option<String>,
}

fn init_logging(config: &LoggingConfig) -> anyhow::Result<()> {
    // To enable: TOKIO_CONSOLE=1 RUSTFLAGS="--cfg tokio_unstable" cargo run
    let use_tokio_console = std::env::var("TOKIO_CONSOLE")
        .map(|v| v == "1" || v.to_lowercase() == "true")
        .unwrap_or(false);

    if use_tokio_console {
        console_subscriber::init();
        eprintln!("tokio-console profiling enabled - connect with: tokio-console");
        return Ok(());
    }

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new(DEFAULT_LOG_FILTER))
        .context("Failed to parse env filter")?;

    let file_layer = if config.file {
        let file = open_log_file()?;
        Some(
            tracing_subscriber::fmt::layer()
                .with_writer(std::sync::Mutex::new(file))
                .with_ansi(false),
        )
    } else {
        None
    };

    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .with(file_layer);

    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    // Bridge log crate events to tracing; must follow the subscriber
    tracing_log::LogTracer::init().context("Failed to initialize log-to-tracing bridge")?;

    Ok(())
}

fn open_log_file() -> anyhow::Result<std::fs::File> {
    let proj_dirs = directories::ProjectDirs::from("com", "", "cwsuggest")
        .context("Could not determine the data directory")?;
    let log_dir = proj_dirs.data_dir().join("logs");
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("Failed to create log directory {}", log_dir.display()))?;

    let log_path = log_dir.join("cwsuggest.log");
    let file = std::fs::OpenOptions::new()
        .append(true)
        .create(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open log file {}", log_path.display()))?;

    // Owner read/write only
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        if let Err(e) = std::fs::set_permissions(&log_path, std::fs::Permissions::from_mode(0o600))
        {
            eprintln!("[SECURITY] Failed to set log file permissions: {}", e);
        }
    }

    Ok(file)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config_path = ServerConfig::locate(cli.config.as_deref());
    let mut config = match &config_path {
        Some(path) => ServerConfig::from_file(path)?,
        None => ServerConfig::default(),
    };
    if let Some(listen) = cli.listen {
        config.listen_addr = listen;
    }

    init_logging(&config.logging)?;
    match &config_path {
        Some(path) => {
            log_info!("Loaded config from {}", path.display());
        }
        None => {
            log_debug!("No config file found, using defaults");
        }
    }
    tracing::info!(
        "cwsuggest starting, default region {}, {} custom namespaces",
        config.datasource.default_region,
        config.datasource.custom_namespaces.len()
    );

    let ctx = ResourceContext::aws(config.datasource.clone());
    let mut server = ApiServer::start(ctx, &config.listen_addr).await?;

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for shutdown signal")?;
    server.shutdown().await;

    tracing::info!("cwsuggest stopped");
    Ok(())
}
