use anyhow::Context;
use clap::Parser;

use rentdesk_config::RentConfig;
use rentdesk_db::service::RentService;
use rentdesk_server::{AppState, cli::Cli, create_app};

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("rentdesk error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let mut config = match &cli.config {
        Some(path) => RentConfig::load_from(path)?,
        None => RentConfig::load_with_dotenv()?,
    };
    cli.apply_overrides(&mut config);
    config.validate()?;

    let service = RentService::new_local(&config.database.path, config.maintenance.rules())
        .await
        .with_context(|| format!("failed to open database '{}'", config.database.path))?;

    if cli.seed_demo {
        match service.seed_demo().await.context("failed to seed demo data")? {
            Some(summary) => tracing::info!(requests = summary.requests, "demo data ready"),
            None => tracing::info!("demo data already present, skipping"),
        }
    }

    let addr = config.server.socket_addr()?;
    let app = create_app(AppState::new(service), &config.server.api_prefix);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!(%addr, prefix = %config.server.api_prefix, "rentdesk listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("rentdesk stopped");
    Ok(())
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "info"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("RENTDESK_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::error!(%error, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
