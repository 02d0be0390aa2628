use anyhow::{Context, Result};
use auth_gateway::{config::GatewayConfig, routes::build_router, AppState};
use clap::Parser;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "auth-gateway")]
#[command(about = "Google OAuth login gateway issuing short-lived session tokens")]
struct Cli {
    /// Address the HTTP listener binds to.
    #[arg(long, default_value = "0.0.0.0", env = "GATEWAY_HOST")]
    host: IpAddr,

    /// Listen port. Overrides PORT from the environment.
    #[arg(short, long)]
    port: Option<u16>,

    /// Extra env file loaded before configuration is read.
    #[arg(long, value_name = "FILE")]
    env_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Env files first, so RUST_LOG from them reaches the filter
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    if let Some(path) = &cli.env_file {
        dotenvy::from_path(path)
            .with_context(|| format!("failed to load env file {}", path.display()))?;
    }

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "auth_gateway=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = GatewayConfig::from_env()?;
    let port = cli.port.unwrap_or(config.port);

    tracing::info!(
        "Starting auth gateway for {} allowed email(s)",
        config.allowed_emails.emails().len()
    );

    let app = build_router(AppState::new(config));

    let addr = SocketAddr::new(cli.host, port);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Server started on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
