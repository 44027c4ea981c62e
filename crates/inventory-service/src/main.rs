use anyhow::Result;
use clap::Parser;
use inventory_service::{create_router, server, Config};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Inventory Service - greeting and health API with OpenAPI docs
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Optional YAML configuration file (PORT still overrides its port)
    #[arg(short, long)]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "inventory_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Inventory Service");

    let config = Config::load(args.config.as_deref())?;
    let app = create_router(&config)?;
    let listener = server::bind(&config).await?;

    info!("Inventory microservice running on port {}", config.port);
    info!(
        "Swagger UI available at http://{}{}",
        config.socket_addr(),
        config.docs.path
    );

    server::serve(listener, app, server::shutdown_signal()).await?;

    info!("Inventory Service stopped");
    Ok(())
}
