//! Terminal App Entry Point
//!
//! Application entry point and client initialization.
//! Uses `anyhow` for startup errors; application-level failures surface
//! as panel messages inside the read-eval loop.

use std::sync::Arc;

use auth::{AuthFlow, BaasAuthGateway};
use baas::{BaasClient, BaasConfig};
use todo::{BaasTodoRepository, TodoBoard, TodoConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod repl;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "app=info,auth=info,todo=info,baas=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Service configuration: the base URL is the single external setting,
    // read once at startup.
    let config = BaasConfig::from_env()?;
    tracing::info!(base_url = %config.base_url, "Using service");

    // One explicitly constructed client instance; the controllers get
    // their collaborators injected instead of reaching for a global.
    let client = Arc::new(BaasClient::new(config)?);
    let gateway = Arc::new(BaasAuthGateway::new(Arc::clone(&client)));

    let todo_config = TodoConfig::default();
    let repo = Arc::new(BaasTodoRepository::new(Arc::clone(&client), &todo_config));

    let flow = AuthFlow::new(Arc::clone(&gateway));
    let board = TodoBoard::new(repo, todo_config);

    repl::run(flow, board, gateway).await
}
