//! Service entry point: configuration, database, notifier, HTTP server.

use cakebell::config::{self, settings};
use cakebell::errors::Result;
use cakebell::server::{self, AppState};
use cakebell::telegram::notifier::Notifier;
use cakebell::telegram::rate_limit::RateLimiter;
use dotenvy::dotenv;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env (non-fatal, env vars can be set externally)
    dotenv().ok();

    // 3. Resolve configuration from the environment and config.toml
    let app_config = settings::load_app_config(settings::DEFAULT_CONFIG_PATH)?;
    info!("Configuration loaded");

    // 4. Connect the record store and make sure the schema exists
    let db = config::database::create_connection(&app_config.database_url).await?;
    config::database::create_tables(&db).await?;
    info!("Database initialized");

    // 5. Seed catalog rows and the admin allow-list
    config::seed::seed_initial_data(&db, &app_config).await?;

    // 6. Build the notifier around the process-wide rate limiter
    let limiter = RateLimiter::new(
        app_config.rate_limit.quota,
        Duration::from_secs(app_config.rate_limit.window_secs),
    );
    let notifier = Notifier::new(app_config.bot_token.clone(), app_config.chat_id, limiter);

    // Register the webhook when we know our public address; a failure
    // here is logged but does not stop the service
    if let Some(base_url) = &app_config.public_base_url {
        if let Err(e) = notifier.register_webhook(base_url).await {
            tracing::warn!("Webhook registration failed: {e}");
        }
    }

    // 7. Serve
    let bind_addr = app_config.bind_addr.clone();
    let state = AppState {
        db: Arc::new(db),
        notifier: Arc::new(notifier),
        config: Arc::new(app_config),
    };
    server::run_server(state, &bind_addr).await
}
