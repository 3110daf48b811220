use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use marketplace::{
    config::{self, CliArgs},
    create_app, db, run_migrations, seed,
    security::{generate_secret, PasswordHasher, TokenIssuer},
    state::AppState,
    telemetry,
};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables before clap reads them
    if dotenv::dotenv().is_ok() {
        println!("Loaded .env file");
    }

    let args = CliArgs::parse();
    let config = config::get_config(&args);

    let _log_guard = telemetry::init_tracing(args.debug, config.log_dir.as_deref());
    config.log_summary();

    // Initialize the database pool and bring the schema up to date
    let pool = db::init_pool(&config.database_url)
        .with_context(|| format!("Failed to open database at {}", config.database_url))?;
    {
        let mut conn = pool.get().context("Failed to get a database connection")?;
        run_migrations(&mut conn)?;
    }
    let pool = Arc::new(pool);

    let hasher = PasswordHasher::new(config.hash_params())
        .map_err(|e| anyhow::anyhow!("Invalid password hashing parameters: {}", e))?;

    if args.seed {
        info!("Reseeding database with fixture data");
        seed::reseed(&pool, &hasher)?;
    }

    let secret = config.token_secret.clone().unwrap_or_else(|| {
        warn!("No token secret configured; tokens will not survive a restart");
        generate_secret()
    });
    let tokens = TokenIssuer::new(secret.as_bytes(), config.token_ttl());

    let app = create_app(AppState::new(pool, hasher, tokens));

    let listener = tokio::net::TcpListener::bind(config.bind_address())
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_address()))?;
    info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
