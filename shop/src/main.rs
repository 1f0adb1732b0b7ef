// shop/src/main.rs

mod cli;

use anyhow::Context;
use clap::Parser;
use plugpoint::config::AppConfig;
use plugpoint::services::{catalog_seed, session_service};
use plugpoint::state::AppState;
use plugpoint::{db, server, telemetry};
use std::time::Duration;

use crate::cli::{Cli, Command};

const SESSION_PURGE_INTERVAL: Duration = Duration::from_secs(60 * 60);

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
  let cli = Cli::parse();
  let mut config = AppConfig::from_env().context("Failed to load application configuration")?;
  telemetry::init_tracing(config.log_json);

  let pool = db::connect(&config.database_url)
    .await
    .with_context(|| format!("Failed to open database at {}", config.database_url))?;

  match cli.command {
    Command::Migrate => {
      db::migrate(&pool).await?;
    }
    Command::Seed => {
      db::migrate(&pool).await?;
      let added = catalog_seed::seed_if_empty(&pool).await?;
      tracing::info!(added, "Seed command finished.");
    }
    Command::Runserver { host, port } => {
      if let Some(host) = host {
        config.server_host = host;
      }
      if let Some(port) = port {
        config.server_port = port;
      }

      db::migrate(&pool).await?;
      if config.seed_db {
        catalog_seed::seed_if_empty(&pool).await?;
      }
      tokio::spawn(session_service::purge_expired_periodically(
        pool.clone(),
        SESSION_PURGE_INTERVAL,
      ));

      let bind_address = config.bind_address();
      let app_state = AppState::bootstrap(pool, config);
      tracing::info!("Starting PlugPoint server...");
      server::run_server(app_state, &bind_address)
        .await
        .context("HTTP server failed")?;
    }
  }
  Ok(())
}
