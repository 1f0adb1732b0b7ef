// shop/src/cli.rs

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "plugpoint", version, about = "PlugPoint shop server and maintenance commands")]
pub struct Cli {
  #[command(subcommand)]
  pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
  /// Apply pending database migrations.
  Migrate,
  /// Migrate, then start the HTTP server.
  Runserver {
    /// Overrides SERVER_HOST.
    #[arg(long)]
    host: Option<String>,
    /// Overrides SERVER_PORT.
    #[arg(long)]
    port: Option<u16>,
  },
  /// Load the demo catalog into an empty database.
  Seed,
}
