#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

use anyhow::Result;
use clap::Parser;
use tracing::{warn, Level};

pub mod app;
mod cli;
pub mod config;
pub mod extract;
pub mod input;
pub mod providers;
pub mod results;

/// Installs the stderr log subscriber at the given verbosity.
pub fn init_logging(level: Level) {
  let _ = tracing_subscriber::fmt()
    .with_max_level(level)
    .with_writer(std::io::stderr)
    .with_target(false)
    .try_init();
}

/// Runs the main application logic.
///
/// Parses the optional command-line target, resolves settings from the
/// environment, and hands control to the interactive shell until the user
/// quits.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built or if the terminal
/// can no longer be read from or written to.
pub async fn run() -> Result<()> {
  let cli = cli::Cli::parse();
  let settings = config::Settings::from_env();
  init_logging(settings.log_level);

  if settings.api_key.is_none() {
    warn!("IP2LOCATION_API_KEY is not set, using the keyless rate-limited tier");
  }

  let mut app = app::App::new(settings)?;
  app.run(cli.target).await
}
