mod api;
mod app;
mod cache;
mod commands;
mod config;
mod dedup;
mod error;
mod filter;
mod logging;
mod query;
mod session;
mod ui;

use clap::Parser;
use color_eyre::Result;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "wastesort")]
#[command(about = "Browse waste categories, disposal guidelines and recycling centers")]
#[command(version)]
struct Args {
  /// Path to config file (default: $XDG_CONFIG_HOME/wastesort/config.yaml)
  #[arg(short, long, global = true)]
  config: Option<PathBuf>,

  /// API base URL (overrides WASTESORT_API_URL and the config file)
  #[arg(long, global = true)]
  api_url: Option<String>,

  #[command(subcommand)]
  command: commands::Command,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
  color_eyre::install()?;

  let args = Args::parse();

  // Load configuration
  let config = config::Config::load(args.config.as_deref())?.with_api_url(args.api_url);

  let _guard = logging::init(&config.log_dir()?)?;
  tracing::debug!(api = %config.api.url, route = %args.command.route(), "Starting");

  let app = app::App::new(&config, args.command.route())?;
  let outcome = app.run(args.command).await?;
  print!("{}", outcome.output);

  Ok(if outcome.ok {
    ExitCode::SUCCESS
  } else {
    ExitCode::FAILURE
  })
}
