mod config;
mod http;

use std::sync::Arc;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use platform_obs::{ObsConfig, init_tracing};
use products_hr::{HrModule, HrStore};
use tracing::info;

use crate::{
    config::AppConfig,
    http::{AppState, ServeConfig},
};

#[derive(Parser, Debug)]
#[command(name = "hr-server", version, about = "Employee hours and salary records")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP server.
    Serve(ServeCommand),
}

#[derive(Args, Debug)]
struct ServeCommand {
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    host: std::net::IpAddr,
    #[arg(long, env = "PORT", default_value_t = 3000)]
    port: u16,
    #[arg(long, help = "Start without the demo employee")]
    empty: bool,
}

impl From<&ServeCommand> for ServeConfig {
    fn from(value: &ServeCommand) -> Self {
        ServeConfig::new(value.host, value.port)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing(ObsConfig::for_service("hr-server", env!("CARGO_PKG_VERSION")))?;
    let cli = Cli::parse();
    let app_config = Arc::new(AppConfig::load());
    match cli.command {
        Command::Serve(cmd) => run_server(cmd, app_config).await,
    }
}

async fn run_server(cmd: ServeCommand, config: Arc<AppConfig>) -> Result<()> {
    let store = if config.seed_demo_data && !cmd.empty {
        info!("starting with demo records");
        HrStore::seeded()
    } else {
        HrStore::new()
    };
    let state = AppState {
        hr: HrModule::new(store),
        config,
    };
    http::serve((&cmd).into(), state).await
}
