use std::path::Path;

use addrlink::adapter::inbound::cli::command::{Cli, Commands, DEFAULT_CONFIG};
use addrlink::adapter::inbound::cli::output::{self, OutputConfig};
use addrlink::adapter::inbound::cli::{reset, run, status};
use addrlink::error::Error;
use addrlink::infrastructure::config::Config;
use clap::Parser;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    output::configure(OutputConfig {
        json: cli.json,
        quiet: cli.quiet,
    });

    let loaded = match &cli.config {
        Some(path) => Config::load(path),
        None => Config::load_or_default(Path::new(DEFAULT_CONFIG)),
    };
    let config = match loaded {
        Ok(c) => c,
        Err(e) => {
            output::error(&format!("Failed to load config: {e}"));
            std::process::exit(2);
        }
    };
    config.init_logging();
    info!("addrlink starting");

    let result = match &cli.command {
        Commands::Run(args) => run::execute(&config, args).await,
        Commands::Status => status::execute(&config),
        Commands::Reset(args) => reset::execute(&config, args),
    };

    if let Err(e) = result {
        error!(error = %e, "Fatal error");
        output::error(&e.to_string());
        let code = if matches!(e, Error::Interrupted) { 130 } else { 1 };
        std::process::exit(code);
    }
}
