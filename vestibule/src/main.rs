mod config;
mod gateway;
mod logging;
mod server;

use clap::{Parser, Subcommand};

use crate::config::VestibuleConfig;
use crate::logging::init_logging;

const DEFAULT_CONFIG_PATH: &str = "config/vestibule.toml";

#[derive(Parser, Debug)]
#[command(
    name = "vestibule",
    version,
    about = "Vestibule: cached static file server"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the file server (default)
    Run {
        /// Path to the Vestibule config file
        #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
        config: String,
    },
}

fn main() {
    let cli = Cli::parse();

    let config_path = match cli.command {
        Some(Command::Run { config }) => config,
        None => DEFAULT_CONFIG_PATH.to_string(),
    };

    init_logging();

    let cfg = VestibuleConfig::from_file(&config_path).expect("Failed to load Vestibule config");

    server::run(cfg).expect("Failed to start Vestibule server");
}
