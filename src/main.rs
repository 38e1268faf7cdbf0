use std::path::PathBuf;

use clap::Parser;
use dexwatch::app::App;
use dexwatch::config::Config;
use tokio::signal;
use tracing::{error, info};

#[derive(Debug, Parser)]
#[command(name = "dexwatch", version, about)]
struct Cli {
    /// Path to the TOML config file. Defaults apply when the file is absent.
    #[arg(long, default_value = "dexwatch.toml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let config = match Config::load_or_default(&cli.config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config: {e}");
            std::process::exit(1);
        }
    };

    config.init_logging();
    info!("dexwatch starting");

    tokio::select! {
        result = App::run(config) => {
            if let Err(e) = result {
                error!(error = %e, "Fatal error");
                std::process::exit(1);
            }
        }
        _ = signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
    }

    info!("dexwatch stopped");
}
