//! memgate - request metering gateway for a memory-storage API

use clap::Parser;
use memgate::{Config, Gateway, Result};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Command line arguments
#[derive(Debug, Parser)]
#[command(name = "memgate", version, about = "Request metering gateway for a memory-storage API")]
struct Args {
    /// YAML configuration file
    #[arg(short, long, env = "MEMGATE_CONFIG")]
    config: Option<PathBuf>,

    /// Bind host, overrides the configuration
    #[arg(long)]
    host: Option<String>,

    /// Bind port, overrides the configuration
    #[arg(short, long)]
    port: Option<u16>,

    /// Emit log lines as JSON
    #[arg(long, env = "MEMGATE_JSON_LOGS")]
    json_logs: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let env_file = dotenvy::dotenv();
    let args = Args::parse();

    init_tracing(args.json_logs);
    if let Ok(path) = env_file {
        info!("Loaded environment from {:?}", path);
    }

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn load_config(args: &Args) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => {
            let mut config = Config::from_file(path).await?;
            config.gateway.apply_overrides(|key| std::env::var(key).ok())?;
            config
        }
        None => {
            warn!("No configuration file given, using defaults and environment");
            Config::from_env()?
        }
    };

    if let Some(host) = &args.host {
        config.gateway.server.host = host.clone();
    }
    if let Some(port) = args.port {
        config.gateway.server.port = port;
    }

    config.validate()?;
    Ok(config)
}

async fn run(args: Args) -> Result<()> {
    let config = load_config(&args).await?;
    Gateway::new(config).await?.run().await
}
