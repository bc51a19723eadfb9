use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use ecomanager::config::{AppConfig, DEFAULT_CONFIG_FILE};
use ecomanager::server::{self, ServerConfig};

#[derive(Parser)]
#[command(name = "ecomanager")]
#[command(version, about = "Environmental-compliance management server")]
pub struct Cli {
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to the config file (defaults to ./ecomanager.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the JSON API server
    Serve {
        /// Port to serve on (overrides config file and ECOMANAGER_PORT)
        #[arg(short, long)]
        port: Option<u16>,

        /// Enable dev mode (permissive CORS, bind on all interfaces)
        #[arg(long)]
        dev: bool,

        /// Start with empty collections instead of the demo dataset
        #[arg(long)]
        no_seed: bool,

        /// Skip the simulated per-request network delays
        #[arg(long)]
        no_latency: bool,
    },
    /// View or initialize configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand, Clone)]
pub enum ConfigCommands {
    /// Show the effective configuration
    Show,
    /// Initialize a default ecomanager.toml file
    Init,
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
    let config = AppConfig::load(&config_path)?;

    match &cli.command {
        Commands::Serve {
            port,
            dev,
            no_seed,
            no_latency,
        } => {
            let server_config = ServerConfig {
                port: port.unwrap_or(config.server.port),
                dev_mode: *dev || config.server.dev,
                seed: config.store.seed && !*no_seed,
                simulate_latency: config.store.simulate_latency && !*no_latency,
            };
            server::start_server(server_config).await?;
        }
        Commands::Config { command } => match command.clone().unwrap_or(ConfigCommands::Show) {
            ConfigCommands::Show => {
                print!("{}", config.render()?);
            }
            ConfigCommands::Init => {
                AppConfig::write_default(&config_path)?;
                println!("Wrote {}", config_path.display());
            }
        },
    }

    Ok(())
}
