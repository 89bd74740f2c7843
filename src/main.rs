//! Graphboard
//!
//! Serves the interactive dashboard.
//!
//! Run with: cargo run -- --debug
//!
//! # Configuration
//!
//! Settings come from a TOML file (`--config`, or the default locations),
//! then `GRAPHBOARD_*` environment variables, then command-line flags.
//! `RUST_LOG` overrides the log filter.

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use graphboard::config::{generate_default_config, Config, LoggingConfig};
use graphboard::{serve, AppState};

#[derive(Parser)]
#[command(name = "graphboard")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Interactive analytics dashboard")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to a TOML config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Host to bind to
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Debug mode: verbose logging and request tracing
    #[arg(short, long)]
    pub debug: bool,

    /// Seed for the sample data
    #[arg(long)]
    pub seed: Option<u64>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Some(Commands::Config { output }) = &cli.command {
        let content = generate_default_config();
        match output {
            Some(path) => {
                std::fs::write(path, content)
                    .with_context(|| format!("Failed to write config to {:?}", path))?;
                println!("Config written to {:?}", path);
            }
            None => print!("{}", content),
        }
        return Ok(());
    }

    let config = load_config(&cli)?;
    init_logging(&config.logging, config.server.debug);

    tracing::info!("Starting Graphboard v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        seed = config.data.seed,
        days = config.data.periods,
        debug = config.server.debug,
        "Generating sample data"
    );

    let state = AppState::new(&config);
    serve(state, &config.server).await?;

    tracing::info!("Graphboard stopped");
    Ok(())
}

/// Config file (or defaults) + env, then CLI flags on top
fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };

    if let Some(host) = &cli.host {
        config.server.host = host.clone();
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if cli.debug {
        config.server.debug = true;
    }
    if let Some(seed) = cli.seed {
        config.data.seed = seed;
    }

    Ok(config)
}

fn init_logging(logging: &LoggingConfig, debug: bool) {
    let default_filter = if debug {
        "graphboard=debug,tower_http=debug".to_string()
    } else {
        format!("graphboard={},tower_http=info", logging.level)
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let registry = tracing_subscriber::registry().with(filter);
    if logging.is_json() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::Mutex;

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn config_file(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file
    }

    #[test]
    fn test_cli_flags_override_env_and_file() {
        let _lock = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        std::env::set_var("GRAPHBOARD_PORT", "18052");
        std::env::set_var("GRAPHBOARD_SEED", "5151");

        let file = config_file("[server]\nport = 9300\nhost = \"10.0.0.2\"\n[data]\nseed = 3\n");
        let path = file.path().to_str().unwrap();

        let env_only = load_config(&Cli::parse_from(["graphboard", "--config", path])).unwrap();
        let flagged = load_config(&Cli::parse_from([
            "graphboard", "--config", path, "--port", "9400", "--seed", "77", "--debug",
        ]))
        .unwrap();

        std::env::remove_var("GRAPHBOARD_PORT");
        std::env::remove_var("GRAPHBOARD_SEED");

        assert_eq!(env_only.server.port, 18052);
        assert_eq!(env_only.data.seed, 5151);
        assert_eq!(env_only.server.host, "10.0.0.2");
        assert!(!env_only.server.debug);

        assert_eq!(flagged.server.port, 9400);
        assert_eq!(flagged.data.seed, 77);
        assert!(flagged.server.debug);
        assert_eq!(flagged.server.host, "10.0.0.2");
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        let _lock = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let cli = Cli::parse_from(["graphboard", "--config", "/nonexistent/graphboard.toml"]);
        assert!(load_config(&cli).is_err());
    }

    #[test]
    fn test_config_subcommand() {
        let cli = Cli::parse_from(["graphboard", "config", "--output", "out.toml"]);
        assert!(matches!(
            cli.command,
            Some(Commands::Config { output: Some(ref p) }) if p == &PathBuf::from("out.toml")
        ));
    }
}
