//! devshell - headless companion for the webview shells

use clap::{Parser, Subcommand, ValueEnum};
use devshell_watch::prelude::*;
use devshell_watch::weather::{Weather, WeatherClientBuilder};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// Poll watched files, fetch weather, and resolve launch targets without a window
#[derive(Parser)]
#[command(name = "devshell")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Which shell's defaults to start from
    #[arg(long, value_enum, default_value = "foreplan")]
    app: App,

    /// Config file layered over the defaults (yaml, toml or json)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum App {
    Foreplan,
    SmartWeather,
}

#[derive(Subcommand)]
enum Commands {
    /// Poll files and log every detected change
    Watch {
        /// Extra paths to watch on top of the configured ones
        paths: Vec<PathBuf>,
        /// Poll interval in milliseconds (default: from config)
        #[arg(long)]
        interval_ms: Option<u64>,
    },
    /// Fetch the weather once and print the relayed body
    Weather,
    /// Print the URL the webview would navigate to
    Target {
        /// Directory the bundle path is resolved against (default: executable dir)
        #[arg(long)]
        base_dir: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let base = match cli.app {
        App::Foreplan => ShellConfig::foreplan(),
        App::SmartWeather => ShellConfig::smart_weather(),
    };
    let config = ShellConfig::load(cli.config.as_deref(), base)?;

    match cli.command {
        Commands::Watch { paths, interval_ms } => watch(&config, paths, interval_ms).await,
        Commands::Weather => weather(&config).await,
        Commands::Target { base_dir } => target(&config, base_dir),
    }
}

async fn watch(config: &ShellConfig, extra: Vec<PathBuf>, interval_ms: Option<u64>) -> Result<()> {
    let mut watcher = FileChangeWatcher::new();
    for path in config.watch_paths.iter().chain(extra.iter()) {
        if !watcher.try_register(path)? {
            warn!("Skipping {}: does not exist", path.display());
        }
    }

    if watcher.is_empty() {
        return Err(ShellError::Other("Nothing to watch".to_string()));
    }

    let every = interval_ms
        .map(Duration::from_millis)
        .unwrap_or_else(|| config.poll_interval());
    let (_task, mut rx) = PollingTask::spawn(watcher, every)?;

    let mut changes = 0usize;
    while let Some(()) = rx.recv().await {
        changes += 1;
        info!("Change detected ({} so far), UI should refresh", changes);
    }
    Ok(())
}

async fn weather(config: &ShellConfig) -> Result<()> {
    if !config.weather.enabled {
        warn!("Weather is disabled for {}", config.title);
    }

    let secrets = SecretsFile::new(&config.secrets_path);
    let client = WeatherClientBuilder::from_settings(&config.weather, &secrets).build()?;
    let body = client.fetch_relay().await;
    println!("{}", body);

    match Weather::from_onecall(&body) {
        Ok(current) => info!("Current weather: {}", current),
        Err(e) => warn!("No weather summary: {}", e),
    }
    Ok(())
}

fn target(config: &ShellConfig, base_dir: Option<PathBuf>) -> Result<()> {
    let base_dir = match base_dir {
        Some(dir) => dir,
        None => devshell_watch::shell::executable_dir()?,
    };
    info!("Base directory: {}", base_dir.display());

    let target = resolve_launch_target(config, &base_dir);
    println!("{}", target.url());
    Ok(())
}
