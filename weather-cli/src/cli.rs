use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use inquire::{CustomType, Text};
use log::{error, info};
use tokio::sync::watch;
use weather_monitor_core::{Config, Monitor, OpenWeatherProvider, provider_from_config};

use crate::output;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-monitor", version, about = "Poll weather, raise heat alerts, roll up daily summaries")]
pub struct Cli {
    /// Config file to use instead of the platform default.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Monitor all configured locations until interrupted.
    Run {
        /// Print one JSON object per event instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Poll every location once, print readings and the summary, then exit.
    Once {
        /// Print one JSON object per event instead of text.
        #[arg(long)]
        json: bool,
    },

    /// Interactively edit locations, interval and alert thresholds.
    Configure,

    /// Show the effective configuration and where it was loaded from.
    ShowConfig,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let path = config_path(self.config.as_deref())?;

        match self.command {
            Command::Run { json } => run_monitor(&path, json).await,
            Command::Once { json } => run_once(&path, json).await,
            Command::Configure => configure(&path),
            Command::ShowConfig => show_config(&path),
        }
    }
}

fn config_path(explicit: Option<&Path>) -> Result<PathBuf> {
    match explicit {
        Some(path) => Ok(path.to_path_buf()),
        None => Config::config_file_path(),
    }
}

/// Load config and fail fast on anything that would break every cycle.
fn build_monitor(path: &Path) -> Result<Monitor<OpenWeatherProvider>> {
    let cfg = Config::load_from(path)?;
    let settings = cfg
        .monitor_settings()
        .with_context(|| format!("Invalid configuration in {}", path.display()))?;
    let provider = provider_from_config(&cfg)?;

    Ok(Monitor::new(provider, settings)?)
}

async fn run_monitor(path: &Path, json: bool) -> Result<()> {
    let mut monitor = build_monitor(path)?;
    let interval = monitor.settings().interval;
    info!("starting weather monitor");

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("received Ctrl+C, shutting down after the current cycle...");
                shutdown_tx.send(true).ok();
            }
            Err(e) => {
                error!("unable to listen for Ctrl+C: {e}");
                // Keep the sender alive so the monitor keeps running.
                std::future::pending::<()>().await;
            }
        }
    });

    monitor
        .run(shutdown_rx, |report| {
            output::print_report(report, json);
            if !json {
                println!(
                    "\nWaiting for {} seconds before the next update...\n",
                    interval.as_secs()
                );
            }
        })
        .await;

    Ok(())
}

async fn run_once(path: &Path, json: bool) -> Result<()> {
    let mut monitor = build_monitor(path)?;
    let report = monitor.run_cycle().await;
    output::print_report(&report, json);
    Ok(())
}

fn configure(path: &Path) -> Result<()> {
    let mut cfg = Config::load_from(path)?;

    let locations = Text::new("Locations to monitor (comma separated):")
        .with_default(&cfg.locations.join(", "))
        .prompt()?;
    cfg.locations = locations
        .split(',')
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(String::from)
        .collect();

    cfg.interval_secs = CustomType::<u64>::new("Seconds between updates:")
        .with_default(cfg.interval_secs)
        .with_error_message("Please enter a whole number of seconds")
        .prompt()?;

    cfg.temp_threshold = CustomType::<f64>::new("Alert above temperature (°C):")
        .with_default(cfg.temp_threshold)
        .with_error_message("Please enter a temperature, e.g. 35.0")
        .prompt()?;

    cfg.consecutive_alerts = CustomType::<u32>::new("Consecutive readings before alerting:")
        .with_default(cfg.consecutive_alerts)
        .with_error_message("Please enter a whole number")
        .prompt()?;

    let api_key_env = Text::new("Environment variable holding the API key:")
        .with_default(&cfg.api_key_env)
        .prompt()?;
    cfg.api_key_env = api_key_env;

    cfg.validate()?;
    cfg.save_to(path)?;

    println!("Saved configuration to {}", path.display());
    Ok(())
}

fn show_config(path: &Path) -> Result<()> {
    let mut cfg = Config::load_from(path)?;

    if path.exists() {
        println!("Config file: {}", path.display());
    } else {
        println!("Config file: {} (not found, using defaults)", path.display());
    }

    if cfg.api_key.is_some() {
        cfg.api_key = Some("********".to_string());
    }
    println!("{}", serde_json::to_string_pretty(&cfg)?);

    match cfg.validate() {
        Ok(()) => println!("Configuration is valid."),
        Err(e) => println!("Configuration problem: {e}"),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn config_flag_is_accepted_after_subcommand() {
        let cli = Cli::try_parse_from(["weather-monitor", "once", "--json", "--config", "alt.toml"])
            .expect("arguments parse");

        assert_eq!(cli.config.as_deref(), Some(Path::new("alt.toml")));
        assert!(matches!(cli.command, Command::Once { json: true }));
    }

    #[test]
    fn explicit_config_path_wins() {
        let path = config_path(Some(Path::new("/etc/weather-monitor.toml"))).unwrap();
        assert_eq!(path, PathBuf::from("/etc/weather-monitor.toml"));
    }
}
