use anyhow::Context;
use clap::{Parser, Subcommand};
use cityweather_core::{CancellationToken, Config, ResolverStrategy, WeatherResult, WeatherService};
use inquire::{CustomType, Select};
use std::process::ExitCode;

use crate::render::{render_result, render_suggestions};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "cityweather", version, about = "Current weather for a city")]
pub struct Cli {
    /// Enable debug logging (overridden by RUST_LOG).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show current weather for a city.
    Show {
        /// City name.
        city: String,

        /// Print the result as JSON.
        #[arg(long)]
        json: bool,

        /// Override the configured resolver strategy ("direct" or "directory").
        #[arg(long)]
        strategy: Option<String>,
    },

    /// List municipality names matching a partial name.
    Suggest {
        /// Partial municipality name, matched case-insensitively.
        query: String,
    },

    /// Interactively edit the configuration file.
    Configure,

    /// Print the configuration file location.
    ConfigPath,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<ExitCode> {
        match self.command {
            Command::Show {
                city,
                json,
                strategy,
            } => {
                let mut config = Config::load()?;
                if let Some(name) = strategy {
                    config.set_strategy(ResolverStrategy::try_from(name.as_str())?);
                }
                show(&config, &city, json).await
            }
            Command::Suggest { query } => {
                let mut config = Config::load()?;
                config.set_strategy(ResolverStrategy::Directory);
                let service = WeatherService::from_config(&config)?;

                let names = service
                    .suggestions(&query)
                    .await
                    .map_err(|e| anyhow::anyhow!(e.user_message()))?;
                println!("{}", render_suggestions(&query, &names));
                Ok(ExitCode::SUCCESS)
            }
            Command::Configure => {
                configure()?;
                Ok(ExitCode::SUCCESS)
            }
            Command::ConfigPath => {
                println!("{}", Config::config_file_path()?.display());
                Ok(ExitCode::SUCCESS)
            }
        }
    }
}

/// Runs one lookup; a `Failure` result exits non-zero.
async fn show(config: &Config, city: &str, json: bool) -> anyhow::Result<ExitCode> {
    let service = WeatherService::from_config(config)?;
    tracing::debug!(strategy = %service.strategy(), city, "Starting lookup");

    let cancel = CancellationToken::new();
    let on_interrupt = cancel.clone();
    let interrupt = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_interrupt.cancel();
        }
    });

    let result = service.weather_for_city_cancellable(city, &cancel).await;
    interrupt.abort();

    if json {
        let out = serde_json::to_string_pretty(&result).context("Failed to serialize result")?;
        println!("{out}");
    } else {
        println!("{}", render_result(&result, chrono::Local::now()));
    }

    Ok(exit_code_for(&result))
}

fn exit_code_for(result: &WeatherResult) -> ExitCode {
    if result.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let current = config.strategy()?;
    let start = ResolverStrategy::all()
        .iter()
        .position(|s| *s == current)
        .unwrap_or_default();
    let strategy = Select::new("Location strategy:", ResolverStrategy::all().to_vec())
        .with_starting_cursor(start)
        .with_help_message("direct: geocode the name as typed; directory: match a municipality first")
        .prompt()?;
    config.set_strategy(strategy);

    config.timeout_secs = CustomType::<u64>::new("Request timeout (seconds):")
        .with_default(config.timeout_secs)
        .with_help_message("at least 1")
        .prompt()?
        .max(1);

    config.retry.max_attempts = CustomType::<u32>::new("Weather fetch attempts:")
        .with_default(config.retry.max_attempts)
        .with_help_message("1 disables retries")
        .prompt()?
        .max(1);

    config.save()?;
    println!(
        "Saved configuration to {}",
        Config::config_file_path()?.display()
    );
    Ok(())
}
