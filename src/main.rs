use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;
use weather_thresholds::{logging, Config, ThresholdsUseCase};

#[derive(Parser)]
#[command(name = "weather-thresholds")]
#[command(about = "Extracts and caches weather severity thresholds")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize the national thresholds table from the HTML page
    Html,
    /// Read the route-specific thresholds from the workbook
    Workbook {
        /// Re-read the workbook even if a cached copy exists
        #[arg(long)]
        update: bool,
    },
    /// Get the combined thresholds
    Get {
        /// Recompute from the sources even if a cached copy exists
        #[arg(long)]
        update: bool,
    },
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value).context("serializing output")?;
    println!("{}", json);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    logging::init_logging();

    let cli = Cli::parse();
    let config = Config::load_or_default().context("loading configuration")?;
    let thresholds = ThresholdsUseCase::from_config(&config)?;

    match cli.command {
        Commands::Html => {
            let table = thresholds.read_from_html()?;
            print_json(&table)?;
        }
        Commands::Workbook { update } => match thresholds.read_from_workbook(update) {
            Some(table) => print_json(&table)?,
            None => bail!("workbook thresholds are unavailable"),
        },
        Commands::Get { update } => match thresholds.get_thresholds(update) {
            Some(combined) => print_json(&combined)?,
            None => bail!("weather thresholds are unavailable"),
        },
    }

    info!("Done");
    Ok(())
}
