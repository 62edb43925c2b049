use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{Password, Select};

use myweather_core::{Config, Units, WeatherWidget, client_from_config};

use crate::display;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "myweather", version, about = "City weather lookup")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key and default unit system.
    Configure,

    /// Show current conditions and the 5-day forecast for a city.
    Show {
        /// City identifier, e.g. "Dublin,IE".
        city: String,

        /// Unit system override: metric or imperial.
        #[arg(long)]
        units: Option<String>,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { city, units } => show(&city, units).await,
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("OpenWeather API key:")
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;
    config.set_api_key(api_key.trim().to_string());

    let choice = Select::new("Default units:", vec!["metric", "imperial"])
        .prompt()
        .context("Failed to read unit selection")?;
    config.set_units(Units::try_from(choice)?);

    config.save()?;
    println!(
        "Configuration saved to {}",
        Config::config_file_path()?.display()
    );

    Ok(())
}

async fn show(city: &str, units: Option<String>) -> anyhow::Result<()> {
    if city.trim().is_empty() {
        println!("No city given; nothing to look up.");
        return Ok(());
    }

    let config = Config::load()?;
    let units = match units {
        Some(value) => Units::try_from(value.as_str())?,
        None => config.units,
    };

    let client = client_from_config(&config)?;
    let mut widget = WeatherWidget::new(Box::new(client), units);
    widget.submit(city).await;

    print!("{}", display::render(&widget.view(), units));

    Ok(())
}
