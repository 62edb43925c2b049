//! Core library for the `myweather` lookup tool.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeather fetch client and the seam it sits behind
//! - Forecast grouping and label formatting
//! - The widget state machine (per-fetch result slots, generation counter)
//!
//! It is used by `myweather-cli`, but can also be reused by other binaries or
//! services.

pub mod config;
pub mod error;
pub mod forecast;
pub mod model;
pub mod provider;
pub mod widget;

pub use config::Config;
pub use error::WeatherError;
pub use forecast::{DayBucket, SampleLabel, format_label, group_by_day};
pub use model::{CurrentWeather, ForecastSample, Units};
pub use provider::{WeatherFetcher, client_from_config, openweather::OpenWeatherClient};
pub use widget::{Phase, WeatherWidget, WidgetView};
