use crate::{
    Config, CurrentWeather, ForecastSample, Units, error::WeatherError,
    provider::openweather::OpenWeatherClient,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

/// Issues the two independent lookups backing one submission.
///
/// `OpenWeatherClient` is the production implementation; tests substitute
/// deterministic fetchers to drive the widget state machine.
#[async_trait]
pub trait WeatherFetcher: Send + Sync + Debug {
    async fn fetch_current(
        &self,
        city: &str,
        units: Units,
    ) -> Result<CurrentWeather, WeatherError>;

    async fn fetch_forecast(
        &self,
        city: &str,
        units: Units,
    ) -> Result<Vec<ForecastSample>, WeatherError>;
}

/// Construct the OpenWeather client from config.
pub fn client_from_config(config: &Config) -> anyhow::Result<OpenWeatherClient> {
    let api_key = config.require_api_key()?;
    Ok(OpenWeatherClient::new(api_key))
}
