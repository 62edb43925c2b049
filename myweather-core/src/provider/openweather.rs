use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::WeatherError;
use crate::model::{CurrentWeather, ForecastSample, Units};

use super::WeatherFetcher;

const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";

/// Client for the OpenWeather "current weather" and "5 day / 3 hour
/// forecast" endpoints.
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    api_key: String,
    http: Client,
    base_url: String,
}

impl OpenWeatherClient {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            http: Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    #[cfg(test)]
    pub fn new_with_base_url(api_key: String, base_url: &str) -> Self {
        Self {
            api_key,
            http: Client::new(),
            base_url: base_url.to_string(),
        }
    }

    /// Fetch current conditions for `city`.
    pub async fn fetch_current(
        &self,
        city: &str,
        units: Units,
    ) -> Result<CurrentWeather, WeatherError> {
        let url = format!("{}/data/2.5/weather", self.base_url);
        debug!(%city, %units, "requesting current weather");

        let res = self
            .http
            .get(&url)
            .query(&[
                ("q", city),
                ("limit", "2"),
                ("appid", self.api_key.as_str()),
                ("units", units.as_str()),
            ])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            warn!(%status, "current weather request failed");
            return Err(WeatherError::Fetch {
                reason: "weather data not found",
                status,
                body: truncate_body(&body),
            });
        }

        let parsed: OwCurrentResponse = serde_json::from_str(&body)
            .map_err(|e| WeatherError::MalformedResponse(e.to_string()))?;

        let weather = parsed.weather.first().ok_or_else(|| {
            WeatherError::MalformedResponse(
                "current weather response is missing weather[0]".to_string(),
            )
        })?;

        Ok(CurrentWeather {
            city: parsed.name,
            country: parsed.sys.country,
            temperature: parsed.main.temp,
            temp_min: parsed.main.temp_min,
            temp_max: parsed.main.temp_max,
            feels_like: parsed.main.feels_like,
            condition: weather.description.clone(),
            icon: weather.icon.clone(),
        })
    }

    /// Fetch the 5-day forecast for `city`, in wire order.
    pub async fn fetch_forecast(
        &self,
        city: &str,
        units: Units,
    ) -> Result<Vec<ForecastSample>, WeatherError> {
        let url = format!("{}/data/2.5/forecast", self.base_url);
        debug!(%city, %units, "requesting 5-day forecast");

        let res = self
            .http
            .get(&url)
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", units.as_str()),
            ])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            warn!(%status, "forecast request failed");
            return Err(WeatherError::Fetch {
                reason: "forecast data not found",
                status,
                body: truncate_body(&body),
            });
        }

        let parsed: OwForecastResponse = serde_json::from_str(&body)
            .map_err(|e| WeatherError::MalformedResponse(e.to_string()))?;

        parsed
            .list
            .into_iter()
            .map(|entry| {
                let weather = entry.weather.first().ok_or_else(|| {
                    WeatherError::MalformedResponse(format!(
                        "forecast entry {} is missing weather[0]",
                        entry.dt_txt
                    ))
                })?;

                Ok(ForecastSample {
                    timestamp: entry.dt_txt.clone(),
                    temperature: entry.main.temp,
                    condition: weather.description.clone(),
                    icon: weather.icon.clone(),
                })
            })
            .collect()
    }
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    temp_min: f64,
    temp_max: f64,
    feels_like: f64,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    country: String,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    sys: OwSys,
    main: OwMain,
    weather: Vec<OwWeather>,
}

#[derive(Debug, Deserialize)]
struct OwForecastMain {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt_txt: String,
    main: OwForecastMain,
    weather: Vec<OwWeather>,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    list: Vec<OwForecastEntry>,
}

#[async_trait]
impl WeatherFetcher for OpenWeatherClient {
    async fn fetch_current(
        &self,
        city: &str,
        units: Units,
    ) -> Result<CurrentWeather, WeatherError> {
        OpenWeatherClient::fetch_current(self, city, units).await
    }

    async fn fetch_forecast(
        &self,
        city: &str,
        units: Units,
    ) -> Result<Vec<ForecastSample>, WeatherError> {
        OpenWeatherClient::fetch_forecast(self, city, units).await
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.chars().count() > MAX {
        let truncated: String = body.chars().take(MAX).collect();
        format!("{truncated}...")
    } else {
        body.to_string()
    }
}
