use serde::{Deserialize, Serialize};

/// Unit system requested from the provider and used for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    #[default]
    Metric,
    Imperial,
}

impl Units {
    /// Value interpolated into the `units` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            Units::Metric => "metric",
            Units::Imperial => "imperial",
        }
    }

    /// Temperature symbol for display.
    pub fn symbol(&self) -> &'static str {
        match self {
            Units::Metric => "°C",
            Units::Imperial => "°F",
        }
    }
}

impl std::fmt::Display for Units {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Units {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "metric" => Ok(Units::Metric),
            "imperial" => Ok(Units::Imperial),
            _ => Err(anyhow::anyhow!(
                "Unknown unit system '{value}'. Supported values: metric, imperial."
            )),
        }
    }
}

/// Current conditions for one location, as reported by the provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentWeather {
    pub city: String,
    pub country: String,
    /// Temperatures are in the unit system the request asked for.
    pub temperature: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub feels_like: f64,
    pub condition: String,
    pub icon: String,
}

impl CurrentWeather {
    pub fn icon_url(&self) -> String {
        icon_url(&self.icon)
    }
}

/// One 3-hour entry from the 5-day forecast.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastSample {
    /// Provider timestamp, kept verbatim: `"YYYY-MM-DD HH:MM:SS"`.
    pub timestamp: String,
    pub temperature: f64,
    pub condition: String,
    pub icon: String,
}

impl ForecastSample {
    pub fn icon_url(&self) -> String {
        icon_url(&self.icon)
    }
}

/// Display-layer URL for a provider icon id.
pub fn icon_url(icon: &str) -> String {
    format!("https://openweathermap.org/img/w/{icon}.png")
}
