use reqwest::StatusCode;
use thiserror::Error;

/// Errors produced by the fetch layer and the forecast utilities.
///
/// Every variant maps to a single inline message via [`WeatherError::user_message`];
/// there is no fatal path, callers render the message next to whatever data
/// they already hold.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// The provider answered with a non-success status.
    #[error("{reason} (status {status})")]
    Fetch {
        /// Short human-readable reason, e.g. "weather data not found".
        reason: &'static str,
        status: StatusCode,
        /// Truncated response body, kept for logs only.
        body: String,
    },

    /// The request never produced a usable response.
    #[error("failed to reach the weather service: {0}")]
    Transport(#[from] reqwest::Error),

    /// The provider answered 2xx but the JSON did not have the expected shape.
    #[error("malformed response from the weather service: {0}")]
    MalformedResponse(String),

    /// A forecast timestamp did not match `YYYY-MM-DD HH:MM:SS`.
    #[error("malformed forecast timestamp: {0:?}")]
    MalformedTimestamp(String),
}

impl WeatherError {
    /// Message suitable for inline display next to the rest of the view.
    pub fn user_message(&self) -> String {
        match self {
            WeatherError::Fetch { reason, .. } => (*reason).to_string(),
            WeatherError::Transport(_) => "could not reach the weather service".to_string(),
            WeatherError::MalformedResponse(_) => {
                "the weather service returned an unexpected response".to_string()
            }
            WeatherError::MalformedTimestamp(ts) => {
                format!("could not read forecast time {ts:?}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_error_displays_reason_and_status() {
        let err = WeatherError::Fetch {
            reason: "weather data not found",
            status: StatusCode::NOT_FOUND,
            body: "{}".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("weather data not found"));
        assert!(msg.contains("404"));
    }

    #[test]
    fn user_messages_are_non_empty() {
        let errors = [
            WeatherError::Fetch {
                reason: "forecast data not found",
                status: StatusCode::BAD_GATEWAY,
                body: String::new(),
            },
            WeatherError::MalformedResponse("missing weather[0]".to_string()),
            WeatherError::MalformedTimestamp("not-a-date".to_string()),
        ];
        for err in errors {
            assert!(!err.user_message().is_empty());
        }
    }
}
