//! Lookup state for one widget instance.
//!
//! One submission fans out into two independent fetches (current weather,
//! 5-day forecast). Each fetch gets its own result slot instead of a shared
//! loading/error flag, so one call finishing never clears the other call's
//! in-flight indicator. A generation counter makes responses from superseded
//! submissions inert; there is no cancellation.

use tracing::debug;

use crate::error::WeatherError;
use crate::forecast::{DayBucket, group_by_day};
use crate::model::{CurrentWeather, ForecastSample, Units};
use crate::provider::WeatherFetcher;

/// Monotonically increasing submission counter.
pub type Generation = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotStatus {
    Idle,
    Pending {
        generation: Generation,
    },
    Ready {
        generation: Generation,
    },
    Failed {
        generation: Generation,
        message: String,
    },
}

/// Result slot for one fetch: latest status plus last-known data.
///
/// A pending or failed fetch keeps the previous value, so the view can show
/// stale data next to a spinner or an error line.
#[derive(Debug, Clone)]
pub struct Slot<T> {
    status: SlotStatus,
    value: Option<T>,
}

impl<T> Slot<T> {
    fn new() -> Self {
        Self {
            status: SlotStatus::Idle,
            value: None,
        }
    }

    pub fn status(&self) -> &SlotStatus {
        &self.status
    }

    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    fn is_pending(&self) -> bool {
        matches!(self.status, SlotStatus::Pending { .. })
    }

    fn error(&self) -> Option<&str> {
        match &self.status {
            SlotStatus::Failed { message, .. } => Some(message),
            _ => None,
        }
    }

    fn mark_pending(&mut self, generation: Generation) {
        self.status = SlotStatus::Pending { generation };
    }

    fn resolve(&mut self, generation: Generation, result: Result<T, WeatherError>) {
        match result {
            Ok(value) => {
                self.value = Some(value);
                self.status = SlotStatus::Ready { generation };
            }
            Err(err) => {
                self.status = SlotStatus::Failed {
                    generation,
                    message: err.user_message(),
                };
            }
        }
    }
}

/// Aggregate lifecycle of the widget: `Idle -> Loading -> {Ready, Failed}`.
///
/// `Ready` is reachable with only one of the two fetches succeeded; `Failed`
/// means errors exist and no data at all is available.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Ready,
    Failed,
}

/// Borrowed projection of the widget state for rendering.
#[derive(Debug)]
pub struct WidgetView<'a> {
    pub phase: Phase,
    pub current: Option<&'a CurrentWeather>,
    pub forecast: Option<&'a [DayBucket]>,
    /// Inline error messages, at most one per slot.
    pub errors: Vec<&'a str>,
}

#[derive(Debug)]
pub struct WeatherWidget {
    fetcher: Box<dyn WeatherFetcher>,
    units: Units,
    generation: Generation,
    current: Slot<CurrentWeather>,
    forecast: Slot<Vec<DayBucket>>,
}

impl WeatherWidget {
    pub fn new(fetcher: Box<dyn WeatherFetcher>, units: Units) -> Self {
        Self {
            fetcher,
            units,
            generation: 0,
            current: Slot::new(),
            forecast: Slot::new(),
        }
    }

    pub fn units(&self) -> Units {
        self.units
    }

    /// Nothing is cached per unit, so the next submission re-fetches with the
    /// new parameter.
    pub fn set_units(&mut self, units: Units) {
        self.units = units;
    }

    pub fn current(&self) -> &Slot<CurrentWeather> {
        &self.current
    }

    pub fn forecast(&self) -> &Slot<Vec<DayBucket>> {
        &self.forecast
    }

    /// Start a new submission.
    ///
    /// An empty or whitespace-only city is a no-op: no request is issued and
    /// no state changes. Otherwise both slots go pending under a fresh
    /// generation, keeping their previous data visible.
    pub fn begin_submit(&mut self, city: &str) -> Option<Generation> {
        if city.trim().is_empty() {
            return None;
        }

        self.generation += 1;
        self.current.mark_pending(self.generation);
        self.forecast.mark_pending(self.generation);
        Some(self.generation)
    }

    /// Record the outcome of a current-weather fetch.
    ///
    /// A response from a superseded submission is discarded, so a stale
    /// result can never overwrite a newer one.
    pub fn apply_current(
        &mut self,
        generation: Generation,
        result: Result<CurrentWeather, WeatherError>,
    ) {
        if generation != self.generation {
            debug!(generation, latest = self.generation, "discarding stale current-weather response");
            return;
        }
        self.current.resolve(generation, result);
    }

    /// Record the outcome of a forecast fetch, grouping samples per day.
    pub fn apply_forecast(
        &mut self,
        generation: Generation,
        result: Result<Vec<ForecastSample>, WeatherError>,
    ) {
        if generation != self.generation {
            debug!(generation, latest = self.generation, "discarding stale forecast response");
            return;
        }
        let grouped = result.and_then(group_by_day);
        self.forecast.resolve(generation, grouped);
    }

    /// Run one full submission: both fetches in flight concurrently, results
    /// applied as one step. One fetch failing never blocks the other.
    pub async fn submit(&mut self, city: &str) {
        let trimmed = city.trim().to_string();
        let Some(generation) = self.begin_submit(&trimmed) else {
            return;
        };

        let (current, forecast) = tokio::join!(
            self.fetcher.fetch_current(&trimmed, self.units),
            self.fetcher.fetch_forecast(&trimmed, self.units),
        );

        self.apply_current(generation, current);
        self.apply_forecast(generation, forecast);
    }

    pub fn view(&self) -> WidgetView<'_> {
        let loading = self.current.is_pending() || self.forecast.is_pending();
        let errors: Vec<&str> = [self.current.error(), self.forecast.error()]
            .into_iter()
            .flatten()
            .collect();
        let has_data = self.current.value().is_some() || self.forecast.value().is_some();

        let phase = if loading {
            Phase::Loading
        } else if has_data {
            Phase::Ready
        } else if errors.is_empty() {
            Phase::Idle
        } else {
            Phase::Failed
        };

        WidgetView {
            phase,
            current: self.current.value(),
            forecast: self.forecast.value().map(Vec::as_slice),
            errors,
        }
    }
}
