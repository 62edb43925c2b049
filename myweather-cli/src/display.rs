//! Text rendering of the widget view.
//!
//! Temperatures are rounded to whole numbers for display; the underlying
//! values stay untouched in the core types.

use myweather_core::{Phase, Units, WidgetView, format_label};

pub fn render(view: &WidgetView<'_>, units: Units) -> String {
    let mut out = String::new();

    for error in &view.errors {
        out.push_str(&format!("error: {error}\n"));
    }

    if view.phase == Phase::Idle {
        out.push_str("Enter a city to look up.\n");
        return out;
    }

    let symbol = units.symbol();

    if let Some(current) = view.current {
        out.push_str(&format!("{}, {}\n", current.city, current.country));
        out.push_str(&format!("Temp: {}{symbol}\n", current.temperature.round()));
        out.push_str(&format!(
            "High: {}{symbol}  Low: {}{symbol}\n",
            current.temp_max.round(),
            current.temp_min.round()
        ));
        out.push_str(&format!(
            "Feels like: {}{symbol}\n",
            current.feels_like.round()
        ));
        out.push_str(&format!("{}\n", current.condition));
        out.push_str(&format!("{}\n", current.icon_url()));
    }

    if let Some(buckets) = view.forecast {
        out.push_str("\n5-Day Forecast\n");
        for bucket in buckets {
            out.push_str(&format!("--- {} ---\n", bucket.date));
            for sample in &bucket.samples {
                // Timestamps were validated during grouping; fall back to the
                // raw string rather than dropping the line.
                let label = format_label(&sample.timestamp)
                    .map(|l| format!("day {} {}:00", l.day, l.hour))
                    .unwrap_or_else(|_| sample.timestamp.clone());
                out.push_str(&format!(
                    "  {label}  {}{symbol}  {}  {}\n",
                    sample.temperature.round(),
                    sample.condition,
                    sample.icon_url()
                ));
            }
        }
    }

    out
}
