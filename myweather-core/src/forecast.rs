//! Grouping and labelling of 5-day forecast samples.
//!
//! The provider returns a flat, chronologically ordered list of 3-hour
//! samples. Display wants them bucketed per calendar day, with a compact
//! day/hour label per sample.

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};
use std::collections::HashMap;

use crate::error::WeatherError;
use crate::model::ForecastSample;

/// Provider timestamp layout, e.g. `"2024-06-01 15:00:00"`.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Compact display label for one forecast sample.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleLabel {
    /// Day of month without a leading zero, e.g. `"1"`.
    pub day: String,
    /// Two-digit hour, minutes and seconds discarded, e.g. `"15"`.
    pub hour: String,
}

/// Samples sharing one calendar day, in arrival order.
#[derive(Debug, Clone)]
pub struct DayBucket {
    pub date: NaiveDate,
    pub samples: Vec<ForecastSample>,
}

fn parse_timestamp(timestamp: &str) -> Result<NaiveDateTime, WeatherError> {
    NaiveDateTime::parse_from_str(timestamp, TIMESTAMP_FORMAT)
        .map_err(|_| WeatherError::MalformedTimestamp(timestamp.to_string()))
}

/// Split a provider timestamp into its day/hour display label.
pub fn format_label(timestamp: &str) -> Result<SampleLabel, WeatherError> {
    let parsed = parse_timestamp(timestamp)?;

    Ok(SampleLabel {
        day: parsed.day().to_string(),
        hour: format!("{:02}", parsed.hour()),
    })
}

/// Partition samples into per-day buckets.
///
/// Buckets are keyed on the full calendar date, not the day-of-month alone,
/// so samples from different months never share a bucket. Bucket order is
/// first-seen order of each date in the input; samples keep arrival order
/// within their bucket. No sorting or deduplication happens here.
pub fn group_by_day(samples: Vec<ForecastSample>) -> Result<Vec<DayBucket>, WeatherError> {
    let mut buckets: Vec<DayBucket> = Vec::new();
    let mut index_by_date: HashMap<NaiveDate, usize> = HashMap::new();

    for sample in samples {
        let date = parse_timestamp(&sample.timestamp)?.date();

        match index_by_date.get(&date) {
            Some(&idx) => buckets[idx].samples.push(sample),
            None => {
                index_by_date.insert(date, buckets.len());
                buckets.push(DayBucket {
                    date,
                    samples: vec![sample],
                });
            }
        }
    }

    Ok(buckets)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(timestamp: &str) -> ForecastSample {
        ForecastSample {
            timestamp: timestamp.to_string(),
            temperature: 10.0,
            condition: "clear sky".to_string(),
            icon: "01d".to_string(),
        }
    }

    #[test]
    fn label_drops_leading_zero_and_keeps_two_digit_hour() {
        let label = format_label("2024-06-01 15:00:00").expect("valid timestamp");
        assert_eq!(label.day, "1");
        assert_eq!(label.hour, "15");
    }

    #[test]
    fn label_pads_morning_hours() {
        let label = format_label("2024-06-21 09:30:45").expect("valid timestamp");
        assert_eq!(label.day, "21");
        assert_eq!(label.hour, "09");
    }

    #[test]
    fn malformed_timestamp_names_the_input() {
        let err = format_label("2024-06-01T15:00:00Z").unwrap_err();
        match err {
            WeatherError::MalformedTimestamp(ts) => {
                assert_eq!(ts, "2024-06-01T15:00:00Z");
            }
            other => panic!("expected MalformedTimestamp, got {other:?}"),
        }
    }

    #[test]
    fn grouping_partitions_and_preserves_order() {
        let samples = vec![
            sample("2024-06-01 12:00:00"),
            sample("2024-06-01 15:00:00"),
            sample("2024-06-02 09:00:00"),
        ];

        let buckets = group_by_day(samples).expect("valid samples");
        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].samples.len(), 2);
        assert_eq!(buckets[0].samples[0].timestamp, "2024-06-01 12:00:00");
        assert_eq!(buckets[0].samples[1].timestamp, "2024-06-01 15:00:00");
        assert_eq!(buckets[1].samples.len(), 1);
        assert_eq!(buckets[1].samples[0].timestamp, "2024-06-02 09:00:00");

        let total: usize = buckets.iter().map(|b| b.samples.len()).sum();
        assert_eq!(total, 3);
    }

    #[test]
    fn bucket_order_follows_first_occurrence_not_calendar_order() {
        let samples = vec![
            sample("2024-06-02 09:00:00"),
            sample("2024-06-01 12:00:00"),
            sample("2024-06-02 12:00:00"),
        ];

        let buckets = group_by_day(samples).expect("valid samples");
        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].date, NaiveDate::from_ymd_opt(2024, 6, 2).unwrap());
        assert_eq!(buckets[0].samples.len(), 2);
        assert_eq!(buckets[1].date, NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
    }

    #[test]
    fn same_day_of_month_in_different_months_stays_separate() {
        let samples = vec![
            sample("2024-06-01 12:00:00"),
            sample("2024-07-01 12:00:00"),
        ];

        let buckets = group_by_day(samples).expect("valid samples");
        assert_eq!(buckets.len(), 2);
    }

    #[test]
    fn empty_input_yields_no_buckets() {
        let buckets = group_by_day(Vec::new()).expect("empty input is fine");
        assert!(buckets.is_empty());
    }

    #[test]
    fn malformed_sample_fails_the_whole_grouping() {
        let samples = vec![sample("2024-06-01 12:00:00"), sample("garbage")];
        let err = group_by_day(samples).unwrap_err();
        assert!(matches!(err, WeatherError::MalformedTimestamp(_)));
    }
}
