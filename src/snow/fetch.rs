//! Weather archive client.
//!
//! Fetches the trailing 90 days of daily snowfall for a coordinate from
//! the Open-Meteo historical archive. The archive serves actual recorded
//! snowfall (no forecasts); the last array element is the most recent day.

use chrono::{Duration, NaiveDate, Utc};
use serde::Deserialize;

/// Historical archive endpoint. Free, no API key required.
pub const DEFAULT_ARCHIVE_URL: &str = "https://archive-api.open-meteo.com/v1/archive";

/// Length of the trailing window requested from the archive, in days.
pub const ARCHIVE_WINDOW_DAYS: i64 = 90;

/// Errors raised while fetching or decoding an archive response.
///
/// All of these are swallowed per-resort by the refresh cycle; the resort
/// gets a zero-valued snapshot and the next hourly cycle retries.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Transport failure or undecodable body.
    #[error("archive request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// Non-2xx response from the archive.
    #[error("archive returned HTTP {0}")]
    Status(u16),
    /// The response had no `daily.snowfall_sum` array, or it was empty.
    #[error("archive response contained no snowfall data")]
    MissingData,
}

/// Top-level archive response. Only the daily block is of interest.
#[derive(Debug, Deserialize)]
struct ArchiveResponse {
    #[serde(default)]
    daily: Option<DailyBlock>,
}

/// The `daily` block: parallel arrays keyed by date, ascending.
#[derive(Debug, Deserialize)]
struct DailyBlock {
    /// Daily snowfall sums in centimeters. Nulls appear where the archive
    /// has no observation for that day.
    #[serde(default)]
    snowfall_sum: Option<Vec<Option<f64>>>,
}

/// HTTP client for the snowfall archive with an injectable base URL.
#[derive(Debug, Clone)]
pub struct SnowfallClient {
    http: reqwest::Client,
    base_url: String,
}

impl SnowfallClient {
    /// Creates a client against the public archive endpoint.
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_ARCHIVE_URL)
    }

    /// Creates a client against an alternate endpoint (tests, mirrors).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Fetches the trailing 90-day daily snowfall series for a coordinate.
    ///
    /// Returns the raw series in centimeters, ascending by day with the
    /// most recent day last, nulls preserved.
    pub async fn fetch_daily_snowfall(
        &self,
        lat: f64,
        lon: f64,
    ) -> Result<Vec<Option<f64>>, FetchError> {
        let (start_date, end_date) = archive_window(Utc::now().date_naive());

        let response = self
            .http
            .get(&self.base_url)
            .query(&[
                ("latitude", lat.to_string()),
                ("longitude", lon.to_string()),
                ("start_date", start_date.format("%Y-%m-%d").to_string()),
                ("end_date", end_date.format("%Y-%m-%d").to_string()),
                ("daily", "snowfall_sum".to_string()),
                ("timezone", "auto".to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body: ArchiveResponse = response.json().await?;
        extract_series(body)
    }
}

impl Default for SnowfallClient {
    fn default() -> Self {
        Self::new()
    }
}

/// The [start, end] date range covering the trailing archive window.
fn archive_window(end: NaiveDate) -> (NaiveDate, NaiveDate) {
    (end - Duration::days(ARCHIVE_WINDOW_DAYS), end)
}

/// Pulls the snowfall series out of a decoded response.
///
/// An absent or empty array is total failure for the resort.
fn extract_series(body: ArchiveResponse) -> Result<Vec<Option<f64>>, FetchError> {
    body.daily
        .and_then(|d| d.snowfall_sum)
        .filter(|series| !series.is_empty())
        .ok_or(FetchError::MissingData)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> ArchiveResponse {
        serde_json::from_str(json).expect("valid archive JSON")
    }

    #[test]
    fn extracts_series_with_nulls_preserved() {
        let body = parse(r#"{"daily":{"snowfall_sum":[0.0,null,2.5,10.0]}}"#);
        let series = extract_series(body).unwrap();
        assert_eq!(series, vec![Some(0.0), None, Some(2.5), Some(10.0)]);
    }

    #[test]
    fn missing_daily_block_is_no_data() {
        let body = parse(r#"{"latitude":39.6,"longitude":-106.4}"#);
        assert!(matches!(extract_series(body), Err(FetchError::MissingData)));
    }

    #[test]
    fn missing_snowfall_array_is_no_data() {
        let body = parse(r#"{"daily":{"time":["2026-01-01"]}}"#);
        assert!(matches!(extract_series(body), Err(FetchError::MissingData)));
    }

    #[test]
    fn empty_snowfall_array_is_no_data() {
        let body = parse(r#"{"daily":{"snowfall_sum":[]}}"#);
        assert!(matches!(extract_series(body), Err(FetchError::MissingData)));
    }

    #[test]
    fn window_spans_ninety_days() {
        let end = NaiveDate::from_ymd_opt(2026, 3, 31).unwrap();
        let (start, window_end) = archive_window(end);
        assert_eq!(window_end, end);
        assert_eq!((end - start).num_days(), ARCHIVE_WINDOW_DAYS);
    }
}
