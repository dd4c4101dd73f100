//! FRED API integration for single-series observations.

use chrono::NaiveDate;
use reqwest::blocking::Client;
use serde::Deserialize;

use crate::config::DashConfig;
use crate::domain::Observation;
use crate::error::{AppError, FetchError};

/// Placeholder FRED uses for a missing observation.
const MISSING_VALUE: &str = ".";

/// Anything that can produce an ascending, gap-free list of observations for a
/// series key.
pub trait ObservationSource: Send + Sync {
    /// Fetch up to `limit` of the most recent observations, oldest first.
    fn fetch_series(&self, series_key: &str, limit: usize) -> Result<Vec<Observation>, FetchError>;
}

pub struct FredClient {
    client: Client,
    api_key: Option<String>,
    url: String,
}

impl FredClient {
    pub fn new(config: &DashConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AppError::new(4, format!("Failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            url: config.observations_url(),
        })
    }
}

impl ObservationSource for FredClient {
    fn fetch_series(&self, series_key: &str, limit: usize) -> Result<Vec<Observation>, FetchError> {
        let api_key = validate_api_key(self.api_key.as_deref())?;

        tracing::debug!(series_key, limit, "requesting FRED observations");
        let limit = limit.to_string();
        let resp = self
            .client
            .get(&self.url)
            .query(&[
                ("series_id", series_key),
                ("api_key", api_key),
                ("file_type", "json"),
                ("sort_order", "desc"),
                ("limit", limit.as_str()),
            ])
            .send()
            .map_err(|e| {
                tracing::warn!(series_key, error = %e, "FRED request failed");
                FetchError::Transport(e.without_url().to_string())
            })?;

        let status = resp.status();
        let body = resp
            .text()
            .map_err(|e| FetchError::Transport(e.without_url().to_string()))?;

        if !status.is_success() {
            let message = error_message(&body)
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("unknown error").to_string());
            tracing::warn!(series_key, status = status.as_u16(), %message, "FRED returned an error");
            return Err(FetchError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let observations = parse_observations(&body)?;
        tracing::info!(series_key, count = observations.len(), "fetched FRED series");
        Ok(observations)
    }
}

/// Key must be present and look like a FRED key (ASCII alphanumeric).
///
/// The key is never echoed back in error messages.
fn validate_api_key(key: Option<&str>) -> Result<&str, FetchError> {
    let key = key.map(str::trim).filter(|k| !k.is_empty()).ok_or(FetchError::MissingApiKey)?;
    if !key.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(FetchError::InvalidApiKey(
            "expected only ASCII letters and digits".to_string(),
        ));
    }
    Ok(key)
}

#[derive(Debug, Deserialize)]
struct ObservationsResponse {
    observations: Vec<RawObservation>,
}

#[derive(Debug, Deserialize)]
struct RawObservation {
    date: String,
    value: String,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error_message: String,
}

fn error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorResponse>(body)
        .ok()
        .map(|e| e.error_message)
}

/// Decode a descending `series/observations` body into an ascending series.
///
/// Missing-value placeholders are dropped; any other unparseable value or date
/// rejects the whole payload.
pub fn parse_observations(body: &str) -> Result<Vec<Observation>, FetchError> {
    let parsed: ObservationsResponse =
        serde_json::from_str(body).map_err(|e| FetchError::Parse(e.to_string()))?;
    normalize(parsed.observations)
}

fn normalize(raw: Vec<RawObservation>) -> Result<Vec<Observation>, FetchError> {
    let mut out = Vec::with_capacity(raw.len());
    for obs in raw.into_iter().rev() {
        let Some(value) = parse_value(&obs.value)? else {
            continue;
        };
        let date = NaiveDate::parse_from_str(&obs.date, "%Y-%m-%d")
            .map_err(|e| FetchError::Parse(format!("invalid date '{}': {e}", obs.date)))?;

        if let Some(prev) = out.last().map(|o: &Observation| o.date) {
            if date <= prev {
                return Err(FetchError::Parse(format!(
                    "observations out of order: {date} follows {prev}"
                )));
            }
        }
        out.push(Observation::new(date, value));
    }
    Ok(out)
}

fn parse_value(raw: &str) -> Result<Option<f64>, FetchError> {
    let trimmed = raw.trim();
    if trimmed == MISSING_VALUE {
        return Ok(None);
    }
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(Some(v)),
        _ => Err(FetchError::Parse(format!("invalid value '{raw}'"))),
    }
}
