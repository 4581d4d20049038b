//! covidtracking.com API client
//!
//! Issues the national and per-state GET requests and decodes the JSON
//! arrays into [`CovidDataPoint`]s. Only the daily increase fields, the
//! state code and the report date are consumed; everything else in the
//! payload is ignored.

use crate::config::ApiConfig;
use crate::error::{FetchError, FetchResult, Result, TrackerError};
use crate::store::{PerStateIndex, TimeSeries};
use crate::types::{parse_date_checked, parse_numeric_date, CovidDataPoint};
use reqwest::Url;
use serde::Deserialize;
use serde_json::Value;

/// One element of the API's JSON array
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiRecord {
    date_checked: Option<String>,
    /// `yyyymmdd`, used when `dateChecked` is missing or unparseable
    date: Option<u64>,
    state: Option<String>,
    positive_increase: Option<i64>,
    negative_increase: Option<i64>,
    death_increase: Option<i64>,
}

impl ApiRecord {
    fn into_data_point(self) -> Option<CovidDataPoint> {
        let date = self
            .date_checked
            .as_deref()
            .and_then(parse_date_checked)
            .map(|checked| checked.date())
            .or_else(|| self.date.and_then(parse_numeric_date))?;

        Some(CovidDataPoint {
            date,
            state: self.state,
            positive_increase: self.positive_increase.unwrap_or(0),
            negative_increase: self.negative_increase.unwrap_or(0),
            death_increase: self.death_increase.unwrap_or(0),
        })
    }
}

/// Decode a response body into records, keeping API order
///
/// Elements that do not decode as a record, or whose date cannot be
/// determined, are skipped. A null body, a body that is not an array, or
/// one with no usable record is an [`FetchError::EmptyResponse`].
pub fn decode_records(body: &[u8]) -> FetchResult<Vec<CovidDataPoint>> {
    let raw: Option<Vec<Value>> = serde_json::from_slice(body).map_err(|e| {
        tracing::warn!("Response body is not a JSON array: {}", e);
        FetchError::EmptyResponse
    })?;

    let raw = match raw {
        Some(elements) if !elements.is_empty() => elements,
        _ => return Err(FetchError::EmptyResponse),
    };

    let total = raw.len();
    let points: Vec<CovidDataPoint> = raw
        .into_iter()
        .filter_map(|element| match ApiRecord::deserialize(element) {
            Ok(record) => record.into_data_point(),
            Err(e) => {
                tracing::debug!("Malformed record: {}", e);
                None
            }
        })
        .collect();

    if points.len() < total {
        tracing::warn!(
            "Skipped {} of {} malformed or undated records",
            total - points.len(),
            total
        );
    }

    if points.is_empty() {
        return Err(FetchError::EmptyResponse);
    }
    Ok(points)
}

/// HTTP client for the two series endpoints
#[derive(Debug, Clone)]
pub struct CovidClient {
    http: reqwest::Client,
    national_url: Url,
    states_url: Url,
}

impl CovidClient {
    /// Build a client from the API configuration
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")));

        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        if !config.use_system_proxy {
            builder = builder.no_proxy();
        }

        let http = builder.build().map_err(|e| {
            TrackerError::Config(format!("Failed to build HTTP client: {}", e))
        })?;

        Ok(Self {
            http,
            national_url: config.national_url()?,
            states_url: config.states_url()?,
        })
    }

    pub fn national_url(&self) -> &Url {
        &self.national_url
    }

    pub fn states_url(&self) -> &Url {
        &self.states_url
    }

    /// Fetch the national series, oldest day first
    pub async fn fetch_national(&self) -> FetchResult<TimeSeries> {
        let records = self.get_records(&self.national_url).await?;
        Ok(TimeSeries::from_api_order(records))
    }

    /// Fetch all states' series grouped by state code
    pub async fn fetch_states(&self) -> FetchResult<PerStateIndex> {
        let records = self.get_records(&self.states_url).await?;
        let index = PerStateIndex::from_api_order(records);
        if index.is_empty() {
            return Err(FetchError::EmptyResponse);
        }
        Ok(index)
    }

    async fn get_records(&self, url: &Url) -> FetchResult<Vec<CovidDataPoint>> {
        tracing::debug!("GET {}", url);
        let response = self.http.get(url.clone()).send().await?.error_for_status()?;
        let body = response.bytes().await?;
        tracing::debug!("Received {} bytes from {}", body.len(), url);
        decode_records(&body)
    }
}
