//! Weather backend API client
//!
//! This module provides functionality to fetch current conditions, history,
//! and alerts from the weather dashboard backend and parse the responses
//! into our data structures.
//!
//! The backend wraps the Visual Crossing timeline API and exposes three
//! endpoints: `GET {base}/{city}`, `GET {base}/history?city=..&date=..`,
//! and `GET {base}/alerts?city=..`. Failures carry a structured JSON error
//! body of the form `{"error": .., "message": .., "status": .., "timestamp": ..}`.

use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

use super::{CurrentConditions, ForecastDay, HistorySummary, WeatherAlert};

/// Base URL of the hosted backend instance
pub const DEFAULT_BASE_URL: &str = "https://weather-dashboard-api-zymw.onrender.com/api/weather";

/// Errors that can occur when talking to the weather backend
#[derive(Debug, Error)]
pub enum ApiError {
    /// The backend answered with a non-success status and (possibly) a
    /// structured error body
    #[error("{message}")]
    Service {
        /// HTTP status code of the response
        status: u16,
        /// Message extracted from the error body, or a generic fallback
        message: String,
    },

    /// HTTP request failed at the transport level
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Failed to parse JSON response
    #[error("Failed to parse JSON response: {0}")]
    Parse(#[from] serde_json::Error),

    /// Missing expected field in response
    #[error("Missing expected field in response: {0}")]
    MissingField(String),

    /// Invalid date format in response
    #[error("Invalid date in response: {0}")]
    InvalidDate(String),
}

impl ApiError {
    /// Whether this error means the backend could not be reached at all
    /// (connection refused, DNS failure, timeout), as opposed to the backend
    /// answering with an error.
    pub fn is_unreachable(&self) -> bool {
        match self {
            ApiError::Request(err) => {
                err.is_connect() || err.is_timeout() || (err.is_request() && err.status().is_none())
            }
            _ => false,
        }
    }
}

/// Current conditions plus the forecast days that arrive in the same response
#[derive(Debug, Clone)]
pub struct CurrentBundle {
    /// Canonical city name echoed back by the backend
    pub city: String,
    /// Current conditions
    pub current: CurrentConditions,
    /// Forecast days, up to 15
    pub forecast: Vec<ForecastDay>,
}

/// Client for the weather dashboard backend
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl ApiClient {
    /// Create a new ApiClient against the given base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            client: Client::new(),
            base_url,
        }
    }

    /// Create a new ApiClient with a custom HTTP client
    #[allow(dead_code)]
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Fetch current conditions and the forecast for the given city
    ///
    /// # Returns
    /// * `Ok(CurrentBundle)` - current conditions, forecast, and the
    ///   backend's canonical name for the city
    /// * `Err(ApiError)` - if the request, the backend, or parsing fails
    pub async fn get_current(&self, city: &str) -> Result<CurrentBundle, ApiError> {
        let url = format!("{}/{}", self.base_url, city);
        let text = self.get_text(self.client.get(&url)).await?;
        parse_current(city, &text)
    }

    /// Fetch the historical summary for the given city and date
    ///
    /// Returns `Ok(None)` when the backend has no aggregate for that date.
    pub async fn get_history(
        &self,
        city: &str,
        date: NaiveDate,
    ) -> Result<Option<HistorySummary>, ApiError> {
        let url = format!("{}/history", self.base_url);
        let date = date.format("%Y-%m-%d").to_string();
        let request = self.client.get(&url).query(&[("city", city), ("date", date.as_str())]);
        let text = self.get_text(request).await?;
        parse_history(&text)
    }

    /// Fetch active weather alerts for the given city
    ///
    /// Returns an empty list when no alerts are active.
    pub async fn get_alerts(&self, city: &str) -> Result<Vec<WeatherAlert>, ApiError> {
        let url = format!("{}/alerts", self.base_url);
        let request = self.client.get(&url).query(&[("city", city)]);
        let text = self.get_text(request).await?;
        parse_alerts(&text)
    }

    /// Send a request and return the response body, converting non-success
    /// statuses into `ApiError::Service` with the backend's error message.
    async fn get_text(&self, request: reqwest::RequestBuilder) -> Result<String, ApiError> {
        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(ApiError::Service {
                status: status.as_u16(),
                message: service_error_message(status.as_u16(), &text),
            });
        }

        Ok(text)
    }
}

/// Extract the human-readable message from a backend error body
///
/// The backend emits `{"error": .., "message": .., "status": .., "timestamp": ..}`;
/// `message` carries the actionable text and `error` the category. Bodies
/// that are not JSON fall back to a generic status line.
fn service_error_message(status: u16, body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ServiceErrorBody>(body) {
        if let Some(message) = parsed.message.filter(|m| !m.is_empty()) {
            return message;
        }
        if let Some(error) = parsed.error.filter(|e| !e.is_empty()) {
            return error;
        }
    }
    format!("Weather service returned HTTP {}", status)
}

/// Parse the current+forecast response body
///
/// `query` is the raw city the user searched for; it is only used as a last
/// resort when the backend echoes no address back.
fn parse_current(query: &str, body: &str) -> Result<CurrentBundle, ApiError> {
    let response: TimelineResponse = serde_json::from_str(body)?;

    let conditions = response
        .current_conditions
        .ok_or_else(|| ApiError::MissingField("currentConditions".to_string()))?;

    let city = response
        .resolved_address
        .or(response.address)
        .filter(|a| !a.is_empty())
        .unwrap_or_else(|| query.to_string());

    let mut forecast = Vec::with_capacity(response.days.len());
    for day in response.days {
        forecast.push(parse_day(day)?);
    }

    Ok(CurrentBundle {
        city,
        current: CurrentConditions {
            temp: conditions.temp,
            feels_like: conditions.feelslike,
            humidity: conditions.humidity,
            wind_speed: conditions.windspeed,
            pressure: conditions.pressure,
            sunrise: conditions.sunrise.unwrap_or_default(),
            sunset: conditions.sunset.unwrap_or_default(),
            sunrise_epoch: conditions.sunrise_epoch,
            sunset_epoch: conditions.sunset_epoch,
            datetime_epoch: conditions.datetime_epoch,
            conditions: conditions.conditions,
        },
        forecast,
    })
}

/// Parse the history response body into a single-day summary
///
/// The backend aggregates the requested date into `days[0]`; an empty or
/// missing `days` array means no data for that date.
fn parse_history(body: &str) -> Result<Option<HistorySummary>, ApiError> {
    let response: TimelineResponse = serde_json::from_str(body)?;

    Ok(response.days.into_iter().next().map(|day| HistorySummary {
        temp_max: day.tempmax,
        temp_min: day.tempmin,
        precip: day.precip.unwrap_or(0.0),
    }))
}

/// Parse the alerts response body
fn parse_alerts(body: &str) -> Result<Vec<WeatherAlert>, ApiError> {
    let response: AlertsResponse = serde_json::from_str(body)?;

    Ok(response
        .alerts
        .into_iter()
        .map(|alert| WeatherAlert {
            event: alert.event,
            description: alert.description.unwrap_or_default(),
        })
        .collect())
}

fn parse_day(day: DayDto) -> Result<ForecastDay, ApiError> {
    let date = NaiveDate::parse_from_str(&day.datetime, "%Y-%m-%d")
        .map_err(|_| ApiError::InvalidDate(day.datetime.clone()))?;

    Ok(ForecastDay {
        date,
        datetime_epoch: day.datetime_epoch,
        temp_max: day.tempmax,
        temp_min: day.tempmin,
        conditions: day.conditions,
    })
}

/// Timeline response shape shared by the current and history endpoints
#[derive(Debug, Deserialize)]
struct TimelineResponse {
    address: Option<String>,
    #[serde(rename = "resolvedAddress")]
    resolved_address: Option<String>,
    #[serde(rename = "currentConditions")]
    current_conditions: Option<CurrentConditionsDto>,
    #[serde(default)]
    days: Vec<DayDto>,
}

/// Current conditions as the backend reports them
#[derive(Debug, Deserialize)]
struct CurrentConditionsDto {
    temp: f64,
    feelslike: f64,
    humidity: f64,
    windspeed: f64,
    pressure: f64,
    sunrise: Option<String>,
    sunset: Option<String>,
    #[serde(rename = "sunriseEpoch")]
    sunrise_epoch: i64,
    #[serde(rename = "sunsetEpoch")]
    sunset_epoch: i64,
    #[serde(rename = "datetimeEpoch")]
    datetime_epoch: i64,
    conditions: String,
}

/// One day entry in a timeline response
#[derive(Debug, Deserialize)]
struct DayDto {
    datetime: String,
    #[serde(rename = "datetimeEpoch")]
    datetime_epoch: i64,
    tempmax: f64,
    tempmin: f64,
    #[serde(default)]
    precip: Option<f64>,
    #[serde(default)]
    conditions: String,
}

/// Alerts endpoint response
#[derive(Debug, Deserialize)]
struct AlertsResponse {
    #[serde(default)]
    alerts: Vec<AlertDto>,
}

/// One alert entry
#[derive(Debug, Deserialize)]
struct AlertDto {
    event: String,
    description: Option<String>,
}

/// Backend error body
#[derive(Debug, Deserialize)]
struct ServiceErrorBody {
    error: Option<String>,
    message: Option<String>,
}
