//! Core data models for Skycast
//!
//! This module contains the data types used throughout the application for
//! representing current conditions, forecast days, historical summaries, and
//! active weather alerts.

pub mod client;

pub use client::{ApiClient, ApiError, CurrentBundle};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Current weather conditions at the observation time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentConditions {
    /// Temperature in Celsius
    pub temp: f64,
    /// Feels-like temperature in Celsius
    pub feels_like: f64,
    /// Relative humidity percentage (0-100)
    pub humidity: f64,
    /// Wind speed in km/h
    pub wind_speed: f64,
    /// Sea-level pressure in millibars
    pub pressure: f64,
    /// Sunrise wall-clock time as reported by the backend (e.g. "06:12:40")
    pub sunrise: String,
    /// Sunset wall-clock time as reported by the backend
    pub sunset: String,
    /// Sunrise as Unix epoch seconds
    pub sunrise_epoch: i64,
    /// Sunset as Unix epoch seconds
    pub sunset_epoch: i64,
    /// Observation time as Unix epoch seconds
    pub datetime_epoch: i64,
    /// Free-text condition description (e.g. "Partially cloudy")
    pub conditions: String,
}

/// A single day in the forecast
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastDay {
    /// Calendar date of the forecast day
    pub date: NaiveDate,
    /// Start of the day as Unix epoch seconds
    pub datetime_epoch: i64,
    /// Maximum temperature in Celsius
    pub temp_max: f64,
    /// Minimum temperature in Celsius
    pub temp_min: f64,
    /// Free-text condition description
    pub conditions: String,
}

/// Aggregated historical data for a single calendar date
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistorySummary {
    /// Average maximum temperature in Celsius
    pub temp_max: f64,
    /// Average minimum temperature in Celsius
    pub temp_min: f64,
    /// Average precipitation in millimeters
    pub precip: f64,
}

/// An active weather alert for a location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherAlert {
    /// Name of the alert event (e.g. "Flood Warning")
    pub event: String,
    /// Free-text description of the alert
    pub description: String,
}

/// The consolidated dashboard payload for one city
///
/// History and alerts are optional even in a successful fetch: their absence
/// degrades the dashboard but never invalidates it. Current conditions are
/// mandatory; a `Dashboard` cannot exist without them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dashboard {
    /// Canonical city name echoed back by the backend
    pub city: String,
    /// Current conditions (the mandatory section)
    pub current: CurrentConditions,
    /// Forecast days, up to 15; entry 0 is today
    pub forecast: Vec<ForecastDay>,
    /// Historical summary for today's date, if available
    pub history: Option<HistorySummary>,
    /// Active alerts, possibly empty
    pub alerts: Vec<WeatherAlert>,
}

impl Dashboard {
    /// The 7-day forward view: forecast entries for days 2-8.
    ///
    /// Entry 0 is today and is excluded; the dashboard shows today in the
    /// current-conditions card instead.
    pub fn forward_forecast(&self) -> &[ForecastDay] {
        let end = self.forecast.len().min(8);
        if end <= 1 {
            return &[];
        }
        &self.forecast[1..end]
    }

    /// The days plotted in the temperature chart: the first 7 entries.
    pub fn chart_days(&self) -> &[ForecastDay] {
        let end = self.forecast.len().min(7);
        &self.forecast[..end]
    }
}
