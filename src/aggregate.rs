//! Dashboard fetch orchestration
//!
//! Issues the three backend fetches for a city concurrently, waits for all
//! of them to settle, and folds the outcomes into a single result. Current
//! conditions are the load-bearing fetch: their failure fails the whole
//! cycle. History and alerts degrade to absent sections with a diagnostic
//! warning and never surface as the top-level error.

use chrono::NaiveDate;
use thiserror::Error;

use crate::data::{ApiClient, ApiError, CurrentBundle, Dashboard, HistorySummary, WeatherAlert};

/// Shown when the critical fetch fails without any usable message
pub const FALLBACK_CURRENT_ERROR: &str = "Failed to fetch current weather.";

/// Replaces transport-level failures where the backend never answered
pub const UNREACHABLE_ERROR: &str = "Network error: could not connect to the weather backend. \
    Make sure the server is running, reachable at the configured API URL, and configured for CORS.";

/// Failure of a fetch cycle as surfaced to the view
///
/// Only critical failures exist at this level; optional fetch failures are
/// absorbed during assembly and leave no trace beyond a log line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The mandatory current-weather fetch failed; nothing can be rendered
    #[error("{0}")]
    Critical(String),
}

impl FetchError {
    /// Builds the blocking error for a failed critical fetch.
    ///
    /// Message fallback chain: rewritten guidance for unreachable backends,
    /// then the structured service message, then the transport error text,
    /// then a static fallback.
    fn critical(err: &ApiError) -> Self {
        if err.is_unreachable() {
            return FetchError::Critical(UNREACHABLE_ERROR.to_string());
        }

        let message = err.to_string();
        if message.is_empty() {
            FetchError::Critical(FALLBACK_CURRENT_ERROR.to_string())
        } else {
            FetchError::Critical(message)
        }
    }
}

/// Fetches everything the dashboard needs for one city.
///
/// The three requests run concurrently and all of them settle before any
/// classification happens; a failed history or alerts fetch never aborts a
/// current fetch that is still in flight.
pub async fn fetch_dashboard(
    client: &ApiClient,
    city: &str,
    today: NaiveDate,
) -> Result<Dashboard, FetchError> {
    let (current, history, alerts) = futures::join!(
        client.get_current(city),
        client.get_history(city, today),
        client.get_alerts(city),
    );

    assemble(current, history, alerts)
}

/// Folds the three settled outcomes into a single view-ready result.
///
/// Split out of `fetch_dashboard` so the classification rules are testable
/// without a network.
pub fn assemble(
    current: Result<CurrentBundle, ApiError>,
    history: Result<Option<HistorySummary>, ApiError>,
    alerts: Result<Vec<WeatherAlert>, ApiError>,
) -> Result<Dashboard, FetchError> {
    let bundle = match current {
        Ok(bundle) => bundle,
        Err(err) => return Err(FetchError::critical(&err)),
    };

    let history = match history {
        Ok(history) => history,
        Err(err) => {
            tracing::warn!(error = %err, "could not fetch historical data");
            None
        }
    };

    let alerts = match alerts {
        Ok(alerts) => alerts,
        Err(err) => {
            tracing::warn!(error = %err, "could not fetch alerts");
            Vec::new()
        }
    };

    Ok(Dashboard {
        city: bundle.city,
        current: bundle.current,
        forecast: bundle.forecast,
        history,
        alerts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::CurrentConditions;

    fn bundle() -> CurrentBundle {
        CurrentBundle {
            city: "Dehradun, UT, India".to_string(),
            current: CurrentConditions {
                temp: 31.2,
                feels_like: 33.5,
                humidity: 58.3,
                wind_speed: 9.4,
                pressure: 1004.0,
                sunrise: "05:42:10".to_string(),
                sunset: "19:11:03".to_string(),
                sunrise_epoch: 1_749_600_130,
                sunset_epoch: 1_749_648_663,
                datetime_epoch: 1_749_629_200,
                conditions: "Partially cloudy".to_string(),
            },
            forecast: Vec::new(),
        }
    }

    fn service_error(message: &str) -> ApiError {
        ApiError::Service {
            status: 404,
            message: message.to_string(),
        }
    }

    fn history_summary() -> HistorySummary {
        HistorySummary {
            temp_max: 36.1,
            temp_min: 23.4,
            precip: 4.2,
        }
    }

    fn alert() -> WeatherAlert {
        WeatherAlert {
            event: "Flood Warning".to_string(),
            description: "River levels rising.".to_string(),
        }
    }

    #[test]
    fn test_ready_when_only_current_succeeds() {
        let result = assemble(
            Ok(bundle()),
            Err(service_error("no history")),
            Err(service_error("no alerts")),
        );

        let dashboard = result.expect("Expected a dashboard");
        assert_eq!(dashboard.city, "Dehradun, UT, India");
        assert!(dashboard.history.is_none());
        assert!(dashboard.alerts.is_empty());
    }

    #[test]
    fn test_ready_when_everything_succeeds() {
        let result = assemble(
            Ok(bundle()),
            Ok(Some(history_summary())),
            Ok(vec![alert()]),
        );

        let dashboard = result.expect("Expected a dashboard");
        assert!(dashboard.history.is_some());
        assert_eq!(dashboard.alerts.len(), 1);
    }

    #[test]
    fn test_error_when_current_fails_even_if_others_succeed() {
        let result = assemble(
            Err(service_error(
                "Unable to fetch weather for this location. Check city name or coordinates.",
            )),
            Ok(Some(history_summary())),
            Ok(vec![alert()]),
        );

        match result {
            Err(FetchError::Critical(message)) => {
                assert_eq!(
                    message,
                    "Unable to fetch weather for this location. Check city name or coordinates."
                );
            }
            Ok(_) => panic!("Expected a critical error"),
        }
    }

    #[test]
    fn test_partial_success_keeps_alerts_and_drops_history() {
        // The end-to-end shape: current ok, history down, alerts ok
        let result = assemble(
            Ok(bundle()),
            Err(service_error("history backend down")),
            Ok(vec![alert()]),
        );

        let dashboard = result.expect("Expected a dashboard");
        assert!(dashboard.history.is_none());
        assert_eq!(dashboard.alerts[0].event, "Flood Warning");
    }

    #[test]
    fn test_canonical_city_comes_from_backend_echo() {
        let result = assemble(Ok(bundle()), Ok(None), Ok(Vec::new()));
        assert_eq!(result.unwrap().city, "Dehradun, UT, India");
    }

    #[test]
    fn test_critical_message_uses_transport_text() {
        let err = ApiError::MissingField("currentConditions".to_string());
        let result = assemble(Err(err), Ok(None), Ok(Vec::new()));

        match result {
            Err(FetchError::Critical(message)) => {
                assert!(message.contains("currentConditions"));
            }
            Ok(_) => panic!("Expected a critical error"),
        }
    }

    #[test]
    fn test_critical_message_falls_back_to_static_text() {
        let result = assemble(Err(service_error("")), Ok(None), Ok(Vec::new()));
        assert_eq!(
            result.unwrap_err(),
            FetchError::Critical(FALLBACK_CURRENT_ERROR.to_string())
        );
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_rewritten_to_guidance() {
        // Nothing listens on port 1; the connection is refused immediately
        let client = ApiClient::new("http://127.0.0.1:1/api/weather");
        let today = NaiveDate::from_ymd_opt(2025, 6, 11).unwrap();

        let result = fetch_dashboard(&client, "Dehradun", today).await;

        match result {
            Err(FetchError::Critical(message)) => {
                assert_eq!(message, UNREACHABLE_ERROR);
                assert!(message.contains("CORS"));
            }
            Ok(_) => panic!("Expected the fetch to fail"),
        }
    }
}
