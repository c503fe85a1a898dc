//! Command-line interface parsing for Skycast
//!
//! This module handles parsing of CLI arguments using clap, including the
//! startup city, a one-shot theme override, and the backend base URL.

use clap::Parser;
use thiserror::Error;

use crate::data::client::DEFAULT_BASE_URL;
use crate::theme::Theme;

/// City loaded when none is given on the command line
pub const DEFAULT_CITY: &str = "Dehradun";

/// Error types for CLI argument parsing
#[derive(Debug, Error)]
pub enum CliError {
    /// The specified theme name is not recognized
    #[error("Invalid theme: '{0}'. Valid themes: light, dark")]
    InvalidTheme(String),
}

/// Skycast - a terminal weather dashboard
#[derive(Parser, Debug)]
#[command(name = "skycast")]
#[command(about = "Current weather, 7-day forecast, history, and alerts for any city")]
#[command(version)]
pub struct Cli {
    /// City to load on startup
    ///
    /// Examples:
    ///   skycast                  # Open with the default city
    ///   skycast "New Delhi"      # Open with a specific city
    pub city: Option<String>,

    /// Start with the given theme (light or dark) and persist it
    #[arg(long, value_name = "THEME")]
    pub theme: Option<String>,

    /// Base URL of the weather backend
    #[arg(long, value_name = "URL", default_value = DEFAULT_BASE_URL)]
    pub api_url: String,
}

/// Configuration derived from CLI arguments for application startup
#[derive(Debug, Clone)]
pub struct StartupConfig {
    /// City to fetch on startup
    pub city: String,
    /// Theme to force and persist, if specified
    pub theme_override: Option<Theme>,
    /// Backend base URL
    pub api_url: String,
}

/// Parses a theme string argument into a Theme.
///
/// # Returns
/// * `Ok(Theme)` if the string is "light" or "dark"
/// * `Err(CliError::InvalidTheme)` otherwise
pub fn parse_theme_arg(s: &str) -> Result<Theme, CliError> {
    Theme::from_str(s).ok_or_else(|| CliError::InvalidTheme(s.to_string()))
}

impl StartupConfig {
    /// Creates a StartupConfig from parsed CLI arguments.
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        let city = cli
            .city
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(DEFAULT_CITY)
            .to_string();

        let theme_override = match &cli.theme {
            None => None,
            Some(theme_str) => Some(parse_theme_arg(theme_str)?),
        };

        Ok(Self {
            city,
            theme_override,
            api_url: cli.api_url.clone(),
        })
    }
}
