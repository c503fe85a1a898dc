//! Application state management for Skycast
//!
//! This module contains the main application state, handling keyboard input,
//! search cycles, and the transitions between loading, error, and ready
//! views.

use crossterm::event::{KeyCode, KeyEvent};
use tokio::sync::mpsc;

use crate::data::{ApiClient, Dashboard};
use crate::fetch::{self, FetchOutcome};
use crate::theme::{Palette, Theme, ThemeController};

/// The single source of truth consumed by rendering
#[derive(Debug)]
pub enum ViewState {
    /// A fetch cycle is in flight and nothing older is shown
    Loading,
    /// The mandatory fetch failed; only the message is rendered
    Error(String),
    /// A complete dashboard is available
    Ready(Dashboard),
}

/// Whether keystrokes navigate or edit the search input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Editing,
}

/// Main application struct managing state and data
pub struct App {
    /// Current view state
    pub view: ViewState,
    /// Current input mode
    pub input_mode: InputMode,
    /// Contents of the search input while editing
    pub search_input: String,
    /// City shown in the header; after a successful fetch this is the
    /// backend's canonical name, not the raw query
    pub city: String,
    /// Flag indicating the application should quit
    pub should_quit: bool,
    /// Flag to show help overlay
    pub show_help: bool,
    /// Theme state and persistence
    theme: ThemeController,
    /// Weather backend client
    client: ApiClient,
    /// Sender handed to spawned fetch cycles
    outcome_tx: mpsc::Sender<FetchOutcome>,
    /// Receiver polled by the main loop
    outcome_rx: mpsc::Receiver<FetchOutcome>,
    /// Id of the most recently started fetch cycle
    latest_request: u64,
}

impl App {
    /// Creates a new App instance in the loading state
    pub fn new(client: ApiClient, theme: ThemeController) -> Self {
        let (outcome_tx, outcome_rx) = mpsc::channel(8);
        Self {
            view: ViewState::Loading,
            input_mode: InputMode::Normal,
            search_input: String::new(),
            city: String::new(),
            should_quit: false,
            show_help: false,
            theme,
            client,
            outcome_tx,
            outcome_rx,
            latest_request: 0,
        }
    }

    /// The palette for the active theme
    pub fn palette(&self) -> Palette {
        self.theme.palette()
    }

    /// The active theme
    pub fn theme(&self) -> Theme {
        self.theme.current()
    }

    /// Whether a fetch cycle is currently in flight
    pub fn is_loading(&self) -> bool {
        matches!(self.view, ViewState::Loading)
    }

    /// Starts a fetch cycle for the given city.
    ///
    /// Resets the view to loading first, so data from the previous city is
    /// never shown mixed with the new result. Blank queries are ignored.
    pub fn begin_search(&mut self, query: &str) {
        let city = query.trim();
        if city.is_empty() {
            return;
        }

        self.latest_request += 1;
        self.city = city.to_string();
        self.view = ViewState::Loading;

        fetch::spawn_fetch(
            self.client.clone(),
            city.to_string(),
            self.latest_request,
            self.outcome_tx.clone(),
        );
    }

    /// Drains completed fetch cycles and applies the fresh ones
    pub fn poll_outcomes(&mut self) {
        while let Some(outcome) = fetch::try_recv(&mut self.outcome_rx) {
            self.apply_outcome(outcome);
        }
    }

    /// Applies one fetch outcome, discarding it when a newer cycle has been
    /// started since.
    pub fn apply_outcome(&mut self, outcome: FetchOutcome) {
        if outcome.request_id != self.latest_request {
            tracing::debug!(
                request_id = outcome.request_id,
                latest = self.latest_request,
                "discarding stale fetch outcome"
            );
            return;
        }

        match outcome.result {
            Ok(dashboard) => {
                self.city = dashboard.city.clone();
                self.view = ViewState::Ready(dashboard);
            }
            Err(err) => {
                self.view = ViewState::Error(err.to_string());
            }
        }
    }

    /// Handles keyboard input and updates state accordingly
    ///
    /// # Key Bindings
    /// - `/` or `s`: Focus the search input
    /// - `Enter` (editing): Submit the search
    /// - `Esc` (editing): Cancel the search input
    /// - `t`: Toggle light/dark theme
    /// - `r`: Re-fetch the current city
    /// - `?`: Toggle help overlay
    /// - `q`: Quit the application
    pub fn handle_key(&mut self, key_event: KeyEvent) {
        // Help overlay intercepts all keys when shown
        if self.show_help {
            match key_event.code {
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => {
                    self.show_help = false;
                }
                _ => {}
            }
            return;
        }

        match self.input_mode {
            InputMode::Normal => match key_event.code {
                KeyCode::Char('q') => {
                    self.should_quit = true;
                }
                KeyCode::Char('/') | KeyCode::Char('s') => {
                    self.search_input.clear();
                    self.input_mode = InputMode::Editing;
                }
                KeyCode::Char('t') => {
                    self.theme.toggle();
                }
                KeyCode::Char('r') => {
                    let city = self.city.clone();
                    self.begin_search(&city);
                }
                KeyCode::Char('?') => {
                    self.show_help = true;
                }
                _ => {}
            },
            InputMode::Editing => match key_event.code {
                KeyCode::Enter => {
                    let query = self.search_input.trim().to_string();
                    self.search_input.clear();
                    self.input_mode = InputMode::Normal;
                    if !query.is_empty() {
                        self.begin_search(&query);
                    }
                }
                KeyCode::Esc => {
                    self.search_input.clear();
                    self.input_mode = InputMode::Normal;
                }
                KeyCode::Backspace => {
                    self.search_input.pop();
                }
                KeyCode::Char(c) => {
                    self.search_input.push(c);
                }
                _ => {}
            },
        }
    }
}
