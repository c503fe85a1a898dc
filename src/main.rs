//! Skycast - terminal weather dashboard
//!
//! A terminal UI application that displays current conditions, a 7-day
//! forecast, historical averages, and active alerts for a searched city.

mod aggregate;
mod app;
mod cli;
mod conditions;
mod data;
mod fetch;
mod theme;
mod ui;

use std::fs::{self, File};
use std::io;
use std::panic;
use std::sync::Mutex;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use directories::ProjectDirs;
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing_subscriber::EnvFilter;

use app::{App, ViewState};
use cli::{Cli, StartupConfig};
use data::ApiClient;
use theme::{ambient_preference, FileThemeStore, MemoryThemeStore, ThemeController, ThemeStore};

/// Sets up a panic hook that restores the terminal before printing the panic message.
/// This ensures the terminal is usable even if the application panics.
fn setup_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        // Attempt to restore the terminal
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        // Call the original panic hook
        original_hook(panic_info);
    }));
}

/// Routes diagnostics to a log file under the cache directory.
///
/// Stdout belongs to the TUI, so nothing may log there. Skipped silently
/// when no cache directory is available.
fn init_logging() {
    let Some(dirs) = ProjectDirs::from("", "", "skycast") else {
        return;
    };
    if fs::create_dir_all(dirs.cache_dir()).is_err() {
        return;
    }
    let Ok(file) = File::create(dirs.cache_dir().join("skycast.log")) else {
        return;
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("skycast=info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
}

/// Renders the UI based on the current application state
fn render_ui(frame: &mut ratatui::Frame, app: &App) {
    use ratatui::layout::{Constraint, Direction, Layout};

    let palette = app.palette();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(10),
            Constraint::Length(1),
        ])
        .split(frame.area());

    ui::render_header(frame, chunks[0], app);

    match &app.view {
        ViewState::Loading => render_loading(frame, chunks[1], &palette),
        ViewState::Error(message) => ui::render_error(frame, chunks[1], message, &palette),
        ViewState::Ready(dashboard) => ui::render_dashboard(frame, chunks[1], dashboard, &palette),
    }

    ui::render_footer(frame, chunks[2], app);

    if app.show_help {
        ui::render_help_overlay(frame, &palette);
    }
}

/// Renders a loading message while data is being fetched
fn render_loading(frame: &mut ratatui::Frame, area: ratatui::layout::Rect, palette: &theme::Palette) {
    use ratatui::{
        layout::{Alignment, Constraint, Direction, Layout},
        style::Style,
        widgets::Paragraph,
    };

    // Center the loading message vertically
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(45),
            Constraint::Length(3),
            Constraint::Percentage(45),
        ])
        .split(area);

    let loading_text = Paragraph::new("Fetching weather…")
        .style(Style::default().fg(palette.accent))
        .alignment(Alignment::Center);

    frame.render_widget(loading_text, chunks[1]);
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = match StartupConfig::from_cli(&cli) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    init_logging();

    // Set up panic hook to restore terminal on crash
    setup_panic_hook();

    // Theme: stored value wins, then the terminal's ambient preference;
    // a --theme flag overrides both and is persisted
    let store: Box<dyn ThemeStore> = match FileThemeStore::new() {
        Some(store) => Box::new(store),
        None => Box::new(MemoryThemeStore::default()),
    };
    let mut controller = ThemeController::init(store, ambient_preference());
    if let Some(override_theme) = config.theme_override {
        controller.set(override_theme);
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app instance
    let mut app = App::new(ApiClient::new(config.api_url.clone()), controller);

    // Initial render to show loading state
    terminal.draw(|f| render_ui(f, &app))?;

    // Trigger the initial fetch cycle
    app.begin_search(&config.city);

    // Main event loop
    loop {
        // Apply any fetch cycles that settled since the last tick
        app.poll_outcomes();

        // Render UI
        terminal.draw(|f| render_ui(f, &app))?;

        // Poll for keyboard events with 100ms timeout
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                app.handle_key(key);
            }
        }

        // Check if we should quit
        if app.should_quit {
            break;
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    Ok(())
}
