//! Header and footer chrome
//!
//! The header shows the application title, the search input, and the active
//! theme; the footer shows key hints and the data attribution.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::{App, InputMode};
use crate::theme::Palette;

/// Renders the one-row header: title, search box, theme indicator
pub fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let palette = app.palette();

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(24),
            Constraint::Length(36),
            Constraint::Length(14),
        ])
        .split(area);

    let title = Paragraph::new(Line::from(vec![
        Span::styled(
            " Skycast ",
            Style::default()
                .fg(palette.title)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(app.city.as_str(), Style::default().fg(palette.dim)),
    ]))
    .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(palette.border)));
    frame.render_widget(title, chunks[0]);

    let (search_text, search_border) = match app.input_mode {
        InputMode::Editing => (
            Line::from(vec![
                Span::styled(app.search_input.clone(), Style::default().fg(palette.fg)),
                Span::styled("█", Style::default().fg(palette.accent)),
            ]),
            palette.accent,
        ),
        InputMode::Normal => (
            Line::from(Span::styled(
                "press / to search",
                Style::default().fg(palette.dim),
            )),
            palette.border,
        ),
    };

    let search = Paragraph::new(search_text).block(
        Block::default()
            .title(" Search city ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(search_border)),
    );
    frame.render_widget(search, chunks[1]);

    let theme = Paragraph::new(Line::from(Span::styled(
        format!("{} (t)", app.theme().as_str()),
        Style::default().fg(palette.dim),
    )))
    .block(
        Block::default()
            .title(" Theme ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.border)),
    );
    frame.render_widget(theme, chunks[2]);
}

/// Renders the one-line footer: key hints, fetch status, attribution
pub fn render_footer(frame: &mut Frame, area: Rect, app: &App) {
    let palette = app.palette();

    let mut spans = vec![Span::styled(
        " / search  t theme  r refresh  ? help  q quit ",
        Style::default().fg(palette.dim),
    )];

    if app.is_loading() {
        spans.push(Span::styled(
            " fetching… ",
            Style::default().fg(palette.accent),
        ));
    }

    spans.push(Span::styled(
        " · Weather data by Visual Crossing",
        Style::default().fg(palette.dim),
    ));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::ApiClient;
    use crate::theme::{MemoryThemeStore, Theme, ThemeController};
    use ratatui::{backend::TestBackend, Terminal};

    fn test_app() -> App {
        let client = ApiClient::new("http://127.0.0.1:1/api/weather");
        let theme = ThemeController::init(Box::new(MemoryThemeStore::default()), Theme::Dark);
        App::new(client, theme)
    }

    fn buffer_content(app: &App) -> String {
        let backend = TestBackend::new(100, 6);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                render_header(frame, Rect::new(0, 0, area.width, 3), app);
                render_footer(frame, Rect::new(0, 3, area.width, 1), app);
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_header_shows_title_and_theme() {
        let app = test_app();
        let content = buffer_content(&app);
        assert!(content.contains("Skycast"));
        assert!(content.contains("dark (t)"));
        assert!(content.contains("press / to search"));
    }

    #[test]
    fn test_footer_shows_fetch_indicator_while_loading() {
        let app = test_app();
        assert!(app.is_loading());
        let content = buffer_content(&app);
        assert!(content.contains("fetching"));
        assert!(content.contains("Visual Crossing"));
    }

    #[test]
    fn test_header_shows_input_while_editing() {
        let mut app = test_app();
        app.input_mode = InputMode::Editing;
        app.search_input = "Pune".to_string();
        let content = buffer_content(&app);
        assert!(content.contains("Pune"));
        assert!(!content.contains("press / to search"));
    }

    #[test]
    fn test_palette_threading_does_not_panic_for_light_theme() {
        let client = ApiClient::new("http://127.0.0.1:1/api/weather");
        let theme = ThemeController::init(Box::new(MemoryThemeStore::default()), Theme::Light);
        let app = App::new(client, theme);
        let content = buffer_content(&app);
        assert!(content.contains("light (t)"));
    }
}
