//! Dashboard screen rendering
//!
//! Renders the ready-state dashboard as cards: active alerts, current
//! conditions, today's historical averages, the 7-day forward forecast, and
//! the temperature chart. Also renders the blocking error banner for failed
//! fetch cycles.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::conditions::{icon_for, is_night};
use crate::data::Dashboard;
use crate::theme::Palette;

use super::chart;

/// Renders the full ready-state dashboard
pub fn render_dashboard(frame: &mut Frame, area: Rect, dash: &Dashboard, palette: &Palette) {
    let alerts_height = if dash.alerts.is_empty() {
        0
    } else {
        // One line per alert plus the card border
        (dash.alerts.len() as u16).min(4) + 2
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(alerts_height),
            Constraint::Min(11),
            Constraint::Length(10),
        ])
        .split(area);

    if alerts_height > 0 {
        render_alerts(frame, chunks[0], dash, palette);
    }

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(chunks[1]);

    render_current(frame, columns[0], dash, palette);

    let sidebar = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(6)])
        .split(columns[1]);

    render_history(frame, sidebar[0], dash, palette);
    render_forecast(frame, sidebar[1], dash, palette);

    chart::render(frame, chunks[2], dash.chart_days(), palette);
}

/// Renders the blocking error banner shown when the critical fetch fails
pub fn render_error(frame: &mut Frame, area: Rect, message: &str, palette: &Palette) {
    let lines = vec![
        Line::from(Span::styled(
            message.to_string(),
            Style::default().fg(palette.fg),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Press / to search for another city.",
            Style::default().fg(palette.dim),
        )),
    ];

    let banner = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .title(" Error Fetching Data ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.error))
            .title_style(
                Style::default()
                    .fg(palette.error)
                    .add_modifier(Modifier::BOLD),
            ),
    );

    frame.render_widget(banner, area);
}

fn render_alerts(frame: &mut Frame, area: Rect, dash: &Dashboard, palette: &Palette) {
    let lines: Vec<Line> = dash
        .alerts
        .iter()
        .map(|alert| {
            Line::from(vec![
                Span::styled(
                    format!("\u{26A0} {}", alert.event), // ⚠
                    Style::default()
                        .fg(palette.warning)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("  {}", alert.description),
                    Style::default().fg(palette.fg),
                ),
            ])
        })
        .collect();

    let card = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .title(" Active Weather Alerts ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.warning))
            .title_style(Style::default().fg(palette.warning)),
    );

    frame.render_widget(card, area);
}

fn render_current(frame: &mut Frame, area: Rect, dash: &Dashboard, palette: &Palette) {
    let current = &dash.current;
    let night = is_night(
        current.datetime_epoch,
        current.sunrise_epoch,
        current.sunset_epoch,
    );
    let icon = icon_for(&current.conditions, night);

    let lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled(format!("  {} ", icon.glyph), Style::default().fg(icon.color)),
            Span::styled(
                format!("{:.0}°C", current.temp),
                Style::default()
                    .fg(palette.fg)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  {}", current.conditions),
                Style::default().fg(palette.dim),
            ),
        ]),
        Line::from(""),
        detail_line("Feels like", format!("{:.0}°C", current.feels_like), palette),
        detail_line("Humidity", format!("{:.0}%", current.humidity), palette),
        detail_line("Wind", format!("{:.1} km/h", current.wind_speed), palette),
        detail_line("Pressure", format!("{:.0} mb", current.pressure), palette),
        detail_line("Sunrise", current.sunrise.clone(), palette),
        detail_line("Sunset", current.sunset.clone(), palette),
    ];

    let card = Paragraph::new(lines).block(
        Block::default()
            .title(format!(" Current Weather in {} ", dash.city))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.border))
            .title_style(
                Style::default()
                    .fg(palette.title)
                    .add_modifier(Modifier::BOLD),
            ),
    );

    frame.render_widget(card, area);
}

fn render_history(frame: &mut Frame, area: Rect, dash: &Dashboard, palette: &Palette) {
    let lines = match &dash.history {
        Some(history) => vec![
            detail_line("Avg. Max", format!("{:.0}°C", history.temp_max), palette),
            detail_line("Avg. Min", format!("{:.0}°C", history.temp_min), palette),
            detail_line("Avg. Precip", format!("{:.1} mm", history.precip), palette),
        ],
        None => vec![Line::from(Span::styled(
            "Historical data not available.",
            Style::default().fg(palette.dim),
        ))],
    };

    let card = Paragraph::new(lines).block(
        Block::default()
            .title(" Today's Historical Avg. ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.border))
            .title_style(Style::default().fg(palette.title)),
    );

    frame.render_widget(card, area);
}

fn render_forecast(frame: &mut Frame, area: Rect, dash: &Dashboard, palette: &Palette) {
    let lines: Vec<Line> = dash
        .forward_forecast()
        .iter()
        .map(|day| {
            // Forecast rows always use the day icon variant
            let icon = icon_for(&day.conditions, false);
            Line::from(vec![
                Span::styled(
                    format!(" {:<4}", day.date.format("%a")),
                    Style::default().fg(palette.dim),
                ),
                Span::styled(format!("{}  ", icon.glyph), Style::default().fg(icon.color)),
                Span::styled(
                    format!("{:>3.0}°", day.temp_max),
                    Style::default().fg(palette.fg),
                ),
                Span::styled(
                    format!(" / {:.0}°", day.temp_min),
                    Style::default().fg(palette.dim),
                ),
            ])
        })
        .collect();

    let card = Paragraph::new(lines).block(
        Block::default()
            .title(" 7-Day Forecast ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.border))
            .title_style(Style::default().fg(palette.title)),
    );

    frame.render_widget(card, area);
}

fn detail_line(label: &str, value: String, palette: &Palette) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:<12}", label), Style::default().fg(palette.dim)),
        Span::styled(value, Style::default().fg(palette.fg)),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{CurrentConditions, ForecastDay, HistorySummary, WeatherAlert};
    use crate::theme::{Palette, Theme};
    use chrono::NaiveDate;
    use ratatui::{backend::TestBackend, Terminal};

    fn dashboard() -> Dashboard {
        Dashboard {
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
            forecast: (0..9)
                .map(|offset| ForecastDay {
                    date: NaiveDate::from_ymd_opt(2025, 6, 11).unwrap()
                        + chrono::Days::new(offset),
                    datetime_epoch: 1_749_580_200 + offset as i64 * 86_400,
                    temp_max: 34.0,
                    temp_min: 24.0,
                    conditions: "Clear".to_string(),
                })
                .collect(),
            history: None,
            alerts: Vec::new(),
        }
    }

    fn render_to_string(dash: &Dashboard) -> String {
        let palette = Palette::for_theme(Theme::Dark);
        let backend = TestBackend::new(110, 34);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                render_dashboard(frame, area, dash, &palette);
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
    fn test_dashboard_renders_all_cards() {
        let content = render_to_string(&dashboard());
        assert!(content.contains("Current Weather in Dehradun, UT, India"));
        assert!(content.contains("7-Day Forecast"));
        assert!(content.contains("Temperature Forecast"));
        assert!(content.contains("Partially cloudy"));
        assert!(content.contains("31°C"));
    }

    #[test]
    fn test_missing_history_shows_placeholder() {
        let content = render_to_string(&dashboard());
        assert!(content.contains("Historical data not available."));
    }

    #[test]
    fn test_history_card_shows_values_when_present() {
        let mut dash = dashboard();
        dash.history = Some(HistorySummary {
            temp_max: 36.1,
            temp_min: 23.4,
            precip: 4.2,
        });
        let content = render_to_string(&dash);
        assert!(content.contains("Avg. Max"));
        assert!(content.contains("4.2 mm"));
        assert!(!content.contains("Historical data not available."));
    }

    #[test]
    fn test_alerts_card_only_renders_when_alerts_exist() {
        let content = render_to_string(&dashboard());
        assert!(!content.contains("Active Weather Alerts"));

        let mut dash = dashboard();
        dash.alerts.push(WeatherAlert {
            event: "Flood Warning".to_string(),
            description: "River levels rising.".to_string(),
        });
        let content = render_to_string(&dash);
        assert!(content.contains("Active Weather Alerts"));
        assert!(content.contains("Flood Warning"));
    }

    #[test]
    fn test_partial_dashboard_shows_no_error_banner() {
        // Current ok, history missing, alerts present: the degraded render
        let mut dash = dashboard();
        dash.alerts.push(WeatherAlert {
            event: "Heat Advisory".to_string(),
            description: String::new(),
        });
        let content = render_to_string(&dash);
        assert!(content.contains("Heat Advisory"));
        assert!(content.contains("Historical data not available."));
        assert!(!content.contains("Error Fetching Data"));
    }

    #[test]
    fn test_error_banner_renders_message() {
        let palette = Palette::for_theme(Theme::Dark);
        let backend = TestBackend::new(80, 10);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| {
                let area = frame.area();
                render_error(frame, area, "Weather data not found", &palette);
            })
            .unwrap();
        let content: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();

        assert!(content.contains("Error Fetching Data"));
        assert!(content.contains("Weather data not found"));
        assert!(content.contains("Press / to search"));
    }
}
