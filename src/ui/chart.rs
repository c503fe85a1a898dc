//! Temperature forecast chart
//!
//! Plots the max and min temperature series for the chart window (the first
//! seven forecast days) as line graphs.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    symbols,
    text::Span,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame,
};

use crate::data::ForecastDay;
use crate::theme::Palette;

/// Renders the temperature chart card
pub fn render(frame: &mut Frame, area: Rect, days: &[ForecastDay], palette: &Palette) {
    let block = Block::default()
        .title(" Temperature Forecast ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.border))
        .title_style(
            Style::default()
                .fg(palette.title)
                .add_modifier(Modifier::BOLD),
        );

    if days.is_empty() {
        let placeholder = Paragraph::new(Span::styled(
            "No forecast data.",
            Style::default().fg(palette.dim),
        ))
        .block(block);
        frame.render_widget(placeholder, area);
        return;
    }

    let max_points: Vec<(f64, f64)> = days
        .iter()
        .enumerate()
        .map(|(i, day)| (i as f64, day.temp_max))
        .collect();
    let min_points: Vec<(f64, f64)> = days
        .iter()
        .enumerate()
        .map(|(i, day)| (i as f64, day.temp_min))
        .collect();

    let (lower, upper) = temperature_bounds(days);
    let x_max = (days.len() - 1).max(1) as f64;

    let x_labels: Vec<Span> = days
        .iter()
        .map(|day| {
            Span::styled(
                day.date.format("%m/%d").to_string(),
                Style::default().fg(palette.dim),
            )
        })
        .collect();

    let y_labels: Vec<Span> = [lower, (lower + upper) / 2.0, upper]
        .iter()
        .map(|t| Span::styled(format!("{:.0}°", t), Style::default().fg(palette.dim)))
        .collect();

    let datasets = vec![
        Dataset::default()
            .name("Max °C")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(palette.chart_max))
            .data(&max_points),
        Dataset::default()
            .name("Min °C")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(palette.chart_min))
            .data(&min_points),
    ];

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .style(Style::default().fg(palette.border))
                .bounds([0.0, x_max])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(palette.border))
                .bounds([lower, upper])
                .labels(y_labels),
        );

    frame.render_widget(chart, area);
}

/// Y-axis bounds: the series extent padded by two degrees on each side
fn temperature_bounds(days: &[ForecastDay]) -> (f64, f64) {
    let mut lower = f64::INFINITY;
    let mut upper = f64::NEG_INFINITY;

    for day in days {
        lower = lower.min(day.temp_min);
        upper = upper.max(day.temp_max);
    }

    (lower - 2.0, upper + 2.0)
}
