use artbox::{Alignment as ArtAlignment, Renderer, fonts, integrations::ratatui::ArtBox};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use super::Component;
use super::theme;
use crate::action::Action;
use crate::mapper::{self, ClockStyle, Theme};
use crate::state::WeatherSnapshot;

pub struct WeatherPanel;

pub struct WeatherPanelProps<'a> {
    pub snapshot: &'a WeatherSnapshot,
    pub clock: ClockStyle,
    pub theme: Theme,
}

/// One cell of the details grid
struct DetailCard {
    label: &'static str,
    value: String,
    note: Option<String>,
    accent: Color,
}

fn detail_cards(snapshot: &WeatherSnapshot) -> [DetailCard; 6] {
    let current = &snapshot.current;
    [
        DetailCard {
            label: "Humidity",
            value: mapper::format_humidity(current.humidity),
            note: None,
            accent: Color::Rgb(147, 197, 253),
        },
        DetailCard {
            label: "Wind",
            value: mapper::format_wind(current.wind_kph),
            note: Some(current.wind_dir.clone()),
            accent: Color::Rgb(134, 239, 172),
        },
        DetailCard {
            label: "Pressure",
            value: mapper::format_pressure(current.pressure_mb),
            note: None,
            accent: Color::Rgb(216, 180, 254),
        },
        DetailCard {
            label: "Visibility",
            value: mapper::format_visibility(current.vis_km),
            note: None,
            accent: Color::Rgb(253, 224, 71),
        },
        DetailCard {
            label: "UV Index",
            value: current.uv.to_string(),
            note: Some(mapper::uv_category(current.uv).label().to_string()),
            accent: Color::Rgb(253, 186, 116),
        },
        DetailCard {
            label: "Feels Like",
            value: mapper::format_celsius(current.feelslike_c),
            note: None,
            accent: Color::Rgb(252, 165, 165),
        },
    ]
}

impl Component<Action> for WeatherPanel {
    type Props<'a> = WeatherPanelProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let chunks = Layout::vertical([
            Constraint::Max(6),    // FIGlet city name
            Constraint::Length(1), // Region, country
            Constraint::Length(1), // Local time
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Temperatures
            Constraint::Length(1), // Condition + feels like
            Constraint::Length(1), // Icon
            Constraint::Length(1), // Spacer
            Constraint::Min(0),    // Details grid
        ])
        .split(area);

        let WeatherPanelProps {
            snapshot,
            clock,
            theme: active,
        } = props;
        let muted = theme::muted(active);

        let renderer = Renderer::new(fonts::stack(&["terminus", "miniwi"]))
            .with_plain_fallback()
            .with_alignment(ArtAlignment::Center)
            .with_fill(theme::gradient(active, 5.0, 0.0));
        frame.render_widget(ArtBox::new(&renderer, &snapshot.location.name), chunks[0]);

        frame.render_widget(
            Paragraph::new(Line::from(snapshot.region_line()).centered()).style(muted),
            chunks[1],
        );

        // Snapshots are validated on arrival, so this only trips on hand-built state
        let time_line = match mapper::format_local_time(&snapshot.location.localtime, clock) {
            Ok(text) => Line::from(Span::styled(text, muted)),
            Err(e) => Line::from(Span::styled(e.to_string(), Style::default().fg(Color::Red))),
        };
        frame.render_widget(Paragraph::new(time_line.centered()), chunks[2]);

        let temps = Line::from(vec![
            Span::styled(
                mapper::format_celsius(snapshot.current.temp_c),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled("  /  ", muted),
            Span::raw(mapper::format_fahrenheit(snapshot.current.temp_f)),
        ])
        .centered();
        frame.render_widget(Paragraph::new(temps), chunks[4]);

        let condition = Line::from(vec![
            Span::raw(format!("{} ", active.glyph())),
            Span::raw(snapshot.current.condition.text.clone()).bold(),
            Span::styled(
                format!(
                    "   Feels like {}",
                    mapper::format_celsius(snapshot.current.feelslike_c)
                ),
                muted,
            ),
        ])
        .centered();
        frame.render_widget(Paragraph::new(condition), chunks[5]);

        frame.render_widget(
            Paragraph::new(Line::from(snapshot.icon_url()).centered())
                .style(muted.add_modifier(Modifier::DIM)),
            chunks[6],
        );

        render_details(frame, chunks[8], snapshot);
    }
}

fn render_details(frame: &mut Frame, area: Rect, snapshot: &WeatherSnapshot) {
    let rows = Layout::vertical([Constraint::Length(4), Constraint::Length(4)]).split(area);
    let cards = detail_cards(snapshot);

    for (row_idx, row_cards) in cards.chunks(3).enumerate() {
        let cols = Layout::horizontal([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(rows[row_idx]);
        for (card, col) in row_cards.iter().zip(cols.iter()) {
            render_card(frame, *col, card);
        }
    }
}

fn render_card(frame: &mut Frame, area: Rect, card: &DetailCard) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(Span::styled(card.label, Style::default().fg(card.accent)))
        .style(Style::default().bg(Color::Rgb(30, 30, 40)).fg(Color::White))
        .border_style(Style::default().fg(card.accent));

    let mut lines = vec![Line::from(card.value.clone()).bold()];
    if let Some(note) = &card.note {
        lines.push(Line::from(Span::styled(
            note.clone(),
            Style::default().fg(Color::Gray),
        )));
    }
    frame.render_widget(Paragraph::new(lines).block(block), area);
}
