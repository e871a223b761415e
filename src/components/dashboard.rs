use artbox::{Alignment as ArtAlignment, Renderer, fonts, integrations::ratatui::ArtBox};
use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout, Rect},
    style::{Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Paragraph},
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    StatusBar, StatusBarHint, StatusBarProps, StatusBarSection, StatusBarStyle,
};

use super::{Component, SearchBar, SearchBarProps, WeatherPanel, WeatherPanelProps};
use super::theme;
use crate::action::Action;
use crate::mapper::Theme;
use crate::state::{ANIM_CYCLE_TICKS, AppState, QueryStatus, WeatherSnapshot};

pub const ERROR_ICON: &str = "\u{26a0}\u{fe0f}";
const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];

/// Star positions as fractions of the body area, with a per-star phase offset
const STARS: [(f32, f32, u32); 8] = [
    (0.04, 0.08, 0),
    (0.92, 0.16, 3),
    (0.25, 0.35, 7),
    (0.66, 0.50, 10),
    (0.08, 0.78, 5),
    (0.82, 0.90, 2),
    (0.50, 0.25, 8),
    (0.75, 0.70, 4),
];
const STAR_BLINK_TICKS: u32 = 6;

/// Props for Dashboard - read-only view of state
pub struct DashboardProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

/// Root component: title, search bar and a body keyed on query status
#[derive(Default)]
pub struct Dashboard {
    search: SearchBar,
}

impl Dashboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Component<Action> for Dashboard {
    type Props<'a> = DashboardProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        let state = props.state;
        let props = SearchBarProps {
            query: &state.city_input,
            is_loading: state.weather.is_loading(),
            error: state.error_message(),
            theme: state.theme(),
            is_focused: props.is_focused,
            on_query_change: Action::SearchQueryChange,
            on_submit: Action::SearchSubmit,
        };
        self.search
            .handle_event(event, props)
            .into_iter()
            .collect::<Vec<_>>()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: DashboardProps<'_>) {
        let state = props.state;
        let active = state.theme();

        frame.render_widget(Block::default().style(theme::base_style(active)), area);

        let chunks = Layout::vertical([
            Constraint::Length(4),                // Title
            Constraint::Length(1),                // Subtitle
            Constraint::Length(1),                // Spacer
            Constraint::Length(SearchBar::HEIGHT), // Search + error banner
            Constraint::Min(1),                   // Body
            Constraint::Length(1),                // Help bar
        ])
        .split(area);

        if state.result().is_none() {
            render_stars(frame, area, state.tick_count, active);
        }

        render_title(frame, chunks[0], state, active);
        frame.render_widget(
            Paragraph::new(
                Line::from("Get real-time weather information for any city").centered(),
            )
            .style(theme::muted(active)),
            chunks[1],
        );

        let search_area = centered_columns(chunks[3], 80);
        self.search.render(
            frame,
            search_area,
            SearchBarProps {
                query: &state.city_input,
                is_loading: state.weather.is_loading(),
                error: state.error_message(),
                theme: active,
                is_focused: props.is_focused,
                on_query_change: Action::SearchQueryChange,
                on_submit: Action::SearchSubmit,
            },
        );

        let body = centered_columns(chunks[4], 100);
        match BodyView::from_state(state) {
            BodyView::Idle => render_idle(frame, body, active),
            BodyView::Loading => render_loading(frame, body, state, active),
            BodyView::Error => render_error_hint(frame, body, active),
            BodyView::Ready(snapshot) => {
                let mut panel = WeatherPanel;
                panel.render(
                    frame,
                    body,
                    WeatherPanelProps {
                        snapshot,
                        clock: state.clock,
                        theme: active,
                    },
                );
            }
        }

        let mut status_bar = StatusBar::new();
        <StatusBar as Component<Action>>::render(
            &mut status_bar,
            frame,
            chunks[5],
            StatusBarProps {
                left: StatusBarSection::empty(),
                center: StatusBarSection::hints(&[
                    StatusBarHint::new("Enter", "search"),
                    StatusBarHint::new("Esc", "quit"),
                ]),
                right: StatusBarSection::empty(),
                style: StatusBarStyle::default(),
                is_focused: false,
            },
        );
    }
}

// ============================================================================
// Body views
// ============================================================================

enum BodyView<'a> {
    Idle,
    Loading,
    Error,
    Ready(&'a WeatherSnapshot),
}

impl<'a> BodyView<'a> {
    fn from_state(state: &'a AppState) -> Self {
        match state.status() {
            QueryStatus::Idle => BodyView::Idle,
            QueryStatus::Loading => BodyView::Loading,
            QueryStatus::Error => BodyView::Error,
            QueryStatus::Success => match state.result() {
                Some(snapshot) => BodyView::Ready(snapshot),
                None => BodyView::Error,
            },
        }
    }
}

fn render_title(frame: &mut Frame, area: Rect, state: &AppState, active: Theme) {
    let phase = if state.weather.is_loading() {
        (state.tick_count % ANIM_CYCLE_TICKS.max(1)) as f32 / ANIM_CYCLE_TICKS.max(1) as f32
    } else {
        0.0
    };
    let renderer = Renderer::new(fonts::stack(&["miniwi"]))
        .with_plain_fallback()
        .with_alignment(ArtAlignment::Center)
        .with_fill(theme::gradient(active, 5.0, phase));
    frame.render_widget(ArtBox::new(&renderer, "Weather Watch"), area);
}

fn render_idle(frame: &mut Frame, area: Rect, active: Theme) {
    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .flex(Flex::Center)
    .split(area);

    frame.render_widget(
        Paragraph::new(Line::from(active.glyph()).centered()),
        chunks[0],
    );
    frame.render_widget(
        Paragraph::new(Line::from("Search for a city to get started").bold().centered()),
        chunks[1],
    );
    frame.render_widget(
        Paragraph::new(
            Line::from(
                "Enter any city name in the search box above to view current weather conditions",
            )
            .centered(),
        )
        .style(theme::muted(active)),
        chunks[3],
    );
}

fn render_loading(frame: &mut Frame, area: Rect, state: &AppState, active: Theme) {
    let [row] = Layout::vertical([Constraint::Length(1)])
        .flex(Flex::Center)
        .areas(area);

    let spinner = SPINNER[(state.tick_count as usize / 2) % SPINNER.len()];
    let line = Line::from(vec![
        Span::styled(spinner, Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(
            format!(" Fetching weather for {}...", state.city_input.trim()),
            theme::muted(active),
        ),
    ])
    .centered();
    frame.render_widget(Paragraph::new(line), row);
}

fn render_error_hint(frame: &mut Frame, area: Rect, active: Theme) {
    let [row] = Layout::vertical([Constraint::Length(1)])
        .flex(Flex::Center)
        .areas(area);

    let hint = Line::from(vec![
        Span::styled("Check the city name and press ", theme::muted(active)),
        Span::styled("Enter", Style::default().bold()),
        Span::styled(" to try again", theme::muted(active)),
    ])
    .centered();
    frame.render_widget(Paragraph::new(hint), row);
}

fn render_stars(frame: &mut Frame, area: Rect, tick_count: u32, active: Theme) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    let style = theme::base_style(active);
    for (fx, fy, offset) in STARS {
        let x = area.x + ((area.width - 1) as f32 * fx) as u16;
        let y = area.y + ((area.height - 1) as f32 * fy) as u16;
        let bright = ((tick_count + offset) / STAR_BLINK_TICKS) % 2 == 0;
        let (symbol, star_style) = if bright {
            ("\u{2726}", style.add_modifier(Modifier::BOLD))
        } else {
            ("\u{00b7}", style.add_modifier(Modifier::DIM))
        };
        frame.render_widget(
            Paragraph::new(Span::styled(symbol, star_style)),
            Rect::new(x, y, 1, 1),
        );
    }
}

/// Horizontally centered slice of `area`, at most `max_width` wide
fn centered_columns(area: Rect, max_width: u16) -> Rect {
    let [column] = Layout::horizontal([Constraint::Max(max_width)])
        .flex(Flex::Center)
        .areas(area);
    column
}
