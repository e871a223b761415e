use crossterm::event::{KeyCode, KeyEventKind};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{BaseStyle, Padding, TextInput, TextInputProps, TextInputStyle};

use super::Component;
use super::theme;
use crate::action::Action;
use crate::mapper::Theme;

pub const PLACEHOLDER: &str = "Enter city name (e.g., London, New York)";
const BUTTON_WIDTH: u16 = 16;
const ERROR_FG: Color = Color::Rgb(248, 113, 113);

/// City input, submit button and inline error banner
pub struct SearchBar {
    input: TextInput,
}

pub struct SearchBarProps<'a> {
    pub query: &'a str,
    pub is_loading: bool,
    pub error: Option<&'a str>,
    pub theme: Theme,
    pub is_focused: bool,
    // Action constructors
    pub on_query_change: fn(String) -> Action,
    pub on_submit: fn(String) -> Action,
}

impl Default for SearchBar {
    fn default() -> Self {
        Self {
            input: TextInput::new(),
        }
    }
}

impl SearchBar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rows needed: input (3) + error banner (1)
    pub const HEIGHT: u16 = 4;

    fn button_label(is_loading: bool) -> &'static str {
        if is_loading {
            "Searching..."
        } else {
            "Search"
        }
    }
}

impl Component<Action> for SearchBar {
    type Props<'a> = SearchBarProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return Vec::new();
        }

        let EventKind::Key(key) = event else {
            return Vec::new();
        };

        if key.kind == KeyEventKind::Press {
            match key.code {
                KeyCode::Esc => return vec![Action::Quit],
                // Submit is disabled while a request is in flight
                KeyCode::Enter if props.is_loading => return Vec::new(),
                KeyCode::Enter => return vec![(props.on_submit)(props.query.to_string())],
                _ => {}
            }
        }

        let input_props = TextInputProps {
            value: props.query,
            placeholder: PLACEHOLDER,
            is_focused: true,
            style: input_style(),
            on_change: props.on_query_change,
            on_submit: props.on_submit,
            on_cursor_move: Some(|_| Action::Render),
        };
        self.input
            .handle_event(event, input_props)
            .into_iter()
            .collect()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let rows = Layout::vertical([
            Constraint::Length(3), // Input + button
            Constraint::Length(1), // Error banner
        ])
        .split(area);

        let cols = Layout::horizontal([
            Constraint::Min(10),
            Constraint::Length(1),
            Constraint::Length(BUTTON_WIDTH),
        ])
        .split(rows[0]);

        let input_props = TextInputProps {
            value: props.query,
            placeholder: PLACEHOLDER,
            is_focused: props.is_focused,
            style: input_style(),
            on_change: props.on_query_change,
            on_submit: props.on_submit,
            on_cursor_move: Some(|_| Action::Render),
        };
        self.input.render(frame, cols[0], input_props);

        let button_style = if props.is_loading {
            Style::default()
                .bg(Color::Rgb(70, 70, 80))
                .fg(Color::Gray)
        } else {
            Style::default()
                .bg(Color::Rgb(90, 90, 110))
                .fg(Color::White)
                .add_modifier(Modifier::BOLD)
        };
        let button = Paragraph::new(vec![
            Line::from(""),
            Line::from(Self::button_label(props.is_loading)).centered(),
        ])
        .style(button_style);
        frame.render_widget(button, cols[2]);

        if let Some(error) = props.error {
            let banner = Line::from(vec![
                Span::raw(super::ERROR_ICON),
                Span::raw(" "),
                Span::styled(
                    error.to_string(),
                    theme::base_style(props.theme)
                        .fg(ERROR_FG)
                        .add_modifier(Modifier::BOLD),
                ),
            ]);
            frame.render_widget(Paragraph::new(banner), rows[1]);
        }
    }
}

fn input_style() -> TextInputStyle {
    TextInputStyle {
        base: BaseStyle {
            border: None,
            padding: Padding::all(1),
            bg: Some(Color::Rgb(50, 50, 60)),
            fg: Some(Color::White),
        },
        placeholder_style: None,
        cursor_style: None,
    }
}
