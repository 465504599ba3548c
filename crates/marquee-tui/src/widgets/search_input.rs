//! SearchInput: wraps tui-input for the search bar.

use ratatui::crossterm::event::{Event, KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use tui_input::{backend::crossterm::EventHandler, Input};

use crate::theme::{C_FILTER_BG, C_FILTER_FG, C_MUTED};

pub enum InputAction {
    Changed(String),
    Confirmed,
    Cancelled,
    None,
}

pub struct SearchInput {
    input: Input,
    placeholder: String,
}

impl SearchInput {
    pub fn new(placeholder: impl Into<String>) -> Self {
        Self {
            input: Input::default(),
            placeholder: placeholder.into(),
        }
    }

    pub fn clear(&mut self) {
        self.input = Input::default();
    }

    pub fn text(&self) -> &str {
        self.input.value()
    }

    pub fn is_empty(&self) -> bool {
        self.input.value().is_empty()
    }

    /// Esc with text clears it (`Changed("")`); Esc on an empty input is
    /// `Cancelled` so the caller can move focus away.
    pub fn handle_key(&mut self, key: KeyEvent) -> InputAction {
        match key.code {
            KeyCode::Esc => {
                if self.is_empty() {
                    InputAction::Cancelled
                } else {
                    self.clear();
                    InputAction::Changed(String::new())
                }
            }
            KeyCode::Enter => InputAction::Confirmed,
            _ => {
                let before = self.input.value().to_string();
                self.input.handle_event(&Event::Key(key));
                if self.input.value() == before {
                    InputAction::None
                } else {
                    InputAction::Changed(self.input.value().to_string())
                }
            }
        }
    }

    pub fn draw(&self, frame: &mut Frame, area: Rect, focused: bool) {
        let width = area.width.saturating_sub(4) as usize;
        let scroll = self.input.visual_scroll(width);
        let value = self.input.value();
        let display = if value.is_empty() {
            Span::styled(
                format!("⌕ {}", self.placeholder),
                Style::default().fg(C_MUTED),
            )
        } else {
            let visible: String = value.chars().skip(scroll).collect();
            Span::styled(format!("⌕ {}", visible), Style::default().fg(C_FILTER_FG))
        };

        frame.render_widget(
            Paragraph::new(Line::from(vec![display])).style(Style::default().bg(C_FILTER_BG)),
            area,
        );

        if focused && area.width > 0 {
            let cursor_x = area.x + 2 + (self.input.visual_cursor().saturating_sub(scroll)) as u16;
            frame.set_cursor_position((cursor_x.min(area.x + area.width - 1), area.y));
        }
    }
}

impl Default for SearchInput {
    fn default() -> Self {
        Self::new("Search through thousands of movies")
    }
}
