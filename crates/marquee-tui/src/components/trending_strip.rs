//! TrendingStrip component: five ranked trending movies with paging.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::{
    action::Action,
    app_state::AppState,
    component::Component,
    theme::{style_secondary, style_selected_focused, C_MUTED, C_RANK},
    trending::WINDOW,
    widgets::pane_chrome::{pane_chrome, Badge},
};

pub struct TrendingStrip {
    /// Cursor within the visible window.
    cursor: usize,
}

impl TrendingStrip {
    pub fn new() -> Self {
        Self { cursor: 0 }
    }

    fn visible_len(state: &AppState) -> usize {
        state.trending.visible().count()
    }
}

impl Component for TrendingStrip {
    fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }
        let len = Self::visible_len(state);
        match key.code {
            KeyCode::Left | KeyCode::Char('h') => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                } else if state.trending.can_prev() {
                    self.cursor = WINDOW - 1;
                    return vec![Action::TrendingPrev];
                }
            }
            KeyCode::Right | KeyCode::Char('l') => {
                if self.cursor + 1 < len {
                    self.cursor += 1;
                } else if state.trending.can_next() {
                    self.cursor = 0;
                    return vec![Action::TrendingNext];
                }
            }
            KeyCode::Char('[') | KeyCode::PageUp => return vec![Action::TrendingPrev],
            KeyCode::Char(']') | KeyCode::PageDown => return vec![Action::TrendingNext],
            KeyCode::Enter => {
                if let Some((id, summary)) = state.trending.selection_for(self.cursor) {
                    return vec![Action::OpenMovie(id, Some(summary))];
                }
            }
            _ => {}
        }
        vec![]
    }

    fn on_action(&mut self, action: &Action, _state: &AppState) -> Vec<Action> {
        if let Action::TrendingPrev | Action::TrendingNext = action {
            self.cursor = self.cursor.min(WINDOW - 1);
        }
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        let page = format!(
            "{}-{}/{}",
            state.trending.window_start() + 1,
            (state.trending.window_start() + WINDOW).min(state.trending.total()),
            state.trending.total()
        );
        let arrows = match (state.trending.can_prev(), state.trending.can_next()) {
            (true, true) => "‹ ›",
            (true, false) => "‹  ",
            (false, true) => "  ›",
            (false, false) => "   ",
        };
        let badge_text = format!("{} {}", page, arrows);
        let block = pane_chrome(
            "trending movies",
            Some('2'),
            focused,
            Some(Badge {
                text: &badge_text,
                color: C_MUTED,
            }),
        );
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let len = Self::visible_len(state);
        if len == 0 {
            return;
        }
        self.cursor = self.cursor.min(len - 1);

        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Ratio(1, WINDOW as u32); WINDOW])
            .split(inner);

        for (offset, (rank, entry)) in state.trending.visible().enumerate() {
            let selected = focused && offset == self.cursor;
            let cell = cells[offset];
            let title_width = (cell.width as usize).saturating_sub(5);
            let title = truncate(&entry.search_term, title_width);
            let title_style = if selected {
                style_selected_focused()
            } else {
                style_secondary()
            };
            let lines = vec![
                Line::from(vec![
                    Span::styled(
                        format!("{:>2} ", rank),
                        Style::default().fg(C_RANK).add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(title, title_style),
                ]),
                Line::from(Span::styled(
                    format!("   {} clicks", entry.count),
                    Style::default().fg(C_MUTED),
                )),
            ];
            frame.render_widget(Paragraph::new(lines), cell);
        }
    }
}

pub(crate) fn truncate(s: &str, max: usize) -> String {
    if s.width() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for ch in s.chars() {
        if out.width() + 2 > max {
            break;
        }
        out.push(ch);
    }
    out.push('…');
    out
}
