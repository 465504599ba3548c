//! Status bar: bottom line with the input mode and keybindings.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::action::Workspace;
use crate::theme::{C_MODE_NORMAL, C_MODE_OVERLAY, C_MODE_SEARCH, C_MUTED};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputMode {
    Normal,
    /// Search bar has focus; printable keys go to the input.
    Search,
    /// Detail overlay is open.
    Overlay,
}

impl InputMode {
    pub fn label(self) -> &'static str {
        match self {
            Self::Normal => "NORMAL",
            Self::Search => "SEARCH",
            Self::Overlay => "DETAIL",
        }
    }

    pub fn color(self) -> ratatui::style::Color {
        match self {
            Self::Normal => C_MODE_NORMAL,
            Self::Search => C_MODE_SEARCH,
            Self::Overlay => C_MODE_OVERLAY,
        }
    }
}

pub fn keys_hint(mode: InputMode, workspace: Workspace) -> &'static str {
    match mode {
        InputMode::Normal => match workspace {
            Workspace::Home => {
                " ↑↓/jk select  Enter open  f favorite  p poster  ←→ trending  / search  Home clear  F favorites  Tab panes  K keys  ? help  q quit"
            }
            Workspace::Favorites => {
                " ↑↓/jk select  Enter open  d remove  F home  Tab panes  K keys  ? help  q quit"
            }
        },
        InputMode::Search => " type to search  Esc clear/leave  Enter results  Tab next pane",
        InputMode::Overlay => " y copy trailer url  f favorite  Esc/q close",
    }
}

/// Draw the keybindings footer bar (one row).
pub fn draw_keys_bar(frame: &mut Frame, area: Rect, mode: InputMode, workspace: Workspace) {
    let label = match mode {
        InputMode::Normal => workspace.label(),
        other => other.label(),
    };
    let line = Line::from(vec![
        Span::styled(
            format!(" {} ", label),
            Style::default()
                .fg(mode.color())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(keys_hint(mode, workspace), Style::default().fg(C_MUTED)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}
