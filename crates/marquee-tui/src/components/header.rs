//! Header: brand line and workspace tabs.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::action::Workspace;
use crate::app_state::AppState;
use crate::theme::{C_ACCENT, C_MUTED, C_PRIMARY, C_SECONDARY, C_SELECTION_BG};

pub fn draw(frame: &mut Frame, area: Rect, state: &AppState) {
    let tab = |label: String, active: bool| {
        if active {
            Span::styled(
                format!(" {} ", label),
                Style::default()
                    .fg(C_PRIMARY)
                    .bg(C_SELECTION_BG)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled(format!(" {} ", label), Style::default().fg(C_MUTED))
        }
    };

    let line = Line::from(vec![
        Span::styled(
            " Mar",
            Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            "quee",
            Style::default().fg(C_ACCENT).add_modifier(Modifier::BOLD),
        ),
        Span::styled("  find movies you'll enjoy   ", Style::default().fg(C_SECONDARY)),
        tab("Home".to_string(), state.workspace == Workspace::Home),
        Span::raw(" "),
        tab(
            format!("Favourites ({})", state.favorites.len()),
            state.workspace == Workspace::Favorites,
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}
