//! DetailOverlay component: centered popup with the selected movie's details.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::{
    action::Action,
    app_state::AppState,
    component::Component,
    components::help_overlay::centered_rect,
    detail::{DetailState, DetailView},
    theme::{
        style_label, C_ACCENT, C_ERROR, C_FAVORITE, C_MUTED, C_OVERLAY_BG,
        C_PANEL_BORDER_FOCUSED, C_PRIMARY, C_RATING, C_SECONDARY,
    },
};

pub struct DetailOverlayView {
    scroll: u16,
}

impl DetailOverlayView {
    pub fn new() -> Self {
        Self { scroll: 0 }
    }

    fn ready_lines(view: &DetailView, favorite: bool) -> Vec<Line<'static>> {
        let mut lines = vec![
            Line::from(vec![
                Span::styled(
                    view.title.clone(),
                    Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    if favorite { "  ♥" } else { "" },
                    Style::default().fg(C_FAVORITE),
                ),
            ]),
            Line::from(vec![
                Span::styled(view.year.clone(), Style::default().fg(C_SECONDARY)),
                Span::styled(" • ", Style::default().fg(C_MUTED)),
                Span::styled(
                    format!("[{}]", view.certification),
                    Style::default().fg(C_ACCENT),
                ),
                Span::styled(" • ", Style::default().fg(C_MUTED)),
                Span::styled(view.runtime.clone(), Style::default().fg(C_SECONDARY)),
                Span::styled(" • ", Style::default().fg(C_MUTED)),
                Span::styled(
                    format!("★ {}", view.rating),
                    Style::default().fg(C_RATING).add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(""),
        ];

        let genres = if view.genres.is_empty() {
            crate::detail::NOT_AVAILABLE.to_string()
        } else {
            view.genres.join("  ")
        };
        lines.push(row("Genres", genres));
        lines.push(row("Overview", view.overview.clone()));
        lines.push(row("Release date", view.release_date.clone()));
        lines.push(row("Countries", view.countries.clone()));
        lines.push(row("Status", view.status.clone()));
        lines.push(row("Language", view.languages.clone()));
        if let Some(companies) = &view.companies {
            lines.push(row("Production", companies.clone()));
        }
        lines.push(Line::from(""));
        match &view.trailer_url {
            Some(url) => {
                lines.push(Line::from(vec![
                    Span::styled(" ▶ Watch Trailer  ", style_label()),
                    Span::styled(url.clone(), Style::default().fg(C_SECONDARY)),
                ]));
                lines.push(Line::from(Span::styled(
                    "   y copies the link",
                    Style::default().fg(C_MUTED),
                )));
            }
            None => lines.push(Line::from(Span::styled(
                " no trailer available",
                Style::default().fg(C_MUTED),
            ))),
        }
        lines
    }
}

fn row(label: &'static str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!(" {:<14}", label), style_label()),
        Span::styled(value, Style::default().fg(C_PRIMARY)),
    ])
}

impl Component for DetailOverlayView {
    fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => {
                self.scroll = 0;
                return vec![Action::CloseMovie];
            }
            KeyCode::Char('y') => {
                if let Some(url) = state.detail.trailer_url() {
                    return vec![Action::CopyToClipboard(url)];
                }
            }
            KeyCode::Char('f') => {
                let summary = state
                    .detail
                    .movie_id()
                    .and_then(|id| state.summary_for(id))
                    .or_else(|| state.detail.summary());
                if let Some(movie) = summary {
                    return vec![Action::ToggleFavorite(movie)];
                }
            }
            KeyCode::Down | KeyCode::Char('j') => self.scroll = self.scroll.saturating_add(1),
            KeyCode::Up | KeyCode::Char('k') => self.scroll = self.scroll.saturating_sub(1),
            _ => {}
        }
        // Consume all keys while the overlay is open
        vec![]
    }

    fn on_action(&mut self, action: &Action, _state: &AppState) -> Vec<Action> {
        if let Action::OpenMovie(..) = action {
            self.scroll = 0;
        }
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, _focused: bool, state: &AppState) {
        let Some(id) = state.detail.movie_id() else {
            return;
        };

        let (lines, height) = match state.detail.state() {
            DetailState::Loading => (
                vec![
                    Line::from(""),
                    Line::from(Span::styled(
                        " Loading movie details...",
                        Style::default().fg(C_PRIMARY),
                    )),
                ],
                5,
            ),
            DetailState::Error(msg) => (
                vec![
                    Line::from(""),
                    Line::from(Span::styled(format!(" {}", msg), Style::default().fg(C_ERROR))),
                    Line::from(""),
                    Line::from(Span::styled(" esc to close", Style::default().fg(C_MUTED))),
                ],
                7,
            ),
            DetailState::Ready => match state.detail.view() {
                Some(view) => {
                    let lines = Self::ready_lines(&view, state.is_favorite(id));
                    let h = (lines.len() as u16 + 6).min(area.height.saturating_sub(2));
                    (lines, h)
                }
                None => (Vec::new(), 3),
            },
        };

        let popup = centered_rect(80, height, area);
        frame.render_widget(Clear, popup);
        frame.render_widget(
            Paragraph::new(lines)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(C_PANEL_BORDER_FOCUSED))
                        .title(Span::styled(" details ", Style::default().fg(C_MUTED)))
                        .style(Style::default().bg(C_OVERLAY_BG)),
                )
                .wrap(Wrap { trim: false })
                .scroll((self.scroll, 0)),
            popup,
        );
    }
}
