//! MovieList component: popular movies or search results as two-line cards.

use marquee_proto::model::MovieSummary;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::{
    action::Action,
    app_state::AppState,
    card::CardView,
    component::Component,
    search::SearchStatus,
    theme::{
        style_selected, style_selected_focused, C_ERROR, C_FAVORITE, C_FILTER_FG, C_MUTED,
        C_PRIMARY, C_RATING, C_SECONDARY,
    },
    widgets::{
        pane_chrome::{pane_chrome, Badge},
        scrollable_list::ScrollableList,
    },
};

const ROW_HEIGHT: usize = 2;

pub struct MovieList {
    pub list: ScrollableList<MovieSummary>,
}

impl MovieList {
    pub fn new() -> Self {
        Self {
            list: ScrollableList::new(),
        }
    }

    /// Called by the App when a fresh result list has been applied.
    pub fn set_movies(&mut self, movies: Vec<MovieSummary>) {
        self.list.set_items(movies);
        self.list.select_first();
    }

    fn render_card(card: &CardView, selected: bool, focused: bool) -> ListItem<'static> {
        let title_style = match (selected, focused) {
            (true, true) => style_selected_focused(),
            (true, false) => style_selected(),
            _ => Style::default().fg(C_PRIMARY),
        };
        let marker = if selected { "▌ " } else { "  " };
        let mut title = vec![
            Span::styled(marker, Style::default().fg(C_FILTER_FG)),
            Span::styled(card.title.clone(), title_style),
        ];
        if card.favorite {
            title.push(Span::styled(" ♥", Style::default().fg(C_FAVORITE)));
        }
        let meta = Line::from(vec![
            Span::raw("  "),
            Span::styled("★ ", Style::default().fg(C_RATING)),
            Span::styled(card.rating.clone(), Style::default().fg(C_SECONDARY)),
            Span::styled(" • ", Style::default().fg(C_MUTED)),
            Span::styled(card.year.clone(), Style::default().fg(C_SECONDARY)),
            Span::styled(" • ", Style::default().fg(C_MUTED)),
            Span::styled(card.genre.clone(), Style::default().fg(C_SECONDARY)),
        ]);
        ListItem::new(vec![Line::from(title), meta])
    }
}

impl Component for MovieList {
    fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }
        let step = if key.modifiers.contains(KeyModifiers::SHIFT) {
            5
        } else {
            1
        };
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.list.select_up(step),
            KeyCode::Down | KeyCode::Char('j') => self.list.select_down(step),
            KeyCode::PageUp => self.list.select_up(10),
            KeyCode::PageDown => self.list.select_down(10),
            KeyCode::Char('g') => self.list.select_first(),
            KeyCode::Char('G') => self.list.select_last(),
            KeyCode::Enter => {
                if let Some(movie) = self.list.selected_item() {
                    return vec![Action::OpenMovie(movie.id, Some(movie.clone()))];
                }
            }
            KeyCode::Char('f') => {
                if let Some(movie) = self.list.selected_item() {
                    return vec![Action::ToggleFavorite(movie.clone())];
                }
            }
            KeyCode::Char('p') => {
                let poster = self.list.selected_item().and_then(|movie| {
                    CardView::build(movie, &state.genres, false, &state.image_base_url).poster_url
                });
                if let Some(url) = poster {
                    return vec![Action::CopyToClipboard(url)];
                }
            }
            _ => {}
        }
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        let heading = state.search.heading();
        let count = format!("{}", self.list.len());
        let badge = match state.search.status() {
            SearchStatus::Loading => Some(Badge {
                text: "loading",
                color: C_FILTER_FG,
            }),
            SearchStatus::Loaded => Some(Badge {
                text: &count,
                color: C_MUTED,
            }),
            _ => None,
        };
        let block = pane_chrome(&heading, Some('3'), focused, badge);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let message = match state.search.status() {
            SearchStatus::Idle | SearchStatus::Loading if self.list.is_empty() => {
                Some(("  loading movies…".to_string(), C_MUTED))
            }
            SearchStatus::Errored(msg) => Some((format!("  {}", msg), C_ERROR)),
            SearchStatus::Loaded if self.list.is_empty() => {
                Some(("  no movies found".to_string(), C_MUTED))
            }
            _ => None,
        };
        if let Some((text, color)) = message {
            frame.render_widget(
                Paragraph::new(Span::styled(
                    text,
                    Style::default().fg(color).add_modifier(Modifier::ITALIC),
                ))
                .wrap(Wrap { trim: false }),
                inner,
            );
            return;
        }

        let rows = (inner.height as usize / ROW_HEIGHT).max(1);
        self.list.ensure_visible(rows);
        let selected = self.list.selected;
        let items: Vec<ListItem> = self
            .list
            .visible_items(rows)
            .into_iter()
            .map(|(idx, movie)| {
                let card = CardView::build(
                    movie,
                    &state.genres,
                    state.is_favorite(movie.id),
                    &state.image_base_url,
                );
                Self::render_card(&card, idx == selected, focused)
            })
            .collect();
        frame.render_widget(List::new(items), inner);
    }
}
