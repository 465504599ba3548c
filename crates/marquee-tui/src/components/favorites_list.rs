//! FavoritesList component: the Favorites workspace.

use marquee_proto::model::FavoriteEntry;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph},
    Frame,
};

use crate::{
    action::Action,
    app_state::AppState,
    card::CardView,
    component::Component,
    theme::{style_selected, style_selected_focused, C_FAVORITE, C_MUTED, C_PRIMARY, C_SECONDARY},
    widgets::{
        pane_chrome::{pane_chrome, Badge},
        scrollable_list::ScrollableList,
    },
};

pub const EMPTY_TITLE: &str = "No favorite movies yet";
pub const EMPTY_HINT: &str = "Start adding movies to your favorites!";

pub struct FavoritesList {
    list: ScrollableList<FavoriteEntry>,
}

impl FavoritesList {
    pub fn new() -> Self {
        Self {
            list: ScrollableList::new(),
        }
    }

    /// Pull the current entries out of the store. The store is the source of
    /// truth, this list only keeps the cursor.
    fn sync(&mut self, state: &AppState) {
        if self.list.items.as_slice() != state.favorites.entries() {
            self.list.set_items(state.favorites.entries().to_vec());
        }
    }
}

impl Component for FavoritesList {
    fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }
        self.sync(state);
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.list.select_up(1),
            KeyCode::Down | KeyCode::Char('j') => self.list.select_down(1),
            KeyCode::Char('g') => self.list.select_first(),
            KeyCode::Char('G') => self.list.select_last(),
            KeyCode::Enter => {
                if let Some(movie) = self.list.selected_item() {
                    return vec![Action::OpenMovie(movie.id, Some(movie.clone()))];
                }
            }
            KeyCode::Char('d') | KeyCode::Delete | KeyCode::Char('f') => {
                if let Some(movie) = self.list.selected_item() {
                    return vec![Action::RemoveFavorite(movie.id)];
                }
            }
            _ => {}
        }
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        self.sync(state);
        let count = state.favorites.len().to_string();
        let block = pane_chrome(
            "favourites",
            Some('1'),
            focused,
            Some(Badge {
                text: &count,
                color: C_FAVORITE,
            }),
        );
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if self.list.is_empty() {
            let lines = vec![
                Line::from(""),
                Line::from(Span::styled(
                    EMPTY_TITLE,
                    Style::default().fg(C_PRIMARY).add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(EMPTY_HINT, Style::default().fg(C_MUTED))),
            ];
            frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
            return;
        }

        let rows = inner.height as usize;
        self.list.ensure_visible(rows);
        let selected = self.list.selected;
        let items: Vec<ListItem> = self
            .list
            .visible_items(rows)
            .into_iter()
            .map(|(idx, movie)| {
                let card = CardView::build(movie, &state.genres, true, &state.image_base_url);
                let title_style = match (idx == selected, focused) {
                    (true, true) => style_selected_focused(),
                    (true, false) => style_selected(),
                    _ => Style::default().fg(C_PRIMARY),
                };
                ListItem::new(Line::from(vec![
                    Span::styled("♥ ", Style::default().fg(C_FAVORITE)),
                    Span::styled(card.title.clone(), title_style),
                    Span::styled(
                        format!("  {} • {}", card.rating, card.year),
                        Style::default().fg(C_SECONDARY),
                    ),
                ]))
            })
            .collect();
        frame.render_widget(List::new(items), inner);
    }
}
