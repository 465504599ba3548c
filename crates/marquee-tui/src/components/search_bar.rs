//! SearchBar component: the query input at the top of the Home workspace.

use ratatui::crossterm::event::{KeyEvent, KeyEventKind};
use ratatui::{layout::Rect, Frame};

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    search::SearchStatus,
    theme::{C_ERROR, C_FILTER_FG},
    widgets::{
        pane_chrome::{pane_chrome, Badge},
        search_input::{InputAction, SearchInput},
    },
};

pub struct SearchBar {
    input: SearchInput,
}

impl SearchBar {
    pub fn new() -> Self {
        Self {
            input: SearchInput::default(),
        }
    }

    pub fn text(&self) -> &str {
        self.input.text()
    }
}

impl Component for SearchBar {
    fn handle_key(&mut self, key: KeyEvent, _state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }
        match self.input.handle_key(key) {
            InputAction::Changed(value) => vec![Action::SearchChanged(value)],
            InputAction::Confirmed | InputAction::Cancelled => {
                vec![Action::FocusPane(ComponentId::MovieList)]
            }
            InputAction::None => vec![],
        }
    }

    fn on_action(&mut self, action: &Action, _state: &AppState) -> Vec<Action> {
        if let Action::ClearSearch = action {
            self.input.clear();
        }
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool, state: &AppState) {
        let badge = match state.search.status() {
            SearchStatus::Loading => Some(Badge {
                text: "searching",
                color: C_FILTER_FG,
            }),
            SearchStatus::Errored(_) => Some(Badge {
                text: "error",
                color: C_ERROR,
            }),
            _ => None,
        };
        let block = pane_chrome("search", Some('1'), focused, badge);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        self.input.draw(frame, inner, focused);
    }
}
