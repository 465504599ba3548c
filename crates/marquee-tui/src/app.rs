//! App: component-based event loop.
//!
//! - `App` owns all components and `AppState` (read-only for components).
//! - A `tokio::mpsc` channel carries `AppMessage`s in from the terminal reader,
//!   the debounce timer and every spawned network fetch.
//! - The loop draws a frame, then awaits the next message or UI tick.
//! - Components return `Vec<Action>`; the App applies each Action.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use marquee_proto::catalog::CatalogClient;
use marquee_proto::config::Config;
use marquee_proto::counter::{CounterError, TrendingStore, TRENDING_LIMIT};
use marquee_proto::favorites::FavoritesStore;
use marquee_proto::model::{Genre, GenreTable, MovieDetail, MovieSummary, TrendingEntry, Video};
use ratatui::crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    Terminal,
};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::{
    action::{Action, ComponentId, Workspace},
    app_state::AppState,
    component::Component,
    components::{
        detail_overlay::DetailOverlayView, favorites_list::FavoritesList, header,
        help_overlay::HelpOverlay, movie_list::MovieList, search_bar::SearchBar,
        trending_strip::TrendingStrip,
    },
    detail::DetailOverlay,
    focus::FocusRing,
    search::{SearchPipeline, SearchRequest},
    selection::Selection,
    trending::TrendingFeed,
    widgets::{status_bar::{self, InputMode}, toast::ToastManager},
};

// ── Internal event bus ────────────────────────────────────────────────────────

pub(crate) enum AppMessage {
    Event(Event),
    /// The debounce timer fired with this input value.
    QuerySettled(String),
    MoviesLoaded {
        token: u64,
        result: Result<Vec<MovieSummary>, String>,
    },
    GenresLoaded(Result<Vec<Genre>, String>),
    TrendingLoaded(Vec<TrendingEntry>),
    DetailLoaded {
        token: u64,
        result: Result<MovieDetail, String>,
    },
    VideosLoaded {
        token: u64,
        result: Result<Vec<Video>, String>,
    },
}

pub struct App {
    state: AppState,
    catalog: CatalogClient,
    selection: Selection,

    // ── Components ──────────────────────────────────────────────────────────
    search_bar: SearchBar,
    trending_strip: TrendingStrip,
    movie_list: MovieList,
    favorites_list: FavoritesList,
    detail_view: DetailOverlayView,
    help_overlay: HelpOverlay,

    // ── UI ──────────────────────────────────────────────────────────────────
    focus: FocusRing,
    toast: ToastManager,
    show_keys_bar: bool,
    should_quit: bool,
    genres_in_flight: bool,

    tx: mpsc::Sender<AppMessage>,
    rx: Option<mpsc::Receiver<AppMessage>>,
}

impl App {
    pub fn new(
        config: &Config,
        catalog: CatalogClient,
        counter: Arc<dyn TrendingStore>,
        favorites: FavoritesStore,
    ) -> Self {
        let (tx, rx) = mpsc::channel::<AppMessage>(1024);
        let state = AppState {
            search: SearchPipeline::new(Duration::from_millis(config.search.debounce_ms)),
            genres: GenreTable::default(),
            image_base_url: config.catalog.image_base_url.clone(),
            trending: TrendingFeed::new(),
            favorites,
            detail: DetailOverlay::new(),
            workspace: Workspace::Home,
            input_mode: InputMode::Normal,
        };
        let mut app = Self {
            state,
            catalog,
            selection: Selection::new(counter),
            search_bar: SearchBar::new(),
            trending_strip: TrendingStrip::new(),
            movie_list: MovieList::new(),
            favorites_list: FavoritesList::new(),
            detail_view: DetailOverlayView::new(),
            help_overlay: HelpOverlay::new(),
            focus: FocusRing::default(),
            toast: ToastManager::new(),
            show_keys_bar: true,
            should_quit: false,
            genres_in_flight: false,
            tx,
            rx: Some(rx),
        };
        app.refresh_focus_ring();
        app.focus.set(ComponentId::MovieList);
        app
    }

    // ── Main run loop ─────────────────────────────────────────────────────────

    pub async fn run(mut self) -> anyhow::Result<()> {
        let mut rx = self
            .rx
            .take()
            .ok_or_else(|| anyhow::anyhow!("app already running"))?;

        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        debug!("run(): terminal created, size={:?}", terminal.size());

        // ── Background task: keyboard events ──────────────────────────────────
        let event_tx = self.tx.clone();
        tokio::task::spawn_blocking(move || loop {
            match event::read() {
                Ok(ev) => {
                    if event_tx.blocking_send(AppMessage::Event(ev)).is_err() {
                        break;
                    }
                }
                Err(_) => break,
            }
        });

        self.start();

        // Toast expiry
        let mut ui_tick = tokio::time::interval(Duration::from_millis(100));
        ui_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        // ── Main loop ─────────────────────────────────────────────────────────
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal.draw(|f| self.draw(f))?;
            }

            if self.should_quit {
                break;
            }

            tokio::select! {
                Some(msg) = rx.recv() => {
                    needs_redraw = self.handle_message(msg);
                    // Drain whatever else is queued before the next frame.
                    while let Ok(next) = rx.try_recv() {
                        needs_redraw |= self.handle_message(next);
                    }
                }
                _ = ui_tick.tick() => {
                    needs_redraw = self.toast.tick();
                }
            }
        }

        // ── Teardown ──────────────────────────────────────────────────────────
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;
        info!("marquee exiting");
        Ok(())
    }

    /// Mount: the empty-query fetch, the genre table and the trending list.
    fn start(&mut self) {
        let request = self.state.search.start();
        self.spawn_search(request);
        self.spawn_trending();
    }

    // ── Background fetches ────────────────────────────────────────────────────

    fn spawn_search(&mut self, request: SearchRequest) {
        if self.state.genres.is_empty() && !self.genres_in_flight {
            self.spawn_genres();
        }
        let catalog = self.catalog.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = catalog
                .movies(&request.query)
                .await
                .map_err(|e| e.to_string());
            let _ = tx
                .send(AppMessage::MoviesLoaded {
                    token: request.token,
                    result,
                })
                .await;
        });
    }

    fn spawn_genres(&mut self) {
        self.genres_in_flight = true;
        let catalog = self.catalog.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = catalog.genres().await.map_err(|e| e.to_string());
            let _ = tx.send(AppMessage::GenresLoaded(result)).await;
        });
    }

    fn spawn_trending(&self) {
        let counter = Arc::clone(self.selection.counter());
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let entries = match counter.top(TRENDING_LIMIT).await {
                Ok(entries) => entries,
                Err(CounterError::NotConfigured) => {
                    debug!("[trending] counter service not configured");
                    Vec::new()
                }
                Err(e) => {
                    warn!("[trending] failed to load trending movies: {}", e);
                    Vec::new()
                }
            };
            let _ = tx.send(AppMessage::TrendingLoaded(entries)).await;
        });
    }

    /// Detail and videos run concurrently; each posts as soon as it settles.
    fn spawn_detail(&self, token: u64, id: u64) {
        let catalog = self.catalog.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let detail = async {
                let result = catalog.movie_detail(id).await.map_err(|e| e.to_string());
                let _ = tx.send(AppMessage::DetailLoaded { token, result }).await;
            };
            let videos = async {
                let result = catalog.movie_videos(id).await.map_err(|e| e.to_string());
                let _ = tx.send(AppMessage::VideosLoaded { token, result }).await;
            };
            futures_util::future::join(detail, videos).await;
        });
    }

    // ── Message handler ───────────────────────────────────────────────────────

    /// Returns `true` if the message requires a redraw.
    fn handle_message(&mut self, msg: AppMessage) -> bool {
        match msg {
            AppMessage::Event(ev) => match ev {
                Event::Key(key) => {
                    if key.kind == KeyEventKind::Release {
                        return false;
                    }
                    let actions = self.handle_key(key);
                    for a in actions {
                        self.dispatch(a);
                    }
                }
                Event::Resize(w, h) => self.dispatch(Action::Resize(w, h)),
                _ => return false,
            },

            AppMessage::QuerySettled(value) => {
                if let Some(request) = self.state.search.on_settled(value) {
                    self.spawn_search(request);
                }
            }

            AppMessage::MoviesLoaded { token, result } => {
                let failed = result.is_err();
                if !self.state.search.on_response(token, result) {
                    return false;
                }
                self.movie_list
                    .set_movies(self.state.search.results().to_vec());
                if failed {
                    self.toast
                        .error(crate::search::SEARCH_ERROR_MESSAGE.to_string());
                }
            }

            AppMessage::GenresLoaded(result) => {
                self.genres_in_flight = false;
                match result {
                    Ok(genres) => {
                        debug!("[genres] loaded {}", genres.len());
                        self.state.genres = GenreTable::new(genres);
                    }
                    Err(e) => warn!("[genres] failed to load genre table: {}", e),
                }
            }

            AppMessage::TrendingLoaded(entries) => {
                debug!("[trending] {} entries", entries.len());
                self.state.trending.set_entries(entries);
                self.refresh_focus_ring();
            }

            AppMessage::DetailLoaded { token, result } => {
                if !self.selection.is_current(token) {
                    return false;
                }
                return self.state.detail.on_detail(token, result);
            }

            AppMessage::VideosLoaded { token, result } => {
                if !self.selection.is_current(token) {
                    return false;
                }
                return self.state.detail.on_videos(token, result);
            }
        }
        true
    }

    // ── Key handling ──────────────────────────────────────────────────────────

    fn handle_key(&mut self, key: KeyEvent) -> Vec<Action> {
        if key.code == KeyCode::Char('c') && key.modifiers == KeyModifiers::CONTROL {
            return vec![Action::Quit];
        }

        // Help overlay captures all keys when visible
        if self.help_overlay.visible {
            let actions = self.help_overlay.handle_key(key, &self.state);
            if !actions.is_empty() {
                return actions;
            }
            return vec![Action::ToggleHelp];
        }

        // Detail overlay is modal
        if self.selection.is_open() {
            return self.detail_view.handle_key(key, &self.state);
        }

        match key.code {
            KeyCode::Tab => return vec![Action::FocusNext],
            KeyCode::BackTab => return vec![Action::FocusPrev],
            _ => {}
        }

        if self.state.input_mode == InputMode::Normal {
            match key.code {
                KeyCode::Char('q') => return vec![Action::Quit],
                KeyCode::Char('?') => return vec![Action::ToggleHelp],
                KeyCode::Char('K') => return vec![Action::ToggleKeys],
                KeyCode::Char('F') => {
                    return vec![Action::SwitchWorkspace(self.state.workspace.toggled())]
                }
                KeyCode::Home => {
                    return vec![
                        Action::SwitchWorkspace(Workspace::Home),
                        Action::ClearSearch,
                    ]
                }
                KeyCode::Char('/') if self.state.workspace == Workspace::Home => {
                    return vec![Action::FocusPane(ComponentId::SearchBar)]
                }
                KeyCode::Char('1') => return vec![Action::FocusPane(ComponentId::SearchBar)],
                KeyCode::Char('2') => return vec![Action::FocusPane(ComponentId::TrendingStrip)],
                KeyCode::Char('3') => return vec![Action::FocusPane(ComponentId::MovieList)],
                _ => {}
            }
        }

        let s = &self.state;
        match self.focus.current() {
            Some(ComponentId::SearchBar) => self.search_bar.handle_key(key, s),
            Some(ComponentId::TrendingStrip) => self.trending_strip.handle_key(key, s),
            Some(ComponentId::MovieList) => self.movie_list.handle_key(key, s),
            Some(ComponentId::FavoritesList) => self.favorites_list.handle_key(key, s),
            _ => vec![],
        }
    }

    // ── Action dispatcher ─────────────────────────────────────────────────────

    fn dispatch(&mut self, action: Action) {
        let secondary: Vec<Action> = {
            let s = &self.state;
            let mut out = Vec::new();
            out.extend(self.search_bar.on_action(&action, s));
            out.extend(self.trending_strip.on_action(&action, s));
            out.extend(self.movie_list.on_action(&action, s));
            out.extend(self.favorites_list.on_action(&action, s));
            out.extend(self.detail_view.on_action(&action, s));
            out.extend(self.help_overlay.on_action(&action, s));
            out
        };

        self.apply_action(action);

        for a in secondary {
            self.apply_action(a);
        }
    }

    fn apply_action(&mut self, action: Action) {
        match &action {
            Action::Resize(..) => {}
            _ => debug!("apply_action: {:?}", action),
        }
        match action {
            // ── Search ────────────────────────────────────────────────────────
            Action::SearchChanged(value) => {
                self.state
                    .search
                    .on_input(value, &self.tx, AppMessage::QuerySettled);
                self.refresh_focus_ring();
            }
            Action::ClearSearch => {
                self.state.search.clear(&self.tx, AppMessage::QuerySettled);
                self.refresh_focus_ring();
            }

            // ── Navigation ────────────────────────────────────────────────────
            Action::FocusNext => {
                self.focus.next();
                self.sync_input_mode();
            }
            Action::FocusPrev => {
                self.focus.prev();
                self.sync_input_mode();
            }
            Action::FocusPane(id) => {
                self.focus.set(id);
                self.sync_input_mode();
            }

            // ── Selection / overlay ───────────────────────────────────────────
            Action::OpenMovie(id, movie) => {
                let token = self.selection.open(id, movie);
                self.state.detail.begin(token, id);
                self.spawn_detail(token, id);
                self.sync_input_mode();
            }
            Action::CloseMovie => {
                self.selection.close();
                self.state.detail.clear();
                self.sync_input_mode();
            }

            // ── Favorites ─────────────────────────────────────────────────────
            Action::ToggleFavorite(movie) => {
                if self.state.favorites.toggle(&movie) {
                    self.toast.success(format!("added to favourites: {}", movie.title));
                } else {
                    self.toast.info(format!("removed from favourites: {}", movie.title));
                }
            }
            Action::RemoveFavorite(id) => {
                if self.state.favorites.remove(id) {
                    self.toast.info("removed from favourites");
                }
            }

            // ── Trending ──────────────────────────────────────────────────────
            Action::TrendingNext => self.state.trending.next(),
            Action::TrendingPrev => self.state.trending.prev(),

            // ── Workspace ─────────────────────────────────────────────────────
            Action::SwitchWorkspace(ws) => {
                self.state.workspace = ws;
                self.refresh_focus_ring();
                let default = match ws {
                    Workspace::Home => ComponentId::MovieList,
                    Workspace::Favorites => ComponentId::FavoritesList,
                };
                self.focus.set(default);
                self.sync_input_mode();
            }

            // ── UI toggles ────────────────────────────────────────────────────
            Action::ToggleHelp => {}
            Action::ToggleKeys => self.show_keys_bar = !self.show_keys_bar,
            Action::CopyToClipboard(text) => {
                match arboard::Clipboard::new().and_then(|mut cb| cb.set_text(text.clone())) {
                    Ok(()) => self.toast.success(format!("copied: {}", text)),
                    Err(e) => {
                        warn!("clipboard error: {}", e);
                        self.toast.error(format!("clipboard error: {}", e));
                    }
                }
            }

            // ── System ────────────────────────────────────────────────────────
            Action::Quit => self.should_quit = true,
            Action::Resize(..) => {}
        }
    }

    /// Home shows the trending strip only outside search mode and only when
    /// there is something in it.
    fn trending_visible(&self) -> bool {
        !self.state.search.is_search_mode() && !self.state.trending.is_empty()
    }

    fn refresh_focus_ring(&mut self) {
        let items = match self.state.workspace {
            Workspace::Home => {
                let mut items = vec![ComponentId::SearchBar];
                if self.trending_visible() {
                    items.push(ComponentId::TrendingStrip);
                }
                items.push(ComponentId::MovieList);
                items
            }
            Workspace::Favorites => vec![ComponentId::FavoritesList],
        };
        self.focus.set_items(items);
    }

    fn sync_input_mode(&mut self) {
        self.state.input_mode = if self.selection.is_open() {
            InputMode::Overlay
        } else if self.focus.is_focused(ComponentId::SearchBar) {
            InputMode::Search
        } else {
            InputMode::Normal
        };
    }

    // ── Drawing ───────────────────────────────────────────────────────────────

    fn draw(&mut self, frame: &mut ratatui::Frame) {
        use crate::theme::C_BG;
        use ratatui::widgets::Block;
        let area = frame.area();

        frame.render_widget(
            Block::default().style(ratatui::style::Style::default().bg(C_BG)),
            area,
        );

        let status_h = if self.show_keys_bar { 1u16 } else { 0 };
        let outer = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(status_h),
            ])
            .split(area);

        header::draw(frame, outer[0], &self.state);

        match self.state.workspace {
            Workspace::Home => self.draw_home(frame, outer[1]),
            Workspace::Favorites => {
                let focused = self.focus.is_focused(ComponentId::FavoritesList);
                self.favorites_list
                    .draw(frame, outer[1], focused, &self.state);
            }
        }

        if self.show_keys_bar {
            status_bar::draw_keys_bar(
                frame,
                outer[2],
                self.state.input_mode,
                self.state.workspace,
            );
        }

        if self.selection.is_open() {
            self.detail_view.draw(frame, area, true, &self.state);
        }

        if self.help_overlay.visible {
            self.help_overlay.draw(frame, area, false, &self.state);
        }

        self.toast.draw(frame, area);
    }

    fn draw_home(&mut self, frame: &mut ratatui::Frame, area: Rect) {
        let trending_h = if self.trending_visible() { 4 } else { 0 };
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(trending_h),
                Constraint::Min(0),
            ])
            .split(area);

        let overlay_open = self.selection.is_open();
        let focused = |id| !overlay_open && self.focus.is_focused(id);
        let (search_f, trending_f, list_f) = (
            focused(ComponentId::SearchBar),
            focused(ComponentId::TrendingStrip),
            focused(ComponentId::MovieList),
        );

        self.search_bar.draw(frame, rows[0], search_f, &self.state);
        if trending_h > 0 {
            self.trending_strip
                .draw(frame, rows[1], trending_f, &self.state);
        }
        self.movie_list.draw(frame, rows[2], list_f, &self.state);
    }
}
