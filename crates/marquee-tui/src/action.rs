//! Action enum: user intents and internal events flowing through the App.

use marquee_proto::model::MovieSummary;

/// Unique identifier for a focusable component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentId {
    SearchBar,
    TrendingStrip,
    MovieList,
    FavoritesList,
}

/// Components produce Actions; the App dispatches them.
#[derive(Debug, Clone)]
pub enum Action {
    // ── Search ───────────────────────────────────────────────────────────────
    SearchChanged(String),
    ClearSearch,

    // ── Navigation ───────────────────────────────────────────────────────────
    FocusNext,
    FocusPrev,
    FocusPane(ComponentId),

    // ── Selection / overlay ──────────────────────────────────────────────────
    /// Open the detail overlay for an id; the summary is present when the
    /// click should be counted.
    OpenMovie(u64, Option<MovieSummary>),
    CloseMovie,

    // ── Favorites ────────────────────────────────────────────────────────────
    ToggleFavorite(MovieSummary),
    RemoveFavorite(u64),

    // ── Trending ─────────────────────────────────────────────────────────────
    TrendingNext,
    TrendingPrev,

    // ── Workspace ────────────────────────────────────────────────────────────
    SwitchWorkspace(Workspace),

    // ── UI toggles ───────────────────────────────────────────────────────────
    ToggleHelp,
    ToggleKeys,
    CopyToClipboard(String),

    // ── System ───────────────────────────────────────────────────────────────
    Quit,
    Resize(u16, u16),
}

/// Which workspace (tab) is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Workspace {
    Home,
    Favorites,
}

impl Workspace {
    pub fn label(self) -> &'static str {
        match self {
            Self::Home => "HOME",
            Self::Favorites => "FAVORITES",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Home => Self::Favorites,
            Self::Favorites => Self::Home,
        }
    }
}
