//! AppState: shared read-only data passed to all components during render/event.
//!
//! Components read this but never mutate it. The App event loop is the only
//! writer.

use marquee_proto::favorites::FavoritesStore;
use marquee_proto::model::{GenreTable, MovieSummary};

use crate::action::Workspace;
use crate::detail::DetailOverlay;
use crate::search::SearchPipeline;
use crate::trending::TrendingFeed;
use crate::widgets::status_bar::InputMode;

pub struct AppState {
    // ── Data ────────────────────────────────────────────────────────────────
    pub search: SearchPipeline,
    pub genres: GenreTable,
    /// Image host prefix for poster links, from the catalog config.
    pub image_base_url: String,
    pub trending: TrendingFeed,
    pub favorites: FavoritesStore,

    // ── Overlay ─────────────────────────────────────────────────────────────
    pub detail: DetailOverlay,

    // ── UI mode ─────────────────────────────────────────────────────────────
    pub workspace: Workspace,
    pub input_mode: InputMode,
}

impl AppState {
    pub fn is_favorite(&self, id: u64) -> bool {
        self.favorites.is_favorite(id)
    }

    /// Summary for `id` from whatever list currently knows it. Used to give
    /// the favorite toggle in the overlay a snapshot to store.
    pub fn summary_for(&self, id: u64) -> Option<MovieSummary> {
        self.search
            .results()
            .iter()
            .chain(self.favorites.entries())
            .find(|m| m.id == id)
            .cloned()
    }
}
