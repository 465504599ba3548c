//! Favorites store: the user's saved movies, persisted to one durable slot.
//!
//! The whole collection is read once by `load()` and written back as a full
//! snapshot after every mutation. Until `load()` has run, mutations stay in
//! memory only, so an empty startup collection can never clobber the slot.

use tracing::{debug, warn};

use crate::model::{FavoriteEntry, MovieSummary};
use crate::storage::{FileSlotStore, SlotStore, StorageError};

/// Slot key holding the JSON array of favorites.
pub const FAVORITES_SLOT: &str = "favorites";

pub struct FavoritesStore<S: SlotStore = FileSlotStore> {
    slots: S,
    entries: Vec<FavoriteEntry>,
    initialized: bool,
}

impl<S: SlotStore> FavoritesStore<S> {
    pub fn new(slots: S) -> Self {
        Self {
            slots,
            entries: Vec::new(),
            initialized: false,
        }
    }

    /// Read persisted favorites. A payload that is not valid UTF-8 or fails
    /// to parse is discarded and its slot cleared; the collection then starts
    /// empty. Any other read failure leaves the store uninitialized so the
    /// unreadable slot is never overwritten.
    pub fn load(&mut self) {
        match self.slots.get(FAVORITES_SLOT) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<FavoriteEntry>>(&raw) {
                Ok(entries) => {
                    debug!("[favorites] loaded {} entries", entries.len());
                    self.entries = entries;
                }
                Err(e) => {
                    warn!("[favorites] corrupted slot discarded: {}", e);
                    self.discard_slot();
                }
            },
            Ok(None) => {
                debug!("[favorites] no stored favorites");
            }
            Err(e @ StorageError::Undecodable(_)) => {
                warn!("[favorites] corrupted slot discarded: {}", e);
                self.discard_slot();
            }
            Err(e) => {
                warn!("[favorites] failed to read slot, changes stay in memory: {}", e);
                return;
            }
        }
        self.initialized = true;
    }

    fn discard_slot(&mut self) {
        if let Err(e) = self.slots.remove(FAVORITES_SLOT) {
            warn!("[favorites] failed to clear corrupted slot: {}", e);
        }
        self.entries.clear();
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Append a snapshot of `movie`. Returns `false` (and changes nothing)
    /// when the id is already a favorite.
    pub fn add(&mut self, movie: &MovieSummary) -> bool {
        if self.is_favorite(movie.id) {
            return false;
        }
        self.entries.push(movie.clone());
        self.persist();
        true
    }

    /// Drop every entry with `id`. Returns whether anything was removed.
    pub fn remove(&mut self, id: u64) -> bool {
        let before = self.entries.len();
        self.entries.retain(|m| m.id != id);
        let removed = self.entries.len() != before;
        if removed {
            self.persist();
        }
        removed
    }

    /// Add when absent, remove when present. Returns the new favorite state.
    pub fn toggle(&mut self, movie: &MovieSummary) -> bool {
        if self.is_favorite(movie.id) {
            self.remove(movie.id);
            false
        } else {
            self.add(movie)
        }
    }

    pub fn is_favorite(&self, id: u64) -> bool {
        self.entries.iter().any(|m| m.id == id)
    }

    pub fn entries(&self) -> &[FavoriteEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn slots(&self) -> &S {
        &self.slots
    }

    fn persist(&mut self) {
        if !self.initialized {
            return;
        }
        let result = serde_json::to_string(&self.entries)
            .map_err(StorageError::from)
            .and_then(|json| self.slots.set(FAVORITES_SLOT, &json));
        if let Err(e) = result {
            warn!("[favorites] failed to persist: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemorySlotStore;

    fn movie(id: u64, title: &str) -> MovieSummary {
        MovieSummary {
            id,
            title: title.to_string(),
            vote_average: Some(7.5),
            poster_path: Some(format!("/{id}.jpg")),
            release_date: Some("1999-03-31".to_string()),
            genre_ids: vec![28, 878],
        }
    }

    fn loaded(slots: MemorySlotStore) -> FavoritesStore<MemorySlotStore> {
        let mut store = FavoritesStore::new(slots);
        store.load();
        store
    }

    #[test]
    fn membership_follows_add_and_remove() {
        let mut store = loaded(MemorySlotStore::new());
        assert!(!store.is_favorite(603));
        assert!(store.add(&movie(603, "The Matrix")));
        assert!(store.is_favorite(603));
        assert!(store.remove(603));
        assert!(!store.is_favorite(603));
        assert!(!store.remove(603));
    }

    #[test]
    fn duplicate_add_is_ignored() {
        let mut store = loaded(MemorySlotStore::new());
        assert!(store.add(&movie(1, "a")));
        assert!(!store.add(&movie(1, "a again")));
        assert_eq!(store.len(), 1);
        assert_eq!(store.entries()[0].title, "a");
    }

    #[test]
    fn insertion_order_is_kept() {
        let mut store = loaded(MemorySlotStore::new());
        store.add(&movie(3, "c"));
        store.add(&movie(1, "a"));
        store.add(&movie(2, "b"));
        let ids: Vec<u64> = store.entries().iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn every_mutation_writes_full_snapshot() {
        let mut store = loaded(MemorySlotStore::new());
        store.add(&movie(1, "a"));
        store.add(&movie(2, "b"));
        store.remove(1);
        let raw = store.slots().raw(FAVORITES_SLOT).unwrap();
        let persisted: Vec<MovieSummary> = serde_json::from_str(&raw).unwrap();
        assert_eq!(persisted, vec![movie(2, "b")]);
    }

    #[test]
    fn reload_round_trips_field_for_field() {
        let mut store = loaded(MemorySlotStore::new());
        let mut sparse = movie(9, "Sparse");
        sparse.vote_average = None;
        sparse.poster_path = None;
        sparse.release_date = None;
        sparse.genre_ids.clear();
        store.add(&movie(1, "Alien"));
        store.add(&sparse);

        let raw = store.slots().raw(FAVORITES_SLOT).unwrap();
        let reloaded = loaded(MemorySlotStore::with_slot(FAVORITES_SLOT, &raw));
        assert_eq!(reloaded.entries(), store.entries());
    }

    #[test]
    fn corrupted_slot_is_cleared() {
        let store = loaded(MemorySlotStore::with_slot(FAVORITES_SLOT, "{not json"));
        assert!(store.is_empty());
        assert!(store.is_initialized());
        assert_eq!(store.slots().raw(FAVORITES_SLOT), None);
    }

    #[test]
    fn nothing_persists_before_load() {
        let existing = serde_json::to_string(&vec![movie(5, "kept")]).unwrap();
        let mut store = FavoritesStore::new(MemorySlotStore::with_slot(FAVORITES_SLOT, &existing));
        store.add(&movie(6, "early"));
        assert_eq!(store.slots().raw(FAVORITES_SLOT).as_deref(), Some(existing.as_str()));
    }

    /// Slot that cannot be read at all; counts attempted writes.
    #[derive(Default)]
    struct UnreadableSlots {
        writes: usize,
    }

    impl SlotStore for UnreadableSlots {
        fn get(&self, _key: &str) -> crate::storage::Result<Option<String>> {
            Err(std::io::Error::from(std::io::ErrorKind::PermissionDenied).into())
        }

        fn set(&mut self, _key: &str, _value: &str) -> crate::storage::Result<()> {
            self.writes += 1;
            Ok(())
        }

        fn remove(&mut self, _key: &str) -> crate::storage::Result<()> {
            self.writes += 1;
            Ok(())
        }
    }

    #[test]
    fn unreadable_slot_is_never_overwritten() {
        let mut store = FavoritesStore::new(UnreadableSlots::default());
        store.load();
        assert!(!store.is_initialized());

        assert!(store.add(&movie(7, "kept in memory")));
        assert!(store.is_favorite(7));
        assert_eq!(store.slots().writes, 0);
    }

    #[test]
    fn toggle_flips_state() {
        let mut store = loaded(MemorySlotStore::new());
        assert!(store.toggle(&movie(4, "d")));
        assert!(!store.toggle(&movie(4, "d")));
        assert!(store.is_empty());
    }
}
