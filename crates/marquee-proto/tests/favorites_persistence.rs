use marquee_proto::favorites::{FavoritesStore, FAVORITES_SLOT};
use marquee_proto::model::MovieSummary;
use marquee_proto::storage::{FileSlotStore, SlotStore};

fn movie(id: u64, title: &str) -> MovieSummary {
    MovieSummary {
        id,
        title: title.to_string(),
        vote_average: Some(6.25),
        poster_path: Some(format!("/poster-{id}.jpg")),
        release_date: Some("2008-07-16".to_string()),
        genre_ids: vec![18, 80],
    }
}

#[test]
fn favorites_survive_a_restart() {
    let dir = tempfile::tempdir().unwrap();

    let mut first = FavoritesStore::new(FileSlotStore::new(dir.path()));
    first.load();
    first.add(&movie(155, "The Dark Knight"));
    first.add(&movie(272, "Batman Begins"));
    first.remove(155);
    first.add(&movie(49026, "The Dark Knight Rises"));

    let mut second = FavoritesStore::new(FileSlotStore::new(dir.path()));
    second.load();
    assert_eq!(second.entries(), first.entries());
    assert!(second.is_favorite(272));
    assert!(!second.is_favorite(155));
}

#[test]
fn corrupted_file_is_discarded_and_removed() {
    let dir = tempfile::tempdir().unwrap();
    let mut slots = FileSlotStore::new(dir.path());
    slots.set(FAVORITES_SLOT, "[{\"id\": \"not a number\"}]").unwrap();
    let path = slots.slot_path(FAVORITES_SLOT);
    assert!(path.exists());

    let mut store = FavoritesStore::new(slots);
    store.load();
    assert!(store.is_empty());
    assert!(!path.exists());

    // The store keeps working after recovery.
    store.add(&movie(1, "Fresh"));
    assert!(path.exists());
}

#[test]
fn first_run_does_not_create_the_slot() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = FavoritesStore::new(FileSlotStore::new(dir.path()));
    store.load();
    assert!(store.is_empty());
    assert!(!store.slots().slot_path(FAVORITES_SLOT).exists());
}

#[test]
fn non_utf8_file_is_discarded_and_removed() {
    let dir = tempfile::tempdir().unwrap();
    let slots = FileSlotStore::new(dir.path());
    let path = slots.slot_path(FAVORITES_SLOT);
    std::fs::write(&path, [0xff, 0xfe, b'[', b']']).unwrap();

    let mut store = FavoritesStore::new(slots);
    store.load();
    assert!(store.is_empty());
    assert!(store.is_initialized());
    assert!(!path.exists());

    store.add(&movie(2, "After recovery"));
    let raw = std::fs::read_to_string(&path).unwrap();
    assert!(raw.contains("After recovery"));
}
