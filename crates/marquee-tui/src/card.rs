//! Card view: what a movie row shows, derived purely from the summary.

use marquee_proto::model::{GenreTable, MovieSummary};

use crate::detail::{format_rating, NOT_AVAILABLE};

/// Poster size used for list cards.
pub const CARD_POSTER_SIZE: &str = "w342";

#[derive(Debug, Clone, PartialEq)]
pub struct CardView {
    pub title: String,
    pub rating: String,
    pub year: String,
    pub genre: String,
    pub favorite: bool,
    pub poster_url: Option<String>,
}

impl CardView {
    /// `image_base` is the configured image host prefix (`…/t/p`).
    pub fn build(
        movie: &MovieSummary,
        genres: &GenreTable,
        favorite: bool,
        image_base: &str,
    ) -> Self {
        Self {
            title: movie.title.clone(),
            rating: format_rating(movie.vote_average),
            year: movie.release_year().unwrap_or(NOT_AVAILABLE).to_string(),
            genre: genres.label_for(&movie.genre_ids).to_string(),
            favorite,
            poster_url: movie
                .poster_path
                .as_deref()
                .map(|p| poster_url(image_base, CARD_POSTER_SIZE, p)),
        }
    }
}

/// `<base>/<size><path>`; a trailing slash on the base is tolerated.
pub fn poster_url(image_base: &str, size: &str, path: &str) -> String {
    format!("{}/{}{}", image_base.trim_end_matches('/'), size, path)
}

#[cfg(test)]
mod tests {
    use marquee_proto::model::{Genre, UNKNOWN_GENRE};

    use super::*;

    const IMAGE_BASE: &str = "https://image.tmdb.org/t/p";

    fn table(pairs: &[(u64, &str)]) -> GenreTable {
        GenreTable::new(
            pairs
                .iter()
                .map(|(id, name)| Genre {
                    id: *id,
                    name: name.to_string(),
                })
                .collect(),
        )
    }

    fn summary() -> MovieSummary {
        MovieSummary {
            id: 1,
            title: "Popular One".to_string(),
            vote_average: Some(7.06),
            poster_path: Some("/a.jpg".to_string()),
            release_date: Some("2024-01-02".to_string()),
            genre_ids: vec![28, 12],
        }
    }

    #[test]
    fn first_resolvable_genre_wins() {
        let card = CardView::build(&summary(), &table(&[(12, "Adventure")]), false, IMAGE_BASE);
        assert_eq!(card.genre, "Adventure");
        assert_eq!(card.rating, "7.1");
        assert_eq!(card.year, "2024");
        assert_eq!(card.poster_url.as_deref(), Some("https://image.tmdb.org/t/p/w342/a.jpg"));
    }

    #[test]
    fn poster_url_follows_configured_image_host() {
        let card = CardView::build(&summary(), &GenreTable::default(), false, "http://img.local/t/p/");
        assert_eq!(card.poster_url.as_deref(), Some("http://img.local/t/p/w342/a.jpg"));
    }

    #[test]
    fn bare_summary_uses_fallbacks() {
        let movie = MovieSummary {
            id: 2,
            title: "Bare".to_string(),
            vote_average: None,
            poster_path: None,
            release_date: None,
            genre_ids: vec![999],
        };
        let card = CardView::build(&movie, &GenreTable::default(), true, IMAGE_BASE);
        assert_eq!(card.rating, NOT_AVAILABLE);
        assert_eq!(card.year, NOT_AVAILABLE);
        assert_eq!(card.genre, UNKNOWN_GENRE);
        assert_eq!(card.poster_url, None);
        assert!(card.favorite);
    }
}
