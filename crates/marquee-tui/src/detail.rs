//! Detail overlay state: two concurrent fetches keyed by selection generation.
//!
//! The overlay stays `Loading` until both the detail and the video fetch for
//! the current generation have settled. A failed detail fetch is an error;
//! a failed video fetch only means there is no trailer to offer.

use chrono::NaiveDate;
use marquee_proto::model::{find_trailer, MovieDetail, MovieSummary, Video};
use tracing::{debug, warn};

pub const NOT_AVAILABLE: &str = "N/A";
pub const NO_OVERVIEW: &str = "No overview available.";
pub const DETAIL_ERROR_FALLBACK: &str = "Failed to load movie details";

#[derive(Debug, Clone, PartialEq)]
pub enum DetailState {
    Loading,
    Error(String),
    Ready,
}

#[derive(Debug, Default)]
pub struct DetailOverlay {
    generation: u64,
    movie_id: Option<u64>,
    detail: Option<Result<MovieDetail, String>>,
    videos: Option<Result<Vec<Video>, String>>,
}

impl DetailOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset for a newly selected movie. Anything still in flight for an
    /// older generation will be discarded when it lands.
    pub fn begin(&mut self, generation: u64, movie_id: u64) {
        debug!("[detail] begin {} (generation {})", movie_id, generation);
        self.generation = generation;
        self.movie_id = Some(movie_id);
        self.detail = None;
        self.videos = None;
    }

    pub fn clear(&mut self) {
        self.movie_id = None;
        self.detail = None;
        self.videos = None;
    }

    pub fn movie_id(&self) -> Option<u64> {
        self.movie_id
    }

    pub fn on_detail(&mut self, token: u64, result: Result<MovieDetail, String>) -> bool {
        if token != self.generation || self.movie_id.is_none() {
            debug!("[detail] discarding stale detail for generation {}", token);
            return false;
        }
        if let Err(e) = &result {
            warn!("[detail] detail fetch failed: {}", e);
        }
        self.detail = Some(result);
        true
    }

    pub fn on_videos(&mut self, token: u64, result: Result<Vec<Video>, String>) -> bool {
        if token != self.generation || self.movie_id.is_none() {
            debug!("[detail] discarding stale videos for generation {}", token);
            return false;
        }
        if let Err(e) = &result {
            warn!("[detail] video fetch failed: {}", e);
        }
        self.videos = Some(result);
        true
    }

    pub fn state(&self) -> DetailState {
        match (&self.detail, &self.videos) {
            (Some(_), None) | (None, _) => DetailState::Loading,
            (Some(Err(e)), Some(_)) => DetailState::Error(if e.is_empty() {
                DETAIL_ERROR_FALLBACK.to_string()
            } else {
                e.clone()
            }),
            (Some(Ok(_)), Some(_)) => DetailState::Ready,
        }
    }

    pub fn detail(&self) -> Option<&MovieDetail> {
        match (&self.detail, self.state()) {
            (Some(Ok(d)), DetailState::Ready) => Some(d),
            _ => None,
        }
    }

    pub fn trailer(&self) -> Option<&Video> {
        match &self.videos {
            Some(Ok(videos)) => find_trailer(videos),
            _ => None,
        }
    }

    pub fn trailer_url(&self) -> Option<String> {
        self.trailer().map(Video::watch_url)
    }

    /// Summary snapshot of the loaded movie, for favoriting from the overlay.
    /// The id is the selected one, not the payload's.
    pub fn summary(&self) -> Option<MovieSummary> {
        let id = self.movie_id?;
        self.detail().map(|d| MovieSummary {
            id,
            title: d.title.clone(),
            vote_average: d.vote_average,
            poster_path: d.poster_path.clone(),
            release_date: d.release_date.clone(),
            genre_ids: d.genres.iter().map(|g| g.id).collect(),
        })
    }

    pub fn view(&self) -> Option<DetailView> {
        self.detail()
            .map(|d| DetailView::from_detail(d, self.trailer_url()))
    }
}

/// Display strings for a ready overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailView {
    pub title: String,
    pub year: String,
    pub certification: &'static str,
    pub runtime: String,
    pub rating: String,
    pub genres: Vec<String>,
    pub overview: String,
    pub release_date: String,
    pub countries: String,
    pub status: String,
    pub languages: String,
    pub companies: Option<String>,
    pub trailer_url: Option<String>,
}

impl DetailView {
    pub fn from_detail(d: &MovieDetail, trailer_url: Option<String>) -> Self {
        let year = d
            .release_date
            .as_deref()
            .and_then(|s| s.split('-').next())
            .filter(|s| !s.is_empty())
            .unwrap_or(NOT_AVAILABLE)
            .to_string();

        let companies = if d.production_companies.is_empty() {
            None
        } else {
            Some(join_names(d.production_companies.iter().map(|c| c.name.as_str()), ", "))
        };

        Self {
            title: d.title.clone(),
            year,
            certification: certification(d.adult),
            runtime: format_runtime(d.runtime),
            rating: match d.vote_average {
                Some(r) if r > 0.0 => format!("{}/10", format_rating(Some(r))),
                _ => NOT_AVAILABLE.to_string(),
            },
            genres: d.genres.iter().map(|g| g.name.clone()).collect(),
            overview: d
                .overview
                .clone()
                .filter(|o| !o.trim().is_empty())
                .unwrap_or_else(|| NO_OVERVIEW.to_string()),
            release_date: format_long_date(d.release_date.as_deref()),
            countries: join_or_na(d.production_countries.iter().map(|c| c.name.as_str()), " • "),
            status: d
                .status
                .clone()
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            languages: join_or_na(
                d.spoken_languages.iter().map(|l| l.english_name.as_str()),
                ", ",
            ),
            companies,
            trailer_url,
        }
    }
}

pub fn certification(adult: bool) -> &'static str {
    if adult {
        "R"
    } else {
        "PG-13"
    }
}

/// `148` → `2h 28m`. Missing or zero runtime is `N/A`.
pub fn format_runtime(minutes: Option<u32>) -> String {
    match minutes {
        Some(m) if m > 0 => format!("{}h {}m", m / 60, m % 60),
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// One decimal place; missing or zero rating is `N/A`.
pub fn format_rating(rating: Option<f64>) -> String {
    match rating {
        Some(r) if r > 0.0 => format!("{:.1}", r),
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// `2010-07-15` → `July 15, 2010 (Worldwide)`.
pub fn format_long_date(date: Option<&str>) -> String {
    date.and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
        .map(|d| format!("{} (Worldwide)", d.format("%B %-d, %Y")))
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

fn join_names<'a>(names: impl Iterator<Item = &'a str>, sep: &str) -> String {
    names.collect::<Vec<_>>().join(sep)
}

fn join_or_na<'a>(names: impl Iterator<Item = &'a str>, sep: &str) -> String {
    let joined = join_names(names, sep);
    if joined.is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        joined
    }
}

#[cfg(test)]
mod tests {
    use marquee_proto::model::{Genre, NamedRef, SpokenLanguage};

    use super::*;

    fn detail(id: u64, title: &str) -> MovieDetail {
        MovieDetail {
            id,
            title: title.to_string(),
            release_date: Some("2010-07-15".to_string()),
            runtime: Some(148),
            vote_average: Some(8.369),
            overview: Some("Dreams within dreams.".to_string()),
            genres: vec![Genre {
                id: 28,
                name: "Action".to_string(),
            }],
            production_countries: vec![
                NamedRef {
                    name: "United Kingdom".to_string(),
                },
                NamedRef {
                    name: "United States of America".to_string(),
                },
            ],
            spoken_languages: vec![
                SpokenLanguage {
                    english_name: "English".to_string(),
                },
                SpokenLanguage {
                    english_name: "Japanese".to_string(),
                },
            ],
            production_companies: vec![],
            status: Some("Released".to_string()),
            adult: false,
            poster_path: Some("/inception.jpg".to_string()),
        }
    }

    fn trailer(key: &str) -> Video {
        Video {
            kind: "Trailer".to_string(),
            site: "YouTube".to_string(),
            key: key.to_string(),
        }
    }

    #[test]
    fn loading_until_both_fetches_settle() {
        let mut overlay = DetailOverlay::new();
        overlay.begin(1, 27205);
        assert_eq!(overlay.state(), DetailState::Loading);
        overlay.on_detail(1, Ok(detail(27205, "Inception")));
        assert_eq!(overlay.state(), DetailState::Loading);
        overlay.on_videos(1, Ok(vec![trailer("abc")]));
        assert_eq!(overlay.state(), DetailState::Ready);
        assert_eq!(
            overlay.trailer_url().as_deref(),
            Some("https://www.youtube.com/watch?v=abc")
        );
    }

    #[test]
    fn later_selection_wins_over_slow_response() {
        let mut overlay = DetailOverlay::new();
        overlay.begin(1, 5);
        overlay.begin(2, 7);

        overlay.on_detail(2, Ok(detail(7, "Seven")));
        overlay.on_videos(2, Ok(vec![]));
        assert!(!overlay.on_detail(1, Ok(detail(5, "Five"))));
        assert!(!overlay.on_videos(1, Ok(vec![trailer("five")])));

        let view = overlay.view().unwrap();
        assert_eq!(view.title, "Seven");
        assert_eq!(view.trailer_url, None);
        assert_eq!(overlay.summary().map(|m| m.id), Some(7));
    }

    #[test]
    fn favorite_snapshot_keeps_selected_id_when_payload_lacks_one() {
        let mut overlay = DetailOverlay::new();
        overlay.begin(4, 27205);
        // `id` missing from the payload deserializes as 0.
        overlay.on_detail(4, Ok(detail(0, "Inception")));
        overlay.on_videos(4, Ok(vec![]));

        let summary = overlay.summary().unwrap();
        assert_eq!(summary.id, 27205);
        assert_eq!(summary.title, "Inception");
    }

    #[test]
    fn detail_failure_is_an_error_state() {
        let mut overlay = DetailOverlay::new();
        overlay.begin(3, 1);
        overlay.on_detail(3, Err("catalog returned 404".to_string()));
        overlay.on_videos(3, Ok(vec![trailer("x")]));
        assert_eq!(
            overlay.state(),
            DetailState::Error("catalog returned 404".to_string())
        );
        assert!(overlay.view().is_none());
    }

    #[test]
    fn video_failure_only_hides_trailer() {
        let mut overlay = DetailOverlay::new();
        overlay.begin(4, 1);
        overlay.on_videos(4, Err("timeout".to_string()));
        overlay.on_detail(4, Ok(detail(1, "Inception")));
        assert_eq!(overlay.state(), DetailState::Ready);
        assert_eq!(overlay.trailer(), None);
    }

    #[test]
    fn view_formats_every_row() {
        let view = DetailView::from_detail(&detail(1, "Inception"), None);
        assert_eq!(view.year, "2010");
        assert_eq!(view.certification, "PG-13");
        assert_eq!(view.runtime, "2h 28m");
        assert_eq!(view.rating, "8.4/10");
        assert_eq!(view.release_date, "July 15, 2010 (Worldwide)");
        assert_eq!(view.countries, "United Kingdom • United States of America");
        assert_eq!(view.languages, "English, Japanese");
        assert_eq!(view.status, "Released");
        assert_eq!(view.companies, None);
    }

    #[test]
    fn missing_fields_fall_back() {
        let mut d = detail(1, "Bare");
        d.release_date = None;
        d.runtime = None;
        d.vote_average = None;
        d.overview = Some("  ".to_string());
        d.production_countries.clear();
        d.spoken_languages.clear();
        d.status = None;
        d.adult = true;
        d.production_companies = vec![NamedRef {
            name: "Syncopy".to_string(),
        }];

        let view = DetailView::from_detail(&d, None);
        assert_eq!(view.year, NOT_AVAILABLE);
        assert_eq!(view.certification, "R");
        assert_eq!(view.runtime, NOT_AVAILABLE);
        assert_eq!(view.rating, NOT_AVAILABLE);
        assert_eq!(view.overview, NO_OVERVIEW);
        assert_eq!(view.release_date, NOT_AVAILABLE);
        assert_eq!(view.countries, NOT_AVAILABLE);
        assert_eq!(view.languages, NOT_AVAILABLE);
        assert_eq!(view.status, NOT_AVAILABLE);
        assert_eq!(view.companies.as_deref(), Some("Syncopy"));
    }

    #[test]
    fn runtime_under_an_hour() {
        assert_eq!(format_runtime(Some(45)), "0h 45m");
        assert_eq!(format_runtime(Some(0)), NOT_AVAILABLE);
    }
}
