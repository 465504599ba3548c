//! Catalog and counter-service records.
//!
//! Field names follow the wire format of the catalog API so responses
//! deserialize directly; the same `MovieSummary` shape is what the favorites
//! slot stores.

use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};

/// Poster prefix the counter service stores in front of a bare `poster_path`.
pub const POSTER_URL_PREFIX: &str = "https://image.tmdb.org/t/p/w500";

/// Label used when none of a movie's genre ids resolve.
pub const UNKNOWN_GENRE: &str = "Unknown";

/// Compact catalog record used in list views and persisted as a favorite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieSummary {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub release_date: Option<String>,
    #[serde(default)]
    pub genre_ids: Vec<u64>,
}

/// A favorite is a verbatim snapshot of the summary at favoriting time.
pub type FavoriteEntry = MovieSummary;

impl MovieSummary {
    /// Year part of `release_date` (`"2010-07-16"` → `"2010"`).
    pub fn release_year(&self) -> Option<&str> {
        self.release_date
            .as_deref()
            .and_then(|d| d.split('-').next())
            .filter(|y| !y.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: u64,
    pub name: String,
}

/// Read-only genre lookup keyed by id.
#[derive(Debug, Clone, Default)]
pub struct GenreTable {
    names: HashMap<u64, String>,
}

impl GenreTable {
    pub fn new(genres: Vec<Genre>) -> Self {
        Self {
            names: genres.into_iter().map(|g| (g.id, g.name)).collect(),
        }
    }

    pub fn name(&self, id: u64) -> Option<&str> {
        self.names.get(&id).map(String::as_str)
    }

    /// First id in `ids` that resolves, or `"Unknown"`.
    pub fn label_for(&self, ids: &[u64]) -> &str {
        ids.iter()
            .find_map(|id| self.name(*id))
            .unwrap_or(UNKNOWN_GENRE)
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NamedRef {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SpokenLanguage {
    #[serde(default)]
    pub english_name: String,
}

/// Full record behind the detail overlay.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MovieDetail {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub release_date: Option<String>,
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub overview: Option<String>,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub production_countries: Vec<NamedRef>,
    #[serde(default)]
    pub spoken_languages: Vec<SpokenLanguage>,
    #[serde(default)]
    pub production_companies: Vec<NamedRef>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub status: Option<String>,
    #[serde(default)]
    pub adult: bool,
    #[serde(default)]
    pub poster_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Video {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub site: String,
    #[serde(default)]
    pub key: String,
}

impl Video {
    pub fn is_youtube_trailer(&self) -> bool {
        self.kind == "Trailer" && self.site == "YouTube"
    }

    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.key)
    }
}

/// First YouTube trailer in the list, if any.
pub fn find_trailer(videos: &[Video]) -> Option<&Video> {
    videos.iter().find(|v| v.is_youtube_trailer())
}

/// Counter-service document: how often a movie's overlay has been opened.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendingEntry {
    #[serde(rename = "$id")]
    pub document_id: String,
    #[serde(rename = "searchTerm", default)]
    pub search_term: String,
    #[serde(default)]
    pub count: u64,
    pub movie_id: u64,
    #[serde(default)]
    pub poster_url: String,
}

impl TrendingEntry {
    /// Rebuild the minimal summary needed to open the detail overlay.
    pub fn to_summary(&self) -> MovieSummary {
        MovieSummary {
            id: self.movie_id,
            title: self.search_term.clone(),
            vote_average: None,
            poster_path: poster_path_from_url(&self.poster_url),
            release_date: None,
            genre_ids: Vec::new(),
        }
    }
}

/// Strip the known poster prefix to recover a bare `poster_path`.
pub fn poster_path_from_url(url: &str) -> Option<String> {
    url.strip_prefix(POSTER_URL_PREFIX)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
}

/// Poster URL as the counter service stores it.
pub fn poster_url_for(poster_path: Option<&str>) -> String {
    format!("{}{}", POSTER_URL_PREFIX, poster_path.unwrap_or_default())
}

// ── Wire wrappers ─────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ResultsPage<T> {
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
}

#[derive(Debug, Deserialize)]
pub struct GenreList {
    #[serde(default)]
    pub genres: Vec<Genre>,
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}
