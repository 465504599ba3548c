//! Click-counter service: a hosted document collection (Appwrite REST API)
//! that tracks how often each movie's overlay was opened.
//!
//! Two operations only: increment-or-create a movie's counter document, and
//! list the top documents by count. Callers treat both as best-effort.

use rand::Rng;
use serde::Deserialize;
use serde_json::{json, Value};
use thiserror::Error;
use tracing::{debug, info};

use crate::config::CounterConfig;
use crate::model::{poster_url_for, MovieSummary, TrendingEntry};

/// Number of entries the trending strip asks for.
pub const TRENDING_LIMIT: usize = 10;

/// Boxed future returned by dyn-compatible async trait methods.
pub use futures_util::future::BoxFuture;

#[derive(Debug, Error)]
pub enum CounterError {
    #[error("counter request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("counter service returned {status} during {operation}")]
    Status {
        status: reqwest::StatusCode,
        operation: &'static str,
    },
    #[error("failed to decode counter response: {0}")]
    Decode(String),
    #[error("counter service is not configured")]
    NotConfigured,
}

pub type Result<T> = std::result::Result<T, CounterError>;

/// Seam between the UI and the counter service.
pub trait TrendingStore: Send + Sync {
    /// Bump the movie's count by one, creating its document on first open.
    fn record_click<'a>(&'a self, movie: &'a MovieSummary) -> BoxFuture<'a, Result<()>>;

    /// Documents ordered by count descending, at most `limit` of them.
    fn top<'a>(&'a self, limit: usize) -> BoxFuture<'a, Result<Vec<TrendingEntry>>>;
}

#[derive(Debug, Deserialize)]
struct DocumentList {
    #[serde(default)]
    documents: Vec<TrendingEntry>,
}

/// `reqwest`-backed implementation of [`TrendingStore`].
#[derive(Debug, Clone)]
pub struct AppwriteCounter {
    config: CounterConfig,
    http: reqwest::Client,
}

impl AppwriteCounter {
    pub fn new(config: CounterConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    fn documents_url(&self) -> String {
        format!(
            "{}/databases/{}/collections/{}/documents",
            self.config.endpoint.trim_end_matches('/'),
            self.config.database_id,
            self.config.collection_id
        )
    }

    fn request(&self, method: reqwest::Method, url: &str) -> reqwest::RequestBuilder {
        let builder = self
            .http
            .request(method, url)
            .header("X-Appwrite-Project", &self.config.project_id);
        match &self.config.api_key {
            Some(key) => builder.header("X-Appwrite-Key", key),
            None => builder,
        }
    }

    fn ensure_configured(&self) -> Result<()> {
        if self.config.is_configured() {
            Ok(())
        } else {
            Err(CounterError::NotConfigured)
        }
    }

    async fn list(&self, queries: &[Value], operation: &'static str) -> Result<Vec<TrendingEntry>> {
        let params: Vec<(&str, String)> = queries
            .iter()
            .map(|q| ("queries[]", q.to_string()))
            .collect();
        let response = self
            .request(reqwest::Method::GET, &self.documents_url())
            .query(&params)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CounterError::Status { status, operation });
        }
        let list: DocumentList = response
            .json()
            .await
            .map_err(|e| CounterError::Decode(e.to_string()))?;
        Ok(list.documents)
    }

    async fn increment(&self, doc: &TrendingEntry) -> Result<()> {
        let url = format!("{}/{}", self.documents_url(), doc.document_id);
        let response = self
            .request(reqwest::Method::PATCH, &url)
            .json(&json!({ "data": { "count": doc.count + 1 } }))
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CounterError::Status {
                status,
                operation: "update",
            });
        }
        debug!(
            "[counter] movie {} count {} -> {}",
            doc.movie_id,
            doc.count,
            doc.count + 1
        );
        Ok(())
    }

    async fn create(&self, movie: &MovieSummary) -> Result<()> {
        let body = json!({
            "documentId": unique_document_id(),
            "data": {
                "searchTerm": movie.title,
                "count": 1,
                "movie_id": movie.id,
                "poster_url": poster_url_for(movie.poster_path.as_deref()),
            }
        });
        let response = self
            .request(reqwest::Method::POST, &self.documents_url())
            .json(&body)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CounterError::Status {
                status,
                operation: "create",
            });
        }
        info!("[counter] created counter for movie {} ({})", movie.id, movie.title);
        Ok(())
    }
}

impl TrendingStore for AppwriteCounter {
    fn record_click<'a>(&'a self, movie: &'a MovieSummary) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move {
            self.ensure_configured()?;
            let query = json!({ "method": "equal", "attribute": "movie_id", "values": [movie.id] });
            let existing = self.list(&[query], "lookup").await?;
            match existing.first() {
                Some(doc) => self.increment(doc).await,
                None => self.create(movie).await,
            }
        })
    }

    fn top<'a>(&'a self, limit: usize) -> BoxFuture<'a, Result<Vec<TrendingEntry>>> {
        Box::pin(async move {
            self.ensure_configured()?;
            let queries = [
                json!({ "method": "limit", "values": [limit] }),
                json!({ "method": "orderDesc", "attribute": "count" }),
            ];
            self.list(&queries, "top").await
        })
    }
}

/// Client-side document id: hex timestamp followed by random hex padding.
pub fn unique_document_id() -> String {
    let now = chrono::Utc::now();
    let mut rng = rand::thread_rng();
    let padding: String = (0..7)
        .map(|_| char::from_digit(rng.gen_range(0..16), 16).unwrap_or('0'))
        .collect();
    format!(
        "{:08x}{:05x}{}",
        now.timestamp(),
        now.timestamp_subsec_micros(),
        padding
    )
}
