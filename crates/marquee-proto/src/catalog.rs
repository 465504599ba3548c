//! Movie catalog API client (TMDB v3, bearer-token authenticated).

use reqwest::header::{ACCEPT, AUTHORIZATION};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

use crate::config::CatalogConfig;
use crate::model::{GenreList, MovieDetail, MovieSummary, ResultsPage, Video};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("catalog returned {status} for {endpoint}")]
    Status {
        status: reqwest::StatusCode,
        endpoint: String,
    },
    #[error("failed to decode {endpoint}: {source}")]
    Decode {
        endpoint: String,
        source: reqwest::Error,
    },
}

pub type Result<T> = std::result::Result<T, CatalogError>;

#[derive(Debug, Clone)]
pub struct CatalogClient {
    base_url: String,
    api_token: String,
    http: reqwest::Client,
}

impl CatalogClient {
    pub fn new(base_url: impl Into<String>, api_token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_token: api_token.into(),
            http: reqwest::Client::new(),
        }
    }

    pub fn from_config(config: &CatalogConfig) -> Self {
        Self::new(config.base_url.clone(), config.api_token.clone())
    }

    /// Popular movies for an empty query, search results otherwise.
    pub async fn movies(&self, query: &str) -> Result<Vec<MovieSummary>> {
        if query.is_empty() {
            self.discover_popular().await
        } else {
            self.search(query).await
        }
    }

    pub async fn discover_popular(&self) -> Result<Vec<MovieSummary>> {
        let page: ResultsPage<MovieSummary> = self
            .get("/discover/movie", &[("sort_by", "popularity.desc")])
            .await?;
        Ok(page.results)
    }

    pub async fn search(&self, query: &str) -> Result<Vec<MovieSummary>> {
        let page: ResultsPage<MovieSummary> =
            self.get("/search/movie", &[("query", query)]).await?;
        Ok(page.results)
    }

    pub async fn genres(&self) -> Result<Vec<crate::model::Genre>> {
        let list: GenreList = self.get("/genre/movie/list", &[]).await?;
        Ok(list.genres)
    }

    pub async fn movie_detail(&self, id: u64) -> Result<MovieDetail> {
        self.get(&format!("/movie/{id}"), &[]).await
    }

    pub async fn movie_videos(&self, id: u64) -> Result<Vec<Video>> {
        let page: ResultsPage<Video> = self.get(&format!("/movie/{id}/videos"), &[]).await?;
        Ok(page.results)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!("[catalog] GET {} {:?}", path, query);

        let response = self
            .http
            .get(&url)
            .query(query)
            .header(ACCEPT, "application/json")
            .header(AUTHORIZATION, format!("Bearer {}", self.api_token))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status {
                status,
                endpoint: path.to_string(),
            });
        }

        response.json().await.map_err(|source| CatalogError::Decode {
            endpoint: path.to_string(),
            source,
        })
    }
}
