//! Search pipeline: raw input, debounced query, and the fetched result list.
//!
//! Every keystroke restarts a single debounce timer; only a value that stays
//! put for the quiet period becomes the debounced query and triggers a fetch.
//! Each fetch carries a request token and only the newest token may update
//! the visible list.

use std::time::Duration;

use marquee_proto::model::MovieSummary;
use tokio::sync::mpsc;
use tokio::task::AbortHandle;
use tracing::debug;

/// Message shown when the primary search fetch fails.
pub const SEARCH_ERROR_MESSAGE: &str = "Error fetching movies! Please try again later.";

/// A cancellable delayed send. Scheduling again aborts the pending one.
pub struct Debouncer {
    period: Duration,
    pending: Option<AbortHandle>,
}

impl Debouncer {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            pending: None,
        }
    }

    /// Post `msg` on `tx` once `period` has passed without another schedule.
    pub fn schedule<M: Send + 'static>(&mut self, tx: &mpsc::Sender<M>, msg: M) {
        self.cancel();
        let tx = tx.clone();
        let period = self.period;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(period).await;
            let _ = tx.send(msg).await;
        });
        self.pending = Some(handle.abort_handle());
    }

    pub fn cancel(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SearchStatus {
    Idle,
    Loading,
    Loaded,
    Errored(String),
}

/// One fetch to perform: which endpoint follows from whether `query` is empty.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    pub token: u64,
    pub query: String,
}

pub struct SearchPipeline {
    raw_input: String,
    debounced_query: String,
    status: SearchStatus,
    results: Vec<MovieSummary>,
    current_token: u64,
    debouncer: Debouncer,
}

impl SearchPipeline {
    pub fn new(quiet_period: Duration) -> Self {
        Self {
            raw_input: String::new(),
            debounced_query: String::new(),
            status: SearchStatus::Idle,
            results: Vec::new(),
            current_token: 0,
            debouncer: Debouncer::new(quiet_period),
        }
    }

    /// Mount: fetch for the initial (empty) query.
    pub fn start(&mut self) -> SearchRequest {
        let query = self.debounced_query.clone();
        self.begin(query)
    }

    /// Record a new input value and restart the quiet-period timer. `wrap`
    /// turns the settled value into the caller's message type.
    pub fn on_input<M: Send + 'static>(
        &mut self,
        value: String,
        tx: &mpsc::Sender<M>,
        wrap: fn(String) -> M,
    ) {
        if value == self.raw_input {
            return;
        }
        self.raw_input = value.clone();
        self.debouncer.schedule(tx, wrap(value));
    }

    /// The timer fired for `value`. Returns the fetch to issue, if the value
    /// is still current and differs from the last debounced query.
    pub fn on_settled(&mut self, value: String) -> Option<SearchRequest> {
        if value != self.raw_input {
            debug!("[search] dropping superseded settle {:?}", value);
            return None;
        }
        if value == self.debounced_query {
            return None;
        }
        self.debounced_query = value.clone();
        Some(self.begin(value))
    }

    /// Issue a new request token and enter `Loading`.
    pub fn begin(&mut self, query: String) -> SearchRequest {
        self.current_token += 1;
        self.status = SearchStatus::Loading;
        debug!("[search] request #{} for {:?}", self.current_token, query);
        SearchRequest {
            token: self.current_token,
            query,
        }
    }

    /// Apply a completed fetch. Returns `false` when the response was stale
    /// and discarded.
    pub fn on_response(&mut self, token: u64, result: Result<Vec<MovieSummary>, String>) -> bool {
        if token != self.current_token {
            debug!(
                "[search] discarding stale response #{} (current #{})",
                token, self.current_token
            );
            return false;
        }
        match result {
            Ok(movies) => {
                self.results = movies;
                self.status = SearchStatus::Loaded;
            }
            Err(e) => {
                tracing::warn!("[search] fetch #{} failed: {}", token, e);
                self.results.clear();
                self.status = SearchStatus::Errored(SEARCH_ERROR_MESSAGE.to_string());
            }
        }
        true
    }

    /// Drop the input back to empty (the "home" key).
    pub fn clear<M: Send + 'static>(&mut self, tx: &mpsc::Sender<M>, wrap: fn(String) -> M) {
        self.on_input(String::new(), tx, wrap);
    }

    pub fn raw_input(&self) -> &str {
        &self.raw_input
    }

    pub fn debounced_query(&self) -> &str {
        &self.debounced_query
    }

    pub fn status(&self) -> &SearchStatus {
        &self.status
    }

    pub fn results(&self) -> &[MovieSummary] {
        &self.results
    }

    /// Typed text is non-blank: the list shows search results and the
    /// trending strip is hidden.
    pub fn is_search_mode(&self) -> bool {
        !self.raw_input.trim().is_empty()
    }

    pub fn heading(&self) -> String {
        if self.is_search_mode() {
            format!("Search: {}", self.raw_input)
        } else {
            "Popular Movies".to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUIET: Duration = Duration::from_millis(500);

    #[derive(Debug, PartialEq)]
    enum Msg {
        Settled(String),
    }

    fn movie(id: u64) -> MovieSummary {
        MovieSummary {
            id,
            title: format!("movie {id}"),
            vote_average: None,
            poster_path: None,
            release_date: None,
            genre_ids: vec![],
        }
    }

    #[tokio::test(start_paused = true)]
    async fn debouncer_only_fires_final_value() {
        let (tx, mut rx) = mpsc::channel(8);
        let mut debouncer = Debouncer::new(QUIET);
        for (i, value) in ["b", "ba", "bat", "batm"].iter().enumerate() {
            debouncer.schedule(&tx, value.to_string());
            tokio::time::advance(Duration::from_millis(100 + i as u64 * 50)).await;
        }
        assert_eq!(rx.recv().await.as_deref(), Some("batm"));
        tokio::time::advance(QUIET * 4).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn bat_then_batman_issues_one_request() {
        let (tx, mut rx) = mpsc::channel(8);
        let mut pipeline = SearchPipeline::new(QUIET);
        let mount = pipeline.start();
        assert_eq!(mount.query, "");

        pipeline.on_input("bat".to_string(), &tx, Msg::Settled);
        tokio::time::advance(Duration::from_millis(300)).await;
        pipeline.on_input("batman".to_string(), &tx, Msg::Settled);
        assert_eq!(pipeline.raw_input(), "batman");
        assert_eq!(pipeline.debounced_query(), "");

        let mut requests = Vec::new();
        let Msg::Settled(value) = rx.recv().await.unwrap();
        requests.extend(pipeline.on_settled(value));
        tokio::time::advance(QUIET * 4).await;
        while let Ok(Msg::Settled(value)) = rx.try_recv() {
            requests.extend(pipeline.on_settled(value));
        }

        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].query, "batman");
        assert_eq!(pipeline.debounced_query(), "batman");
        assert_eq!(pipeline.status(), &SearchStatus::Loading);
    }

    #[tokio::test(start_paused = true)]
    async fn settling_back_to_same_query_does_not_refetch() {
        let (tx, mut rx) = mpsc::channel(8);
        let mut pipeline = SearchPipeline::new(QUIET);
        pipeline.start();
        pipeline.on_input("a".to_string(), &tx, Msg::Settled);
        pipeline.on_input(String::new(), &tx, Msg::Settled);
        let Msg::Settled(value) = rx.recv().await.unwrap();
        assert_eq!(value, "");
        assert_eq!(pipeline.on_settled(value), None);
    }

    #[test]
    fn superseded_settle_is_ignored() {
        let mut pipeline = SearchPipeline::new(QUIET);
        pipeline.raw_input = "batman".to_string();
        assert_eq!(pipeline.on_settled("bat".to_string()), None);
        assert_eq!(pipeline.debounced_query(), "");
    }

    #[test]
    fn stale_response_is_discarded() {
        let mut pipeline = SearchPipeline::new(QUIET);
        let first = pipeline.begin("bat".to_string());
        let second = pipeline.begin("batman".to_string());

        assert!(pipeline.on_response(second.token, Ok(vec![movie(2)])));
        assert!(!pipeline.on_response(first.token, Ok(vec![movie(1)])));
        assert_eq!(pipeline.results(), &[movie(2)]);
        assert_eq!(pipeline.status(), &SearchStatus::Loaded);
    }

    #[test]
    fn failure_clears_results_and_sets_message() {
        let mut pipeline = SearchPipeline::new(QUIET);
        let ok = pipeline.begin(String::new());
        pipeline.on_response(ok.token, Ok(vec![movie(1)]));

        let failing = pipeline.begin("x".to_string());
        pipeline.on_response(failing.token, Err("boom".to_string()));
        assert!(pipeline.results().is_empty());
        assert_eq!(
            pipeline.status(),
            &SearchStatus::Errored(SEARCH_ERROR_MESSAGE.to_string())
        );

        // Recovery is the next query.
        let retry = pipeline.begin("y".to_string());
        pipeline.on_response(retry.token, Ok(vec![movie(3)]));
        assert_eq!(pipeline.status(), &SearchStatus::Loaded);
    }

    #[test]
    fn heading_tracks_search_mode() {
        let mut pipeline = SearchPipeline::new(QUIET);
        assert_eq!(pipeline.heading(), "Popular Movies");
        pipeline.raw_input = "   ".to_string();
        assert!(!pipeline.is_search_mode());
        pipeline.raw_input = "alien".to_string();
        assert_eq!(pipeline.heading(), "Search: alien");
    }
}
