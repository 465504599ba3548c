//! Selection controller: which movie the detail overlay is showing.

use std::sync::Arc;

use marquee_proto::counter::TrendingStore;
use marquee_proto::model::MovieSummary;
use tracing::{debug, warn};

pub struct Selection {
    selected: Option<u64>,
    generation: u64,
    counter: Arc<dyn TrendingStore>,
}

impl Selection {
    pub fn new(counter: Arc<dyn TrendingStore>) -> Self {
        Self {
            selected: None,
            generation: 0,
            counter,
        }
    }

    /// Select `id` and return the generation token its overlay fetches must
    /// carry. When `movie` is given, the click is recorded in the background;
    /// a counter failure never keeps the overlay from opening.
    pub fn open(&mut self, id: u64, movie: Option<MovieSummary>) -> u64 {
        self.generation += 1;
        self.selected = Some(id);
        debug!("[selection] open {} (generation {})", id, self.generation);

        if let Some(movie) = movie {
            let counter = Arc::clone(&self.counter);
            tokio::spawn(async move {
                if let Err(e) = counter.record_click(&movie).await {
                    warn!("[counter] failed to record click for {}: {}", movie.id, e);
                }
            });
        }
        self.generation
    }

    pub fn close(&mut self) {
        if let Some(id) = self.selected.take() {
            debug!("[selection] close {}", id);
        }
        // Invalidate in-flight fetches for the closed overlay.
        self.generation += 1;
    }

    pub fn selected(&self) -> Option<u64> {
        self.selected
    }

    pub fn is_open(&self) -> bool {
        self.selected.is_some()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_current(&self, token: u64) -> bool {
        self.selected.is_some() && token == self.generation
    }

    pub fn counter(&self) -> &Arc<dyn TrendingStore> {
        &self.counter
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Mutex;

    use marquee_proto::counter::{BoxFuture, CounterError, Result};
    use marquee_proto::model::{MovieSummary, TrendingEntry};

    use super::*;

    /// Counter double that remembers every recorded click.
    #[derive(Default)]
    pub struct RecordingCounter {
        pub clicks: Mutex<Vec<u64>>,
        pub fail: bool,
        pub top: Vec<TrendingEntry>,
    }

    impl TrendingStore for RecordingCounter {
        fn record_click<'a>(&'a self, movie: &'a MovieSummary) -> BoxFuture<'a, Result<()>> {
            Box::pin(async move {
                self.clicks.lock().unwrap().push(movie.id);
                if self.fail {
                    Err(CounterError::NotConfigured)
                } else {
                    Ok(())
                }
            })
        }

        fn top<'a>(&'a self, limit: usize) -> BoxFuture<'a, Result<Vec<TrendingEntry>>> {
            Box::pin(async move {
                if self.fail {
                    return Err(CounterError::NotConfigured);
                }
                Ok(self.top.iter().take(limit).cloned().collect())
            })
        }
    }
}
