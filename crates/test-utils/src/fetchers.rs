//! Profile fetcher doubles.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use profile_fetcher::{FetchError, ProfileFetcher, RegionQuery};
use storm_common::ProfileObservation;

type Respond = dyn Fn(&RegionQuery) -> Result<Vec<ProfileObservation>, FetchError> + Send + Sync;

/// Fetcher whose answers come from a closure, recording every query.
pub struct ScriptedFetcher {
    respond: Box<Respond>,
    calls: AtomicUsize,
    queries: Mutex<Vec<RegionQuery>>,
}

impl ScriptedFetcher {
    pub fn new<F>(respond: F) -> Self
    where
        F: Fn(&RegionQuery) -> Result<Vec<ProfileObservation>, FetchError> + Send + Sync + 'static,
    {
        Self {
            respond: Box::new(respond),
            calls: AtomicUsize::new(0),
            queries: Mutex::new(Vec::new()),
        }
    }

    /// Every query fails with the suppressed transient fault.
    pub fn always_transient() -> Self {
        Self::new(|_| Err(FetchError::Transient("HTTP 503: Service Unavailable".into())))
    }

    /// Returns `observations` filtered to each query's box and window.
    pub fn serving(observations: Vec<ProfileObservation>) -> Self {
        Self::new(move |q| {
            Ok(observations
                .iter()
                .filter(|o| q.matches(o.latitude, o.longitude, &o.time))
                .cloned()
                .collect())
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn queries(&self) -> Vec<RegionQuery> {
        self.queries.lock().map(|q| q.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl ProfileFetcher for ScriptedFetcher {
    async fn fetch(&self, query: &RegionQuery) -> Result<Vec<ProfileObservation>, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut queries) = self.queries.lock() {
            queries.push(*query);
        }
        (self.respond)(query)
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

/// Fetcher that sleeps before answering with nothing.
pub struct SlowFetcher {
    pub delay: Duration,
}

#[async_trait]
impl ProfileFetcher for SlowFetcher {
    async fn fetch(&self, _query: &RegionQuery) -> Result<Vec<ProfileObservation>, FetchError> {
        tokio::time::sleep(self.delay).await;
        Ok(Vec::new())
    }

    fn name(&self) -> &str {
        "slow"
    }
}
