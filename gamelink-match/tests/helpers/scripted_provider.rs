//! Candidate provider with scripted answers, failures and delays

use async_trait::async_trait;
use gamelink_match::{CandidateProvider, MatchCandidate, Normalizer, ProviderError, Source};
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// Provider whose behaviour is set per query
pub struct ScriptedProvider {
    source: Source,
    normalizer: Normalizer,
    candidates: HashMap<String, Vec<MatchCandidate>>,
    /// Errors returned, in order, before the query starts succeeding
    failures: Mutex<HashMap<String, VecDeque<ProviderError>>>,
    /// Errors returned on every call
    broken: HashMap<String, ProviderError>,
    delay: Duration,
    /// Extra delay per character of the query, to scramble completion order
    delay_per_char: Duration,
    calls: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl ScriptedProvider {
    pub fn new(source: Source) -> Self {
        Self {
            source,
            normalizer: Normalizer::default(),
            candidates: HashMap::new(),
            failures: Mutex::new(HashMap::new()),
            broken: HashMap::new(),
            delay: Duration::ZERO,
            delay_per_char: Duration::ZERO,
            calls: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        }
    }

    /// Candidates for `title`, given as (id, title, year)
    pub fn with(mut self, title: &str, candidates: &[(&str, &str, Option<i32>)]) -> Self {
        let source = self.source;
        let list = candidates
            .iter()
            .map(|(id, t, year)| MatchCandidate::new(source, *id, *t).with_release_year(*year))
            .collect();
        self.candidates.insert(self.normalizer.normalize(title), list);
        self
    }

    /// Raw candidates for `title`, unvalidated
    pub fn with_raw(mut self, title: &str, candidates: Vec<MatchCandidate>) -> Self {
        self.candidates.insert(self.normalizer.normalize(title), candidates);
        self
    }

    /// Fail `times` calls for `title` with `error`, then answer normally
    pub fn failing(self, title: &str, times: usize, error: ProviderError) -> Self {
        let key = self.normalizer.normalize(title);
        self.failures
            .lock()
            .unwrap()
            .insert(key, std::iter::repeat(error).take(times).collect());
        self
    }

    /// Fail every call for `title`
    pub fn broken(mut self, title: &str, error: ProviderError) -> Self {
        self.broken.insert(self.normalizer.normalize(title), error);
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_delay_per_char(mut self, delay: Duration) -> Self {
        self.delay_per_char = delay;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CandidateProvider for ScriptedProvider {
    fn source(&self) -> Source {
        self.source
    }

    async fn query(&self, normalized_title: &str) -> Result<Vec<MatchCandidate>, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        // Scrambled: longer titles finish sooner
        let scramble = self
            .delay_per_char
            .saturating_mul(40u32.saturating_sub(normalized_title.len() as u32));
        let total = self.delay + scramble;
        if !total.is_zero() {
            tokio::time::sleep(total).await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if let Some(error) = self.broken.get(normalized_title) {
            return Err(error.clone());
        }

        let scripted = self
            .failures
            .lock()
            .unwrap()
            .get_mut(normalized_title)
            .and_then(|queue| queue.pop_front());
        if let Some(error) = scripted {
            return Err(error);
        }

        Ok(self
            .candidates
            .get(normalized_title)
            .cloned()
            .unwrap_or_default())
    }
}
