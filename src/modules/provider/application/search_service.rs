use super::details_service::DetailsService;
use crate::modules::provider::domain::{
    sort_results, MediaProvider, MediaType, SearchResult, SearchSort,
};
use crate::modules::provider::infrastructure::adapters::ProviderAdapter;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::Validator;
use futures::future::{self, BoxFuture, FutureExt};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Fixed fan-out order; concatenation of results follows this sequence
/// regardless of which branch resolves first.
pub const SEARCH_BRANCHES: [(MediaProvider, MediaType); 5] = [
    (MediaProvider::Tmdb, MediaType::Movie),
    (MediaProvider::Tmdb, MediaType::Tv),
    (MediaProvider::Jikan, MediaType::Anime),
    (MediaProvider::Jikan, MediaType::Manga),
    (MediaProvider::Omdb, MediaType::Movie),
];

const DEFAULT_BRANCH_LIMIT: usize = 8;
const DEFAULT_ENRICH_LIMIT: usize = 5;

/// Outcome of one aggregated search
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// This was the latest issued query; results are safe to display
    Current(Vec<SearchResult>),
    /// A newer query was issued while this one ran; discard
    Superseded,
}

impl SearchOutcome {
    pub fn into_results(self) -> Option<Vec<SearchResult>> {
        match self {
            SearchOutcome::Current(results) => Some(results),
            SearchOutcome::Superseded => None,
        }
    }
}

/// Fans a query out to every provider branch in parallel and assembles one
/// flat, optionally sorted result list.
///
/// Branches are independently fallible: one provider failing contributes zero
/// results and never aborts the others. Movie/TV hits are enriched with a
/// bounded number of per-item detail fetches (plot, rating) before assembly.
pub struct SearchService {
    adapters: HashMap<MediaProvider, Arc<dyn ProviderAdapter>>,
    details: Arc<DetailsService>,
    sequence: AtomicU64,
    branch_limit: usize,
    enrich_limit: usize,
}

impl SearchService {
    pub fn new(
        adapters: HashMap<MediaProvider, Arc<dyn ProviderAdapter>>,
        details: Arc<DetailsService>,
    ) -> Self {
        Self {
            adapters,
            details,
            sequence: AtomicU64::new(0),
            branch_limit: DEFAULT_BRANCH_LIMIT,
            enrich_limit: DEFAULT_ENRICH_LIMIT,
        }
    }

    pub fn with_limits(mut self, branch_limit: usize, enrich_limit: usize) -> Self {
        self.branch_limit = branch_limit;
        self.enrich_limit = enrich_limit;
        self
    }

    /// Run one aggregated search.
    ///
    /// Returns `SearchOutcome::Superseded` when a newer call was issued while
    /// this one was in flight, so stale responses never overwrite newer state.
    /// Errors only when the input is invalid or every provider branch failed.
    pub async fn search(&self, query: &str, sort: SearchSort) -> AppResult<SearchOutcome> {
        Validator::validate_search_query(query)?;
        Validator::validate_result_limit(self.branch_limit)?;

        let ticket = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        let query = query.trim();

        debug!("Search #{} for '{}' across {} branches", ticket, query, SEARCH_BRANCHES.len());

        let branch_futures: Vec<BoxFuture<'_, Result<Vec<SearchResult>, AppError>>> =
            SEARCH_BRANCHES
                .iter()
                .map(|(provider, media_type)| {
                    self.run_branch(*provider, *media_type, query).boxed()
                })
                .collect();

        let branch_outcomes = future::join_all(branch_futures).await;

        if self.sequence.load(Ordering::SeqCst) != ticket {
            debug!("Search #{} superseded, dropping {} branch outcomes", ticket, branch_outcomes.len());
            return Ok(SearchOutcome::Superseded);
        }

        let mut results = Vec::new();
        let mut failed_branches = 0;
        for ((provider, media_type), outcome) in SEARCH_BRANCHES.iter().zip(branch_outcomes) {
            match outcome {
                Ok(branch_results) => results.extend(branch_results),
                Err(e) => {
                    failed_branches += 1;
                    warn!("{} {} branch failed: {}", provider, media_type, e);
                }
            }
        }

        if failed_branches == SEARCH_BRANCHES.len() {
            return Err(AppError::ExternalServiceError(
                "All providers failed to answer the search".to_string(),
            ));
        }

        sort_results(&mut results, sort);

        info!(
            "Search #{} for '{}' returned {} results ({} branches failed)",
            ticket,
            query,
            results.len(),
            failed_branches
        );

        Ok(SearchOutcome::Current(results))
    }

    async fn run_branch(
        &self,
        provider: MediaProvider,
        media_type: MediaType,
        query: &str,
    ) -> AppResult<Vec<SearchResult>> {
        let adapter = self.adapters.get(&provider).ok_or_else(|| {
            AppError::ValidationError(format!("No adapter registered for provider {}", provider))
        })?;

        let mut results = adapter.search(query, media_type, self.branch_limit).await?;

        // Movie/TV search pages omit plot detail (OMDb's search endpoint
        // returns neither rating nor plot); enrich the first few hits so
        // cards can show rating and synopsis without another round trip
        if matches!(media_type, MediaType::Movie | MediaType::Tv) {
            self.enrich_results(provider, &mut results).await;
        }

        Ok(results)
    }

    /// Fill missing rating/synopsis/poster from the detail endpoint, bounded
    /// to the first `enrich_limit` hits. Per-item failure keeps the basic hit.
    async fn enrich_results(&self, provider: MediaProvider, results: &mut [SearchResult]) {
        for result in results.iter_mut().take(self.enrich_limit) {
            if result.rating.is_some() && result.synopsis.is_some() {
                continue;
            }

            let details = self
                .details
                .get_details(provider, result.media_type, &result.original_id)
                .await;

            if let Some(details) = details {
                if result.rating.is_none() {
                    result.rating = details.rating();
                }
                if result.synopsis.is_none() {
                    result.synopsis = details.synopsis;
                }
                if result.poster.is_none() {
                    result.poster = details.poster;
                }
            }
        }
    }
}
