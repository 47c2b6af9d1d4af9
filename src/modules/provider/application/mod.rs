pub mod details_service;
pub mod search_service;

pub use details_service::DetailsService;
pub use search_service::{SearchOutcome, SearchService, SEARCH_BRANCHES};

use crate::modules::provider::domain::MediaProvider;
use crate::modules::provider::infrastructure::adapters::{
    JikanAdapter, OmdbAdapter, ProviderAdapter, TmdbAdapter,
};
use crate::modules::provider::infrastructure::cache::{DetailsCache, SystemClock};
use crate::shared::AppConfig;
use std::collections::HashMap;
use std::sync::Arc;

/// Wire the live adapters, cache, and services from configuration
pub fn build_provider_services(config: &AppConfig) -> (SearchService, Arc<DetailsService>) {
    let mut adapters: HashMap<MediaProvider, Arc<dyn ProviderAdapter>> = HashMap::new();
    adapters.insert(
        MediaProvider::Tmdb,
        Arc::new(TmdbAdapter::new(config.tmdb_api_key.clone())),
    );
    adapters.insert(MediaProvider::Jikan, Arc::new(JikanAdapter::new()));
    adapters.insert(
        MediaProvider::Omdb,
        Arc::new(OmdbAdapter::new(config.omdb_api_key.clone())),
    );

    let cache = Arc::new(DetailsCache::new(
        config.details_cache_ttl,
        Arc::new(SystemClock),
    ));

    let details = Arc::new(DetailsService::new(adapters.clone(), cache));
    let search = SearchService::new(adapters, Arc::clone(&details));

    (search, details)
}
