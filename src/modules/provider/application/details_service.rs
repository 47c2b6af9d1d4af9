use crate::modules::provider::domain::{MediaDetails, MediaProvider, MediaType};
use crate::modules::provider::infrastructure::adapters::ProviderAdapter;
use crate::modules::provider::infrastructure::cache::DetailsCache;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use futures::future::{BoxFuture, FutureExt, Shared};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

type SharedFetch = Shared<BoxFuture<'static, Option<MediaDetails>>>;

/// Cached detail fetcher over the provider adapters.
///
/// On a cache hit within the TTL no network call is made. On a miss, at most
/// one fetch per key is in flight: concurrent callers for the same key await
/// the same shared future instead of issuing duplicate requests. A provider
/// failure degrades to `None` (the caller renders the basic card) and is
/// logged, never retried here.
pub struct DetailsService {
    adapters: HashMap<MediaProvider, Arc<dyn ProviderAdapter>>,
    cache: Arc<DetailsCache>,
    in_flight: Arc<DashMap<String, SharedFetch>>,
}

impl DetailsService {
    pub fn new(
        adapters: HashMap<MediaProvider, Arc<dyn ProviderAdapter>>,
        cache: Arc<DetailsCache>,
    ) -> Self {
        Self {
            adapters,
            cache,
            in_flight: Arc::new(DashMap::new()),
        }
    }

    /// Fetch full details for one external id, going to the network only on a
    /// cache miss. Returns `None` when the provider fails or has no record.
    pub async fn get_details(
        &self,
        provider: MediaProvider,
        media_type: MediaType,
        external_id: &str,
    ) -> Option<MediaDetails> {
        let key = DetailsCache::cache_key(provider, external_id);

        if let Some(hit) = self.cache.get(&key) {
            return Some(hit);
        }

        let fetch = match self.in_flight.entry(key.clone()) {
            Entry::Occupied(existing) => {
                debug!("Joining in-flight fetch for key: {}", key);
                existing.get().clone()
            }
            Entry::Vacant(vacant) => {
                let adapter = match self.adapters.get(&provider) {
                    Some(adapter) => Arc::clone(adapter),
                    None => {
                        warn!("No adapter registered for provider {}", provider);
                        return None;
                    }
                };
                let cache = Arc::clone(&self.cache);
                let in_flight = Arc::clone(&self.in_flight);
                let owned_key = key.clone();
                let owned_id = external_id.to_string();

                let fetch = async move {
                    let fetched = match adapter.get_details(&owned_id, media_type).await {
                        Ok(details) => details,
                        Err(e) => {
                            warn!(
                                "Detail fetch failed for {} '{}': {}",
                                provider, owned_id, e
                            );
                            None
                        }
                    };

                    if let Some(details) = &fetched {
                        cache.insert(owned_key.clone(), details.clone());
                    }
                    in_flight.remove(&owned_key);
                    fetched
                }
                .boxed()
                .shared();

                vacant.insert(fetch.clone());
                fetch
            }
        };

        fetch.await
    }

    pub fn cache(&self) -> &DetailsCache {
        &self.cache
    }
}
