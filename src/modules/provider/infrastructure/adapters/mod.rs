pub mod jikan;
pub mod omdb;
pub mod tmdb;

use crate::modules::provider::domain::{MediaDetails, MediaProvider, MediaType, SearchResult};
use crate::shared::errors::AppResult;
use async_trait::async_trait;

pub use jikan::JikanAdapter;
pub use omdb::OmdbAdapter;
pub use tmdb::TmdbAdapter;

/// One external metadata provider behind a uniform search/detail surface.
///
/// Implementations own their HTTP client and mapper; callers only see the
/// normalized domain shapes.
#[async_trait]
pub trait ProviderAdapter: Send + Sync {
    fn provider(&self) -> MediaProvider;

    /// Media types this provider can search
    fn supported_types(&self) -> &'static [MediaType];

    /// Search the provider and normalize the first page of hits.
    /// `limit` caps the number of returned results.
    async fn search(
        &self,
        query: &str,
        media_type: MediaType,
        limit: usize,
    ) -> AppResult<Vec<SearchResult>>;

    /// Fetch the full detail record for one provider-native id.
    /// Returns `Ok(None)` when the provider has no item for the id.
    async fn get_details(
        &self,
        external_id: &str,
        media_type: MediaType,
    ) -> AppResult<Option<MediaDetails>>;
}
