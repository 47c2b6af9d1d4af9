use super::mapper::OmdbMapper;
use super::models::*;
use crate::modules::provider::domain::{MediaDetails, MediaProvider, MediaType, SearchResult};
use crate::modules::provider::infrastructure::adapters::ProviderAdapter;
use crate::modules::provider::infrastructure::http_client::RateLimitClient;
use crate::shared::errors::{AppError, AppResult};
use async_trait::async_trait;

const SUPPORTED: &[MediaType] = &[MediaType::Movie, MediaType::Tv];

/// OMDb provider adapter; general media lookups keyed by IMDb id
pub struct OmdbAdapter {
    http_client: RateLimitClient,
    base_url: String,
    api_key: String,
    mapper: OmdbMapper,
}

impl OmdbAdapter {
    pub fn new(api_key: String) -> Self {
        Self {
            http_client: RateLimitClient::for_omdb(),
            base_url: "https://www.omdbapi.com".to_string(),
            api_key,
            mapper: OmdbMapper::new(),
        }
    }

    /// Create adapter with custom HTTP client (for testing)
    pub fn with_client(http_client: RateLimitClient, api_key: String) -> Self {
        Self {
            http_client,
            base_url: "https://www.omdbapi.com".to_string(),
            api_key,
            mapper: OmdbMapper::new(),
        }
    }

    pub fn can_make_request_now(&self) -> bool {
        self.http_client.can_make_request_now()
    }

    fn build_url(&self, params: &[(&str, &str)]) -> String {
        let mut url = format!("{}/?apikey={}", self.base_url, self.api_key);
        for (key, value) in params {
            url.push_str(&format!("&{}={}", key, urlencoding::encode(value)));
        }
        url
    }
}

#[async_trait]
impl ProviderAdapter for OmdbAdapter {
    fn provider(&self) -> MediaProvider {
        MediaProvider::Omdb
    }

    fn supported_types(&self) -> &'static [MediaType] {
        SUPPORTED
    }

    async fn search(
        &self,
        query: &str,
        media_type: MediaType,
        limit: usize,
    ) -> AppResult<Vec<SearchResult>> {
        let type_param = match media_type {
            MediaType::Movie => "movie",
            MediaType::Tv => "series",
            other => {
                return Err(AppError::ValidationError(format!(
                    "OMDb does not support searching {}",
                    other
                )))
            }
        };

        let url = self.build_url(&[("s", query), ("type", type_param), ("page", "1")]);

        log::info!("OMDb: Searching for '{}' (limit: {})", query, limit);

        let response: OmdbSearchResponse = self.http_client.get(&url).await?;

        if response.response != "True" {
            // "Movie not found!" is a normal empty result, not a failure
            match response.error.as_deref() {
                Some("Movie not found!") | Some("Series not found!") | None => {
                    log::info!("OMDb: No results for '{}'", query);
                    return Ok(vec![]);
                }
                Some(other) => {
                    return Err(AppError::ApiError(format!("OMDb error: {}", other)));
                }
            }
        }

        let results: Vec<SearchResult> = response
            .search
            .into_iter()
            .take(limit)
            .map(|item| self.mapper.map_search_item(item))
            .collect();

        log::info!("OMDb: Found {} results for '{}'", results.len(), query);
        Ok(results)
    }

    async fn get_details(
        &self,
        external_id: &str,
        _media_type: MediaType,
    ) -> AppResult<Option<MediaDetails>> {
        // OMDb detail lookups are keyed by IMDb id; the type is implied
        let url = self.build_url(&[("i", external_id), ("plot", "full")]);

        log::info!("OMDb: Getting details for ID '{}'", external_id);

        let response: OmdbDetails = self.http_client.get(&url).await?;

        if response.response.as_deref() == Some("False") {
            match response.error.as_deref() {
                Some("Error getting data.") | Some("Incorrect IMDb ID.") => {
                    log::info!("OMDb: No record found for ID '{}'", external_id);
                    return Ok(None);
                }
                Some(other) => {
                    return Err(AppError::ApiError(format!("OMDb error: {}", other)));
                }
                None => return Ok(None),
            }
        }

        Ok(Some(self.mapper.map_details(response)))
    }
}
