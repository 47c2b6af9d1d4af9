use super::mapper::TmdbMapper;
use super::models::*;
use crate::modules::provider::domain::{MediaDetails, MediaProvider, MediaType, SearchResult};
use crate::modules::provider::infrastructure::adapters::ProviderAdapter;
use crate::modules::provider::infrastructure::http_client::RateLimitClient;
use crate::shared::errors::{AppError, AppResult};
use async_trait::async_trait;

const SUPPORTED: &[MediaType] = &[MediaType::Movie, MediaType::Tv];

/// TMDB (The Movie Database) provider adapter for movies and TV shows
pub struct TmdbAdapter {
    http_client: RateLimitClient,
    base_url: String,
    api_key: String,
    mapper: TmdbMapper,
}

impl TmdbAdapter {
    pub fn new(api_key: String) -> Self {
        Self {
            http_client: RateLimitClient::for_tmdb(),
            base_url: "https://api.themoviedb.org/3".to_string(),
            api_key,
            mapper: TmdbMapper::new(),
        }
    }

    /// Create adapter with custom HTTP client (for testing)
    pub fn with_client(http_client: RateLimitClient, api_key: String) -> Self {
        Self {
            http_client,
            base_url: "https://api.themoviedb.org/3".to_string(),
            api_key,
            mapper: TmdbMapper::new(),
        }
    }

    pub fn can_make_request_now(&self) -> bool {
        self.http_client.can_make_request_now()
    }

    /// Build URL with API key parameter
    fn build_url(&self, endpoint: &str) -> String {
        format!("{}{}?api_key={}", self.base_url, endpoint, self.api_key)
    }

    /// Build URL with API key and additional query parameters
    fn build_url_with_params(&self, endpoint: &str, params: &[(&str, &str)]) -> String {
        let mut url = format!("{}{}?api_key={}", self.base_url, endpoint, self.api_key);
        for (key, value) in params {
            url.push_str(&format!("&{}={}", key, urlencoding::encode(value)));
        }
        url
    }

    fn parse_native_id(&self, external_id: &str) -> AppResult<u64> {
        external_id
            .parse()
            .map_err(|_| AppError::ValidationError(format!("Invalid TMDB ID: {}", external_id)))
    }

    async fn search_movies(&self, query: &str, limit: usize) -> AppResult<Vec<SearchResult>> {
        let url = self.build_url_with_params(
            "/search/movie",
            &[("query", query), ("page", "1"), ("language", "en-US")],
        );

        log::info!("TMDB: Searching movies for '{}' (limit: {})", query, limit);

        let response: TmdbSearchResponse<MovieSummary> = self.http_client.get(&url).await?;

        let results: Vec<SearchResult> = response
            .results
            .into_iter()
            .take(limit)
            .map(|summary| self.mapper.map_movie_summary(summary))
            .collect();

        log::info!("TMDB: Found {} movies for '{}'", results.len(), query);
        Ok(results)
    }

    async fn search_tv(&self, query: &str, limit: usize) -> AppResult<Vec<SearchResult>> {
        let url = self.build_url_with_params(
            "/search/tv",
            &[("query", query), ("page", "1"), ("language", "en-US")],
        );

        log::info!("TMDB: Searching TV shows for '{}' (limit: {})", query, limit);

        let response: TmdbSearchResponse<TvSummary> = self.http_client.get(&url).await?;

        let results: Vec<SearchResult> = response
            .results
            .into_iter()
            .take(limit)
            .map(|summary| self.mapper.map_tv_summary(summary))
            .collect();

        log::info!("TMDB: Found {} TV shows for '{}'", results.len(), query);
        Ok(results)
    }

    async fn movie_details(&self, id: u64) -> AppResult<Option<MediaDetails>> {
        let url = self.build_url(&format!("/movie/{}", id));

        let response: MovieDetails = match self.http_client.get(&url).await {
            Ok(response) => response,
            Err(AppError::NotFound(_)) => return Ok(None),
            Err(AppError::ApiError(msg)) if msg.contains("404") => {
                log::info!("TMDB: No movie found for ID '{}'", id);
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        Ok(Some(self.mapper.map_movie_details(response)))
    }

    async fn tv_details(&self, id: u64) -> AppResult<Option<MediaDetails>> {
        let url = self.build_url(&format!("/tv/{}", id));

        let response: TvDetails = match self.http_client.get(&url).await {
            Ok(response) => response,
            Err(AppError::NotFound(_)) => return Ok(None),
            Err(AppError::ApiError(msg)) if msg.contains("404") => {
                log::info!("TMDB: No TV show found for ID '{}'", id);
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        Ok(Some(self.mapper.map_tv_details(response)))
    }
}

#[async_trait]
impl ProviderAdapter for TmdbAdapter {
    fn provider(&self) -> MediaProvider {
        MediaProvider::Tmdb
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
        match media_type {
            MediaType::Movie => self.search_movies(query, limit).await,
            MediaType::Tv => self.search_tv(query, limit).await,
            other => Err(AppError::ValidationError(format!(
                "TMDB does not support searching {}",
                other
            ))),
        }
    }

    async fn get_details(
        &self,
        external_id: &str,
        media_type: MediaType,
    ) -> AppResult<Option<MediaDetails>> {
        let id = self.parse_native_id(external_id)?;

        log::info!("TMDB: Getting {} details for ID '{}'", media_type, id);

        match media_type {
            MediaType::Movie => self.movie_details(id).await,
            MediaType::Tv => self.tv_details(id).await,
            other => Err(AppError::ValidationError(format!(
                "TMDB does not hold {} records",
                other
            ))),
        }
    }
}
