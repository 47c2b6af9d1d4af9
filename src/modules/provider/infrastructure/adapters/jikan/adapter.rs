use super::mapper::JikanMapper;
use super::models::*;
use crate::modules::provider::domain::{MediaDetails, MediaProvider, MediaType, SearchResult};
use crate::modules::provider::infrastructure::adapters::ProviderAdapter;
use crate::modules::provider::infrastructure::http_client::RateLimitClient;
use crate::shared::errors::{AppError, AppResult};
use async_trait::async_trait;

const SUPPORTED: &[MediaType] = &[MediaType::Anime, MediaType::Manga];

/// Jikan (MyAnimeList) provider adapter for anime and manga
pub struct JikanAdapter {
    http_client: RateLimitClient,
    base_url: String,
    mapper: JikanMapper,
}

impl JikanAdapter {
    pub fn new() -> Self {
        Self {
            http_client: RateLimitClient::for_jikan(),
            base_url: "https://api.jikan.moe/v4".to_string(),
            mapper: JikanMapper::new(),
        }
    }

    /// Create adapter with custom HTTP client (for testing)
    pub fn with_client(http_client: RateLimitClient) -> Self {
        Self {
            http_client,
            base_url: "https://api.jikan.moe/v4".to_string(),
            mapper: JikanMapper::new(),
        }
    }

    pub fn can_make_request_now(&self) -> bool {
        self.http_client.can_make_request_now()
    }

    fn search_url(&self, endpoint: &str, query: &str, limit: usize) -> String {
        format!(
            "{}/{}?q={}&limit={}",
            self.base_url,
            endpoint,
            urlencoding::encode(query),
            limit
        )
    }

    fn parse_native_id(&self, external_id: &str) -> AppResult<u32> {
        external_id
            .parse()
            .map_err(|_| AppError::ValidationError(format!("Invalid MAL ID: {}", external_id)))
    }

    async fn search_anime(&self, query: &str, limit: usize) -> AppResult<Vec<SearchResult>> {
        let url = self.search_url("anime", query, limit);

        log::info!("Jikan: Searching anime for '{}' (limit: {})", query, limit);

        let response: JikanList<Anime> = self.http_client.get(&url).await?;

        let results: Vec<SearchResult> = response
            .data
            .into_iter()
            .take(limit)
            .map(|anime| self.mapper.map_anime_summary(anime))
            .collect();

        log::info!("Jikan: Found {} anime for '{}'", results.len(), query);
        Ok(results)
    }

    async fn search_manga(&self, query: &str, limit: usize) -> AppResult<Vec<SearchResult>> {
        let url = self.search_url("manga", query, limit);

        log::info!("Jikan: Searching manga for '{}' (limit: {})", query, limit);

        let response: JikanList<Manga> = self.http_client.get(&url).await?;

        let results: Vec<SearchResult> = response
            .data
            .into_iter()
            .take(limit)
            .map(|manga| self.mapper.map_manga_summary(manga))
            .collect();

        log::info!("Jikan: Found {} manga for '{}'", results.len(), query);
        Ok(results)
    }

    async fn anime_details(&self, id: u32) -> AppResult<Option<MediaDetails>> {
        let url = format!("{}/anime/{}/full", self.base_url, id);

        let response: JikanItem<Anime> = match self.http_client.get(&url).await {
            Ok(response) => response,
            Err(AppError::NotFound(_)) => return Ok(None),
            Err(AppError::ApiError(msg)) if msg.contains("404") => {
                log::info!("Jikan: No anime found for ID '{}'", id);
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        Ok(Some(self.mapper.map_anime_details(response.data)))
    }

    async fn manga_details(&self, id: u32) -> AppResult<Option<MediaDetails>> {
        let url = format!("{}/manga/{}/full", self.base_url, id);

        let response: JikanItem<Manga> = match self.http_client.get(&url).await {
            Ok(response) => response,
            Err(AppError::NotFound(_)) => return Ok(None),
            Err(AppError::ApiError(msg)) if msg.contains("404") => {
                log::info!("Jikan: No manga found for ID '{}'", id);
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        Ok(Some(self.mapper.map_manga_details(response.data)))
    }
}

impl Default for JikanAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProviderAdapter for JikanAdapter {
    fn provider(&self) -> MediaProvider {
        MediaProvider::Jikan
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
            MediaType::Anime => self.search_anime(query, limit).await,
            MediaType::Manga => self.search_manga(query, limit).await,
            other => Err(AppError::ValidationError(format!(
                "Jikan does not support searching {}",
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

        log::info!("Jikan: Getting {} details for ID '{}'", media_type, id);

        match media_type {
            MediaType::Anime => self.anime_details(id).await,
            MediaType::Manga => self.manga_details(id).await,
            other => Err(AppError::ValidationError(format!(
                "Jikan does not hold {} records",
                other
            ))),
        }
    }
}
