/// Shared fixtures for integration tests: a scriptable provider adapter with
/// call counters, an in-memory catalog repository, and record builders.
use async_trait::async_trait;
use hyouka::modules::catalog::domain::{MediaRecord, MediaRepository, NewMediaRecord};
use hyouka::modules::provider::infrastructure::adapters::ProviderAdapter;
use hyouka::{AppError, AppResult, MediaDetails, MediaProvider, MediaType, SearchResult};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use uuid::Uuid;

/// Provider adapter whose answers are scripted up front. Counts every
/// search and detail call so tests can assert on network traffic.
pub struct StubAdapter {
    provider: MediaProvider,
    results: HashMap<MediaType, Vec<SearchResult>>,
    details: HashMap<String, MediaDetails>,
    fail_search: bool,
    fail_details: bool,
    delay: Option<Duration>,
    pub search_calls: AtomicUsize,
    pub detail_calls: AtomicUsize,
}

impl StubAdapter {
    pub fn new(provider: MediaProvider) -> Self {
        Self {
            provider,
            results: HashMap::new(),
            details: HashMap::new(),
            fail_search: false,
            fail_details: false,
            delay: None,
            search_calls: AtomicUsize::new(0),
            detail_calls: AtomicUsize::new(0),
        }
    }

    pub fn with_results(mut self, media_type: MediaType, results: Vec<SearchResult>) -> Self {
        self.results.insert(media_type, results);
        self
    }

    pub fn with_details(mut self, external_id: &str, details: MediaDetails) -> Self {
        self.details.insert(external_id.to_string(), details);
        self
    }

    pub fn failing_search(mut self) -> Self {
        self.fail_search = true;
        self
    }

    pub fn failing_details(mut self) -> Self {
        self.fail_details = true;
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

#[async_trait]
impl ProviderAdapter for StubAdapter {
    fn provider(&self) -> MediaProvider {
        self.provider
    }

    fn supported_types(&self) -> &'static [MediaType] {
        match self.provider {
            MediaProvider::Tmdb => &[MediaType::Movie, MediaType::Tv],
            MediaProvider::Jikan => &[MediaType::Anime, MediaType::Manga],
            MediaProvider::Omdb => &[MediaType::Movie],
        }
    }

    async fn search(
        &self,
        _query: &str,
        media_type: MediaType,
        limit: usize,
    ) -> AppResult<Vec<SearchResult>> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if self.fail_search {
            return Err(AppError::ApiError(format!(
                "{} is on fire",
                self.provider
            )));
        }

        let mut hits = self
            .results
            .get(&media_type)
            .cloned()
            .unwrap_or_default();
        hits.truncate(limit);
        Ok(hits)
    }

    async fn get_details(
        &self,
        external_id: &str,
        _media_type: MediaType,
    ) -> AppResult<Option<MediaDetails>> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if self.fail_details {
            return Err(AppError::ApiError(format!(
                "{} is on fire",
                self.provider
            )));
        }

        Ok(self.details.get(external_id).cloned())
    }
}

/// In-memory catalog keyed by external_id; counts physical inserts
#[derive(Default)]
pub struct InMemoryMediaRepository {
    rows: Mutex<HashMap<String, MediaRecord>>,
    pub insert_calls: AtomicUsize,
}

impl InMemoryMediaRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MediaRepository for InMemoryMediaRepository {
    async fn find_by_external_id(&self, external_id: &str) -> AppResult<Option<MediaRecord>> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.get(external_id).cloned())
    }

    async fn insert_if_absent(&self, record: NewMediaRecord) -> AppResult<MediaRecord> {
        self.insert_calls.fetch_add(1, Ordering::SeqCst);

        let mut rows = self.rows.lock().unwrap();
        if let Some(existing) = rows.get(&record.external_id) {
            return Ok(existing.clone());
        }

        let now = chrono::Utc::now();
        let row = MediaRecord {
            id: Uuid::new_v4(),
            external_id: record.external_id.clone(),
            slug: record.slug,
            title: record.title,
            media_type: record.media_type,
            thumbnail: record.thumbnail,
            year: record.year,
            genres: record.genres,
            synopsis: record.synopsis,
            actors: record.actors,
            added_by: record.added_by,
            created_at: now,
            updated_at: now,
        };
        rows.insert(record.external_id, row.clone());
        Ok(row)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<MediaRecord>> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.values().find(|r| r.id == id).cloned())
    }
}

pub fn hit(
    provider: MediaProvider,
    media_type: MediaType,
    original_id: &str,
    title: &str,
    rating: Option<f32>,
    year: Option<i32>,
) -> SearchResult {
    SearchResult {
        id: SearchResult::compose_id(media_type, original_id),
        title: title.to_string(),
        poster: None,
        year,
        rating,
        genres: vec![],
        media_type,
        provider,
        synopsis: None,
        external_url: None,
        original_id: original_id.to_string(),
    }
}

pub fn detail(
    provider: MediaProvider,
    media_type: MediaType,
    external_id: &str,
    title: &str,
) -> MediaDetails {
    MediaDetails::bare(external_id, title, media_type, provider)
}
