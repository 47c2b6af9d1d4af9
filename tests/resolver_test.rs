mod utils;

use hyouka::modules::catalog::application::MediaResolver;
use hyouka::modules::catalog::domain::{MediaRecord, MediaRepository, NewMediaRecord};
use hyouka::modules::provider::application::DetailsService;
use hyouka::modules::provider::infrastructure::adapters::ProviderAdapter;
use hyouka::modules::provider::infrastructure::cache::{DetailsCache, SystemClock};
use hyouka::{AppError, AppResult, MediaProvider, MediaType};
use mockall::mock;
use std::collections::HashMap;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;
use utils::{detail, InMemoryMediaRepository, StubAdapter};

mock! {
    Repo {}

    #[async_trait::async_trait]
    impl MediaRepository for Repo {
        async fn find_by_external_id(&self, external_id: &str) -> AppResult<Option<MediaRecord>>;
        async fn insert_if_absent(&self, record: NewMediaRecord) -> AppResult<MediaRecord>;
        async fn find_by_id(&self, id: uuid::Uuid) -> AppResult<Option<MediaRecord>>;
    }
}

fn build_details_service(adapter: Arc<StubAdapter>) -> Arc<DetailsService> {
    let mut adapters: HashMap<MediaProvider, Arc<dyn ProviderAdapter>> = HashMap::new();
    adapters.insert(adapter.provider(), adapter);

    let cache = Arc::new(DetailsCache::new(
        Duration::from_secs(1800),
        Arc::new(SystemClock),
    ));
    Arc::new(DetailsService::new(adapters, cache))
}

fn matrix_adapter() -> Arc<StubAdapter> {
    let mut details = detail(MediaProvider::Tmdb, MediaType::Movie, "603", "The Matrix");
    details.year = Some(1999);
    details.genres = vec![
        "Action".to_string(),
        "Science Fiction".to_string(),
        "Thriller".to_string(),
        "Cyberpunk".to_string(),
    ];
    details.cast = vec!["Keanu Reeves".to_string(), "Carrie-Anne Moss".to_string()];

    Arc::new(StubAdapter::new(MediaProvider::Tmdb).with_details("603", details))
}

#[tokio::test]
async fn resolving_a_new_item_creates_one_catalog_record() {
    let repo = Arc::new(InMemoryMediaRepository::new());
    let resolver = MediaResolver::new(repo.clone(), build_details_service(matrix_adapter()));

    let record = resolver
        .resolve(MediaProvider::Tmdb, MediaType::Movie, "603", None)
        .await
        .unwrap();

    assert_eq!(record.external_id, "tmdb:603");
    assert_eq!(record.title, "The Matrix");
    assert_eq!(record.slug, "movie-the-matrix");
    assert_eq!(record.year, Some(1999));
    // Catalog rows carry the full genre list, not the search-card cap
    assert_eq!(record.genres.len(), 4);
    assert_eq!(repo.insert_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn repeated_resolves_return_the_same_record() {
    let adapter = matrix_adapter();
    let repo = Arc::new(InMemoryMediaRepository::new());
    let resolver = MediaResolver::new(repo.clone(), build_details_service(Arc::clone(&adapter)));

    let first = resolver
        .resolve(MediaProvider::Tmdb, MediaType::Movie, "603", None)
        .await
        .unwrap();
    let second = resolver
        .resolve(MediaProvider::Tmdb, MediaType::Movie, "603", None)
        .await
        .unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(repo.insert_calls.load(Ordering::SeqCst), 1);
    // Second resolve takes the lookup fast path, no extra detail fetch
    assert_eq!(adapter.detail_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn unknown_provider_item_is_not_found() {
    let repo = Arc::new(InMemoryMediaRepository::new());
    let adapter = Arc::new(StubAdapter::new(MediaProvider::Tmdb));
    let resolver = MediaResolver::new(repo, build_details_service(adapter));

    let result = resolver
        .resolve(MediaProvider::Tmdb, MediaType::Movie, "999999", None)
        .await;

    assert!(matches!(result, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn blank_external_id_is_rejected() {
    let repo = Arc::new(InMemoryMediaRepository::new());
    let resolver = MediaResolver::new(repo, build_details_service(matrix_adapter()));

    let result = resolver
        .resolve(MediaProvider::Tmdb, MediaType::Movie, "  ", None)
        .await;

    assert!(matches!(result, Err(AppError::ValidationError(_))));
}

#[tokio::test]
async fn repository_errors_propagate_to_the_caller() {
    let mut repo = MockRepo::new();
    repo.expect_find_by_external_id()
        .withf(|id| id == "tmdb:603")
        .returning(|_| Err(AppError::DatabaseError("connection refused".to_string())));

    let resolver = MediaResolver::new(Arc::new(repo), build_details_service(matrix_adapter()));

    let result = resolver
        .resolve(MediaProvider::Tmdb, MediaType::Movie, "603", None)
        .await;

    assert!(matches!(result, Err(AppError::DatabaseError(_))));
}
