use super::media_record::{MediaRecord, NewMediaRecord};
use crate::shared::errors::AppResult;
use async_trait::async_trait;

/// Persistence boundary for the internal catalog.
///
/// `insert_if_absent` must be atomic with respect to concurrent callers: two
/// racing inserts of the same `external_id` yield the same row.
#[async_trait]
pub trait MediaRepository: Send + Sync {
    async fn find_by_external_id(&self, external_id: &str) -> AppResult<Option<MediaRecord>>;

    /// Insert the record unless a row with its `external_id` already exists,
    /// then return the surviving row either way.
    async fn insert_if_absent(&self, record: NewMediaRecord) -> AppResult<MediaRecord>;

    async fn find_by_id(&self, id: uuid::Uuid) -> AppResult<Option<MediaRecord>>;
}
