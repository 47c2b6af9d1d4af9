use std::sync::Arc;

use uuid::Uuid;

use crate::modules::catalog::domain::{MediaRecord, MediaRepository, NewMediaRecord};
use crate::modules::provider::application::DetailsService;
use crate::modules::provider::domain::{MediaDetails, MediaProvider, MediaType, SearchResult};
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::Validator;
use tracing::{debug, info};

/// Maps a provider-side item onto exactly one internal catalog record.
///
/// Resolution is idempotent: repeated calls for the same provider item return
/// the same record id, whether the row pre-existed or was created by a
/// concurrent resolve.
pub struct MediaResolver {
    repository: Arc<dyn MediaRepository>,
    details: Arc<DetailsService>,
}

impl MediaResolver {
    pub fn new(repository: Arc<dyn MediaRepository>, details: Arc<DetailsService>) -> Self {
        Self {
            repository,
            details,
        }
    }

    /// Catalog identity for one provider item, `"<provider>:<external_id>"`.
    /// The same shape the detail cache keys on, so the two stay in lockstep.
    pub fn catalog_external_id(provider: MediaProvider, external_id: &str) -> String {
        format!("{}:{}", provider.tag(), external_id.trim())
    }

    /// Resolve a selected search hit to its internal catalog record,
    /// inserting one when the item has never been cataloged.
    pub async fn resolve_result(
        &self,
        result: &SearchResult,
        added_by: Option<Uuid>,
    ) -> AppResult<MediaRecord> {
        self.resolve(result.provider, result.media_type, &result.original_id, added_by)
            .await
    }

    /// Resolve by provider coordinates. Fast path is a plain lookup; on a miss
    /// the full detail record is fetched and inserted with a conflict-tolerant
    /// upsert, so concurrent resolves of the same item converge on one row.
    pub async fn resolve(
        &self,
        provider: MediaProvider,
        media_type: MediaType,
        external_id: &str,
        added_by: Option<Uuid>,
    ) -> AppResult<MediaRecord> {
        Validator::validate_external_id(external_id)?;

        let catalog_id = Self::catalog_external_id(provider, external_id);

        if let Some(existing) = self.repository.find_by_external_id(&catalog_id).await? {
            debug!("Resolved '{}' to existing record {}", catalog_id, existing.id);
            return Ok(existing);
        }

        let details = self
            .details
            .get_details(provider, media_type, external_id)
            .await
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "No details available from {} for '{}'",
                    provider, external_id
                ))
            })?;

        self.insert_from_details(catalog_id, &details, added_by).await
    }

    async fn insert_from_details(
        &self,
        catalog_id: String,
        details: &MediaDetails,
        added_by: Option<Uuid>,
    ) -> AppResult<MediaRecord> {
        let record = NewMediaRecord::from_details(catalog_id.clone(), details, added_by);
        let resolved = self.repository.insert_if_absent(record).await?;

        info!(
            "Resolved '{}' ({}) to catalog record {}",
            details.title, catalog_id, resolved.id
        );

        Ok(resolved)
    }
}
