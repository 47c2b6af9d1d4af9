use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use tokio::task;
use uuid::Uuid;

use super::models::{MediaRow, NewMediaRow};
use crate::modules::catalog::domain::{MediaRecord, MediaRepository, NewMediaRecord};
use crate::schema::media;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::Database;
use crate::{log_debug, log_warn};

pub struct MediaRepositoryImpl {
    db: Arc<Database>,
}

impl MediaRepositoryImpl {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl MediaRepository for MediaRepositoryImpl {
    async fn find_by_external_id(&self, external_id: &str) -> AppResult<Option<MediaRecord>> {
        let db = Arc::clone(&self.db);
        let external_id = external_id.to_string();

        task::spawn_blocking(move || {
            let mut conn = db.get_connection()?;

            let row = media::table
                .filter(media::external_id.eq(&external_id))
                .select(MediaRow::as_select())
                .first::<MediaRow>(&mut conn)
                .optional()
                .map_err(|e| AppError::DatabaseError(format!("Failed to query media: {}", e)))?;

            Ok(row.map(MediaRecord::from))
        })
        .await?
    }

    async fn insert_if_absent(&self, record: NewMediaRecord) -> AppResult<MediaRecord> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || {
            let mut conn = db.get_connection()?;
            let external_id = record.external_id.clone();
            let row = NewMediaRow::from(record);

            // ON CONFLICT DO NOTHING makes racing inserts converge on one row;
            // the follow-up select reads whichever insert won
            let inserted = diesel::insert_into(media::table)
                .values(&row)
                .on_conflict(media::external_id)
                .do_nothing()
                .execute(&mut conn)
                .map_err(|e| AppError::DatabaseError(format!("Failed to insert media: {}", e)))?;

            if inserted == 0 {
                log_debug!("Media '{}' already present, reusing existing row", external_id);
            }

            let surviving = media::table
                .filter(media::external_id.eq(&external_id))
                .select(MediaRow::as_select())
                .first::<MediaRow>(&mut conn)
                .map_err(|e| {
                    log_warn!("Media '{}' missing after upsert: {}", external_id, e);
                    AppError::DatabaseError(format!(
                        "Failed to read media after upsert: {}",
                        e
                    ))
                })?;

            Ok(MediaRecord::from(surviving))
        })
        .await?
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<MediaRecord>> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || {
            let mut conn = db.get_connection()?;

            let row = media::table
                .find(id)
                .select(MediaRow::as_select())
                .first::<MediaRow>(&mut conn)
                .optional()
                .map_err(|e| AppError::DatabaseError(format!("Failed to query media: {}", e)))?;

            Ok(row.map(MediaRecord::from))
        })
        .await?
    }
}
