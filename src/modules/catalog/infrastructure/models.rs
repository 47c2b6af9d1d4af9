use crate::modules::catalog::domain::{MediaRecord, NewMediaRecord};
use crate::modules::provider::domain::MediaType;
use crate::schema::media;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

#[derive(Debug, Clone, Queryable, Identifiable, Selectable)]
#[diesel(table_name = media)]
pub struct MediaRow {
    pub id: Uuid,
    pub external_id: String,
    pub slug: String,
    pub title: String,
    pub media_type: MediaType,
    pub thumbnail: Option<String>,
    pub year: Option<i32>,
    pub genres: Vec<String>,
    pub synopsis: Option<String>,
    pub actors: Vec<String>,
    pub added_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<MediaRow> for MediaRecord {
    fn from(row: MediaRow) -> Self {
        MediaRecord {
            id: row.id,
            external_id: row.external_id,
            slug: row.slug,
            title: row.title,
            media_type: row.media_type,
            thumbnail: row.thumbnail,
            year: row.year,
            genres: row.genres,
            synopsis: row.synopsis,
            actors: row.actors,
            added_by: row.added_by,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = media)]
pub struct NewMediaRow {
    pub id: Uuid,
    pub external_id: String,
    pub slug: String,
    pub title: String,
    pub media_type: MediaType,
    pub thumbnail: Option<String>,
    pub year: Option<i32>,
    pub genres: Vec<String>,
    pub synopsis: Option<String>,
    pub actors: Vec<String>,
    pub added_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<NewMediaRecord> for NewMediaRow {
    fn from(record: NewMediaRecord) -> Self {
        let now = Utc::now();
        NewMediaRow {
            id: Uuid::new_v4(),
            external_id: record.external_id,
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
        }
    }
}
