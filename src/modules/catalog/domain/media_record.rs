use crate::modules::provider::domain::{MediaDetails, MediaType};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One row of the internal catalog, shared across users and ratings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MediaRecord {
    pub id: Uuid,
    /// Provider-scoped identity, `"<provider>:<external_id>"`
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

/// Everything needed to create a catalog row for a newly selected item
#[derive(Debug, Clone, PartialEq)]
pub struct NewMediaRecord {
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
}

impl NewMediaRecord {
    /// Build an insertable record from a provider detail payload
    pub fn from_details(external_id: String, details: &MediaDetails, added_by: Option<Uuid>) -> Self {
        Self {
            external_id,
            slug: derive_slug(details.media_type, &details.title),
            title: details.title.clone(),
            media_type: details.media_type,
            thumbnail: details.poster.clone(),
            year: details.year,
            genres: details.genres.clone(),
            synopsis: details.synopsis.clone(),
            actors: details.cast.clone(),
            added_by,
        }
    }
}

/// Derive the URL-friendly slug, `"<type>-<title>"` lowercased with runs of
/// non-alphanumerics collapsed to single hyphens
pub fn derive_slug(media_type: MediaType, title: &str) -> String {
    let mut slug = String::with_capacity(title.len() + 8);
    slug.push_str(&media_type.to_string());

    let mut pending_hyphen = true;
    for ch in title.chars() {
        if ch.is_alphanumeric() {
            if pending_hyphen {
                slug.push('-');
                pending_hyphen = false;
            }
            for lower in ch.to_lowercase() {
                slug.push(lower);
            }
        } else {
            pending_hyphen = true;
        }
    }

    // Title with no alphanumerics at all leaves just the type prefix
    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_is_type_prefixed_and_hyphenated() {
        assert_eq!(derive_slug(MediaType::Movie, "The Matrix"), "movie-the-matrix");
        assert_eq!(derive_slug(MediaType::Tv, "Breaking Bad"), "tv-breaking-bad");
    }

    #[test]
    fn slug_collapses_punctuation_runs() {
        assert_eq!(
            derive_slug(MediaType::Anime, "Fullmetal Alchemist: Brotherhood"),
            "anime-fullmetal-alchemist-brotherhood"
        );
        assert_eq!(derive_slug(MediaType::Movie, "  WALL·E  "), "movie-wall-e");
    }

    #[test]
    fn slug_has_no_trailing_hyphen() {
        assert_eq!(derive_slug(MediaType::Manga, "Berserk!"), "manga-berserk");
    }
}
