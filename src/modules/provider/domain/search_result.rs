use super::{MediaProvider, MediaType};
use serde::{Deserialize, Serialize};

/// Genres shown on a search card are capped for display; detail records are not
pub const SEARCH_GENRE_CAP: usize = 3;

/// One normalized hit from any provider's search endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchResult {
    /// Unique within one result list; encodes media type + provider-native id
    pub id: String,
    pub title: String,
    pub poster: Option<String>,
    pub year: Option<i32>,
    pub rating: Option<f32>,
    /// Provider-relevance order, capped to `SEARCH_GENRE_CAP`
    pub genres: Vec<String>,
    pub media_type: MediaType,
    /// Which provider produced this hit
    pub provider: MediaProvider,
    pub synopsis: Option<String>,
    pub external_url: Option<String>,
    /// Provider-native id, opaque outside that provider's namespace
    pub original_id: String,
}

impl SearchResult {
    /// Compose the list-unique id from media type and provider-native id
    pub fn compose_id(media_type: MediaType, original_id: &str) -> String {
        format!("{}-{}", media_type, original_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_encodes_type_and_native_id() {
        assert_eq!(SearchResult::compose_id(MediaType::Movie, "603"), "movie-603");
        assert_eq!(
            SearchResult::compose_id(MediaType::Anime, "5114"),
            "anime-5114"
        );
    }
}
