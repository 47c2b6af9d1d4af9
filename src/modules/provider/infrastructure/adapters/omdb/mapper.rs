use super::models::*;
use crate::modules::provider::domain::{
    MediaDetails, MediaProvider, MediaType, SearchResult, SEARCH_GENRE_CAP,
};

/// OMDb-specific mapper; handles the "N/A" sentinel and comma-joined lists
#[derive(Debug, Clone, Default)]
pub struct OmdbMapper;

impl OmdbMapper {
    pub fn new() -> Self {
        Self
    }

    pub fn map_search_item(&self, source: OmdbSearchItem) -> SearchResult {
        let media_type = Self::map_type(source.r#type.as_deref());
        SearchResult {
            id: SearchResult::compose_id(media_type, &source.imdb_id),
            title: Self::clean(source.title).unwrap_or_else(|| "Unknown Title".to_string()),
            poster: Self::clean(source.poster),
            year: Self::parse_year(source.year.as_deref()),
            rating: None, // OMDb search hits carry no rating; details do
            genres: Vec::new(),
            media_type,
            provider: MediaProvider::Omdb,
            synopsis: None,
            external_url: Some(format!("https://www.imdb.com/title/{}", source.imdb_id)),
            original_id: source.imdb_id,
        }
    }

    pub fn map_details(&self, source: OmdbDetails) -> MediaDetails {
        let media_type = Self::map_type(source.r#type.as_deref());
        let external_id = source.imdb_id.clone().unwrap_or_default();

        let mut details = MediaDetails::bare(
            external_id.clone(),
            Self::clean(source.title).unwrap_or_else(|| "Unknown Title".to_string()),
            media_type,
            MediaProvider::Omdb,
        );
        details.poster = Self::clean(source.poster);
        details.year = Self::parse_year(source.year.as_deref());
        details.synopsis = Self::clean(source.plot);
        details.genres = Self::split_list(source.genre);
        details.cast = Self::split_list(source.actors);
        details.runtime_minutes = Self::parse_runtime(source.runtime.as_deref());
        details.production_companies = Self::split_list(source.production);
        details.imdb_rating = Self::clean(source.imdb_rating).and_then(|r| r.parse().ok());
        if !external_id.is_empty() {
            details.external_links = vec![format!("https://www.imdb.com/title/{}", external_id)];
        }
        details
    }

    /// Cap OMDb detail genres when reused on a search card
    pub fn cap_genres_for_search(genres: &[String]) -> Vec<String> {
        genres.iter().take(SEARCH_GENRE_CAP).cloned().collect()
    }

    /// "N/A" and empty strings mean absent
    fn clean(value: Option<String>) -> Option<String> {
        value.filter(|v| !v.trim().is_empty() && v != "N/A")
    }

    fn map_type(raw: Option<&str>) -> MediaType {
        match raw {
            Some("series") => MediaType::Tv,
            _ => MediaType::Movie,
        }
    }

    /// Years come as "1999" or ranges like "2005–2008"
    fn parse_year(year: Option<&str>) -> Option<i32> {
        year.filter(|y| *y != "N/A")
            .and_then(|y| y.chars().take(4).collect::<String>().parse().ok())
    }

    /// Runtimes read like "136 min"
    fn parse_runtime(runtime: Option<&str>) -> Option<u32> {
        runtime
            .filter(|r| *r != "N/A")
            .and_then(|r| r.split_whitespace().next())
            .and_then(|n| n.parse().ok())
    }

    fn split_list(value: Option<String>) -> Vec<String> {
        Self::clean(value)
            .map(|v| {
                v.split(',')
                    .map(|part| part.trim().to_string())
                    .filter(|part| !part.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn maps_full_details() {
        let details: OmdbDetails = serde_json::from_value(json!({
            "Title": "The Matrix",
            "Year": "1999",
            "Genre": "Action, Sci-Fi",
            "Plot": "A computer hacker learns the truth.",
            "Actors": "Keanu Reeves, Laurence Fishburne, Carrie-Anne Moss",
            "Runtime": "136 min",
            "Poster": "https://m.media-amazon.com/matrix.jpg",
            "imdbRating": "8.7",
            "imdbID": "tt0133093",
            "Type": "movie",
            "Response": "True"
        }))
        .unwrap();

        let mapped = OmdbMapper::new().map_details(details);
        assert_eq!(mapped.external_id, "tt0133093");
        assert_eq!(mapped.year, Some(1999));
        assert_eq!(mapped.imdb_rating, Some(8.7));
        assert_eq!(mapped.vote_average, None);
        assert_eq!(mapped.mal_score, None);
        assert_eq!(mapped.runtime_minutes, Some(136));
        assert_eq!(mapped.cast.len(), 3);
        assert_eq!(mapped.genres, vec!["Action", "Sci-Fi"]);
        assert_eq!(mapped.media_type, MediaType::Movie);
    }

    #[test]
    fn not_available_sentinel_maps_to_none() {
        let details: OmdbDetails = serde_json::from_value(json!({
            "Title": "Obscure",
            "Year": "N/A",
            "Genre": "N/A",
            "Plot": "N/A",
            "Actors": "N/A",
            "Runtime": "N/A",
            "Poster": "N/A",
            "imdbRating": "N/A",
            "imdbID": "tt0000001",
            "Type": "movie",
            "Response": "True"
        }))
        .unwrap();

        let mapped = OmdbMapper::new().map_details(details);
        assert_eq!(mapped.year, None);
        assert_eq!(mapped.synopsis, None);
        assert_eq!(mapped.imdb_rating, None);
        assert_eq!(mapped.runtime_minutes, None);
        assert!(mapped.genres.is_empty());
        assert!(mapped.cast.is_empty());
        assert_eq!(mapped.poster, None);
    }

    #[test]
    fn year_range_takes_first_year() {
        let item: OmdbSearchItem = serde_json::from_value(json!({
            "Title": "Avatar: The Last Airbender",
            "Year": "2005–2008",
            "imdbID": "tt0417299",
            "Type": "series"
        }))
        .unwrap();

        let result = OmdbMapper::new().map_search_item(item);
        assert_eq!(result.year, Some(2005));
        assert_eq!(result.media_type, MediaType::Tv);
        assert_eq!(result.id, "tv-tt0417299");
    }
}
