use super::models::*;
use crate::modules::provider::domain::{
    MediaDetails, MediaProvider, MediaType, SearchResult, SEARCH_GENRE_CAP,
};

const IMAGE_BASE: &str = "https://image.tmdb.org/t/p/w500";
const SITE_BASE: &str = "https://www.themoviedb.org";

/// TMDB-specific mapper producing the common search/detail shapes
#[derive(Debug, Clone, Default)]
pub struct TmdbMapper;

impl TmdbMapper {
    pub fn new() -> Self {
        Self
    }

    pub fn map_movie_summary(&self, source: MovieSummary) -> SearchResult {
        let original_id = source.id.to_string();
        SearchResult {
            id: SearchResult::compose_id(MediaType::Movie, &original_id),
            title: source.title.unwrap_or_else(|| "Unknown Title".to_string()),
            poster: Self::build_image_url(source.poster_path),
            year: Self::parse_year(source.release_date.as_deref()),
            rating: Self::clean_vote(source.vote_average),
            genres: Self::map_genre_ids(&source.genre_ids),
            media_type: MediaType::Movie,
            provider: MediaProvider::Tmdb,
            synopsis: Self::clean_text(source.overview),
            external_url: Some(format!("{}/movie/{}", SITE_BASE, source.id)),
            original_id,
        }
    }

    pub fn map_tv_summary(&self, source: TvSummary) -> SearchResult {
        let original_id = source.id.to_string();
        SearchResult {
            id: SearchResult::compose_id(MediaType::Tv, &original_id),
            title: source.name.unwrap_or_else(|| "Unknown Title".to_string()),
            poster: Self::build_image_url(source.poster_path),
            year: Self::parse_year(source.first_air_date.as_deref()),
            rating: Self::clean_vote(source.vote_average),
            genres: Self::map_genre_ids(&source.genre_ids),
            media_type: MediaType::Tv,
            provider: MediaProvider::Tmdb,
            synopsis: Self::clean_text(source.overview),
            external_url: Some(format!("{}/tv/{}", SITE_BASE, source.id)),
            original_id,
        }
    }

    pub fn map_movie_details(&self, source: MovieDetails) -> MediaDetails {
        let mut details = MediaDetails::bare(
            source.id.to_string(),
            source
                .title
                .clone()
                .unwrap_or_else(|| "Unknown Title".to_string()),
            MediaType::Movie,
            MediaProvider::Tmdb,
        );
        details.poster = Self::build_image_url(source.poster_path);
        details.year = Self::parse_year(source.release_date.as_deref());
        details.synopsis = Self::clean_text(source.overview);
        details.genres = source.genres.into_iter().map(|g| g.name).collect();
        details.runtime_minutes = source.runtime.filter(|r| *r > 0);
        details.production_companies = source
            .production_companies
            .into_iter()
            .map(|c| c.name)
            .collect();
        details.vote_average = Self::clean_vote(source.vote_average);
        details.external_links = [
            Some(format!("{}/movie/{}", SITE_BASE, source.id)),
            Self::clean_text(source.homepage),
            source
                .imdb_id
                .filter(|id| !id.is_empty())
                .map(|id| format!("https://www.imdb.com/title/{}", id)),
        ]
        .into_iter()
        .flatten()
        .collect();
        details
    }

    pub fn map_tv_details(&self, source: TvDetails) -> MediaDetails {
        let mut details = MediaDetails::bare(
            source.id.to_string(),
            source
                .name
                .clone()
                .unwrap_or_else(|| "Unknown Title".to_string()),
            MediaType::Tv,
            MediaProvider::Tmdb,
        );
        details.poster = Self::build_image_url(source.poster_path);
        details.year = Self::parse_year(source.first_air_date.as_deref());
        details.synopsis = Self::clean_text(source.overview);
        details.genres = source.genres.into_iter().map(|g| g.name).collect();
        details.runtime_minutes = source.episode_run_time.first().copied().filter(|r| *r > 0);
        details.production_companies = source
            .production_companies
            .into_iter()
            .map(|c| c.name)
            .collect();
        details.vote_average = Self::clean_vote(source.vote_average);
        details.external_links = [
            Some(format!("{}/tv/{}", SITE_BASE, source.id)),
            Self::clean_text(source.homepage),
        ]
        .into_iter()
        .flatten()
        .collect();
        details
    }

    /// Build full image URL from a TMDB file path
    fn build_image_url(file_path: Option<String>) -> Option<String> {
        file_path
            .filter(|p| !p.is_empty())
            .map(|p| format!("{}{}", IMAGE_BASE, p))
    }

    /// TMDB dates are `YYYY-MM-DD`; an empty string means unknown
    fn parse_year(date: Option<&str>) -> Option<i32> {
        date.and_then(|d| d.get(0..4)).and_then(|y| y.parse().ok())
    }

    /// TMDB reports 0.0 for unrated items
    fn clean_vote(vote: Option<f32>) -> Option<f32> {
        vote.filter(|v| *v > 0.0)
    }

    fn clean_text(text: Option<String>) -> Option<String> {
        text.filter(|t| !t.trim().is_empty())
    }

    /// Search responses carry numeric genre ids only; resolve against the
    /// documented movie/TV genre list, capped for display
    fn map_genre_ids(genre_ids: &[i32]) -> Vec<String> {
        genre_ids
            .iter()
            .filter_map(|id| Self::genre_name(*id))
            .take(SEARCH_GENRE_CAP)
            .map(|name| name.to_string())
            .collect()
    }

    fn genre_name(id: i32) -> Option<&'static str> {
        let name = match id {
            28 => "Action",
            12 => "Adventure",
            16 => "Animation",
            35 => "Comedy",
            80 => "Crime",
            99 => "Documentary",
            18 => "Drama",
            10751 => "Family",
            14 => "Fantasy",
            36 => "History",
            27 => "Horror",
            10402 => "Music",
            9648 => "Mystery",
            10749 => "Romance",
            878 => "Science Fiction",
            10770 => "TV Movie",
            53 => "Thriller",
            10752 => "War",
            37 => "Western",
            10759 => "Action & Adventure",
            10762 => "Kids",
            10763 => "News",
            10764 => "Reality",
            10765 => "Sci-Fi & Fantasy",
            10766 => "Soap",
            10767 => "Talk",
            10768 => "War & Politics",
            _ => return None,
        };
        Some(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn maps_movie_summary_with_all_fields() {
        let summary: MovieSummary = serde_json::from_value(json!({
            "id": 603,
            "title": "The Matrix",
            "release_date": "1999-03-30",
            "vote_average": 8.7,
            "genre_ids": [28, 878, 53, 80],
            "poster_path": "/matrix.jpg",
            "overview": "A computer hacker learns the truth."
        }))
        .unwrap();

        let result = TmdbMapper::new().map_movie_summary(summary);
        assert_eq!(result.id, "movie-603");
        assert_eq!(result.title, "The Matrix");
        assert_eq!(result.year, Some(1999));
        assert_eq!(result.rating, Some(8.7));
        // Capped to three for display
        assert_eq!(result.genres, vec!["Action", "Science Fiction", "Thriller"]);
        assert_eq!(
            result.poster.as_deref(),
            Some("https://image.tmdb.org/t/p/w500/matrix.jpg")
        );
        assert_eq!(result.provider, MediaProvider::Tmdb);
    }

    #[test]
    fn tolerates_missing_optional_fields() {
        let summary: MovieSummary = serde_json::from_value(json!({ "id": 1 })).unwrap();

        let result = TmdbMapper::new().map_movie_summary(summary);
        assert_eq!(result.title, "Unknown Title");
        assert_eq!(result.year, None);
        assert_eq!(result.rating, None);
        assert!(result.genres.is_empty());
        assert_eq!(result.poster, None);
        assert_eq!(result.synopsis, None);
    }

    #[test]
    fn zero_vote_average_means_unrated() {
        let summary: MovieSummary = serde_json::from_value(json!({
            "id": 2,
            "title": "Obscure",
            "vote_average": 0.0
        }))
        .unwrap();

        let result = TmdbMapper::new().map_movie_summary(summary);
        assert_eq!(result.rating, None);
    }

    #[test]
    fn detail_genres_are_not_capped() {
        let details: MovieDetails = serde_json::from_value(json!({
            "id": 603,
            "title": "The Matrix",
            "genres": [
                {"id": 28, "name": "Action"},
                {"id": 878, "name": "Science Fiction"},
                {"id": 53, "name": "Thriller"},
                {"id": 80, "name": "Crime"}
            ],
            "runtime": 136
        }))
        .unwrap();

        let mapped = TmdbMapper::new().map_movie_details(details);
        assert_eq!(mapped.genres.len(), 4);
        assert_eq!(mapped.runtime_minutes, Some(136));
        assert_eq!(mapped.media_type, MediaType::Movie);
    }

    #[test]
    fn tv_details_use_first_episode_runtime() {
        let details: TvDetails = serde_json::from_value(json!({
            "id": 1396,
            "name": "Breaking Bad",
            "first_air_date": "2008-01-20",
            "episode_run_time": [45, 47]
        }))
        .unwrap();

        let mapped = TmdbMapper::new().map_tv_details(details);
        assert_eq!(mapped.runtime_minutes, Some(45));
        assert_eq!(mapped.year, Some(2008));
        assert_eq!(mapped.media_type, MediaType::Tv);
    }
}
