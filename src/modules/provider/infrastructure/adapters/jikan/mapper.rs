use super::models::*;
use crate::modules::provider::domain::{
    MediaDetails, MediaProvider, MediaType, SearchResult, SEARCH_GENRE_CAP,
};

/// Jikan (MyAnimeList) specific mapper implementation
#[derive(Debug, Clone, Default)]
pub struct JikanMapper;

impl JikanMapper {
    pub fn new() -> Self {
        Self
    }

    pub fn map_anime_summary(&self, source: Anime) -> SearchResult {
        let original_id = source.mal_id.to_string();
        SearchResult {
            id: SearchResult::compose_id(MediaType::Anime, &original_id),
            title: Self::pick_title(source.title_english, source.title),
            poster: Self::extract_image_url(&source.images),
            year: source
                .year
                .or_else(|| Self::parse_year(source.aired.as_ref())),
            rating: source.score,
            genres: Self::extract_genres(&source.genres, Some(SEARCH_GENRE_CAP)),
            media_type: MediaType::Anime,
            provider: MediaProvider::Jikan,
            synopsis: Self::clean_text(source.synopsis),
            external_url: source.url,
            original_id,
        }
    }

    pub fn map_manga_summary(&self, source: Manga) -> SearchResult {
        let original_id = source.mal_id.to_string();
        SearchResult {
            id: SearchResult::compose_id(MediaType::Manga, &original_id),
            title: Self::pick_title(source.title_english, source.title),
            poster: Self::extract_image_url(&source.images),
            year: Self::parse_year(source.published.as_ref()),
            rating: source.score,
            genres: Self::extract_genres(&source.genres, Some(SEARCH_GENRE_CAP)),
            media_type: MediaType::Manga,
            provider: MediaProvider::Jikan,
            synopsis: Self::clean_text(source.synopsis),
            external_url: source.url,
            original_id,
        }
    }

    pub fn map_anime_details(&self, source: Anime) -> MediaDetails {
        let mut details = MediaDetails::bare(
            source.mal_id.to_string(),
            Self::pick_title(source.title_english.clone(), source.title.clone()),
            MediaType::Anime,
            MediaProvider::Jikan,
        );
        details.poster = Self::extract_image_url(&source.images);
        details.year = source
            .year
            .or_else(|| Self::parse_year(source.aired.as_ref()));
        details.synopsis = Self::clean_text(source.synopsis);
        details.genres = Self::extract_genres(&source.genres, None);
        details.studios = source.studios.into_iter().map(|s| s.name).collect();
        details.runtime_minutes = Self::parse_duration_minutes(source.duration.as_deref());
        details.mal_score = source.score;
        details.external_links = source.url.into_iter().collect();
        details
    }

    pub fn map_manga_details(&self, source: Manga) -> MediaDetails {
        let mut details = MediaDetails::bare(
            source.mal_id.to_string(),
            Self::pick_title(source.title_english.clone(), source.title.clone()),
            MediaType::Manga,
            MediaProvider::Jikan,
        );
        details.poster = Self::extract_image_url(&source.images);
        details.year = Self::parse_year(source.published.as_ref());
        details.synopsis = Self::clean_text(source.synopsis);
        details.genres = Self::extract_genres(&source.genres, None);
        // MAL models manga authors where anime has studios
        details.studios = source.authors.into_iter().map(|a| a.name).collect();
        details.mal_score = source.score;
        details.external_links = source.url.into_iter().collect();
        details
    }

    fn pick_title(english: Option<String>, romaji: Option<String>) -> String {
        english
            .filter(|t| !t.trim().is_empty())
            .or(romaji)
            .unwrap_or_else(|| "Unknown Title".to_string())
    }

    /// Prefer larger images
    fn extract_image_url(images: &Option<Images>) -> Option<String> {
        images.as_ref().and_then(|img| {
            img.jpg.as_ref().and_then(|jpg| {
                jpg.large_image_url
                    .clone()
                    .or_else(|| jpg.image_url.clone())
                    .or_else(|| jpg.small_image_url.clone())
            })
        })
    }

    fn extract_genres(genres: &[MalEntity], cap: Option<usize>) -> Vec<String> {
        let names = genres.iter().map(|entity| entity.name.clone());
        match cap {
            Some(cap) => names.take(cap).collect(),
            None => names.collect(),
        }
    }

    /// Date ranges come as RFC3339 strings; the year is the leading field
    fn parse_year(range: Option<&DateRange>) -> Option<i32> {
        range
            .and_then(|r| r.from.as_deref())
            .and_then(|d| d.get(0..4))
            .and_then(|y| y.parse().ok())
    }

    /// Jikan durations read like "24 min per ep" or "136 min"
    fn parse_duration_minutes(duration: Option<&str>) -> Option<u32> {
        duration
            .and_then(|d| d.split_whitespace().next())
            .and_then(|n| n.parse().ok())
    }

    fn clean_text(text: Option<String>) -> Option<String> {
        text.filter(|t| !t.trim().is_empty())
    }
}
