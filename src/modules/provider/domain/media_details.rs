use super::{MediaProvider, MediaType};
use serde::{Deserialize, Serialize};

/// Rich detail record for one media item.
///
/// Field availability varies by provider: `vote_average` comes from TMDB,
/// `imdb_rating` from OMDb, `mal_score` from Jikan. A single fetch never
/// populates more than one of them. `media_type` is always set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MediaDetails {
    pub external_id: String,
    pub title: String,
    pub media_type: MediaType,
    pub provider: MediaProvider,
    pub poster: Option<String>,
    pub year: Option<i32>,
    pub synopsis: Option<String>,
    /// Uncapped, provider-relevance order
    pub genres: Vec<String>,
    pub cast: Vec<String>,
    pub runtime_minutes: Option<u32>,
    pub studios: Vec<String>,
    pub production_companies: Vec<String>,
    pub external_links: Vec<String>,
    pub vote_average: Option<f32>,
    pub imdb_rating: Option<f32>,
    pub mal_score: Option<f32>,
}

impl MediaDetails {
    /// Minimal record with every optional field absent
    pub fn bare(
        external_id: impl Into<String>,
        title: impl Into<String>,
        media_type: MediaType,
        provider: MediaProvider,
    ) -> Self {
        Self {
            external_id: external_id.into(),
            title: title.into(),
            media_type,
            provider,
            poster: None,
            year: None,
            synopsis: None,
            genres: Vec::new(),
            cast: Vec::new(),
            runtime_minutes: None,
            studios: Vec::new(),
            production_companies: Vec::new(),
            external_links: Vec::new(),
            vote_average: None,
            imdb_rating: None,
            mal_score: None,
        }
    }

    /// Whichever provider-specific rating this record carries
    pub fn rating(&self) -> Option<f32> {
        self.vote_average.or(self.imdb_rating).or(self.mal_score)
    }
}
