use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported external metadata providers
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum MediaProvider {
    /// TMDB REST API for movies and TV shows
    #[serde(rename = "tmdb")]
    Tmdb,
    /// Jikan (MyAnimeList API) for anime and manga
    #[serde(rename = "jikan")]
    Jikan,
    /// OMDb for general media lookups keyed by IMDb id
    #[serde(rename = "omdb")]
    Omdb,
}

impl MediaProvider {
    /// Tag used in cache keys and the `platform` field of search results
    pub fn tag(&self) -> &'static str {
        match self {
            MediaProvider::Tmdb => "tmdb",
            MediaProvider::Jikan => "jikan",
            MediaProvider::Omdb => "omdb",
        }
    }
}

impl fmt::Display for MediaProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}
