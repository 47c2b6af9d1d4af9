use crate::shared::errors::{AppError, AppResult};
use std::env;
use std::time::Duration;

const DEFAULT_DETAILS_TTL_MINUTES: u64 = 30;

/// Application configuration gathered from environment variables.
///
/// A local `.env` file is honored; real environment variables win over it.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub tmdb_api_key: String,
    pub omdb_api_key: String,
    pub details_cache_ttl: Duration,
}

impl AppConfig {
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();

        let tmdb_api_key = env::var("TMDB_API_KEY").map_err(|_| {
            AppError::ValidationError("TMDB_API_KEY environment variable not found".to_string())
        })?;

        let omdb_api_key = env::var("OMDB_API_KEY").map_err(|_| {
            AppError::ValidationError("OMDB_API_KEY environment variable not found".to_string())
        })?;

        let ttl_minutes = match env::var("DETAILS_CACHE_TTL_MINUTES") {
            Ok(raw) => raw.parse::<u64>().map_err(|_| {
                AppError::ValidationError(format!(
                    "DETAILS_CACHE_TTL_MINUTES must be a positive integer, got '{}'",
                    raw
                ))
            })?,
            Err(_) => DEFAULT_DETAILS_TTL_MINUTES,
        };

        Ok(Self {
            tmdb_api_key,
            omdb_api_key,
            details_cache_ttl: Duration::from_secs(ttl_minutes * 60),
        })
    }
}
