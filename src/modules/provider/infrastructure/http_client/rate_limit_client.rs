//! HTTP client with automatic rate limiting and retry logic
//!
//! One client per provider; eliminates duplicated request plumbing across
//! adapters and keeps us inside each provider's documented request budget.

use super::retry_policy::{is_retryable_error, RateLimitInfo, RetryPolicy};
use crate::shared::errors::{AppError, AppResult};
use governor::{Jitter, Quota, RateLimiter as GovernorRateLimiter};
use reqwest::{Client, Method, Response};
use std::num::NonZeroU32;
use std::time::Duration;
use tokio::time::sleep;

const USER_AGENT: &str = "hyouka/0.1 (media metadata client)";

/// Spread over rate-limited waits so concurrent branches do not release in
/// lockstep against the same provider
const RATE_LIMIT_JITTER: Duration = Duration::from_millis(100);

type DirectRateLimiter = GovernorRateLimiter<
    governor::state::direct::NotKeyed,
    governor::state::InMemoryState,
    governor::clock::DefaultClock,
    governor::middleware::NoOpMiddleware,
>;

/// HTTP client that handles rate limiting and retries for one provider
pub struct RateLimitClient {
    client: Client,
    rate_limiter: DirectRateLimiter,
    retry_policy: RetryPolicy,
    provider_name: String,
}

impl RateLimitClient {
    /// Client for the TMDB REST API (~40 req/10s documented; stay well under)
    pub fn for_tmdb() -> Self {
        Self::new("TMDB", RetryPolicy::tmdb(), Self::create_rate_limiter(4.0, 8))
    }

    /// Client for the Jikan API (~60 req/min = 1 req/sec with small bursts)
    pub fn for_jikan() -> Self {
        Self::new(
            "Jikan",
            RetryPolicy::jikan(),
            Self::create_rate_limiter(1.0, 3),
        )
    }

    /// Client for OMDb (daily quota; keep the short-term rate modest)
    pub fn for_omdb() -> Self {
        Self::new("OMDb", RetryPolicy::omdb(), Self::create_rate_limiter(2.0, 4))
    }

    /// Create a rate limiter with specified requests per second and burst capacity
    fn create_rate_limiter(requests_per_second: f64, burst_size: u32) -> DirectRateLimiter {
        let duration = if requests_per_second > 0.0 {
            Duration::from_secs_f64(1.0 / requests_per_second)
        } else {
            Duration::MAX
        };

        let burst = NonZeroU32::new(burst_size.max(1)).unwrap();
        let quota = Quota::with_period(duration).unwrap().allow_burst(burst);

        GovernorRateLimiter::direct(quota)
    }

    /// Create a custom client
    pub fn new(
        provider_name: &str,
        retry_policy: RetryPolicy,
        rate_limiter: DirectRateLimiter,
    ) -> Self {
        Self {
            client: Client::new(),
            rate_limiter,
            retry_policy,
            provider_name: provider_name.to_string(),
        }
    }

    /// Make a GET request with rate limiting and retries
    pub async fn get<T>(&self, url: &str) -> AppResult<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.request_with_retries(Method::GET, url).await
    }

    async fn request_with_retries<T>(&self, method: Method, url: &str) -> AppResult<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let mut last_error = None;

        for attempt in 0..=self.retry_policy.max_retries {
            // Wait for rate limiter before attempting request
            self.rate_limiter
                .until_ready_with_jitter(Jitter::up_to(RATE_LIMIT_JITTER))
                .await;

            match self.build_and_send_request(&method, url).await {
                Ok(response) => {
                    if response.status() == 429 {
                        let rate_limit_info = RateLimitInfo::from_headers(response.headers());

                        if attempt < self.retry_policy.max_retries {
                            let delay = self.calculate_retry_delay(attempt, &rate_limit_info);
                            log::warn!(
                                "{} API rate limited (attempt {}/{}). Waiting {:?} before retry.",
                                self.provider_name,
                                attempt + 1,
                                self.retry_policy.max_retries + 1,
                                delay
                            );
                            sleep(delay).await;
                            continue;
                        } else {
                            return Err(AppError::RateLimitError(format!(
                                "{} API rate limit exceeded after {} attempts",
                                self.provider_name,
                                self.retry_policy.max_retries + 1
                            )));
                        }
                    }

                    if !response.status().is_success() {
                        let error_msg = format!(
                            "{} API returned error: {}",
                            self.provider_name,
                            response.status()
                        );

                        // Only retry server errors
                        if response.status().is_server_error()
                            && attempt < self.retry_policy.max_retries
                        {
                            let delay = self.retry_policy.calculate_delay(attempt, None);
                            log::warn!(
                                "{} (attempt {}/{}). Retrying in {:?}",
                                error_msg,
                                attempt + 1,
                                self.retry_policy.max_retries + 1,
                                delay
                            );
                            sleep(delay).await;
                            continue;
                        } else {
                            return Err(AppError::ApiError(error_msg));
                        }
                    }

                    return self.parse_response(response).await;
                }
                Err(e) => {
                    if is_retryable_error(&e) && attempt < self.retry_policy.max_retries {
                        let delay = self.retry_policy.calculate_delay(attempt, None);
                        log::warn!(
                            "{} API request failed (attempt {}/{}): {}. Retrying in {:?}",
                            self.provider_name,
                            attempt + 1,
                            self.retry_policy.max_retries + 1,
                            e,
                            delay
                        );
                        last_error = Some(AppError::ApiError(e.to_string()));
                        sleep(delay).await;
                        continue;
                    } else {
                        return Err(AppError::ApiError(format!(
                            "{} API request failed: {}",
                            self.provider_name, e
                        )));
                    }
                }
            }
        }

        Err(AppError::ApiError(format!(
            "{} API request failed after {} attempts: {}",
            self.provider_name,
            self.retry_policy.max_retries + 1,
            last_error.map_or_else(|| "Unknown error".to_string(), |e| e.to_string())
        )))
    }

    async fn build_and_send_request(
        &self,
        method: &Method,
        url: &str,
    ) -> Result<Response, reqwest::Error> {
        self.client
            .request(method.clone(), url)
            .header("User-Agent", USER_AGENT)
            .header("Accept", "application/json")
            .send()
            .await
    }

    async fn parse_response<T>(&self, response: Response) -> AppResult<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let response_text = response.text().await.map_err(|e| {
            AppError::SerializationError(format!(
                "Failed to read {} response: {}",
                self.provider_name, e
            ))
        })?;

        serde_json::from_str(&response_text).map_err(|e| {
            let body = truncate_body(&response_text, 200);
            AppError::SerializationError(format!(
                "Failed to parse {} response: {}. Response: {}{}",
                self.provider_name,
                e,
                body,
                if body.len() < response_text.len() {
                    "..."
                } else {
                    ""
                }
            ))
        })
    }

    /// Calculate delay for retry based on rate limit info and policy
    fn calculate_retry_delay(&self, attempt: u32, rate_limit_info: &RateLimitInfo) -> Duration {
        if let Some(server_delay) = rate_limit_info.recommended_delay() {
            return server_delay.min(self.retry_policy.max_delay);
        }

        self.retry_policy.calculate_delay(attempt, None)
    }

    /// Check if a request can be made now (for testing/debugging)
    pub fn can_make_request_now(&self) -> bool {
        self.rate_limiter.check().is_ok()
    }

    /// Get provider name
    pub fn provider_name(&self) -> &str {
        &self.provider_name
    }
}

/// Truncate a response body for error messages without splitting a UTF-8
/// character at the cut point
fn truncate_body(text: &str, max_len: usize) -> &str {
    if text.len() <= max_len {
        return text;
    }

    let mut end = max_len;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let tmdb_client = RateLimitClient::for_tmdb();
        assert_eq!(tmdb_client.provider_name(), "TMDB");

        let jikan_client = RateLimitClient::for_jikan();
        assert_eq!(jikan_client.provider_name(), "Jikan");

        let omdb_client = RateLimitClient::for_omdb();
        assert_eq!(omdb_client.provider_name(), "OMDb");
    }

    #[test]
    fn test_can_make_request() {
        let client = RateLimitClient::for_jikan();
        assert!(client.can_make_request_now());
    }

    #[test]
    fn short_body_is_not_truncated() {
        assert_eq!(truncate_body("{\"ok\":true}", 200), "{\"ok\":true}");
    }

    #[test]
    fn long_multibyte_body_truncates_on_char_boundary() {
        // Japanese titles are three bytes per character, so byte 200 lands
        // mid-character in a 210-byte body
        let body = "鋼の錬金術師".repeat(12);
        assert!(body.len() > 200);

        // Walks back from byte 200 to the nearest character boundary at 198
        let truncated = truncate_body(&body, 200);
        assert_eq!(truncated.len(), 198);
        assert!(body.starts_with(truncated));
    }
}
