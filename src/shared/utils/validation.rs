use crate::shared::errors::{AppError, AppResult};

const MAX_QUERY_LENGTH: usize = 256;
const MAX_RESULTS_PER_BRANCH: usize = 25;

pub struct Validator;

impl Validator {
    /// Validate a free-text search query before it reaches any provider
    pub fn validate_search_query(query: &str) -> AppResult<()> {
        let trimmed = query.trim();

        if trimmed.is_empty() {
            return Err(AppError::ValidationError(
                "Search query cannot be empty".to_string(),
            ));
        }

        if trimmed.len() > MAX_QUERY_LENGTH {
            return Err(AppError::ValidationError(format!(
                "Search query too long: {} characters (max {})",
                trimmed.len(),
                MAX_QUERY_LENGTH
            )));
        }

        Ok(())
    }

    /// Validate the per-branch result cap
    pub fn validate_result_limit(limit: usize) -> AppResult<()> {
        if limit == 0 || limit > MAX_RESULTS_PER_BRANCH {
            return Err(AppError::ValidationError(format!(
                "Result limit must be between 1 and {}, got {}",
                MAX_RESULTS_PER_BRANCH, limit
            )));
        }

        Ok(())
    }

    /// Validate a provider-native external id
    pub fn validate_external_id(external_id: &str) -> AppResult<()> {
        if external_id.trim().is_empty() {
            return Err(AppError::ValidationError(
                "External id cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_query() {
        assert!(Validator::validate_search_query("   ").is_err());
    }

    #[test]
    fn accepts_reasonable_query() {
        assert!(Validator::validate_search_query("The Matrix").is_ok());
    }

    #[test]
    fn rejects_zero_limit() {
        assert!(Validator::validate_result_limit(0).is_err());
        assert!(Validator::validate_result_limit(8).is_ok());
    }

    #[test]
    fn rejects_blank_external_id() {
        assert!(Validator::validate_external_id("").is_err());
        assert!(Validator::validate_external_id("tt0133093").is_ok());
    }
}
