use super::SearchResult;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Sort policy for aggregated search results
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SearchSort {
    /// Preserves each provider's native order, concatenated in the fixed
    /// branch order. This is not a cross-provider relevance merge.
    #[default]
    Relevance,
    /// Descending by rating; a missing rating sorts as 0
    Rating,
    /// Descending by year; a missing year sorts last
    Year,
}

pub fn sort_results(results: &mut [SearchResult], sort: SearchSort) {
    match sort {
        SearchSort::Relevance => {}
        SearchSort::Rating => {
            results.sort_by(|a, b| {
                let rating_a = a.rating.unwrap_or(0.0);
                let rating_b = b.rating.unwrap_or(0.0);
                rating_b.partial_cmp(&rating_a).unwrap_or(Ordering::Equal)
            });
        }
        SearchSort::Year => {
            results.sort_by(|a, b| {
                let year_a = a.year.unwrap_or(0);
                let year_b = b.year.unwrap_or(0);
                year_b.cmp(&year_a)
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::provider::domain::{MediaProvider, MediaType};

    fn result(title: &str, rating: Option<f32>, year: Option<i32>) -> SearchResult {
        SearchResult {
            id: SearchResult::compose_id(MediaType::Movie, title),
            title: title.to_string(),
            poster: None,
            year,
            rating,
            genres: vec![],
            media_type: MediaType::Movie,
            provider: MediaProvider::Tmdb,
            synopsis: None,
            external_url: None,
            original_id: title.to_string(),
        }
    }

    #[test]
    fn rating_sort_treats_missing_as_zero() {
        let mut results = vec![
            result("a", None, None),
            result("b", Some(9.0), None),
            result("c", Some(7.5), None),
        ];
        sort_results(&mut results, SearchSort::Rating);
        let ratings: Vec<_> = results.iter().map(|r| r.rating).collect();
        assert_eq!(ratings, vec![Some(9.0), Some(7.5), None]);
    }

    #[test]
    fn year_sort_is_descending() {
        let mut results = vec![
            result("a", None, Some(1999)),
            result("b", None, Some(2015)),
            result("c", None, Some(2005)),
        ];
        sort_results(&mut results, SearchSort::Year);
        let years: Vec<_> = results.iter().map(|r| r.year).collect();
        assert_eq!(years, vec![Some(2015), Some(2005), Some(1999)]);
    }

    #[test]
    fn relevance_sort_preserves_order() {
        let mut results = vec![
            result("first", Some(1.0), Some(1990)),
            result("second", Some(9.9), Some(2020)),
        ];
        sort_results(&mut results, SearchSort::Relevance);
        assert_eq!(results[0].title, "first");
        assert_eq!(results[1].title, "second");
    }
}
