pub mod media_details;
pub mod media_provider;
pub mod media_type;
pub mod search_result;
pub mod sort;

pub use media_details::MediaDetails;
pub use media_provider::MediaProvider;
pub use media_type::MediaType;
pub use search_result::{SearchResult, SEARCH_GENRE_CAP};
pub use sort::{sort_results, SearchSort};
