pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::{DetailsService, SearchOutcome, SearchService};
pub use domain::{MediaDetails, MediaProvider, MediaType, SearchResult, SearchSort};
