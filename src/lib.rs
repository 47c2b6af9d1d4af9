pub mod modules;
pub mod schema;
pub mod shared;

pub use modules::catalog::{MediaRecord, MediaRepository, MediaResolver};
pub use modules::provider::{
    DetailsService, MediaDetails, MediaProvider, MediaType, SearchOutcome, SearchResult,
    SearchService, SearchSort,
};
pub use shared::errors::{AppError, AppResult};
pub use shared::utils::Debouncer;
pub use shared::{AppConfig, Database};
