pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::MediaResolver;
pub use domain::{MediaRecord, MediaRepository, NewMediaRecord};
pub use infrastructure::MediaRepositoryImpl;
