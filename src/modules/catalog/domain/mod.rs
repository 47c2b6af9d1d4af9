pub mod media_record;
pub mod repository;

pub use media_record::{derive_slug, MediaRecord, NewMediaRecord};
pub use repository::MediaRepository;
